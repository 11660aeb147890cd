//! # HTTP API
//!
//! Builds the axum router that exposes Tucano over HTTP. Handlers are thin
//! JSON shims over the application services; every rule lives in the core.
//!
//! ## Endpoints
//!
//! | Method | Path                            | Description                      |
//! |--------|---------------------------------|----------------------------------|
//! | GET    | `/health`                       | Liveness probe                   |
//! | GET    | `/status`                       | Server status summary            |
//! | POST   | `/owners`                       | Register an owner                |
//! | GET    | `/owners/:id`                   | Owner by id                      |
//! | GET    | `/owners/:id/contacts`          | Contacts of an owner             |
//! | GET    | `/owners/:id/transactions`      | Transfers of an owner            |
//! | POST   | `/contacts`                     | Create a contact                 |
//! | GET    | `/contacts/:id`                 | Contact by id                    |
//! | DELETE | `/contacts/:id`                 | Delete a contact                 |
//! | POST   | `/contacts/:id/keys`            | Add a key to a contact           |
//! | DELETE | `/contacts/:id/keys/:key_id`    | Remove a key from a contact      |
//! | POST   | `/transactions`                 | Create a transfer                |
//! | GET    | `/transactions?status=`         | Transfers by status              |
//! | GET    | `/transactions/:id`             | Transfer by id                   |
//! | POST   | `/transactions/:id/execute`     | Execute a transfer               |
//! | POST   | `/transactions/:id/cancel`      | Cancel a transfer                |
//! | POST   | `/transactions/:id/fail`        | Mark a transfer failed           |
//! | POST   | `/pix/charges`                  | Create a charge at the bank      |
//! | GET    | `/pix/charges?status=`          | Charges by status                |
//! | GET    | `/pix/charges/:txid`            | Charge by txid                   |
//! | DELETE | `/pix/charges/:txid`            | Cancel a charge                  |

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tucano_core::contact::NewContactKey;
use tucano_core::service::{
    ChargeService, ContactService, NewCharge, OwnerService, ServiceError, TransferService,
};
use tucano_core::store::GatewayError;
use tucano_core::transaction::{NewTransaction, TransactionStatus};

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone — services hold their collaborators behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The server's reported version string.
    pub version: String,
    /// Owner registration and lookup.
    pub owners: OwnerService,
    /// Contact management.
    pub contacts: ContactService,
    /// Transfer lifecycle.
    pub transfers: TransferService,
    /// Charge creation and queries.
    pub charges: ChargeService,
    /// Prometheus handles for in-handler recording.
    pub metrics: SharedMetrics,
}

// ---------------------------------------------------------------------------
// Error Mapping
// ---------------------------------------------------------------------------

/// Wraps a [`ServiceError`] with its HTTP projection.
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

/// JSON error body, the only error shape this API speaks.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description of the first violated rule.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::InvalidOwner(_)
            | ServiceError::InvalidContact(_)
            | ServiceError::InvalidTransaction(_)
            | ServiceError::InvalidCharge(_) => StatusCode::BAD_REQUEST,
            ServiceError::Transition(_) | ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Gateway(GatewayError::Unsupported(_)) => StatusCode::NOT_IMPLEMENTED,
            ServiceError::Gateway(_) => StatusCode::BAD_GATEWAY,
        };

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/owners", post(create_owner))
        .route("/owners/:id", get(get_owner))
        .route("/owners/:id/contacts", get(list_owner_contacts))
        .route("/owners/:id/transactions", get(list_owner_transactions))
        .route("/contacts", post(create_contact))
        .route("/contacts/:id", get(get_contact).delete(delete_contact))
        .route("/contacts/:id/keys", post(add_contact_key))
        .route("/contacts/:id/keys/:key_id", delete(remove_contact_key))
        .route("/transactions", post(create_transaction).get(list_transactions))
        .route("/transactions/:id", get(get_transaction))
        .route("/transactions/:id/execute", post(execute_transaction))
        .route("/transactions/:id/cancel", post(cancel_transaction))
        .route("/transactions/:id/fail", post(fail_transaction))
        .route("/pix/charges", post(create_charge).get(list_charges))
        .route("/pix/charges/:txid", get(get_charge).delete(cancel_charge))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Body for `POST /owners`.
#[derive(Debug, Deserialize)]
pub struct CreateOwnerBody {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// CPF.
    pub tax_id: String,
}

/// Body for `POST /contacts`.
#[derive(Debug, Deserialize)]
pub struct CreateContactBody {
    /// The owning account holder.
    pub owner_id: String,
    /// Display name, unique per owner.
    pub name: String,
    /// Initial key bundle.
    pub keys: Vec<NewContactKey>,
}

/// Query for `GET /transactions`.
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    /// Status to filter by.
    pub status: TransactionStatus,
}

/// Query for `GET /pix/charges`.
#[derive(Debug, Deserialize)]
pub struct ChargesQuery {
    /// Status to filter by.
    pub status: tucano_core::charge::ChargeStatus,
}

/// Response payload for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server software version.
    pub version: String,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(StatusResponse {
        version: state.version.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// -- owners -----------------------------------------------------------------

async fn create_owner(
    State(state): State<AppState>,
    Json(body): Json<CreateOwnerBody>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = state
        .owners
        .create(&body.name, &body.email, &body.tax_id)
        .await?;
    Ok((StatusCode::CREATED, Json(owner)))
}

async fn get_owner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.owners.get(&id).await?))
}

async fn list_owner_contacts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // Fetch the owner first so unknown ids 404 instead of listing nothing.
    state.owners.get(&id).await?;
    Ok(Json(state.contacts.list_by_owner(&id).await?))
}

async fn list_owner_transactions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.owners.get(&id).await?;
    Ok(Json(state.transfers.list_by_owner(&id).await?))
}

// -- contacts ---------------------------------------------------------------

async fn create_contact(
    State(state): State<AppState>,
    Json(body): Json<CreateContactBody>,
) -> Result<impl IntoResponse, ApiError> {
    let contact = state
        .contacts
        .create(&body.owner_id, &body.name, &body.keys)
        .await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.contacts.get(&id).await?))
}

async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.contacts.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_contact_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(key): Json<NewContactKey>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.contacts.add_key(&id, key).await?))
}

async fn remove_contact_key(
    State(state): State<AppState>,
    Path((id, key_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.contacts.remove_key(&id, &key_id).await?))
}

// -- transactions -----------------------------------------------------------

async fn create_transaction(
    State(state): State<AppState>,
    Json(body): Json<NewTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state.transfers.create(body).await?;
    state.metrics.transfers_created_total.inc();
    Ok((StatusCode::CREATED, Json(tx)))
}

async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.transfers.list_by_status(query.status).await?))
}

async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.transfers.get(&id).await?))
}

async fn execute_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state.transfers.execute(&id).await?;
    state.metrics.transfers_executed_total.inc();
    Ok(Json(tx))
}

async fn cancel_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state.transfers.cancel(&id).await?;
    state.metrics.transfers_cancelled_total.inc();
    Ok(Json(tx))
}

async fn fail_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.transfers.fail(&id).await?))
}

// -- charges ----------------------------------------------------------------

async fn create_charge(
    State(state): State<AppState>,
    Json(body): Json<NewCharge>,
) -> Result<impl IntoResponse, ApiError> {
    let charge = state.charges.create(body).await?;
    state.metrics.charges_created_total.inc();
    Ok((StatusCode::CREATED, Json(charge)))
}

async fn list_charges(
    State(state): State<AppState>,
    Query(query): Query<ChargesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.charges.list_by_status(query.status).await?))
}

async fn get_charge(
    State(state): State<AppState>,
    Path(txid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.charges.get_by_txid(&txid).await?))
}

async fn cancel_charge(
    State(state): State<AppState>,
    Path(txid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.charges.cancel(&txid).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use async_trait::async_trait;
    use tucano_core::charge::{Charge, ChargeRequest, ChargeStatus};
    use tucano_core::store::memory::{
        MemoryContactStore, MemoryOwnerDirectory, MemoryTransactionStore,
    };
    use tucano_core::store::ChargeGateway;

    /// Gateway double so charge routes work without a bank.
    struct NullGateway;

    #[async_trait]
    impl ChargeGateway for NullGateway {
        async fn create_charge(
            &self,
            request: &ChargeRequest,
        ) -> Result<Charge, tucano_core::store::GatewayError> {
            let now = chrono::Utc::now();
            Ok(Charge {
                id: "tx-1".into(),
                txid: "tx-1".into(),
                location_url: "pix.example/qr/tx-1".into(),
                status: ChargeStatus::Active,
                amount: request.amount,
                payer_name: request.payer_name.clone(),
                payer_tax_id: request.payer_tax_id.clone(),
                payer_email: request.payer_email.clone(),
                description: request.description.clone(),
                expires_at: request.expires_at,
                created_at: now,
                updated_at: now,
            })
        }

        async fn charge_by_txid(
            &self,
            _txid: &str,
        ) -> Result<Option<Charge>, tucano_core::store::GatewayError> {
            Ok(None)
        }

        async fn charges_by_status(
            &self,
            _status: ChargeStatus,
        ) -> Result<Vec<Charge>, tucano_core::store::GatewayError> {
            Ok(vec![])
        }

        async fn cancel_charge(
            &self,
            _txid: &str,
        ) -> Result<(), tucano_core::store::GatewayError> {
            Ok(())
        }
    }

    fn test_router() -> Router {
        let owners = Arc::new(MemoryOwnerDirectory::new());
        let state = AppState {
            version: "test".into(),
            owners: OwnerService::new(owners.clone()),
            contacts: ContactService::new(Arc::new(MemoryContactStore::new()), owners.clone()),
            transfers: TransferService::new(Arc::new(MemoryTransactionStore::new()), owners),
            charges: ChargeService::new(Arc::new(NullGateway)),
            metrics: Arc::new(crate::metrics::ServerMetrics::new()),
        };
        create_router(state)
    }

    async fn request(
        router: &Router,
        method: &str,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(path);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let router = test_router();
        let (status, body) = request(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn owner_transfer_flow_over_http() {
        let router = test_router();

        let (status, owner) = request(
            &router,
            "POST",
            "/owners",
            Some(serde_json::json!({
                "name": "Ana",
                "email": "ana@mail.co",
                "tax_id": "11144477735"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let owner_id = owner["id"].as_str().unwrap().to_string();

        let (status, tx) = request(
            &router,
            "POST",
            "/transactions",
            Some(serde_json::json!({
                "owner_id": owner_id,
                "amount": 1000,
                "description": "rent",
                "target_key": "a@b.co",
                "target_key_type": "EMAIL",
                "kind": "IMMEDIATE",
                "scheduled_at": null
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(tx["status"], "PENDING");
        let tx_id = tx["id"].as_str().unwrap().to_string();

        let (status, executed) =
            request(&router, "POST", &format!("/transactions/{tx_id}/execute"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(executed["status"], "EXECUTED");

        // A second execute hits the state guard.
        let (status, body) =
            request(&router, "POST", &format!("/transactions/{tx_id}/execute"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("cannot be executed"));
    }

    #[tokio::test]
    async fn validation_failures_are_bad_requests() {
        let router = test_router();
        let (status, body) = request(
            &router,
            "POST",
            "/owners",
            Some(serde_json::json!({
                "name": "Ana",
                "email": "not-an-email",
                "tax_id": "11144477735"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid email address");
    }

    #[tokio::test]
    async fn unknown_records_are_not_found() {
        let router = test_router();
        let (status, _) = request(&router, "GET", "/owners/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = request(&router, "GET", "/transactions/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = request(&router, "GET", "/pix/charges/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn transactions_filter_by_status() {
        let router = test_router();
        let (_, owner) = request(
            &router,
            "POST",
            "/owners",
            Some(serde_json::json!({
                "name": "Bia",
                "email": "bia@mail.co",
                "tax_id": "12345678909"
            })),
        )
        .await;
        let owner_id = owner["id"].as_str().unwrap();

        request(
            &router,
            "POST",
            "/transactions",
            Some(serde_json::json!({
                "owner_id": owner_id,
                "amount": 500,
                "description": "gift",
                "target_key": "bia@mail.co",
                "target_key_type": "EMAIL",
                "kind": "IMMEDIATE",
                "scheduled_at": null
            })),
        )
        .await;

        let (status, pending) =
            request(&router, "GET", "/transactions?status=PENDING", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pending.as_array().unwrap().len(), 1);

        let (_, executed) =
            request(&router, "GET", "/transactions?status=EXECUTED", None).await;
        assert_eq!(executed.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn charge_creation_round_trips_through_the_gateway() {
        let router = test_router();
        let (status, charge) = request(
            &router,
            "POST",
            "/pix/charges",
            Some(serde_json::json!({
                "amount": 5000,
                "payer_name": "Maria Souza",
                "payer_tax_id": "11144477735",
                "payer_email": "maria@mail.co",
                "description": "invoice 42",
                "expiration_minutes": 30
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(charge["status"], "ACTIVE");
        assert_eq!(charge["txid"], "tx-1");
    }
}

//! Charge creation and queries against the payment gateway.

use std::sync::Arc;

use super::ServiceError;
use crate::charge::{Charge, ChargeRequest, ChargeStatus};
use crate::store::ChargeGateway;
use crate::transaction::Amount;

/// Inputs for a charge, as received from a caller.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewCharge {
    /// Amount in centavos.
    pub amount: Amount,
    /// Payer display name.
    pub payer_name: String,
    /// Payer CPF.
    pub payer_tax_id: String,
    /// Payer email.
    pub payer_email: String,
    /// Free-text request shown to the payer.
    pub description: String,
    /// Expiry window in minutes; defaults to an hour when omitted.
    #[serde(default)]
    pub expiration_minutes: Option<i64>,
}

/// Validates charge requests and hands them to the gateway.
#[derive(Clone)]
pub struct ChargeService {
    gateway: Arc<dyn ChargeGateway>,
}

impl ChargeService {
    /// Creates a service over the given gateway.
    pub fn new(gateway: Arc<dyn ChargeGateway>) -> Self {
        Self { gateway }
    }

    /// Builds and submits a charge. The returned record carries the bank's
    /// identifiers and confirmed calendar, which supersede anything computed
    /// locally.
    pub async fn create(&self, input: NewCharge) -> Result<Charge, ServiceError> {
        let request = ChargeRequest::build(
            input.amount,
            &input.payer_name,
            &input.payer_tax_id,
            &input.payer_email,
            &input.description,
            input.expiration_minutes,
        )?;

        let charge = self.gateway.create_charge(&request).await?;
        tracing::info!(txid = %charge.txid, amount = %charge.amount, "charge created");
        Ok(charge)
    }

    /// Fetches a charge by its bank-assigned txid.
    pub async fn get_by_txid(&self, txid: &str) -> Result<Charge, ServiceError> {
        self.gateway
            .charge_by_txid(txid)
            .await?
            .ok_or_else(|| ServiceError::not_found("charge", txid))
    }

    /// Lists charges in a given status, where the gateway supports it.
    pub async fn list_by_status(&self, status: ChargeStatus) -> Result<Vec<Charge>, ServiceError> {
        Ok(self.gateway.charges_by_status(status).await?)
    }

    /// Cancels a charge by txid.
    pub async fn cancel(&self, txid: &str) -> Result<(), ServiceError> {
        self.gateway.cancel_charge(txid).await?;
        tracing::info!(txid, "charge cancelled");
        Ok(())
    }
}

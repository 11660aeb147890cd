//! Wire DTOs for the bank's charge API.
//!
//! Field names are the bank's, in Portuguese, held in place with serde
//! renames. These types never leak past the client boundary — the rest of
//! the workspace speaks the domain types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use tucano_core::charge::{Charge, ChargeRequest, ChargeStatus};
use tucano_core::store::GatewayError;
use tucano_core::transaction::Amount;

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

/// `POST /v2/cob` body.
#[derive(Debug, Serialize)]
pub struct CreateChargePayload {
    pub calendario: CalendarioRequest,
    pub devedor: Devedor,
    pub valor: Valor,
    /// The PIX key the charge is received on.
    pub chave: String,
    #[serde(rename = "solicitacaoPagador", skip_serializing_if = "Option::is_none")]
    pub solicitacao_pagador: Option<String>,
}

/// Requested expiry, in seconds from creation.
#[derive(Debug, Serialize)]
pub struct CalendarioRequest {
    pub expiracao: i64,
}

/// The payer ("devedor" — the one who owes).
#[derive(Debug, Serialize, Deserialize)]
pub struct Devedor {
    pub nome: String,
    pub cpf: String,
}

/// Amount envelope. The bank wants a fixed-point decimal string.
#[derive(Debug, Serialize, Deserialize)]
pub struct Valor {
    pub original: String,
}

impl CreateChargePayload {
    /// Builds the wire payload from a validated request.
    ///
    /// Normalization happens here: the payer's CPF is stripped to digits
    /// and the amount becomes a two-decimal string, both as the bank
    /// demands.
    pub fn from_request(request: &ChargeRequest, receiver_key: &str) -> Self {
        Self {
            calendario: CalendarioRequest {
                expiracao: request.expiration_minutes * 60,
            },
            devedor: Devedor {
                nome: request.payer_name.clone(),
                cpf: digits_only(&request.payer_tax_id),
            },
            valor: Valor {
                original: request.amount.to_string(),
            },
            chave: receiver_key.to_string(),
            solicitacao_pagador: Some(request.description.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Response payload
// ---------------------------------------------------------------------------

/// `POST /v2/cob` and `GET /v2/cob/{txid}` response body.
#[derive(Debug, Deserialize)]
pub struct ChargeResponse {
    pub calendario: CalendarioResponse,
    pub txid: String,
    #[serde(default)]
    pub revisao: u32,
    pub loc: Location,
    pub status: String,
    pub devedor: Devedor,
    pub valor: Valor,
    #[serde(default)]
    pub chave: Option<String>,
    #[serde(rename = "solicitacaoPagador", default)]
    pub solicitacao_pagador: Option<String>,
}

/// Confirmed calendar: the bank's creation instant plus the granted expiry.
#[derive(Debug, Deserialize)]
pub struct CalendarioResponse {
    pub criacao: DateTime<Utc>,
    pub expiracao: i64,
}

/// Payment location the payer is pointed at.
#[derive(Debug, Deserialize)]
pub struct Location {
    pub id: u64,
    pub location: String,
    #[serde(rename = "tipoCob", default)]
    pub tipo_cob: Option<String>,
}

impl ChargeResponse {
    /// Maps the bank's response into a domain [`Charge`].
    ///
    /// The bank's calendar is authoritative: `created_at` is its creation
    /// instant and `expires_at` is creation plus the granted expiry. The
    /// payer email is carried from the request because the bank never
    /// echoes it.
    pub fn into_charge(self, payer_email: &str) -> Result<Charge, GatewayError> {
        let status = ChargeStatus::from_wire(&self.status);
        if status.as_wire() != self.status {
            tracing::warn!(raw = %self.status, "unrecognized charge status, treating as ATIVA");
        }

        let amount = parse_wire_amount(&self.valor.original).ok_or_else(|| {
            GatewayError::Decode(format!("unparseable amount: {:?}", self.valor.original))
        })?;

        let created_at = self.calendario.criacao;
        Ok(Charge {
            id: self.txid.clone(),
            txid: self.txid,
            location_url: self.loc.location,
            status,
            amount,
            payer_name: self.devedor.nome,
            payer_tax_id: self.devedor.cpf,
            payer_email: payer_email.to_string(),
            description: self.solicitacao_pagador.unwrap_or_default(),
            expires_at: created_at + Duration::seconds(self.calendario.expiracao),
            created_at,
            updated_at: Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Strips everything but ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Parses the bank's fixed-point decimal string into centavos.
///
/// Accepts zero, one, or two fraction digits; anything longer is not a
/// BRL amount and is rejected rather than rounded.
pub fn parse_wire_amount(raw: &str) -> Option<Amount> {
    let (whole, frac) = match raw.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (raw, ""),
    };

    let whole: u64 = whole.parse().ok()?;
    let frac: u64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<u64>().ok()? * 10,
        2 => frac.parse().ok()?,
        _ => return None,
    };

    Some(Amount::from_centavos(whole * 100 + frac))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

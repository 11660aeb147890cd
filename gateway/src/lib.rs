// Copyright (c) 2026 Tucano Maintainers. MIT License.
// See LICENSE for details.

//! # Tucano Gateway — Banco do Brasil PIX Client
//!
//! The one place in the workspace that talks to the bank. Implements the
//! core's [`ChargeGateway`](tucano_core::store::ChargeGateway) contract
//! against the Banco do Brasil PIX API: OAuth2 client-credentials
//! authentication with a cached token, charge creation, lookup, and
//! cancellation.
//!
//! Everything crossing the wire keeps the bank's Portuguese field names
//! (`calendario`, `devedor`, `valor`, `chave`) via serde renames — the DTOs
//! in [`wire`] are the bank's schema, not ours. Mapping into the domain's
//! [`Charge`](tucano_core::charge::Charge) happens at the client boundary
//! and nowhere else.
//!
//! Failures are surfaced as
//! [`GatewayError`](tucano_core::store::GatewayError) without retries;
//! retry policy, if any, belongs to whoever calls us.

pub mod auth;
pub mod client;
pub mod config;
pub mod wire;

pub use client::BancoDoBrasilGateway;
pub use config::{ConfigError, GatewayConfig};

// Copyright (c) 2026 Tucano Maintainers. MIT License.
// See LICENSE for details.

//! # Tucano — Core Domain Engine
//!
//! The heart of Tucano: a payment-initiation backend for the Brazilian PIX
//! rail. Everything that decides whether money is allowed to move lives in
//! this crate; everything that actually moves it (the bank's API, storage,
//! HTTP) is a collaborator behind a trait.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the concerns of a payment
//! initiator:
//!
//! - **keys** — PIX key validation: CPF check digits, email/phone formats,
//!   random (EVP) keys. Pure functions, no I/O, no surprises.
//! - **owner** — Account holders on whose behalf everything happens.
//! - **contact** — Saved payees, each carrying a small bundle of PIX keys.
//! - **transaction** — The transfer lifecycle: creation validation,
//!   immediate/scheduled/automatic rules, and the state machine.
//! - **charge** — Outbound charge requests (cobranças) validated before
//!   they are handed to the bank.
//! - **store** — Collaborator contracts (directories, stores, the payment
//!   gateway) plus in-memory implementations.
//! - **service** — Application services that tie validation, records, and
//!   collaborators together, one per operation family.
//! - **config** — Every limit and magic number, in one place.
//!
//! ## Design Philosophy
//!
//! 1. Validation is pure and ordered cheapest-first; the first violated rule
//!    wins and nothing is silently corrected.
//! 2. Records are immutable — every lifecycle transition returns a new value.
//! 3. Amounts are integer centavos. No floating point anywhere near money.
//! 4. If it touches money, it has tests. Plural.

pub mod charge;
pub mod config;
pub mod contact;
pub mod keys;
pub mod owner;
pub mod service;
pub mod store;
pub mod transaction;

//! Nation Bridge - Webhook reconciliation for a NationBuilder CRM.
//!
//! Accepts payment, subscription and signature webhooks from third-party
//! providers (Raisely, Action Network) and reconciles them against the CRM's
//! person and membership records: each inbound event is resolved to exactly
//! one canonical person, then the correct membership lifecycle transition
//! (create / extend / cancel) is computed and written back.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod observability;
pub mod ports;

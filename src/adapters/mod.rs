//! Adapters - Implementations of the CRM ports.

pub mod nationbuilder;

//! `pedidos-infra` — persistence for orders and their line items.
//!
//! The store grants per-record atomic writes only; multi-item operations are
//! sequenced by the orchestrator and are deliberately not wrapped in a
//! cross-record transaction.

pub mod order_store;
pub mod postgres;

pub use order_store::{InMemoryOrderStore, OrderStore, StoreError};
pub use postgres::PostgresOrderStore;

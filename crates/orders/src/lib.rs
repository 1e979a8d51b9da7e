//! `pedidos-orders` — pure order domain: records and total computation.

pub mod model;
pub mod totals;

pub use model::{LineItem, Order};
pub use totals::{compute_totals, OrderTotals};

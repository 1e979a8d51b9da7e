use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pedidos_core::{ArticleId, OrderId};

/// An order ("pedido") with its stored totals.
///
/// Totals are recomputed from the full line-item set whenever that set
/// changes; they are never updated incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub precio_total_sin_impuestos: Decimal,
    pub precio_total_con_impuestos: Decimal,
    pub fecha_creacion: DateTime<Utc>,
}

impl Order {
    /// A freshly created, still-empty order (zero totals).
    pub fn new(id: OrderId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            precio_total_sin_impuestos: Decimal::ZERO,
            precio_total_con_impuestos: Decimal::ZERO,
            fecha_creacion: created_at,
        }
    }
}

/// One article-quantity entry within an order ("detalle").
///
/// Pricing and name fields are a snapshot copied from the article service at
/// creation/edit time; they do not track later changes to the source article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub pedido_id: OrderId,
    pub articulo_id: ArticleId,
    pub referencia: String,
    pub nombre: String,
    pub precio_sin_impuestos: Decimal,
    /// Applicable tax rate, as a percentage (21 means 21%).
    pub impuesto_aplicable: Decimal,
    pub cantidad: i64,
}

impl LineItem {
    /// Tax-inclusive unit price: `precio * (1 + impuesto/100)`.
    pub fn precio_con_impuestos(&self) -> Decimal {
        self.precio_sin_impuestos
            + self.precio_sin_impuestos * self.impuesto_aplicable / Decimal::ONE_HUNDRED
    }

    /// Like [`precio_con_impuestos`](Self::precio_con_impuestos), but `None`
    /// when the decimal arithmetic would overflow.
    pub fn checked_precio_con_impuestos(&self) -> Option<Decimal> {
        let tax = self
            .precio_sin_impuestos
            .checked_mul(self.impuesto_aplicable)?
            / Decimal::ONE_HUNDRED;
        self.precio_sin_impuestos.checked_add(tax)
    }
}

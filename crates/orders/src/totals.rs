//! Order total computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::LineItem;

/// Tax-exclusive and tax-inclusive order totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub sin_impuestos: Decimal,
    pub con_impuestos: Decimal,
}

impl OrderTotals {
    pub const ZERO: OrderTotals = OrderTotals {
        sin_impuestos: Decimal::ZERO,
        con_impuestos: Decimal::ZERO,
    };
}

/// Compute order totals from a line-item set.
///
/// `sin_impuestos = Σ precio * cantidad`
/// `con_impuestos = Σ (precio + precio * impuesto/100) * cantidad`
///
/// Decimal arithmetic throughout; no rounding mid-computation. Items are
/// accumulated in iteration order. Returns `None` if any intermediate value
/// overflows `Decimal` (quantities go up to `i64::MAX`, prices come from an
/// external service).
pub fn compute_totals<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Option<OrderTotals> {
    let mut totals = OrderTotals::ZERO;
    for item in items {
        let cantidad = Decimal::from(item.cantidad);
        let sin = item.precio_sin_impuestos.checked_mul(cantidad)?;
        let con = item.checked_precio_con_impuestos()?.checked_mul(cantidad)?;
        totals.sin_impuestos = totals.sin_impuestos.checked_add(sin)?;
        totals.con_impuestos = totals.con_impuestos.checked_add(con)?;
    }
    Some(totals)
}

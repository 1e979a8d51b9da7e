use serde::Deserialize;

use pedidos_core::ArticleId;
use pedidos_orders::LineItem;

use crate::app::services::{OrderView, RequestedItem};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /pedidos` and `PUT /pedidos/{id}`.
#[derive(Debug, Deserialize)]
pub struct PedidoItemsRequest {
    #[serde(default)]
    pub articulos: Vec<PedidoItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct PedidoItemRequest {
    pub id: i64,
    pub cantidad: i64,
}

pub fn requested_items(req: &PedidoItemsRequest) -> Vec<RequestedItem> {
    req.articulos
        .iter()
        .map(|a| RequestedItem {
            articulo_id: ArticleId::new(a.id),
            cantidad: a.cantidad,
        })
        .collect()
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Order shape returned by `GET /pedidos/{id}` and `GET /pedidos`.
pub fn pedido_to_json(view: &OrderView) -> serde_json::Value {
    pedido_json(view, false)
}

/// Order shape returned by `PUT /pedidos/{id}` (items carry `articulo_id`).
pub fn pedido_edit_to_json(view: &OrderView) -> serde_json::Value {
    pedido_json(view, true)
}

fn pedido_json(view: &OrderView, with_article_ids: bool) -> serde_json::Value {
    serde_json::json!({
        "id": view.order.id.to_string(),
        "articulos": view
            .items
            .iter()
            .map(|item| detalle_to_json(item, with_article_ids))
            .collect::<Vec<_>>(),
        "precio_total_sin_impuestos": view.order.precio_total_sin_impuestos,
        "precio_total_con_impuestos": view.order.precio_total_con_impuestos,
        "fecha_creacion": view.order.fecha_creacion.to_rfc3339(),
    })
}

fn detalle_to_json(item: &LineItem, with_article_id: bool) -> serde_json::Value {
    let mut value = serde_json::json!({
        "referencia": item.referencia,
        "nombre": item.nombre,
        "cantidad": item.cantidad,
        "precio_sin_impuestos": item.precio_sin_impuestos,
        "precio_con_impuestos": item.precio_con_impuestos(),
    });
    if with_article_id {
        value["articulo_id"] = serde_json::json!(item.articulo_id.as_i64());
    }
    value
}

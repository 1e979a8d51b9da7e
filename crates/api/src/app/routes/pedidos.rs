use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use pedidos_core::OrderId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/pedidos", post(create_pedido).get(list_pedidos))
        .route("/pedidos/:id", get(get_pedido).put(edit_pedido))
}

pub async fn create_pedido(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::PedidoItemsRequest>,
) -> axum::response::Response {
    let items = dto::requested_items(&body);

    match services.create_order(&items).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": id.to_string() })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn edit_pedido(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::PedidoItemsRequest>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid order id"),
    };
    let items = dto::requested_items(&body);

    match services.edit_order(id, &items).await {
        Ok(view) => (StatusCode::OK, Json(dto::pedido_edit_to_json(&view))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_pedido(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid order id"),
    };

    match services.get_order(id).await {
        Ok(view) => (StatusCode::OK, Json(dto::pedido_to_json(&view))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_pedidos(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_orders().await {
        Ok(views) => {
            let body = views.iter().map(dto::pedido_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

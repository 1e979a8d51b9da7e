use axum::Router;

pub mod pedidos;
pub mod system;

pub fn router() -> Router {
    Router::new().merge(pedidos::router())
}

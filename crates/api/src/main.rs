use std::sync::Arc;

use pedidos_api::app::services::AppServices;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pedidos_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let services = Arc::new(AppServices::build_from_env().await?);
    let app = pedidos_api::app::build_app(jwt_secret, services);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

//! The order orchestrator: create/edit/get/list over the store and the
//! article gateway.
//!
//! External calls are sequential and block per item; the first failing item
//! determines the reported error. The multi-item operations are not atomic
//! across steps, matching the per-record guarantees of the store.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use pedidos_articles::{
    ArticleGateway, ArticleInfo, ArticleUpdate, ArticlesConfig, GatewayError, HttpArticleGateway,
};
use pedidos_core::{ArticleId, DomainError, OrderId};
use pedidos_infra::{InMemoryOrderStore, OrderStore, PostgresOrderStore, StoreError};
use pedidos_orders::{compute_totals, LineItem, Order};

/// One `{id, cantidad}` pair from an incoming request.
#[derive(Debug, Clone, Copy)]
pub struct RequestedItem {
    pub articulo_id: ArticleId,
    pub cantidad: i64,
}

/// An order together with its line items, ready for serialization.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub order: Order,
    pub items: Vec<LineItem>,
}

pub struct AppServices {
    store: Arc<dyn OrderStore>,
    articles: Arc<dyn ArticleGateway>,
}

impl AppServices {
    pub fn new(store: Arc<dyn OrderStore>, articles: Arc<dyn ArticleGateway>) -> Self {
        Self { store, articles }
    }

    /// Wire the store and gateway from environment variables
    /// (`USE_PERSISTENT_STORES`/`DATABASE_URL`, `ARTICULOS_*`).
    pub async fn build_from_env() -> anyhow::Result<Self> {
        let use_persistent = std::env::var("USE_PERSISTENT_STORES")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        let store: Arc<dyn OrderStore> = if use_persistent {
            let database_url = std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")?;
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .context("failed to connect to Postgres")?;
            Arc::new(PostgresOrderStore::new(pool))
        } else {
            tracing::warn!("using in-memory order store; orders will not survive a restart");
            Arc::new(InMemoryOrderStore::new())
        };

        let config = ArticlesConfig::from_env().context("article service configuration")?;
        let articles: Arc<dyn ArticleGateway> = Arc::new(
            HttpArticleGateway::new(config).context("failed to build article service client")?,
        );

        Ok(Self::new(store, articles))
    }

    /// Create an order from `{id, cantidad}` pairs. Returns the new order id.
    ///
    /// The order record is created first and populated item by item. A bad
    /// quantity or a missing article deletes the just-created order; an
    /// auth/upstream failure is treated as transient and leaves the partial
    /// order in place.
    pub async fn create_order(&self, items: &[RequestedItem]) -> Result<OrderId, DomainError> {
        if items.is_empty() {
            return Err(DomainError::validation("at least one article is required"));
        }

        let order = Order::new(OrderId::new(), Utc::now());
        self.store.insert_order(&order).await.map_err(store_error)?;

        let mut line_items = Vec::with_capacity(items.len());
        for requested in items {
            if requested.cantidad <= 0 {
                self.discard_order(order.id).await;
                return Err(DomainError::validation("quantity must be positive"));
            }

            let info = match self.articles.fetch_article(requested.articulo_id).await {
                Ok(info) => info,
                Err(GatewayError::ArticleNotFound(id)) => {
                    self.discard_order(order.id).await;
                    return Err(DomainError::not_found(format!("article {id} not found")));
                }
                Err(e) => return Err(gateway_error(e)),
            };

            let item = snapshot(order.id, &info, requested.cantidad);
            self.store
                .insert_line_item(&item)
                .await
                .map_err(store_error)?;
            line_items.push(item);
        }

        let totals = match compute_totals(&line_items) {
            Some(totals) => totals,
            None => {
                self.discard_order(order.id).await;
                return Err(DomainError::validation("order totals overflow"));
            }
        };
        self.store
            .set_totals(order.id, &totals)
            .await
            .map_err(store_error)?;

        tracing::info!(order_id = %order.id, items = line_items.len(), "order created");
        Ok(order.id)
    }

    /// Replace an order's line-item set from `{id, cantidad}` pairs and push
    /// the refreshed article data back to the article service.
    ///
    /// Existing items are deleted before the new list is validated, so a
    /// mid-edit failure leaves the order without items (no compensation).
    pub async fn edit_order(
        &self,
        id: OrderId,
        items: &[RequestedItem],
    ) -> Result<OrderView, DomainError> {
        let order = self
            .store
            .get_order(id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| DomainError::not_found("order not found"))?;

        if items.is_empty() {
            return Err(DomainError::validation("at least one article is required"));
        }

        self.store.delete_line_items(id).await.map_err(store_error)?;

        for requested in items {
            if requested.cantidad <= 0 {
                return Err(DomainError::validation(format!(
                    "quantity for article {} must be greater than 0",
                    requested.articulo_id
                )));
            }

            let info = match self.articles.fetch_article(requested.articulo_id).await {
                Ok(info) => info,
                Err(GatewayError::Auth { status }) => return Err(DomainError::auth(status)),
                Err(GatewayError::Transport(e)) => {
                    return Err(DomainError::upstream(None, e.to_string()))
                }
                // Any other unsuccessful lookup reads as a missing article
                // on the edit path.
                Err(_) => {
                    return Err(DomainError::not_found(format!(
                        "article {} not found",
                        requested.articulo_id
                    )))
                }
            };

            self.articles
                .update_article(requested.articulo_id, &ArticleUpdate::from(&info))
                .await
                .map_err(|e| update_error(requested.articulo_id, e))?;

            let item = snapshot(id, &info, requested.cantidad);
            self.store
                .insert_line_item(&item)
                .await
                .map_err(store_error)?;
        }

        let items = self.store.list_line_items(id).await.map_err(store_error)?;
        let totals = compute_totals(&items)
            .ok_or_else(|| DomainError::validation("order totals overflow"))?;
        self.store
            .set_totals(id, &totals)
            .await
            .map_err(store_error)?;

        tracing::info!(order_id = %id, items = items.len(), "order edited");

        let order = Order {
            precio_total_sin_impuestos: totals.sin_impuestos,
            precio_total_con_impuestos: totals.con_impuestos,
            ..order
        };
        Ok(OrderView { order, items })
    }

    /// Read one order with its line items. No external calls; all pricing
    /// comes from the stored snapshots.
    pub async fn get_order(&self, id: OrderId) -> Result<OrderView, DomainError> {
        let order = self
            .store
            .get_order(id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| DomainError::not_found("order not found"))?;
        let items = self.store.list_line_items(id).await.map_err(store_error)?;
        Ok(OrderView { order, items })
    }

    /// Read all orders with their line items.
    pub async fn list_orders(&self) -> Result<Vec<OrderView>, DomainError> {
        let orders = self.store.list_orders().await.map_err(store_error)?;
        let mut views = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self
                .store
                .list_line_items(order.id)
                .await
                .map_err(store_error)?;
            views.push(OrderView { order, items });
        }
        Ok(views)
    }

    async fn discard_order(&self, id: OrderId) {
        tracing::warn!(order_id = %id, "discarding partially created order");
        if let Err(e) = self.store.delete_order(id).await {
            tracing::warn!(order_id = %id, "failed to discard order: {e}");
        }
    }
}

fn snapshot(pedido_id: OrderId, info: &ArticleInfo, cantidad: i64) -> LineItem {
    LineItem {
        pedido_id,
        articulo_id: info.id,
        referencia: info.referencia.clone(),
        nombre: info.nombre.clone(),
        precio_sin_impuestos: info.precio_sin_impuestos,
        impuesto_aplicable: info.impuesto_aplicable,
        cantidad,
    }
}

fn store_error(e: StoreError) -> DomainError {
    DomainError::store(e.to_string())
}

fn gateway_error(e: GatewayError) -> DomainError {
    match e {
        GatewayError::Auth { status } => DomainError::auth(status),
        GatewayError::ArticleNotFound(id) => {
            DomainError::not_found(format!("article {id} not found"))
        }
        GatewayError::Upstream { status } => DomainError::upstream(
            Some(status),
            format!("article service returned status {status}"),
        ),
        GatewayError::Transport(err) => DomainError::upstream(None, err.to_string()),
    }
}

fn update_error(id: ArticleId, e: GatewayError) -> DomainError {
    match e {
        GatewayError::Auth { status } => DomainError::auth(status),
        GatewayError::Transport(err) => DomainError::upstream(None, err.to_string()),
        GatewayError::ArticleNotFound(_) => {
            DomainError::upstream(Some(404), format!("failed to update article {id}"))
        }
        GatewayError::Upstream { status } => {
            DomainError::upstream(Some(status), format!("failed to update article {id}"))
        }
    }
}

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use pedidos_core::OrderId;
use pedidos_orders::{LineItem, Order, OrderTotals};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Order persistence abstraction.
///
/// Line items are exclusively owned by their order: deleting an order deletes
/// its items, and `list_line_items` yields items in insertion order.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError>;
    async fn set_totals(&self, id: OrderId, totals: &OrderTotals) -> Result<(), StoreError>;
    async fn delete_order(&self, id: OrderId) -> Result<(), StoreError>;
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;

    async fn insert_line_item(&self, item: &LineItem) -> Result<(), StoreError>;
    async fn delete_line_items(&self, order_id: OrderId) -> Result<(), StoreError>;
    async fn list_line_items(&self, order_id: OrderId) -> Result<Vec<LineItem>, StoreError>;
}

#[async_trait]
impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        (**self).insert_order(order).await
    }

    async fn set_totals(&self, id: OrderId, totals: &OrderTotals) -> Result<(), StoreError> {
        (**self).set_totals(id, totals).await
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), StoreError> {
        (**self).delete_order(id).await
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        (**self).get_order(id).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        (**self).list_orders().await
    }

    async fn insert_line_item(&self, item: &LineItem) -> Result<(), StoreError> {
        (**self).insert_line_item(item).await
    }

    async fn delete_line_items(&self, order_id: OrderId) -> Result<(), StoreError> {
        (**self).delete_line_items(order_id).await
    }

    async fn list_line_items(&self, order_id: OrderId) -> Result<Vec<LineItem>, StoreError> {
        (**self).list_line_items(order_id).await
    }
}

/// In-memory order store for tests/dev.
///
/// Plain `Vec`s so insertion order is preserved exactly as Postgres serial
/// ordering would.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
    items: RwLock<Vec<LineItem>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        self.orders.write().map_err(poisoned)?.push(order.clone());
        Ok(())
    }

    async fn set_totals(&self, id: OrderId, totals: &OrderTotals) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        if let Some(order) = orders.iter_mut().find(|o| o.id == id) {
            order.precio_total_sin_impuestos = totals.sin_impuestos;
            order.precio_total_con_impuestos = totals.con_impuestos;
        }
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), StoreError> {
        self.orders.write().map_err(poisoned)?.retain(|o| o.id != id);
        // Cascade, as the FK does in Postgres.
        self.items
            .write()
            .map_err(poisoned)?
            .retain(|i| i.pedido_id != id);
        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self
            .orders
            .read()
            .map_err(poisoned)?
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.read().map_err(poisoned)?.clone())
    }

    async fn insert_line_item(&self, item: &LineItem) -> Result<(), StoreError> {
        self.items.write().map_err(poisoned)?.push(item.clone());
        Ok(())
    }

    async fn delete_line_items(&self, order_id: OrderId) -> Result<(), StoreError> {
        self.items
            .write()
            .map_err(poisoned)?
            .retain(|i| i.pedido_id != order_id);
        Ok(())
    }

    async fn list_line_items(&self, order_id: OrderId) -> Result<Vec<LineItem>, StoreError> {
        Ok(self
            .items
            .read()
            .map_err(poisoned)?
            .iter()
            .filter(|i| i.pedido_id == order_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pedidos_core::ArticleId;
    use rust_decimal::Decimal;

    fn order() -> Order {
        Order::new(OrderId::new(), Utc::now())
    }

    fn item(pedido_id: OrderId, articulo: i64) -> LineItem {
        LineItem {
            pedido_id,
            articulo_id: ArticleId::new(articulo),
            referencia: format!("REF-{articulo}"),
            nombre: format!("Articulo {articulo}"),
            precio_sin_impuestos: Decimal::new(500, 2),
            impuesto_aplicable: Decimal::from(21),
            cantidad: 1,
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = InMemoryOrderStore::new();
        let order = order();
        store.insert_order(&order).await.unwrap();

        let found = store.get_order(order.id).await.unwrap().unwrap();
        assert_eq!(found, order);
        assert!(store.get_order(OrderId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_totals_updates_stored_order() {
        let store = InMemoryOrderStore::new();
        let order = order();
        store.insert_order(&order).await.unwrap();

        let totals = OrderTotals {
            sin_impuestos: Decimal::new(2000, 2),
            con_impuestos: Decimal::new(2420, 2),
        };
        store.set_totals(order.id, &totals).await.unwrap();

        let found = store.get_order(order.id).await.unwrap().unwrap();
        assert_eq!(found.precio_total_sin_impuestos, totals.sin_impuestos);
        assert_eq!(found.precio_total_con_impuestos, totals.con_impuestos);
    }

    #[tokio::test]
    async fn delete_order_cascades_to_items() {
        let store = InMemoryOrderStore::new();
        let order = order();
        store.insert_order(&order).await.unwrap();
        store.insert_line_item(&item(order.id, 1)).await.unwrap();
        store.insert_line_item(&item(order.id, 2)).await.unwrap();

        store.delete_order(order.id).await.unwrap();

        assert!(store.get_order(order.id).await.unwrap().is_none());
        assert!(store.list_line_items(order.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn line_items_keep_insertion_order_per_order() {
        let store = InMemoryOrderStore::new();
        let a = order();
        let b = order();
        store.insert_order(&a).await.unwrap();
        store.insert_order(&b).await.unwrap();

        store.insert_line_item(&item(a.id, 3)).await.unwrap();
        store.insert_line_item(&item(b.id, 9)).await.unwrap();
        store.insert_line_item(&item(a.id, 1)).await.unwrap();

        let items: Vec<i64> = store
            .list_line_items(a.id)
            .await
            .unwrap()
            .iter()
            .map(|i| i.articulo_id.as_i64())
            .collect();
        assert_eq!(items, vec![3, 1]);
    }

    #[tokio::test]
    async fn delete_line_items_clears_only_that_order() {
        let store = InMemoryOrderStore::new();
        let a = order();
        let b = order();
        store.insert_order(&a).await.unwrap();
        store.insert_order(&b).await.unwrap();
        store.insert_line_item(&item(a.id, 1)).await.unwrap();
        store.insert_line_item(&item(b.id, 2)).await.unwrap();

        store.delete_line_items(a.id).await.unwrap();

        assert!(store.list_line_items(a.id).await.unwrap().is_empty());
        assert_eq!(store.list_line_items(b.id).await.unwrap().len(), 1);
    }
}

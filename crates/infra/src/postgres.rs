//! Postgres-backed order store.
//!
//! Schema lives in `migrations/0001_pedidos.sql`. NUMERIC columns map to
//! `rust_decimal::Decimal`; `pedido_detalles.pedido_id` carries
//! `ON DELETE CASCADE`, so removing an order removes its items in one
//! statement. `pedido_detalles.id` is a bigserial, which is what gives
//! `list_line_items` its insertion order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use pedidos_core::{ArticleId, OrderId};
use pedidos_orders::{LineItem, Order, OrderTotals};

use crate::order_store::{OrderStore, StoreError};

pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_from_row(row: &sqlx::postgres::PgRow) -> Result<Order, sqlx::Error> {
    Ok(Order {
        id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
        precio_total_sin_impuestos: row.try_get::<Decimal, _>("precio_total_sin_impuestos")?,
        precio_total_con_impuestos: row.try_get::<Decimal, _>("precio_total_con_impuestos")?,
        fecha_creacion: row.try_get::<DateTime<Utc>, _>("fecha_creacion")?,
    })
}

fn item_from_row(row: &sqlx::postgres::PgRow) -> Result<LineItem, sqlx::Error> {
    Ok(LineItem {
        pedido_id: OrderId::from_uuid(row.try_get::<Uuid, _>("pedido_id")?),
        articulo_id: ArticleId::new(row.try_get::<i64, _>("articulo_id")?),
        referencia: row.try_get("referencia")?,
        nombre: row.try_get("nombre")?,
        precio_sin_impuestos: row.try_get::<Decimal, _>("precio_sin_impuestos")?,
        impuesto_aplicable: row.try_get::<Decimal, _>("impuesto_aplicable")?,
        cantidad: row.try_get::<i64, _>("cantidad")?,
    })
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO pedidos (id, precio_total_sin_impuestos, precio_total_con_impuestos, fecha_creacion) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(order.id.as_uuid())
        .bind(order.precio_total_sin_impuestos)
        .bind(order.precio_total_con_impuestos)
        .bind(order.fecha_creacion)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_totals(&self, id: OrderId, totals: &OrderTotals) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE pedidos SET precio_total_sin_impuestos = $2, precio_total_con_impuestos = $3 \
             WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(totals.sin_impuestos)
        .bind(totals.con_impuestos)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM pedidos WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(
            "SELECT id, precio_total_sin_impuestos, precio_total_con_impuestos, fecha_creacion \
             FROM pedidos WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(order_from_row)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, precio_total_sin_impuestos, precio_total_con_impuestos, fecha_creacion \
             FROM pedidos ORDER BY fecha_creacion, id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(order_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    async fn insert_line_item(&self, item: &LineItem) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO pedido_detalles \
             (pedido_id, articulo_id, referencia, nombre, precio_sin_impuestos, impuesto_aplicable, cantidad) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(item.pedido_id.as_uuid())
        .bind(item.articulo_id.as_i64())
        .bind(&item.referencia)
        .bind(&item.nombre)
        .bind(item.precio_sin_impuestos)
        .bind(item.impuesto_aplicable)
        .bind(item.cantidad)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_line_items(&self, order_id: OrderId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM pedido_detalles WHERE pedido_id = $1")
            .bind(order_id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_line_items(&self, order_id: OrderId) -> Result<Vec<LineItem>, StoreError> {
        let rows = sqlx::query(
            "SELECT pedido_id, articulo_id, referencia, nombre, precio_sin_impuestos, \
             impuesto_aplicable, cantidad \
             FROM pedido_detalles WHERE pedido_id = $1 ORDER BY id",
        )
        .bind(order_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(item_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }
}

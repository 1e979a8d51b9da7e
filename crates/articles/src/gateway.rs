use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pedidos_core::ArticleId;

/// Article fields as served by the article microservice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleInfo {
    pub id: ArticleId,
    pub referencia: String,
    pub nombre: String,
    pub descripcion: String,
    pub precio_sin_impuestos: Decimal,
    pub impuesto_aplicable: Decimal,
}

/// Writable article fields pushed back on edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleUpdate {
    pub referencia: String,
    pub nombre: String,
    pub descripcion: String,
    pub precio_sin_impuestos: Decimal,
    pub impuesto_aplicable: Decimal,
}

impl From<&ArticleInfo> for ArticleUpdate {
    fn from(info: &ArticleInfo) -> Self {
        Self {
            referencia: info.referencia.clone(),
            nombre: info.nombre.clone(),
            descripcion: info.descripcion.clone(),
            precio_sin_impuestos: info.precio_sin_impuestos,
            impuesto_aplicable: info.impuesto_aplicable,
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Token exchange returned a non-success status.
    #[error("token exchange failed with status {status}")]
    Auth { status: u16 },

    /// The article service answered 404 for the requested article.
    #[error("article {0} not found")]
    ArticleNotFound(ArticleId),

    /// Any other non-success article service response.
    #[error("article service returned status {status}")]
    Upstream { status: u16 },

    /// The call never produced a response (connect error, timeout).
    #[error("article service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Access to the external article service.
///
/// The contract is per-article: one fetch or one update at a time, no
/// batching. Implementations decide how tokens are obtained; the default
/// HTTP gateway exchanges credentials before every call, and a caching
/// implementation can substitute without touching the orchestrator.
#[async_trait]
pub trait ArticleGateway: Send + Sync {
    async fn fetch_article(&self, id: ArticleId) -> Result<ArticleInfo, GatewayError>;

    async fn update_article(
        &self,
        id: ArticleId,
        update: &ArticleUpdate,
    ) -> Result<(), GatewayError>;
}

//! In-memory article gateway for dev/tests.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use pedidos_core::ArticleId;

use crate::gateway::{ArticleGateway, ArticleInfo, ArticleUpdate, GatewayError};

/// Gateway over a fixed article map. Records every update it receives and
/// can be told to fail fetches for chosen articles with a non-404 status,
/// which is how the create-path upstream asymmetry is exercised in tests.
#[derive(Debug, Default)]
pub struct InMemoryArticleGateway {
    articles: RwLock<HashMap<ArticleId, ArticleInfo>>,
    updates: RwLock<Vec<(ArticleId, ArticleUpdate)>>,
    failing: RwLock<HashSet<ArticleId>>,
}

impl InMemoryArticleGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, info: ArticleInfo) {
        self.articles
            .write()
            .expect("article map poisoned")
            .insert(info.id, info);
    }

    /// Make fetches of `id` fail with an upstream (non-404) status.
    pub fn fail_fetch(&self, id: ArticleId) {
        self.failing
            .write()
            .expect("failure set poisoned")
            .insert(id);
    }

    /// Updates received so far, in call order.
    pub fn updates(&self) -> Vec<(ArticleId, ArticleUpdate)> {
        self.updates.read().expect("update log poisoned").clone()
    }
}

#[async_trait]
impl ArticleGateway for InMemoryArticleGateway {
    async fn fetch_article(&self, id: ArticleId) -> Result<ArticleInfo, GatewayError> {
        if self.failing.read().expect("failure set poisoned").contains(&id) {
            return Err(GatewayError::Upstream { status: 500 });
        }

        self.articles
            .read()
            .expect("article map poisoned")
            .get(&id)
            .cloned()
            .ok_or(GatewayError::ArticleNotFound(id))
    }

    async fn update_article(
        &self,
        id: ArticleId,
        update: &ArticleUpdate,
    ) -> Result<(), GatewayError> {
        let mut articles = self.articles.write().expect("article map poisoned");
        let info = articles
            .get_mut(&id)
            .ok_or(GatewayError::ArticleNotFound(id))?;

        info.referencia = update.referencia.clone();
        info.nombre = update.nombre.clone();
        info.descripcion = update.descripcion.clone();
        info.precio_sin_impuestos = update.precio_sin_impuestos;
        info.impuesto_aplicable = update.impuesto_aplicable;

        self.updates
            .write()
            .expect("update log poisoned")
            .push((id, update.clone()));
        Ok(())
    }
}

//! Reqwest-backed article gateway.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use pedidos_core::ArticleId;

use crate::config::ArticlesConfig;
use crate::gateway::{ArticleGateway, ArticleInfo, ArticleUpdate, GatewayError};

const CALL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access: String,
}

/// Live HTTP client for the article service.
///
/// Exchanges the configured credentials for a bearer token before every
/// article operation. No retries, no circuit breaking; a bounded timeout per
/// call surfaces as [`GatewayError::Transport`].
pub struct HttpArticleGateway {
    http: reqwest::Client,
    config: ArticlesConfig,
}

impl HttpArticleGateway {
    pub fn new(config: ArticlesConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(CALL_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    /// Exchange the configured credentials for a bearer token.
    pub async fn authenticate(&self) -> Result<String, GatewayError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("username", self.config.username.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Auth {
                status: status.as_u16(),
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access)
    }

    fn article_url(&self, id: ArticleId) -> String {
        format!("{}{}", self.config.base_url, id)
    }
}

#[async_trait]
impl ArticleGateway for HttpArticleGateway {
    async fn fetch_article(&self, id: ArticleId) -> Result<ArticleInfo, GatewayError> {
        let token = self.authenticate().await?;

        let response = self
            .http
            .get(self.article_url(id))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::ArticleNotFound(id));
        }
        if !status.is_success() {
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    async fn update_article(
        &self,
        id: ArticleId,
        update: &ArticleUpdate,
    ) -> Result<(), GatewayError> {
        let token = self.authenticate().await?;

        let response = self
            .http
            .put(self.article_url(id))
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(article_id = %id, status = status.as_u16(), "article update rejected");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

//! `pedidos-articles` — client for the external article microservice.
//!
//! The orchestrator only sees the [`ArticleGateway`] trait; the HTTP
//! implementation (per-operation token exchange) and the in-memory dev/test
//! implementation are interchangeable behind it.

pub mod config;
pub mod gateway;
pub mod http;
pub mod memory;

pub use config::{ArticlesConfig, ConfigError};
pub use gateway::{ArticleGateway, ArticleInfo, ArticleUpdate, GatewayError};
pub use http::HttpArticleGateway;
pub use memory::InMemoryArticleGateway;

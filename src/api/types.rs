//! API request and response types

use crate::persona::{Difficulty, Product};
use serde::{Deserialize, Serialize};

/// Request to start a conversation; both keys are required in practice
#[derive(Debug, Default, Deserialize)]
pub struct CreateConversationRequest {
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
}

/// Request to submit a salesperson line
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub text: String,
}

/// Response for turn submission
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub ok: bool,
}

/// One selectable option in the catalog
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

impl From<Difficulty> for CatalogEntry {
    fn from(d: Difficulty) -> Self {
        Self {
            key: d.key(),
            label: d.label(),
            description: d.description(),
        }
    }
}

impl From<Product> for CatalogEntry {
    fn from(p: Product) -> Self {
        Self {
            key: p.key(),
            label: p.title(),
            description: p.description(),
        }
    }
}

/// Everything the selection screens need
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub difficulties: Vec<CatalogEntry>,
    pub products: Vec<CatalogEntry>,
}

impl CatalogResponse {
    pub fn build() -> Self {
        Self {
            difficulties: Difficulty::ALL.into_iter().map(CatalogEntry::from).collect(),
            products: Product::ALL.into_iter().map(CatalogEntry::from).collect(),
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

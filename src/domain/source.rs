use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use crate::domain::PropertyError;

// Identifier of one external database. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseId(String);

impl DatabaseId {
    /// Reads a configured identifier; missing or blank settings mean the slot is unconfigured.
    /// A whitespace-only value is treated as unset rather than sent upstream to fail there.
    pub fn from_setting(value: Option<String>) -> Option<Self> {
        let value = value?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Configured identifiers, indexed by `Slot::index`.
pub type SourceSlots = [Option<DatabaseId>; 3];

// Fixed response positions, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
    Third,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::First, Slot::Second, Slot::Third];

    pub fn key(self) -> &'static str {
        match self {
            Slot::First => "db1",
            Slot::Second => "db2",
            Slot::Third => "db3",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
            Slot::Third => 2,
        }
    }
}

// Wire shapes of the workspace query response, decoded directly in the domain.
// One record as returned by the workspace API.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePage {
    pub id: String,
    // Raw property values keyed by name, in the order the API sent them.
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub url: Option<String>,
}

// First page of a database query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryPage {
    pub results: Vec<SourcePage>,
    #[serde(default)]
    pub has_more: bool,
}

// Failure of a single source query. `Display` is what ends up in the error entry.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("{}", describe_upstream(.status, .message))]
    Upstream {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("malformed record {page_id}: {source}")]
    InvalidRecord {
        page_id: String,
        source: PropertyError,
    },
}

fn describe_upstream(status: &u16, message: &Option<String>) -> String {
    // The API's own message is the most useful description for the client.
    match message {
        Some(message) => message.clone(),
        None => format!("upstream error {status}"),
    }
}

// The use cases depend on this trait, not the concrete client implementation.
#[async_trait]
pub trait WorkspaceDatabase: Send + Sync {
    async fn query(
        &self,
        database_id: &DatabaseId,
        page_size: u32,
    ) -> Result<QueryPage, SourceError>;
}

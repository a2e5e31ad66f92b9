use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{Slot, SourcePage};

// One run of rich text; only the plain rendering is used.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichText {
    pub plain_text: String,
}

// Property shapes the service inspects, discriminated by the API's `type` tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
    Title {
        #[serde(deserialize_with = "null_as_empty")]
        title: Vec<RichText>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Error)]
#[error("property `{name}`: {source}")]
pub struct PropertyError {
    pub name: String,
    pub source: serde_json::Error,
}

// A null run list reads as empty, so the scan moves on to the next property.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RichText>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RichText>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Property {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Property::deserialize(value)
    }
}

/// Returns the plain text of the first run of the first title-typed property
/// with a non-empty run list, scanning in source order.
pub fn find_title(properties: &Map<String, Value>) -> Result<Option<String>, PropertyError> {
    for (name, value) in properties {
        let property = Property::from_value(value).map_err(|source| PropertyError {
            name: name.clone(),
            source,
        })?;

        if let Property::Title { title } = property {
            if let Some(first) = title.into_iter().next() {
                return Ok(Some(first.plain_text));
            }
        }
    }

    Ok(None)
}

// Simplified record handed to the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub properties: Map<String, Value>,
    pub url: String,
}

impl Entry {
    pub fn from_page(page: SourcePage) -> Result<Self, PropertyError> {
        let title = find_title(&page.properties)?
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| format!("Untitled Entry ({})", page.id));

        Ok(Self {
            id: page.id,
            title,
            properties: page.properties,
            url: page.url.unwrap_or_default(),
        })
    }
}

// Outcome of one source: its entries, or the description of why it failed.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEntries {
    Fetched(Vec<Entry>),
    Failed(String),
}

impl Default for SourceEntries {
    fn default() -> Self {
        SourceEntries::Fetched(Vec::new())
    }
}

#[derive(Serialize)]
struct ErrorEntry<'a> {
    error: &'a str,
}

impl Serialize for SourceEntries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Both outcomes go over the wire as a list; a failure is a one-element list.
        match self {
            SourceEntries::Fetched(entries) => entries.serialize(serializer),
            SourceEntries::Failed(error) => {
                let entry = ErrorEntry {
                    error: error.as_str(),
                };
                [entry].serialize(serializer)
            }
        }
    }
}

// Response body: one key per slot, always all three, in slot order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntriesPayload {
    pub db1: SourceEntries,
    pub db2: SourceEntries,
    pub db3: SourceEntries,
}

impl EntriesPayload {
    pub fn set(&mut self, slot: Slot, entries: SourceEntries) {
        match slot {
            Slot::First => self.db1 = entries,
            Slot::Second => self.db2 = entries,
            Slot::Third => self.db3 = entries,
        }
    }

    pub fn get(&self, slot: Slot) -> &SourceEntries {
        match slot {
            Slot::First => &self.db1,
            Slot::Second => &self.db2,
            Slot::Third => &self.db3,
        }
    }
}

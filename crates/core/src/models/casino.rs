//! Casino catalogue models

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A supported casino site from `GET /api/casinos`
///
/// Only `name` is guaranteed. The remaining fields are filled when the
/// server includes its collection schedule; a value of an unexpected type
/// reads as `None` instead of failing the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Casino {
    pub name: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Hours between free-coin collections
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub collection_interval: Option<u32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub last_collection: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub next_collection: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl Casino {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            collection_interval: None,
            last_collection: None,
            next_collection: None,
        }
    }
}

//! Customer records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::id_string;

/// A customer account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Primary service address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Fields not modelled explicitly, passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

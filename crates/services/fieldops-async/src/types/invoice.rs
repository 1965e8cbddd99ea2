//! Invoice records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{id_string, opt_id_string};

/// An invoice issued to a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice identifier
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Human-facing invoice number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Customer billed
    #[serde(default, deserialize_with = "opt_id_string", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Job the invoice was raised for
    #[serde(default, deserialize_with = "opt_id_string", skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// Payment status (e.g. `draft`, `sent`, `paid`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Invoice total in the account currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Payment due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Fields not modelled explicitly, passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//! Job records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{id_string, opt_id_string};

/// A unit of field work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Job identifier
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Customer the job belongs to
    #[serde(default, deserialize_with = "opt_id_string", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Short title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Workflow status (e.g. `scheduled`, `in_progress`, `completed`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Service address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Scheduled start time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,
    /// Scheduled end time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_end: Option<DateTime<Utc>>,
    /// Fields not modelled explicitly, passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for creating a job
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewJob {
    /// Customer the job belongs to
    pub customer_id: String,
    /// Short title
    pub title: String,
    /// Longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Service address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Requested start time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,
}

impl NewJob {
    /// Creates a job request for a customer
    #[must_use]
    pub fn new(customer_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the service address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the requested start time
    #[must_use]
    pub const fn with_scheduled_start(mut self, start: DateTime<Utc>) -> Self {
        self.scheduled_start = Some(start);
        self
    }
}

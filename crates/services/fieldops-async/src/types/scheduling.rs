//! Scheduling availability types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::opt_id_string;

/// Query for open appointment slots near a location
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityQuery {
    /// Latitude of the service location
    pub latitude: f64,
    /// Longitude of the service location
    pub longitude: f64,
    /// First day to search (server default: today)
    pub date: Option<NaiveDate>,
    /// Required appointment length in minutes
    pub duration_minutes: Option<u32>,
    /// Number of days to search from `date`
    pub days: Option<u32>,
}

impl AvailabilityQuery {
    /// Creates a query for the given location
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            date: None,
            duration_minutes: None,
            days: None,
        }
    }

    /// Sets the first day to search
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the appointment length
    #[must_use]
    pub const fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Sets the search window length
    #[must_use]
    pub const fn with_days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }

    /// Renders the query as query-string pairs
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q = vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
        ];
        if let Some(d) = self.date {
            q.push(("date", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(m) = self.duration_minutes {
            q.push(("duration_minutes", m.to_string()));
        }
        if let Some(d) = self.days {
            q.push(("days", d.to_string()));
        }
        q
    }
}

/// An open appointment window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSlot {
    /// Slot start
    pub start: DateTime<Utc>,
    /// Slot end
    pub end: DateTime<Utc>,
    /// Technician offering the slot
    #[serde(default, deserialize_with = "opt_id_string", skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<String>,
    /// Technician display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician_name: Option<String>,
    /// Territory the slot belongs to
    #[serde(default, deserialize_with = "opt_id_string", skip_serializing_if = "Option::is_none")]
    pub territory_id: Option<String>,
}

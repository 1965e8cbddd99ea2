//! Territory records

use serde::{Deserialize, Serialize};

use super::common::{id_string, string_list};

const fn default_active() -> bool {
    true
}

/// A named service-coverage region
///
/// Territories carry only coarse location metadata (postal codes, city names,
/// state codes); no geometry is stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    /// Territory identifier
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Postal codes served by the territory
    #[serde(default, deserialize_with = "string_list")]
    pub zip_codes: Vec<String>,
    /// City names served by the territory
    #[serde(default, deserialize_with = "string_list")]
    pub cities: Vec<String>,
    /// State codes served by the territory
    #[serde(default, deserialize_with = "string_list")]
    pub states: Vec<String>,
    /// Whether the territory is currently served; absent means active
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Territory {
    /// Creates an active territory with no location metadata
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            zip_codes: Vec::new(),
            cities: Vec::new(),
            states: Vec::new(),
            active: true,
        }
    }

    /// Sets the postal codes
    #[must_use]
    pub fn with_zip_codes<I, S>(mut self, zips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zip_codes = zips.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the city names
    #[must_use]
    pub fn with_cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cities = cities.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the state codes
    #[must_use]
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the active flag
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// First state code, if any, used to qualify city lookups
    #[must_use]
    pub fn primary_state(&self) -> Option<&str> {
        self.states
            .iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

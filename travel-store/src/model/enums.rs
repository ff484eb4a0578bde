//! Enumerated column types shared by the itinerary models.
//!
//! Both enums map onto Postgres enum types created by the external schema;
//! the database-side names are lowercase.

use std::fmt;

use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

/// Classification of an itinerary item, mirroring the `item_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSql, FromSql)]
#[serde(rename_all = "lowercase")]
#[postgres(name = "item_type")]
pub enum ItemType {
    /// General information entry.
    #[postgres(name = "info")]
    Info,
    /// Restaurant or meal.
    #[postgres(name = "food")]
    Food,
    /// Hotel stay.
    #[postgres(name = "hotel")]
    Hotel,
    /// Activity or excursion.
    #[postgres(name = "activity")]
    Activity,
    /// Transfer between locations.
    #[postgres(name = "transport")]
    Transport,
}

impl ItemType {
    /// Returns the lowercase database-side name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Food => "food",
            Self::Hotel => "hotel",
            Self::Activity => "activity",
            Self::Transport => "transport",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Origin of ingested itinerary data, mirroring the `data_source_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSql, FromSql)]
#[serde(rename_all = "lowercase")]
#[postgres(name = "data_source_type")]
pub enum DataSourceType {
    /// Forwarded or processed email.
    #[postgres(name = "email")]
    Email,
    /// Uploaded file.
    #[postgres(name = "file")]
    File,
    /// Third-party API.
    #[postgres(name = "api")]
    Api,
    /// Manually entered data.
    #[postgres(name = "manual")]
    Manual,
}

impl DataSourceType {
    /// Returns the lowercase database-side name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::File => "file",
            Self::Api => "api",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for DataSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_display() {
        assert_eq!(format!("{}", ItemType::Hotel), "hotel");
        assert_eq!(format!("{}", ItemType::Transport), "transport");
    }

    #[test]
    fn test_item_type_serde_names() {
        let json = serde_json::to_string(&ItemType::Activity).unwrap();
        assert_eq!(json, "\"activity\"");
        let parsed: ItemType = serde_json::from_str("\"food\"").unwrap();
        assert_eq!(parsed, ItemType::Food);
    }

    #[test]
    fn test_data_source_type_display() {
        assert_eq!(format!("{}", DataSourceType::Email), "email");
        assert_eq!(format!("{}", DataSourceType::Manual), "manual");
    }

    #[test]
    fn test_data_source_type_serde_names() {
        let json = serde_json::to_string(&DataSourceType::Api).unwrap();
        assert_eq!(json, "\"api\"");
        let parsed: DataSourceType = serde_json::from_str("\"file\"").unwrap();
        assert_eq!(parsed, DataSourceType::File);
    }
}

//! Data source records.

use std::fmt;

use chrono::{DateTime, Utc};
use postgres::types::ToSql;
use postgres::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

use super::{require_text, DataSourceType, Entity};

/// Where a batch of itinerary data came from.
///
/// A null `processed_at` means the source has not been processed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    /// Primary key.
    pub id: Uuid,
    /// When the source was received.
    pub received_at: Option<DateTime<Utc>>,
    /// When the source was processed.
    pub processed_at: Option<DateTime<Utc>>,
    /// Source classification.
    #[serde(rename = "type")]
    pub source_type: DataSourceType,
    /// Location of the raw data.
    pub url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Draft fields for creating a [`DataSource`].
#[derive(Debug, Clone)]
pub struct NewDataSource {
    /// When the source was received.
    pub received_at: Option<DateTime<Utc>>,
    /// When the source was processed.
    pub processed_at: Option<DateTime<Utc>>,
    /// Source classification (required).
    pub source_type: DataSourceType,
    /// Location of the raw data (required).
    pub url: String,
}

impl Entity for DataSource {
    type Draft = NewDataSource;

    const TABLE: &'static str = "data_sources";
    const NAME: &'static str = "data source";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "received_at",
        "processed_at",
        "type",
        "url",
        "created_at",
        "updated_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = Self::COLUMNS;
    const UPDATE_COLUMNS: &'static [&'static str] =
        &["received_at", "processed_at", "type", "url", "updated_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get(0)?,
            received_at: row.try_get(1)?,
            processed_at: row.try_get(2)?,
            source_type: row.try_get(3)?,
            url: row.try_get(4)?,
            created_at: row.try_get(5)?,
            updated_at: row.try_get(6)?,
        })
    }

    fn validate(draft: &Self::Draft) -> Result<()> {
        require_text("url", &draft.url)
    }

    fn bind_insert<'a>(
        id: &'a Uuid,
        draft: &'a Self::Draft,
        now: &'a DateTime<Utc>,
    ) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![
            id,
            &draft.received_at,
            &draft.processed_at,
            &draft.source_type,
            &draft.url,
            now,
            now,
        ]
    }

    fn bind_update<'a>(&'a self, now: &'a DateTime<Utc>) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![
            &self.received_at,
            &self.processed_at,
            &self.source_type,
            &self.url,
            now,
            &self.id,
        ]
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataSource(id={}, type={})", self.id, self.source_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn unprocessed() -> DataSource {
        DataSource {
            id: Uuid::new_v4(),
            received_at: Some(Utc::now()),
            processed_at: None,
            source_type: DataSourceType::Email,
            url: "s3://ingest/batch-1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_requires_url() {
        let draft = NewDataSource {
            received_at: None,
            processed_at: None,
            source_type: DataSourceType::Api,
            url: String::new(),
        };
        assert!(DataSource::validate(&draft).is_err());
    }

    #[test]
    fn test_unprocessed_source_serializes_null() {
        let source = unprocessed();
        let map = source.to_map().unwrap();
        assert_eq!(map.get("processed_at"), Some(&Value::Null));
        assert_eq!(
            map.get("type"),
            Some(&Value::String("email".to_string()))
        );
    }

    #[test]
    fn test_map_round_trip() {
        let source = unprocessed();
        let map = source.to_map().unwrap();
        let restored = DataSource::from_map(map).unwrap();
        assert_eq!(restored, source);
    }

    #[test]
    fn test_display_summary() {
        let source = unprocessed();
        let display = format!("{source}");
        assert!(display.contains("DataSource"));
        assert!(display.contains("type=email"));
    }
}

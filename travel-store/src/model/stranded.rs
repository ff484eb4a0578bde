//! Stranded itinerary item records.

use std::fmt;

use chrono::{DateTime, Utc};
use postgres::types::ToSql;
use postgres::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

use super::Entity;

/// Tracks an itinerary item that has been detached from its day.
///
/// The advisor reference is nullable: a stranded item may not yet be
/// attributable to anyone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrandedItineraryItem {
    /// Primary key.
    pub id: Uuid,
    /// Advisor the stranded item belongs to, when known.
    pub travel_advisor_id: Option<Uuid>,
    /// The detached item.
    pub itinerary_item_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Draft fields for creating a [`StrandedItineraryItem`].
#[derive(Debug, Clone, Default)]
pub struct NewStrandedItineraryItem {
    /// Advisor the stranded item belongs to, when known.
    pub travel_advisor_id: Option<Uuid>,
    /// The detached item (required).
    pub itinerary_item_id: Uuid,
}

impl Entity for StrandedItineraryItem {
    type Draft = NewStrandedItineraryItem;

    const TABLE: &'static str = "stranded_itinerary_items";
    const NAME: &'static str = "stranded itinerary item";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "travel_advisor_id",
        "itinerary_item_id",
        "created_at",
        "updated_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = Self::COLUMNS;
    const UPDATE_COLUMNS: &'static [&'static str] =
        &["travel_advisor_id", "itinerary_item_id", "updated_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get(0)?,
            travel_advisor_id: row.try_get(1)?,
            itinerary_item_id: row.try_get(2)?,
            created_at: row.try_get(3)?,
            updated_at: row.try_get(4)?,
        })
    }

    fn validate(_draft: &Self::Draft) -> Result<()> {
        // Both references are typed; referential integrity is enforced by
        // the database.
        Ok(())
    }

    fn bind_insert<'a>(
        id: &'a Uuid,
        draft: &'a Self::Draft,
        now: &'a DateTime<Utc>,
    ) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![
            id,
            &draft.travel_advisor_id,
            &draft.itinerary_item_id,
            now,
            now,
        ]
    }

    fn bind_update<'a>(&'a self, now: &'a DateTime<Utc>) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![
            &self.travel_advisor_id,
            &self.itinerary_item_id,
            now,
            &self.id,
        ]
    }
}

impl fmt::Display for StrandedItineraryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.travel_advisor_id {
            Some(advisor_id) => write!(
                f,
                "StrandedItineraryItem(id={}, travel_advisor_id={advisor_id}, itinerary_item_id={})",
                self.id, self.itinerary_item_id
            ),
            None => write!(
                f,
                "StrandedItineraryItem(id={}, travel_advisor_id=none, itinerary_item_id={})",
                self.id, self.itinerary_item_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn orphaned() -> StrandedItineraryItem {
        StrandedItineraryItem {
            id: Uuid::new_v4(),
            travel_advisor_id: None,
            itinerary_item_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_null_advisor_serializes_explicitly() {
        let stranded = orphaned();
        let map = stranded.to_map().unwrap();
        assert_eq!(map.get("travel_advisor_id"), Some(&Value::Null));
        assert!(map.contains_key("itinerary_item_id"));
    }

    #[test]
    fn test_map_round_trip() {
        let stranded = orphaned();
        let map = stranded.to_map().unwrap();
        let restored = StrandedItineraryItem::from_map(map).unwrap();
        assert_eq!(restored, stranded);
        assert_eq!(restored.travel_advisor_id, None);
    }

    #[test]
    fn test_display_without_advisor() {
        let stranded = orphaned();
        let display = format!("{stranded}");
        assert!(display.contains("StrandedItineraryItem"));
        assert!(display.contains("travel_advisor_id=none"));
    }

    #[test]
    fn test_display_with_advisor() {
        let mut stranded = orphaned();
        let advisor_id = Uuid::new_v4();
        stranded.travel_advisor_id = Some(advisor_id);
        let display = format!("{stranded}");
        assert!(display.contains(&advisor_id.to_string()));
    }

    #[test]
    fn test_validate_accepts_null_advisor() {
        let draft = NewStrandedItineraryItem {
            travel_advisor_id: None,
            itinerary_item_id: Uuid::new_v4(),
        };
        assert!(StrandedItineraryItem::validate(&draft).is_ok());
    }
}

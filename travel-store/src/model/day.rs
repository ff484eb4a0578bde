//! Day records grouping itinerary items.

use std::fmt;

use chrono::{DateTime, Utc};
use postgres::types::ToSql;
use postgres::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

use super::{require_string, Entity};

/// One day of an itinerary, holding an ordered collection of display
/// indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    /// Primary key.
    pub id: Uuid,
    /// Owning itinerary.
    pub itinerary_id: Uuid,
    /// Ordered display indices covered by this day.
    pub indices: Vec<i32>,
    /// Day title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Draft fields for creating a [`Day`].
#[derive(Debug, Clone)]
pub struct NewDay {
    /// Owning itinerary (required).
    pub itinerary_id: Uuid,
    /// Ordered display indices (required).
    pub indices: Vec<i32>,
    /// Day title (required).
    pub title: String,
}

impl Entity for Day {
    type Draft = NewDay;

    const TABLE: &'static str = "days";
    const NAME: &'static str = "day";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "itinerary_id",
        "indices",
        "title",
        "created_at",
        "updated_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = Self::COLUMNS;
    const UPDATE_COLUMNS: &'static [&'static str] =
        &["itinerary_id", "indices", "title", "updated_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get(0)?,
            itinerary_id: row.try_get(1)?,
            indices: row.try_get(2)?,
            title: row.try_get(3)?,
            created_at: row.try_get(4)?,
            updated_at: row.try_get(5)?,
        })
    }

    fn validate(draft: &Self::Draft) -> Result<()> {
        require_string("title", &draft.title)
    }

    fn bind_insert<'a>(
        id: &'a Uuid,
        draft: &'a Self::Draft,
        now: &'a DateTime<Utc>,
    ) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![
            id,
            &draft.itinerary_id,
            &draft.indices,
            &draft.title,
            now,
            now,
        ]
    }

    fn bind_update<'a>(&'a self, now: &'a DateTime<Utc>) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![&self.itinerary_id, &self.indices, &self.title, now, &self.id]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Day(id={}, itinerary_id={}, indices={:?})",
            self.id, self.itinerary_id, self.indices
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Day {
        Day {
            id: Uuid::new_v4(),
            itinerary_id: Uuid::new_v4(),
            indices: vec![1, 2],
            title: "Arrival".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_requires_title() {
        let draft = NewDay {
            itinerary_id: Uuid::new_v4(),
            indices: vec![1],
            title: String::new(),
        };
        assert!(Day::validate(&draft).is_err());
    }

    // The display summary once referenced a singular field that no longer
    // exists; it must render the indices collection.
    #[test]
    fn test_display_uses_indices_collection() {
        let day = sample();
        let display = format!("{day}");
        assert!(display.contains("indices=[1, 2]"));
        assert!(!display.contains("index="));
    }

    #[test]
    fn test_map_uses_indices_key() {
        let day = sample();
        let map = day.to_map().unwrap();
        assert!(map.contains_key("indices"));
        assert!(!map.contains_key("index"));
        assert_eq!(
            map.get("indices"),
            Some(&serde_json::json!([1, 2]))
        );
    }

    #[test]
    fn test_map_round_trip() {
        let day = sample();
        let map = day.to_map().unwrap();
        let restored = Day::from_map(map).unwrap();
        assert_eq!(restored, day);
    }
}

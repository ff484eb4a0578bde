//! Itinerary item records.

use std::fmt;

use chrono::{DateTime, Utc};
use postgres::types::ToSql;
use postgres::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

use super::{non_negative, require_string, Entity, ItemType};

/// A single scheduled entry on an itinerary.
///
/// `day_id` is nullable: an item detached from its day is a stranded item
/// and may be tracked by a companion
/// [`StrandedItineraryItem`](super::StrandedItineraryItem) record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItem {
    /// Primary key.
    pub id: Uuid,
    /// Owning day, absent while the item is stranded.
    pub day_id: Option<Uuid>,
    /// Source the item was ingested from.
    pub data_source_id: Option<Uuid>,
    /// Position within the day.
    pub index: i32,
    /// Item title.
    pub title: String,
    /// Item classification.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Free-form detail text.
    pub detail_text: Option<String>,
    /// Photo URLs.
    pub photos: Option<Vec<String>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Draft fields for creating an [`ItineraryItem`].
#[derive(Debug, Clone)]
pub struct NewItineraryItem {
    /// Owning day; `None` creates the item detached.
    pub day_id: Option<Uuid>,
    /// Source the item was ingested from.
    pub data_source_id: Option<Uuid>,
    /// Position within the day (required, non-negative).
    pub index: i32,
    /// Item title (required).
    pub title: String,
    /// Item classification (required).
    pub item_type: ItemType,
    /// Free-form detail text.
    pub detail_text: Option<String>,
    /// Photo URLs.
    pub photos: Option<Vec<String>>,
}

impl Entity for ItineraryItem {
    type Draft = NewItineraryItem;

    const TABLE: &'static str = "itinerary_items";
    const NAME: &'static str = "itinerary item";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "day_id",
        "data_source_id",
        "index",
        "title",
        "type",
        "detail_text",
        "photos",
        "created_at",
        "updated_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = Self::COLUMNS;
    const UPDATE_COLUMNS: &'static [&'static str] = &[
        "day_id",
        "data_source_id",
        "index",
        "title",
        "type",
        "detail_text",
        "photos",
        "updated_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get(0)?,
            day_id: row.try_get(1)?,
            data_source_id: row.try_get(2)?,
            index: row.try_get(3)?,
            title: row.try_get(4)?,
            item_type: row.try_get(5)?,
            detail_text: row.try_get(6)?,
            photos: row.try_get(7)?,
            created_at: row.try_get(8)?,
            updated_at: row.try_get(9)?,
        })
    }

    fn validate(draft: &Self::Draft) -> Result<()> {
        require_string("title", &draft.title)?;
        non_negative("index", draft.index)?;
        Ok(())
    }

    fn bind_insert<'a>(
        id: &'a Uuid,
        draft: &'a Self::Draft,
        now: &'a DateTime<Utc>,
    ) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![
            id,
            &draft.day_id,
            &draft.data_source_id,
            &draft.index,
            &draft.title,
            &draft.item_type,
            &draft.detail_text,
            &draft.photos,
            now,
            now,
        ]
    }

    fn bind_update<'a>(&'a self, now: &'a DateTime<Utc>) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![
            &self.day_id,
            &self.data_source_id,
            &self.index,
            &self.title,
            &self.item_type,
            &self.detail_text,
            &self.photos,
            now,
            &self.id,
        ]
    }
}

impl fmt::Display for ItineraryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day_id {
            Some(day_id) => write!(
                f,
                "ItineraryItem(id={}, day_id={day_id}, type={}, title={:?})",
                self.id, self.item_type, self.title
            ),
            None => write!(
                f,
                "ItineraryItem(id={}, day_id=none, type={}, title={:?})",
                self.id, self.item_type, self.title
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn detached() -> ItineraryItem {
        ItineraryItem {
            id: Uuid::new_v4(),
            day_id: None,
            data_source_id: None,
            index: 1,
            title: "Hotel Mundial".to_string(),
            item_type: ItemType::Hotel,
            detail_text: None,
            photos: Some(vec!["https://example.com/a.jpg".to_string()]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate() {
        let draft = NewItineraryItem {
            day_id: None,
            data_source_id: None,
            index: 0,
            title: "Dinner".to_string(),
            item_type: ItemType::Food,
            detail_text: None,
            photos: None,
        };
        assert!(ItineraryItem::validate(&draft).is_ok());

        let negative_index = NewItineraryItem {
            index: -1,
            ..draft.clone()
        };
        assert!(ItineraryItem::validate(&negative_index).is_err());

        let empty_title = NewItineraryItem {
            title: String::new(),
            ..draft
        };
        assert!(ItineraryItem::validate(&empty_title).is_err());
    }

    #[test]
    fn test_detached_item_serializes_null_day() {
        let item = detached();
        let map = item.to_map().unwrap();
        assert_eq!(map.get("day_id"), Some(&Value::Null));
        assert_eq!(
            map.get("type"),
            Some(&Value::String("hotel".to_string()))
        );
    }

    #[test]
    fn test_map_round_trip_preserves_null_day() {
        let item = detached();
        let map = item.to_map().unwrap();
        let restored = ItineraryItem::from_map(map).unwrap();
        assert_eq!(restored, item);
        assert_eq!(restored.day_id, None);
    }

    #[test]
    fn test_display_detached() {
        let item = detached();
        let display = format!("{item}");
        assert!(display.contains("day_id=none"));
        assert!(display.contains("type=hotel"));
    }

    #[test]
    fn test_display_attached() {
        let mut item = detached();
        let day_id = Uuid::new_v4();
        item.day_id = Some(day_id);
        let display = format!("{item}");
        assert!(display.contains(&day_id.to_string()));
    }
}

//! Information document records.

use std::fmt;

use chrono::{DateTime, Utc};
use postgres::types::ToSql;
use postgres::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

use super::{non_negative, require_string, Entity};

/// Supplementary document attached to an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationDocument {
    /// Primary key.
    pub id: Uuid,
    /// Owning itinerary.
    pub itinerary_id: Uuid,
    /// Source the document was ingested from.
    pub data_source_id: Option<Uuid>,
    /// Position among the itinerary's documents.
    pub index: i32,
    /// Document title.
    pub title: String,
    /// Raw document text.
    pub text: Option<String>,
    /// Formatted document text.
    pub formatted_text: Option<String>,
    /// Photo URLs.
    pub photos: Option<Vec<String>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Draft fields for creating an [`InformationDocument`].
#[derive(Debug, Clone)]
pub struct NewInformationDocument {
    /// Owning itinerary (required).
    pub itinerary_id: Uuid,
    /// Source the document was ingested from.
    pub data_source_id: Option<Uuid>,
    /// Position among the itinerary's documents (required, non-negative).
    pub index: i32,
    /// Document title (required).
    pub title: String,
    /// Raw document text.
    pub text: Option<String>,
    /// Formatted document text.
    pub formatted_text: Option<String>,
    /// Photo URLs.
    pub photos: Option<Vec<String>>,
}

impl Entity for InformationDocument {
    type Draft = NewInformationDocument;

    const TABLE: &'static str = "information_documents";
    const NAME: &'static str = "information document";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "itinerary_id",
        "data_source_id",
        "index",
        "title",
        "text",
        "formatted_text",
        "photos",
        "created_at",
        "updated_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = Self::COLUMNS;
    const UPDATE_COLUMNS: &'static [&'static str] = &[
        "itinerary_id",
        "data_source_id",
        "index",
        "title",
        "text",
        "formatted_text",
        "photos",
        "updated_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get(0)?,
            itinerary_id: row.try_get(1)?,
            data_source_id: row.try_get(2)?,
            index: row.try_get(3)?,
            title: row.try_get(4)?,
            text: row.try_get(5)?,
            formatted_text: row.try_get(6)?,
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
            &draft.itinerary_id,
            &draft.data_source_id,
            &draft.index,
            &draft.title,
            &draft.text,
            &draft.formatted_text,
            &draft.photos,
            now,
            now,
        ]
    }

    fn bind_update<'a>(&'a self, now: &'a DateTime<Utc>) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![
            &self.itinerary_id,
            &self.data_source_id,
            &self.index,
            &self.title,
            &self.text,
            &self.formatted_text,
            &self.photos,
            now,
            &self.id,
        ]
    }
}

impl fmt::Display for InformationDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InformationDocument(id={}, title={:?})",
            self.id, self.title
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample() -> InformationDocument {
        InformationDocument {
            id: Uuid::new_v4(),
            itinerary_id: Uuid::new_v4(),
            data_source_id: None,
            index: 0,
            title: "Packing list".to_string(),
            text: Some("Bring sunscreen.".to_string()),
            formatted_text: None,
            photos: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate() {
        let draft = NewInformationDocument {
            itinerary_id: Uuid::new_v4(),
            data_source_id: None,
            index: 0,
            title: "Packing list".to_string(),
            text: None,
            formatted_text: None,
            photos: None,
        };
        assert!(InformationDocument::validate(&draft).is_ok());

        let bad_index = NewInformationDocument {
            index: -2,
            ..draft.clone()
        };
        assert!(InformationDocument::validate(&bad_index).is_err());

        let blank_title = NewInformationDocument {
            title: "  ".to_string(),
            ..draft
        };
        assert!(InformationDocument::validate(&blank_title).is_err());
    }

    #[test]
    fn test_null_source_serializes_explicitly() {
        let document = sample();
        let map = document.to_map().unwrap();
        assert_eq!(map.get("data_source_id"), Some(&Value::Null));
    }

    #[test]
    fn test_map_round_trip() {
        let document = sample();
        let map = document.to_map().unwrap();
        let restored = InformationDocument::from_map(map).unwrap();
        assert_eq!(restored, document);
    }

    #[test]
    fn test_display_summary() {
        let document = sample();
        let display = format!("{document}");
        assert!(display.contains("InformationDocument"));
        assert!(display.contains("Packing list"));
    }
}

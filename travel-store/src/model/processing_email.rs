//! Processing email records.

use std::fmt;

use chrono::{DateTime, Utc};
use postgres::types::ToSql;
use postgres::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

use super::{require_string, Entity};

/// An email address awaiting or undergoing ingestion for an advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingEmail {
    /// Primary key.
    pub id: Uuid,
    /// The email address being processed.
    pub email: String,
    /// Advisor the email belongs to.
    pub travel_advisor_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Draft fields for creating a [`ProcessingEmail`].
#[derive(Debug, Clone, Default)]
pub struct NewProcessingEmail {
    /// The email address being processed (required).
    pub email: String,
    /// Advisor the email belongs to (required).
    pub travel_advisor_id: Uuid,
}

impl Entity for ProcessingEmail {
    type Draft = NewProcessingEmail;

    const TABLE: &'static str = "processing_emails";
    const NAME: &'static str = "processing email";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "email",
        "travel_advisor_id",
        "created_at",
        "updated_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = Self::COLUMNS;
    const UPDATE_COLUMNS: &'static [&'static str] = &["email", "travel_advisor_id", "updated_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get(0)?,
            email: row.try_get(1)?,
            travel_advisor_id: row.try_get(2)?,
            created_at: row.try_get(3)?,
            updated_at: row.try_get(4)?,
        })
    }

    fn validate(draft: &Self::Draft) -> Result<()> {
        require_string("email", &draft.email)
    }

    fn bind_insert<'a>(
        id: &'a Uuid,
        draft: &'a Self::Draft,
        now: &'a DateTime<Utc>,
    ) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![id, &draft.email, &draft.travel_advisor_id, now, now]
    }

    fn bind_update<'a>(&'a self, now: &'a DateTime<Utc>) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![&self.email, &self.travel_advisor_id, now, &self.id]
    }
}

impl fmt::Display for ProcessingEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessingEmail(id={}, email={:?})", self.id, self.email)
    }
}

//! Itinerary records.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use postgres::types::ToSql;
use postgres::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

use super::{optional_bounded, positive, require_string, Entity};

/// A trip owned by a travel advisor, made up of ordered days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Primary key.
    pub id: Uuid,
    /// Owning advisor.
    pub travel_advisor_id: Uuid,
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Trip length in days.
    pub duration: i32,
    /// Destination summary.
    pub destination: String,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Draft fields for creating an [`Itinerary`].
#[derive(Debug, Clone)]
pub struct NewItinerary {
    /// Owning advisor (required).
    pub travel_advisor_id: Uuid,
    /// First day of the trip (required).
    pub start_date: NaiveDate,
    /// Trip length in days (required, positive).
    pub duration: i32,
    /// Destination summary (required).
    pub destination: String,
    /// Cover image URL.
    pub cover_image: Option<String>,
}

impl Entity for Itinerary {
    type Draft = NewItinerary;

    const TABLE: &'static str = "itineraries";
    const NAME: &'static str = "itinerary";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "travel_advisor_id",
        "start_date",
        "duration",
        "destination",
        "cover_image",
        "created_at",
        "updated_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = Self::COLUMNS;
    const UPDATE_COLUMNS: &'static [&'static str] = &[
        "travel_advisor_id",
        "start_date",
        "duration",
        "destination",
        "cover_image",
        "updated_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get(0)?,
            travel_advisor_id: row.try_get(1)?,
            start_date: row.try_get(2)?,
            duration: row.try_get(3)?,
            destination: row.try_get(4)?,
            cover_image: row.try_get(5)?,
            created_at: row.try_get(6)?,
            updated_at: row.try_get(7)?,
        })
    }

    fn validate(draft: &Self::Draft) -> Result<()> {
        require_string("destination", &draft.destination)?;
        positive("duration", draft.duration)?;
        optional_bounded("cover_image", &draft.cover_image)?;
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
            &draft.start_date,
            &draft.duration,
            &draft.destination,
            &draft.cover_image,
            now,
            now,
        ]
    }

    fn bind_update<'a>(&'a self, now: &'a DateTime<Utc>) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![
            &self.travel_advisor_id,
            &self.start_date,
            &self.duration,
            &self.destination,
            &self.cover_image,
            now,
            &self.id,
        ]
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Itinerary(id={}, destination={:?}, start_date={})",
            self.id, self.destination, self.start_date
        )
    }
}

//! Travel advisor records.

use std::fmt;

use chrono::{DateTime, Utc};
use postgres::types::ToSql;
use postgres::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

use super::{optional_bounded, require_string, Entity};

/// A travel advisor who owns itineraries and receives processing emails.
///
/// The `email` column is nullable: an advisor exists before being linked to
/// a mailbox, and serialization must show the absent link as an explicit
/// null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelAdvisor {
    /// Primary key.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Public website URL.
    pub website: Option<String>,
    /// Profile image URL.
    pub profile_image: Option<String>,
    /// Agency name.
    pub company_name: Option<String>,
    /// Agency logo URL.
    pub company_logo: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Draft fields for creating a [`TravelAdvisor`].
#[derive(Debug, Clone, Default)]
pub struct NewTravelAdvisor {
    /// Display name (required).
    pub name: String,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Public website URL.
    pub website: Option<String>,
    /// Profile image URL.
    pub profile_image: Option<String>,
    /// Agency name.
    pub company_name: Option<String>,
    /// Agency logo URL.
    pub company_logo: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
}

impl Entity for TravelAdvisor {
    type Draft = NewTravelAdvisor;

    const TABLE: &'static str = "travel_advisors";
    const NAME: &'static str = "travel advisor";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "phone_number",
        "website",
        "profile_image",
        "company_name",
        "company_logo",
        "email",
        "created_at",
        "updated_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = Self::COLUMNS;
    const UPDATE_COLUMNS: &'static [&'static str] = &[
        "name",
        "phone_number",
        "website",
        "profile_image",
        "company_name",
        "company_logo",
        "email",
        "updated_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get(0)?,
            name: row.try_get(1)?,
            phone_number: row.try_get(2)?,
            website: row.try_get(3)?,
            profile_image: row.try_get(4)?,
            company_name: row.try_get(5)?,
            company_logo: row.try_get(6)?,
            email: row.try_get(7)?,
            created_at: row.try_get(8)?,
            updated_at: row.try_get(9)?,
        })
    }

    fn validate(draft: &Self::Draft) -> Result<()> {
        require_string("name", &draft.name)?;
        optional_bounded("phone_number", &draft.phone_number)?;
        optional_bounded("email", &draft.email)?;
        optional_bounded("company_name", &draft.company_name)?;
        Ok(())
    }

    fn bind_insert<'a>(
        id: &'a Uuid,
        draft: &'a Self::Draft,
        now: &'a DateTime<Utc>,
    ) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![
            id,
            &draft.name,
            &draft.phone_number,
            &draft.website,
            &draft.profile_image,
            &draft.company_name,
            &draft.company_logo,
            &draft.email,
            now,
            now,
        ]
    }

    fn bind_update<'a>(&'a self, now: &'a DateTime<Utc>) -> Vec<&'a (dyn ToSql + Sync)> {
        vec![
            &self.name,
            &self.phone_number,
            &self.website,
            &self.profile_image,
            &self.company_name,
            &self.company_logo,
            &self.email,
            now,
            &self.id,
        ]
    }
}

impl fmt::Display for TravelAdvisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TravelAdvisor(id={}, name={:?}, company={:?})",
            self.id,
            self.name,
            self.company_name.as_deref().unwrap_or("-")
        )
    }
}

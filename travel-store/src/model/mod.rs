//! Model capability shared by every table-backed record type.
//!
//! [`Entity`] describes how a typed record maps to and from a database row:
//! table and column names, the draft type holding insertable fields,
//! parameter binding, validation, and serialization into a column-keyed map.
//! The generic CRUD operations in [`crate::database`] are written once
//! against this trait and reused by all entities.

mod advisor;
mod data_source;
mod day;
mod document;
mod enums;
mod item;
mod itinerary;
mod processing_email;
mod stranded;

pub use advisor::{NewTravelAdvisor, TravelAdvisor};
pub use data_source::{DataSource, NewDataSource};
pub use day::{Day, NewDay};
pub use document::{InformationDocument, NewInformationDocument};
pub use enums::{DataSourceType, ItemType};
pub use item::{ItineraryItem, NewItineraryItem};
pub use itinerary::{Itinerary, NewItinerary};
pub use processing_email::{NewProcessingEmail, ProcessingEmail};
pub use stranded::{NewStrandedItineraryItem, StrandedItineraryItem};

use chrono::{DateTime, Utc};
use postgres::types::ToSql;
use postgres::Row;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Maximum length accepted for bounded string columns.
pub(crate) const MAX_STRING_LEN: usize = 255;

/// A typed record mapped to a database table.
///
/// Required columns are non-optional fields on the associated
/// [`Entity::Draft`] type, so a missing required field is a compile error;
/// nullable columns are `Option` fields and serialize as explicit nulls.
pub trait Entity: Sized {
    /// Caller-supplied columns for inserting a new row.
    type Draft;

    /// Table name.
    const TABLE: &'static str;

    /// Human-readable entity name used in error messages.
    const NAME: &'static str;

    /// All columns, in the order [`Entity::from_row`] expects.
    const COLUMNS: &'static [&'static str];

    /// Columns written on insert, in [`Entity::bind_insert`] order.
    const INSERT_COLUMNS: &'static [&'static str];

    /// Mutable columns written on update, in [`Entity::bind_update`] order.
    const UPDATE_COLUMNS: &'static [&'static str];

    /// Returns the primary key.
    fn id(&self) -> Uuid;

    /// Maps a database row (in [`Entity::COLUMNS`] order) into a record.
    ///
    /// # Errors
    ///
    /// Returns an error if a column cannot be converted to its field type.
    fn from_row(row: &Row) -> Result<Self>;

    /// Checks draft fields before they reach the database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for empty required strings, overlong
    /// bounded strings, or out-of-range numeric fields.
    fn validate(draft: &Self::Draft) -> Result<()>;

    /// Binds insert parameters in [`Entity::INSERT_COLUMNS`] order.
    ///
    /// `now` supplies both audit timestamps for the new row.
    fn bind_insert<'a>(
        id: &'a Uuid,
        draft: &'a Self::Draft,
        now: &'a DateTime<Utc>,
    ) -> Vec<&'a (dyn ToSql + Sync)>;

    /// Binds update parameters in [`Entity::UPDATE_COLUMNS`] order, with the
    /// primary key appended last for the WHERE clause.
    ///
    /// `now` supplies the refreshed `updated_at` value.
    fn bind_update<'a>(&'a self, now: &'a DateTime<Utc>) -> Vec<&'a (dyn ToSql + Sync)>;

    /// Serializes the record into a map keyed by column name.
    ///
    /// Nullable columns appear as explicit JSON nulls rather than being
    /// omitted, so a detached foreign key is visible to consumers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the record cannot be serialized.
    fn to_map(&self) -> Result<Map<String, Value>>
    where
        Self: Serialize,
    {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Serialization(<serde_json::Error as serde::ser::Error>::custom(
                "record did not serialize to an object",
            ))),
        }
    }

    /// Reconstructs a record from a map produced by [`Entity::to_map`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the map is missing columns or
    /// holds values of the wrong type.
    fn from_map(map: Map<String, Value>) -> Result<Self>
    where
        Self: DeserializeOwned,
    {
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}

// Statement builders shared by the generic CRUD layer. Placeholders are
// numbered $1..$n to match the binding order declared by each entity.

/// Builds a `$1, $2, ...` placeholder list for `count` parameters.
pub(crate) fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `SELECT ... WHERE id = $1` for one entity.
pub(crate) fn select_sql<E: Entity>() -> String {
    format!(
        "SELECT {} FROM {} WHERE id = $1",
        E::COLUMNS.join(", "),
        E::TABLE
    )
}

/// `SELECT ...` over the whole table, oldest rows first.
pub(crate) fn list_sql<E: Entity>() -> String {
    format!(
        "SELECT {} FROM {} ORDER BY created_at",
        E::COLUMNS.join(", "),
        E::TABLE
    )
}

/// `INSERT ... RETURNING` every column so create yields a populated record.
pub(crate) fn insert_sql<E: Entity>() -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        E::TABLE,
        E::INSERT_COLUMNS.join(", "),
        placeholders(E::INSERT_COLUMNS.len()),
        E::COLUMNS.join(", ")
    )
}

/// `UPDATE ... WHERE id = $n RETURNING` the refreshed row.
pub(crate) fn update_sql<E: Entity>() -> String {
    let assignments = E::UPDATE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ${}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
        E::TABLE,
        assignments,
        E::UPDATE_COLUMNS.len() + 1,
        E::COLUMNS.join(", ")
    )
}

/// `DELETE ... WHERE id = $1` for one entity.
pub(crate) fn delete_sql<E: Entity>() -> String {
    format!("DELETE FROM {} WHERE id = $1", E::TABLE)
}

/// `SELECT ... WHERE column = $1` filtered lookup with an explicit sort.
pub(crate) fn select_by_sql<E: Entity>(column: &str, order_by: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {column} = $1 ORDER BY {order_by}",
        E::COLUMNS.join(", "),
        E::TABLE
    )
}

/// `SELECT ... WHERE column IS NULL` for detached-row lookups.
pub(crate) fn select_where_null_sql<E: Entity>(column: &str, order_by: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {column} IS NULL ORDER BY {order_by}",
        E::COLUMNS.join(", "),
        E::TABLE
    )
}

// Validation helpers used by the entity impls.

/// A required bounded string: non-empty after trimming, at most 255 bytes.
pub(crate) fn require_string(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation {
            field: field.to_string(),
            message: "must be non-empty".to_string(),
        });
    }
    bounded_string(field, value)
}

/// A required unbounded text column: non-empty after trimming.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation {
            field: field.to_string(),
            message: "must be non-empty".to_string(),
        });
    }
    Ok(())
}

/// A bounded string column: at most 255 bytes when present.
pub(crate) fn bounded_string(field: &'static str, value: &str) -> Result<()> {
    if value.len() > MAX_STRING_LEN {
        return Err(Error::Validation {
            field: field.to_string(),
            message: format!("must be at most {MAX_STRING_LEN} characters"),
        });
    }
    Ok(())
}

/// An optional bounded string column.
pub(crate) fn optional_bounded(field: &'static str, value: &Option<String>) -> Result<()> {
    match value {
        Some(s) => bounded_string(field, s),
        None => Ok(()),
    }
}

/// A non-negative integer column (display positions).
pub(crate) fn non_negative(field: &'static str, value: i32) -> Result<()> {
    if value < 0 {
        return Err(Error::Validation {
            field: field.to_string(),
            message: format!("must be non-negative, got {value}"),
        });
    }
    Ok(())
}

/// A strictly positive integer column (durations).
pub(crate) fn positive(field: &'static str, value: i32) -> Result<()> {
    if value <= 0 {
        return Err(Error::Validation {
            field: field.to_string(),
            message: format!("must be positive, got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1), "$1");
        assert_eq!(placeholders(3), "$1, $2, $3");
        assert_eq!(placeholders(0), "");
    }

    #[test]
    fn test_select_sql_shape() {
        let sql = select_sql::<TravelAdvisor>();
        assert_eq!(
            sql,
            "SELECT id, name, phone_number, website, profile_image, company_name, \
             company_logo, email, created_at, updated_at FROM travel_advisors WHERE id = $1"
        );
    }

    #[test]
    fn test_insert_sql_shape() {
        let sql = insert_sql::<ProcessingEmail>();
        assert_eq!(
            sql,
            "INSERT INTO processing_emails (id, email, travel_advisor_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, email, travel_advisor_id, created_at, updated_at"
        );
    }

    #[test]
    fn test_update_sql_shape() {
        let sql = update_sql::<ProcessingEmail>();
        assert_eq!(
            sql,
            "UPDATE processing_emails SET email = $1, travel_advisor_id = $2, updated_at = $3 \
             WHERE id = $4 \
             RETURNING id, email, travel_advisor_id, created_at, updated_at"
        );
    }

    #[test]
    fn test_delete_sql_shape() {
        assert_eq!(delete_sql::<Day>(), "DELETE FROM days WHERE id = $1");
    }

    #[test]
    fn test_select_by_sql_shape() {
        let sql = select_by_sql::<Day>("itinerary_id", "created_at");
        assert!(sql.contains("FROM days WHERE itinerary_id = $1 ORDER BY created_at"));
    }

    #[test]
    fn test_select_where_null_sql_shape() {
        let sql = select_where_null_sql::<ItineraryItem>("day_id", "created_at");
        assert!(sql.contains("WHERE day_id IS NULL ORDER BY created_at"));
    }

    #[test]
    fn test_insert_placeholder_count_matches_columns() {
        let sql = insert_sql::<TravelAdvisor>();
        let expected = format!("${}", TravelAdvisor::INSERT_COLUMNS.len());
        assert!(sql.contains(&expected));
        assert!(!sql.contains(&format!("${}", TravelAdvisor::INSERT_COLUMNS.len() + 1)));
    }

    #[test]
    fn test_require_string() {
        assert!(require_string("name", "Jane Smith").is_ok());
        assert!(require_string("name", "").is_err());
        assert!(require_string("name", "   ").is_err());
        assert!(require_string("name", &"x".repeat(256)).is_err());
        assert!(require_string("name", &"x".repeat(255)).is_ok());
    }

    #[test]
    fn test_optional_bounded() {
        assert!(optional_bounded("email", &None).is_ok());
        assert!(optional_bounded("email", &Some("a@example.com".to_string())).is_ok());
        assert!(optional_bounded("email", &Some("x".repeat(256))).is_err());
    }

    #[test]
    fn test_numeric_validators() {
        assert!(non_negative("index", 0).is_ok());
        assert!(non_negative("index", -1).is_err());
        assert!(positive("duration", 1).is_ok());
        assert!(positive("duration", 0).is_err());
    }
}

// Property-based tests for the statement builders.
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Placeholder lists contain exactly `count` entries, in order.
        #[test]
        fn prop_placeholders_count_and_order(count in 0usize..=40) {
            let built = placeholders(count);
            if count == 0 {
                prop_assert!(built.is_empty());
            } else {
                let parts: Vec<&str> = built.split(", ").collect();
                prop_assert_eq!(parts.len(), count);
                for (i, part) in parts.iter().enumerate() {
                    prop_assert_eq!(*part, format!("${}", i + 1));
                }
            }
        }
    }
}

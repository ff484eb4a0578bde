//! Generic CRUD operations over table-backed records.
//!
//! Each operation performs exactly one round trip and surfaces success or
//! failure synchronously; there are no retries and no caching. The free
//! functions are generic over [`postgres::GenericClient`] so the same
//! operations compose inside a transaction, and [`Database`] exposes them as
//! convenience methods on the plain connection.

use chrono::Utc;
use log::debug;
use postgres::GenericClient;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{delete_sql, insert_sql, list_sql, select_sql, update_sql, Entity};

use super::connection::Database;

/// Inserts a new record and returns the fully populated instance.
///
/// A v4 UUID and both audit timestamps are generated here, and the inserted
/// row is read back in the same round trip, so the returned record carries
/// exactly what the database stored.
///
/// # Errors
///
/// Returns [`Error::Validation`] when the draft fails validation and
/// [`Error::Persistence`] when the database rejects the write (for example a
/// foreign key referencing a row that does not exist).
pub fn create<E: Entity, C: GenericClient>(client: &mut C, draft: &E::Draft) -> Result<E> {
    E::validate(draft)?;

    let id = Uuid::new_v4();
    let now = Utc::now();
    let sql = insert_sql::<E>();
    let params = E::bind_insert(&id, draft, &now);
    let row = client.query_one(sql.as_str(), &params)?;
    let record = E::from_row(&row)?;
    debug!("created {} {}", E::NAME, record.id());
    Ok(record)
}

/// Fetches the record with the given primary key.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when no row matches; a missing record is
/// never reported as a placeholder value.
pub fn get_by_id<E: Entity, C: GenericClient>(client: &mut C, id: Uuid) -> Result<E> {
    let sql = select_sql::<E>();
    let row = client
        .query_opt(sql.as_str(), &[&id])?
        .ok_or_else(|| Error::NotFound {
            resource: format!("{} {id}", E::NAME),
        })?;
    E::from_row(&row)
}

/// Lists every record of the entity, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_all<E: Entity, C: GenericClient>(client: &mut C) -> Result<Vec<E>> {
    let sql = list_sql::<E>();
    let rows = client.query(sql.as_str(), &[])?;
    rows.iter().map(E::from_row).collect()
}

/// Persists the record's mutable columns and refreshes it in place.
///
/// The record's current field values are written in a single statement, so
/// fields the caller did not touch keep their values; `updated_at` is
/// refreshed from the returned row.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when the row no longer exists and
/// [`Error::Persistence`] when a constraint rejects the new values.
pub fn update<E: Entity, C: GenericClient>(client: &mut C, record: &mut E) -> Result<()> {
    let now = Utc::now();
    let sql = update_sql::<E>();
    let row = {
        let params = record.bind_update(&now);
        client.query_opt(sql.as_str(), &params)?
    };

    match row {
        Some(row) => {
            *record = E::from_row(&row)?;
            debug!("updated {} {}", E::NAME, record.id());
            Ok(())
        }
        None => Err(Error::NotFound {
            resource: format!("{} {}", E::NAME, record.id()),
        }),
    }
}

/// Removes the record's row.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when the row does not exist and
/// [`Error::Persistence`] when referential integrity (a dependent child row)
/// forbids the deletion.
pub fn delete<E: Entity, C: GenericClient>(client: &mut C, record: &E) -> Result<()> {
    let id = record.id();
    let sql = delete_sql::<E>();
    let affected = client.execute(sql.as_str(), &[&id])?;
    if affected == 0 {
        return Err(Error::NotFound {
            resource: format!("{} {id}", E::NAME),
        });
    }
    debug!("deleted {} {id}", E::NAME);
    Ok(())
}

impl Database {
    /// Inserts a new record and returns the fully populated instance.
    ///
    /// # Errors
    ///
    /// See [`create`].
    pub fn create<E: Entity>(&mut self, draft: &E::Draft) -> Result<E> {
        create(&mut self.client, draft)
    }

    /// Fetches the record with the given primary key.
    ///
    /// # Errors
    ///
    /// See [`get_by_id`].
    pub fn get_by_id<E: Entity>(&mut self, id: Uuid) -> Result<E> {
        get_by_id(&mut self.client, id)
    }

    /// Lists every record of the entity, oldest first.
    ///
    /// # Errors
    ///
    /// See [`list_all`].
    pub fn list_all<E: Entity>(&mut self) -> Result<Vec<E>> {
        list_all(&mut self.client)
    }

    /// Persists the record's mutable columns and refreshes it in place.
    ///
    /// # Errors
    ///
    /// See [`update`].
    pub fn update<E: Entity>(&mut self, record: &mut E) -> Result<()> {
        update(&mut self.client, record)
    }

    /// Removes the record's row.
    ///
    /// # Errors
    ///
    /// See [`delete`].
    pub fn delete<E: Entity>(&mut self, record: &E) -> Result<()> {
        delete(&mut self.client, record)
    }
}

//! Transaction helpers.
//!
//! A transaction scopes a group of operations: it commits when the closure
//! succeeds and rolls back when the closure fails or unwinds, so the scope
//! is released on every exit path.

use postgres::Transaction;

use crate::error::Result;

use super::connection::Database;

impl Database {
    /// Runs a closure inside a transaction.
    ///
    /// The generic operations in [`super::operations`] and the relationship
    /// queries in the database module accept the transaction in place of the
    /// plain connection.
    ///
    /// # Errors
    ///
    /// Returns the closure's error (after rolling back) or an error from
    /// starting/committing the transaction.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use travel_store::database::operations;
    /// use travel_store::model::{NewTravelAdvisor, TravelAdvisor};
    /// use travel_store::{ConnectionConfig, Database};
    ///
    /// let config = ConnectionConfig::new("db.example.com");
    /// let mut db = Database::connect(config).unwrap();
    ///
    /// let advisor: TravelAdvisor = db
    ///     .with_transaction(|tx| {
    ///         operations::create(tx, &NewTravelAdvisor {
    ///             name: "Jane Smith".to_string(),
    ///             ..Default::default()
    ///         })
    ///     })
    ///     .unwrap();
    /// ```
    pub fn with_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<T>,
    {
        let mut tx = self.client.transaction()?;
        let value = f(&mut tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Starts a transaction for manual control.
    ///
    /// Dropping the returned transaction rolls it back; call
    /// `commit`/`rollback` explicitly to finish it.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.client.transaction()?)
    }
}

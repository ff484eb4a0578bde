//! Relationship queries between the itinerary entities.
//!
//! One query per foreign-key access path. Like the CRUD layer, the free
//! functions are generic over [`postgres::GenericClient`] and [`Database`]
//! wraps them for use on a plain connection.

use postgres::GenericClient;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{
    select_by_sql, select_where_null_sql, Day, Entity, InformationDocument, Itinerary,
    ItineraryItem, ProcessingEmail, StrandedItineraryItem,
};

use super::connection::Database;

/// Fetches the records whose `column` equals `id`, sorted by `order_by`.
fn find_by<E: Entity, C: GenericClient>(
    client: &mut C,
    column: &str,
    order_by: &str,
    id: Uuid,
) -> Result<Vec<E>> {
    let sql = select_by_sql::<E>(column, order_by);
    let rows = client.query(sql.as_str(), &[&id])?;
    rows.iter().map(E::from_row).collect()
}

/// Itineraries owned by the advisor, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn itineraries_for_advisor<C: GenericClient>(
    client: &mut C,
    advisor_id: Uuid,
) -> Result<Vec<Itinerary>> {
    find_by(client, "travel_advisor_id", "created_at", advisor_id)
}

/// Processing emails attached to the advisor, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn processing_emails_for_advisor<C: GenericClient>(
    client: &mut C,
    advisor_id: Uuid,
) -> Result<Vec<ProcessingEmail>> {
    find_by(client, "travel_advisor_id", "created_at", advisor_id)
}

/// Stranded item records attributed to the advisor, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn stranded_items_for_advisor<C: GenericClient>(
    client: &mut C,
    advisor_id: Uuid,
) -> Result<Vec<StrandedItineraryItem>> {
    find_by(client, "travel_advisor_id", "created_at", advisor_id)
}

/// Days of the itinerary, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn days_for_itinerary<C: GenericClient>(
    client: &mut C,
    itinerary_id: Uuid,
) -> Result<Vec<Day>> {
    find_by(client, "itinerary_id", "created_at", itinerary_id)
}

/// Documents of the itinerary, in display order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn documents_for_itinerary<C: GenericClient>(
    client: &mut C,
    itinerary_id: Uuid,
) -> Result<Vec<InformationDocument>> {
    find_by(client, "itinerary_id", "index", itinerary_id)
}

/// Items scheduled on the day, in display order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn items_for_day<C: GenericClient>(client: &mut C, day_id: Uuid) -> Result<Vec<ItineraryItem>> {
    find_by(client, "day_id", "index", day_id)
}

/// Documents ingested from the data source, in display order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn documents_for_data_source<C: GenericClient>(
    client: &mut C,
    data_source_id: Uuid,
) -> Result<Vec<InformationDocument>> {
    find_by(client, "data_source_id", "index", data_source_id)
}

/// Items ingested from the data source, in display order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn items_for_data_source<C: GenericClient>(
    client: &mut C,
    data_source_id: Uuid,
) -> Result<Vec<ItineraryItem>> {
    find_by(client, "data_source_id", "index", data_source_id)
}

/// Items detached from any day, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn items_without_day<C: GenericClient>(client: &mut C) -> Result<Vec<ItineraryItem>> {
    let sql = select_where_null_sql::<ItineraryItem>("day_id", "created_at");
    let rows = client.query(sql.as_str(), &[])?;
    rows.iter().map(ItineraryItem::from_row).collect()
}

/// The stranded record tracking the item, if one exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn stranded_record_for_item<C: GenericClient>(
    client: &mut C,
    item_id: Uuid,
) -> Result<Option<StrandedItineraryItem>> {
    let sql = select_by_sql::<StrandedItineraryItem>("itinerary_item_id", "created_at");
    let row = client.query_opt(sql.as_str(), &[&item_id])?;
    row.as_ref().map(StrandedItineraryItem::from_row).transpose()
}

impl Database {
    /// Itineraries owned by the advisor, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn itineraries_for_advisor(&mut self, advisor_id: Uuid) -> Result<Vec<Itinerary>> {
        itineraries_for_advisor(&mut self.client, advisor_id)
    }

    /// Processing emails attached to the advisor, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn processing_emails_for_advisor(
        &mut self,
        advisor_id: Uuid,
    ) -> Result<Vec<ProcessingEmail>> {
        processing_emails_for_advisor(&mut self.client, advisor_id)
    }

    /// Stranded item records attributed to the advisor, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn stranded_items_for_advisor(
        &mut self,
        advisor_id: Uuid,
    ) -> Result<Vec<StrandedItineraryItem>> {
        stranded_items_for_advisor(&mut self.client, advisor_id)
    }

    /// Days of the itinerary, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn days_for_itinerary(&mut self, itinerary_id: Uuid) -> Result<Vec<Day>> {
        days_for_itinerary(&mut self.client, itinerary_id)
    }

    /// Documents of the itinerary, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn documents_for_itinerary(
        &mut self,
        itinerary_id: Uuid,
    ) -> Result<Vec<InformationDocument>> {
        documents_for_itinerary(&mut self.client, itinerary_id)
    }

    /// Items scheduled on the day, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn items_for_day(&mut self, day_id: Uuid) -> Result<Vec<ItineraryItem>> {
        items_for_day(&mut self.client, day_id)
    }

    /// Documents ingested from the data source, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn documents_for_data_source(
        &mut self,
        data_source_id: Uuid,
    ) -> Result<Vec<InformationDocument>> {
        documents_for_data_source(&mut self.client, data_source_id)
    }

    /// Items ingested from the data source, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn items_for_data_source(&mut self, data_source_id: Uuid) -> Result<Vec<ItineraryItem>> {
        items_for_data_source(&mut self.client, data_source_id)
    }

    /// Items detached from any day, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn items_without_day(&mut self) -> Result<Vec<ItineraryItem>> {
        items_without_day(&mut self.client)
    }

    /// The stranded record tracking the item, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn stranded_record_for_item(
        &mut self,
        item_id: Uuid,
    ) -> Result<Option<StrandedItineraryItem>> {
        stranded_record_for_item(&mut self.client, item_id)
    }
}

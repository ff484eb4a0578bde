//! Live CRUD verification command.
//!
//! Exercises the full persistence surface against the configured database:
//! the advisor email round trip, detached itinerary items, stranded
//! records, relationship queries, deletes in dependency order, and the
//! dangling-reference rejection. Every check runs inside one transaction
//! that is rolled back at the end, so the database is left untouched.

use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;
use travel_store::database::{operations, relations, Transaction};
use travel_store::model::{
    DataSource, DataSourceType, Day, Entity, InformationDocument, ItemType, Itinerary,
    ItineraryItem, NewDataSource, NewDay, NewInformationDocument, NewItinerary, NewItineraryItem,
    NewProcessingEmail, NewStrandedItineraryItem, NewTravelAdvisor, ProcessingEmail,
    StrandedItineraryItem, TravelAdvisor,
};
use travel_store::Logger;
use uuid::Uuid;

use crate::error::CliError;

use super::connect;

/// Exercise create/read/update/delete against the live database.
#[derive(Args)]
pub struct VerifyCommand {}

impl VerifyCommand {
    /// Runs every verification step, printing a labeled line per check.
    pub fn execute(&self, logger: &Logger) -> Result<(), CliError> {
        let mut db = connect(logger)?;

        let mut tx = db.transaction().map_err(CliError::from)?;
        let outcome = run_checks(&mut tx, logger);
        // Roll back regardless of outcome so verification leaves no rows.
        let _ = tx.rollback();

        match outcome {
            Ok(()) => {
                println!("PASS: all live database checks succeeded");
                Ok(())
            }
            Err(e) => {
                println!("FAIL: {e}");
                Err(CliError::CheckFailed(format!(
                    "live database verification failed: {e}"
                )))
            }
        }
    }
}

fn run_checks(tx: &mut Transaction<'_>, logger: &Logger) -> Result<(), CliError> {
    // Advisor created without an email: the absent link must serialize as
    // an explicit null.
    let mut advisor: TravelAdvisor = operations::create(
        tx,
        &NewTravelAdvisor {
            name: "Verification Advisor".to_string(),
            phone_number: Some("555-123-4567".to_string()),
            company_name: Some("Verification Travel Co.".to_string()),
            ..Default::default()
        },
    )?;
    let map = advisor.to_map()?;
    ensure(
        map.get("email") == Some(&Value::Null),
        "new advisor must serialize a null email",
    )?;
    println!("ok: travel advisor created with null email");

    advisor.email = Some("advisor@example.com".to_string());
    operations::update(tx, &mut advisor)?;
    let fetched: TravelAdvisor = operations::get_by_id(tx, advisor.id)?;
    ensure(
        fetched.email.as_deref() == Some("advisor@example.com"),
        "updated email must be visible on re-fetch",
    )?;
    println!("ok: advisor email updated and re-fetched");

    let source: DataSource = operations::create(
        tx,
        &NewDataSource {
            received_at: None,
            processed_at: None,
            source_type: DataSourceType::Email,
            url: "s3://ingest/verification".to_string(),
        },
    )?;
    println!("ok: data source created");

    let itinerary: Itinerary = operations::create(
        tx,
        &NewItinerary {
            travel_advisor_id: advisor.id,
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1)
                .ok_or_else(|| CliError::CheckFailed("invalid fixture date".to_string()))?,
            duration: 7,
            destination: "Lisbon".to_string(),
            cover_image: None,
        },
    )?;
    let day: Day = operations::create(
        tx,
        &NewDay {
            itinerary_id: itinerary.id,
            indices: vec![1, 2],
            title: "Arrival".to_string(),
        },
    )?;
    let item: ItineraryItem = operations::create(
        tx,
        &NewItineraryItem {
            day_id: Some(day.id),
            data_source_id: Some(source.id),
            index: 1,
            title: "Hotel Mundial".to_string(),
            item_type: ItemType::Hotel,
            detail_text: None,
            photos: None,
        },
    )?;
    let document: InformationDocument = operations::create(
        tx,
        &NewInformationDocument {
            itinerary_id: itinerary.id,
            data_source_id: Some(source.id),
            index: 0,
            title: "Packing list".to_string(),
            text: Some("Bring sunscreen.".to_string()),
            formatted_text: None,
            photos: None,
        },
    )?;
    println!("ok: itinerary, day, item and document created");

    let email: ProcessingEmail = operations::create(
        tx,
        &NewProcessingEmail {
            email: "process@example.com".to_string(),
            travel_advisor_id: advisor.id,
        },
    )?;
    println!("ok: processing email created");

    // Detached item plus its stranded record.
    let detached: ItineraryItem = operations::create(
        tx,
        &NewItineraryItem {
            day_id: None,
            data_source_id: None,
            index: 0,
            title: "Detached activity".to_string(),
            item_type: ItemType::Activity,
            detail_text: None,
            photos: None,
        },
    )?;
    ensure(detached.day_id.is_none(), "detached item must keep a null day")?;
    let detached_map = detached.to_map()?;
    ensure(
        detached_map.get("day_id") == Some(&Value::Null),
        "detached item must serialize a null day_id",
    )?;
    let mut stranded: StrandedItineraryItem = operations::create(
        tx,
        &NewStrandedItineraryItem {
            travel_advisor_id: None,
            itinerary_item_id: detached.id,
        },
    )?;
    ensure(
        stranded.travel_advisor_id.is_none(),
        "stranded record must allow a null advisor",
    )?;
    println!("ok: detached item and stranded record created");

    // Attribute the stranded record to the advisor once known.
    stranded.travel_advisor_id = Some(advisor.id);
    operations::update(tx, &mut stranded)?;
    println!("ok: stranded record attributed to advisor");

    // Relationship queries.
    let owned = relations::itineraries_for_advisor(tx, advisor.id)?;
    ensure(
        owned.iter().any(|i| i.id == itinerary.id),
        "advisor must own the new itinerary",
    )?;
    let days = relations::days_for_itinerary(tx, itinerary.id)?;
    ensure(
        days.iter().any(|d| d.indices == vec![1, 2]),
        "itinerary must list the new day with its indices",
    )?;
    let items = relations::items_for_day(tx, day.id)?;
    ensure(
        items.iter().any(|i| i.id == item.id),
        "day must list the new item",
    )?;
    let documents = relations::documents_for_itinerary(tx, itinerary.id)?;
    ensure(
        documents.iter().any(|d| d.id == document.id),
        "itinerary must list the new document",
    )?;
    let sourced_items = relations::items_for_data_source(tx, source.id)?;
    ensure(
        sourced_items.iter().any(|i| i.id == item.id),
        "data source must list the item it produced",
    )?;
    let sourced_documents = relations::documents_for_data_source(tx, source.id)?;
    ensure(
        sourced_documents.iter().any(|d| d.id == document.id),
        "data source must list the document it produced",
    )?;
    let attributed = relations::stranded_items_for_advisor(tx, advisor.id)?;
    ensure(
        attributed.iter().any(|s| s.id == stranded.id),
        "advisor must list the attributed stranded record",
    )?;
    let detached_items = relations::items_without_day(tx)?;
    ensure(
        detached_items.iter().any(|i| i.id == detached.id),
        "detached item must appear in the stranded candidates",
    )?;
    let record = relations::stranded_record_for_item(tx, detached.id)?;
    ensure(
        record.map(|s| s.id) == Some(stranded.id),
        "stranded record must be reachable from its item",
    )?;
    let emails = relations::processing_emails_for_advisor(tx, advisor.id)?;
    ensure(
        emails.iter().any(|e| e.id == email.id),
        "advisor must list the processing email",
    )?;
    println!("ok: relationship queries resolved");

    // Lookups for rows that do not exist must fail, not fabricate.
    match operations::get_by_id::<TravelAdvisor, _>(tx, Uuid::new_v4()) {
        Err(e) if e.is_not_found() => println!("ok: unknown id reported as not found"),
        Err(e) => {
            return Err(CliError::CheckFailed(format!(
                "expected a not-found error, got: {e}"
            )))
        }
        Ok(_) => {
            return Err(CliError::CheckFailed(
                "lookup of an unknown id returned a record".to_string(),
            ))
        }
    }

    // Deleting the advisor while itineraries depend on it must be refused.
    match operations::delete(tx, &advisor) {
        Err(e) if e.is_persistence() => {
            println!("ok: delete blocked by dependent itineraries");
        }
        Err(e) => {
            return Err(CliError::CheckFailed(format!(
                "expected a persistence error, got: {e}"
            )))
        }
        Ok(()) => {
            return Err(CliError::CheckFailed(
                "advisor delete succeeded despite dependent rows".to_string(),
            ))
        }
    }

    logger.info("all verification steps completed");
    Ok(())
}

fn ensure(condition: bool, message: &str) -> Result<(), CliError> {
    if condition {
        Ok(())
    } else {
        Err(CliError::CheckFailed(message.to_string()))
    }
}

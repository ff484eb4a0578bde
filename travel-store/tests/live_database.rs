//! Live database integration tests.
//!
//! Each test connects using the `DB_*` environment variables and skips
//! itself when they are absent. Rows created here are deleted before the
//! test returns.

mod common;

use chrono::NaiveDate;
use serde_json::Value;
use travel_store::model::{
    Day, Entity, ItemType, Itinerary, ItineraryItem, NewDay, NewItinerary, NewItineraryItem,
    NewStrandedItineraryItem, NewTravelAdvisor, StrandedItineraryItem, TravelAdvisor,
};
use uuid::Uuid;

fn advisor_draft() -> NewTravelAdvisor {
    NewTravelAdvisor {
        name: common::unique_name("Live Test Advisor"),
        phone_number: Some("555-123-4567".to_string()),
        company_name: Some("Luxury Travel Co.".to_string()),
        ..Default::default()
    }
}

#[test]
fn advisor_email_round_trip() {
    let Some(mut db) = common::live_database() else {
        return;
    };

    let mut advisor: TravelAdvisor = db.create(&advisor_draft()).unwrap();
    assert_eq!(advisor.email, None);

    // A null email must serialize as an explicit null.
    let map = advisor.to_map().unwrap();
    assert_eq!(map.get("email"), Some(&Value::Null));

    advisor.email = Some("jane@example.com".to_string());
    db.update(&mut advisor).unwrap();
    assert!(advisor.updated_at >= advisor.created_at);

    let fetched: TravelAdvisor = db.get_by_id(advisor.id).unwrap();
    assert_eq!(fetched.email.as_deref(), Some("jane@example.com"));
    assert_eq!(fetched.name, advisor.name);

    db.delete(&advisor).unwrap();
    let err = db.get_by_id::<TravelAdvisor>(advisor.id).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn get_by_id_unknown_is_not_found() {
    let Some(mut db) = common::live_database() else {
        return;
    };

    let err = db.get_by_id::<TravelAdvisor>(Uuid::new_v4()).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn detached_item_round_trip() {
    let Some(mut db) = common::live_database() else {
        return;
    };

    let item: ItineraryItem = db
        .create(&NewItineraryItem {
            day_id: None,
            data_source_id: None,
            index: 0,
            title: common::unique_name("Detached item"),
            item_type: ItemType::Activity,
            detail_text: None,
            photos: None,
        })
        .unwrap();
    assert_eq!(item.day_id, None);

    let fetched: ItineraryItem = db.get_by_id(item.id).unwrap();
    assert_eq!(fetched.day_id, None);
    let map = fetched.to_map().unwrap();
    assert_eq!(map.get("day_id"), Some(&Value::Null));

    let detached = db.items_without_day().unwrap();
    assert!(detached.iter().any(|i| i.id == item.id));

    db.delete(&item).unwrap();
}

#[test]
fn stranded_record_lifecycle() {
    let Some(mut db) = common::live_database() else {
        return;
    };

    let item: ItineraryItem = db
        .create(&NewItineraryItem {
            day_id: None,
            data_source_id: None,
            index: 0,
            title: common::unique_name("Stranded candidate"),
            item_type: ItemType::Info,
            detail_text: None,
            photos: None,
        })
        .unwrap();

    // A stranded record without an advisor is valid.
    let stranded: StrandedItineraryItem = db
        .create(&NewStrandedItineraryItem {
            travel_advisor_id: None,
            itinerary_item_id: item.id,
        })
        .unwrap();
    assert_eq!(stranded.travel_advisor_id, None);

    let found = db.stranded_record_for_item(item.id).unwrap();
    assert_eq!(found.map(|s| s.id), Some(stranded.id));

    db.delete(&stranded).unwrap();

    // A dangling advisor reference must be rejected by the database.
    let err = db
        .create::<StrandedItineraryItem>(&NewStrandedItineraryItem {
            travel_advisor_id: Some(Uuid::new_v4()),
            itinerary_item_id: item.id,
        })
        .unwrap_err();
    assert!(err.is_persistence(), "unexpected error: {err}");

    db.delete(&item).unwrap();
}

#[test]
fn itinerary_hierarchy_queries() {
    let Some(mut db) = common::live_database() else {
        return;
    };

    let advisor: TravelAdvisor = db.create(&advisor_draft()).unwrap();
    let itinerary: Itinerary = db
        .create(&NewItinerary {
            travel_advisor_id: advisor.id,
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            duration: 7,
            destination: "Lisbon".to_string(),
            cover_image: None,
        })
        .unwrap();
    let day: Day = db
        .create(&NewDay {
            itinerary_id: itinerary.id,
            indices: vec![1, 2],
            title: "Arrival".to_string(),
        })
        .unwrap();
    let item: ItineraryItem = db
        .create(&NewItineraryItem {
            day_id: Some(day.id),
            data_source_id: None,
            index: 1,
            title: "Hotel Mundial".to_string(),
            item_type: ItemType::Hotel,
            detail_text: None,
            photos: None,
        })
        .unwrap();

    let owned = db.itineraries_for_advisor(advisor.id).unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, itinerary.id);

    let days = db.days_for_itinerary(itinerary.id).unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].indices, vec![1, 2]);

    let items = db.items_for_day(day.id).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, item.id);

    let all: Vec<TravelAdvisor> = db.list_all().unwrap();
    assert!(all.iter().any(|a| a.id == advisor.id));

    // Deleting an advisor with dependent itineraries must be refused.
    let err = db.delete(&advisor).unwrap_err();
    assert!(err.is_persistence(), "unexpected error: {err}");

    db.delete(&item).unwrap();
    db.delete(&day).unwrap();
    db.delete(&itinerary).unwrap();
    db.delete(&advisor).unwrap();
}

#[test]
fn transaction_rolls_back_on_error() {
    let Some(mut db) = common::live_database() else {
        return;
    };

    let name = common::unique_name("Rollback Advisor");
    let draft = NewTravelAdvisor {
        name: name.clone(),
        ..Default::default()
    };

    let result: travel_store::Result<()> = db.with_transaction(|tx| {
        let _advisor: TravelAdvisor =
            travel_store::database::operations::create(tx, &draft)?;
        Err(travel_store::Error::Validation {
            field: "test".to_string(),
            message: "forced rollback".to_string(),
        })
    });
    assert!(result.is_err());

    let all: Vec<TravelAdvisor> = db.list_all().unwrap();
    assert!(
        !all.iter().any(|a| a.name == name),
        "rolled-back advisor must not persist"
    );
}

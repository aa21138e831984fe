//! Integration tests for the calendar, event, and event-template
//! repositories.

use chrono::{Duration, TimeZone, Utc};
use daybook_core::error::DaybookError;
use daybook_core::models::calendar::CreateCalendar;
use daybook_core::models::event::{
    Coordinates, CreateEvent, EventType, GpsLocation, ImportanceLevel, UpdateEvent,
};
use daybook_core::models::event_template::CreateEventTemplate;
use daybook_core::repository::{
    CalendarRepository, EventFilter, EventRepository, EventTemplateRepository,
};
use daybook_db::repository::{
    SurrealCalendarRepository, SurrealEventRepository, SurrealEventTemplateRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> (
    SurrealCalendarRepository<Db>,
    SurrealEventRepository<Db>,
    SurrealEventTemplateRepository<Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    daybook_db::run_migrations(&db).await.unwrap();
    (
        SurrealCalendarRepository::new(db.clone()),
        SurrealEventRepository::new(db.clone()),
        SurrealEventTemplateRepository::new(db),
    )
}

fn personal_calendar(user_id: Uuid, is_default: bool) -> CreateCalendar {
    CreateCalendar {
        user_id,
        name: "Personal Calendar".into(),
        description: Some("My personal events and appointments".into()),
        color: "#3B82F6".into(),
        is_default,
    }
}

fn checkup(calendar_id: Uuid, hours_from_epoch: i64) -> CreateEvent {
    let start = Utc.timestamp_opt(hours_from_epoch * 3600, 0).unwrap();
    CreateEvent {
        calendar_id,
        title: "Doctor Appointment".into(),
        description: Some("Annual checkup".into()),
        start_time: start,
        end_time: start + Duration::hours(1),
        all_day: false,
        event_type: EventType::Appointment,
        importance_level: ImportanceLevel::default(),
        metadata: None,
        template_id: None,
        gps_location: None,
    }
}

#[tokio::test]
async fn default_calendar_lookup() {
    let (calendars, _, _) = setup().await;
    let user_id = Uuid::new_v4();

    calendars
        .create(personal_calendar(user_id, false))
        .await
        .unwrap();
    let default = calendars
        .create(personal_calendar(user_id, true))
        .await
        .unwrap();

    let found = calendars.get_default_for_user(user_id).await.unwrap();
    assert_eq!(found.id, default.id);
    assert!(found.is_default);
}

#[tokio::test]
async fn missing_default_calendar_is_not_found() {
    let (calendars, _, _) = setup().await;
    let user_id = Uuid::new_v4();

    // A non-default calendar does not count.
    calendars
        .create(personal_calendar(user_id, false))
        .await
        .unwrap();

    let err = calendars.get_default_for_user(user_id).await.unwrap_err();
    assert!(matches!(err, DaybookError::NotFound { .. }));
}

#[tokio::test]
async fn event_create_roundtrip() {
    let (calendars, events, _) = setup().await;
    let user_id = Uuid::new_v4();
    let calendar = calendars
        .create(personal_calendar(user_id, true))
        .await
        .unwrap();

    let mut input = checkup(calendar.id, 100);
    input.metadata = Some(serde_json::json!({ "doctor_type": "general" }));
    input.gps_location = Some(GpsLocation {
        address: Some("12 Clinic St".into()),
        coordinates: Some(Coordinates {
            lat: 48.85,
            lng: 2.35,
        }),
    });

    let created = events.create(input).await.unwrap();
    assert_eq!(created.calendar_id, calendar.id);
    assert_eq!(created.title, "Doctor Appointment");
    assert_eq!(created.event_type, EventType::Appointment);
    assert_eq!(created.importance_level, ImportanceLevel::Medium);

    let fetched = events.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.metadata["doctor_type"], "general");
    let gps = fetched.gps_location.unwrap();
    assert_eq!(gps.address.as_deref(), Some("12 Clinic St"));
    assert_eq!(gps.coordinates.unwrap().lat, 48.85);
}

#[tokio::test]
async fn events_list_ordered_by_start_time() {
    let (calendars, events, _) = setup().await;
    let calendar = calendars
        .create(personal_calendar(Uuid::new_v4(), true))
        .await
        .unwrap();

    // Insert out of order.
    events.create(checkup(calendar.id, 300)).await.unwrap();
    events.create(checkup(calendar.id, 100)).await.unwrap();
    events.create(checkup(calendar.id, 200)).await.unwrap();

    let listed = events
        .list(calendar.id, EventFilter::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed.windows(2).all(|w| w[0].start_time <= w[1].start_time));
}

#[tokio::test]
async fn events_list_filters_by_range() {
    let (calendars, events, _) = setup().await;
    let calendar = calendars
        .create(personal_calendar(Uuid::new_v4(), true))
        .await
        .unwrap();

    events.create(checkup(calendar.id, 100)).await.unwrap();
    let inside = events.create(checkup(calendar.id, 200)).await.unwrap();
    events.create(checkup(calendar.id, 300)).await.unwrap();

    let range = (
        Utc.timestamp_opt(150 * 3600, 0).unwrap(),
        Utc.timestamp_opt(250 * 3600, 0).unwrap(),
    );
    let listed = events
        .list(
            calendar.id,
            EventFilter {
                range: Some(range),
                event_type: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, inside.id);
}

#[tokio::test]
async fn events_list_filters_by_type() {
    let (calendars, events, _) = setup().await;
    let calendar = calendars
        .create(personal_calendar(Uuid::new_v4(), true))
        .await
        .unwrap();

    events.create(checkup(calendar.id, 100)).await.unwrap();
    let mut bill = checkup(calendar.id, 200);
    bill.title = "Electricity bill".into();
    bill.event_type = EventType::BillDue;
    let bill = events.create(bill).await.unwrap();

    let listed = events
        .list(
            calendar.id,
            EventFilter {
                range: None,
                event_type: Some(EventType::BillDue),
            },
        )
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, bill.id);
}

#[tokio::test]
async fn events_are_scoped_to_their_calendar() {
    let (calendars, events, _) = setup().await;
    let mine = calendars
        .create(personal_calendar(Uuid::new_v4(), true))
        .await
        .unwrap();
    let theirs = calendars
        .create(personal_calendar(Uuid::new_v4(), true))
        .await
        .unwrap();

    events.create(checkup(mine.id, 100)).await.unwrap();

    let listed = events
        .list(theirs.id, EventFilter::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn event_partial_update() {
    let (calendars, events, _) = setup().await;
    let calendar = calendars
        .create(personal_calendar(Uuid::new_v4(), true))
        .await
        .unwrap();
    let created = events.create(checkup(calendar.id, 100)).await.unwrap();

    let updated = events
        .update(
            created.id,
            UpdateEvent {
                title: Some("Dentist Appointment".into()),
                importance_level: Some(ImportanceLevel::High),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Dentist Appointment");
    assert_eq!(updated.importance_level, ImportanceLevel::High);
    // Untouched fields survive.
    assert_eq!(updated.description.as_deref(), Some("Annual checkup"));
    assert_eq!(updated.start_time, created.start_time);
}

#[tokio::test]
async fn event_delete() {
    let (calendars, events, _) = setup().await;
    let calendar = calendars
        .create(personal_calendar(Uuid::new_v4(), true))
        .await
        .unwrap();
    let created = events.create(checkup(calendar.id, 100)).await.unwrap();

    events.delete(created.id).await.unwrap();

    let err = events.get_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, DaybookError::NotFound { .. }));
}

#[tokio::test]
async fn templates_list_active_ordered_by_name() {
    let (_, _, templates) = setup().await;

    templates
        .create(CreateEventTemplate {
            name: "Study Session".into(),
            event_type: EventType::Academic,
            default_duration_mins: Some(120),
            default_metadata: Some(serde_json::json!({ "location": "Library" })),
        })
        .await
        .unwrap();
    templates
        .create(CreateEventTemplate {
            name: "Doctor Appointment".into(),
            event_type: EventType::Appointment,
            default_duration_mins: Some(60),
            default_metadata: None,
        })
        .await
        .unwrap();

    let listed = templates.list_active().await.unwrap();
    assert_eq!(listed.len(), 2);
    // Templates default to active and come back name-ascending.
    assert!(listed.iter().all(|t| t.is_active));
    assert_eq!(listed[0].name, "Doctor Appointment");
    assert_eq!(listed[1].name, "Study Session");
}

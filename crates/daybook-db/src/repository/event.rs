//! SurrealDB implementation of [`EventRepository`].

use chrono::{DateTime, Utc};
use daybook_core::error::DaybookResult;
use daybook_core::models::event::{
    CreateEvent, Event, EventType, GpsLocation, ImportanceLevel, UpdateEvent,
};
use daybook_core::repository::{EventFilter, EventRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct EventRow {
    calendar_id: String,
    title: String,
    description: Option<String>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    all_day: bool,
    event_type: String,
    importance_level: String,
    metadata: serde_json::Value,
    template_id: Option<String>,
    gps_location: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct EventRowWithId {
    record_id: String,
    calendar_id: String,
    title: String,
    description: Option<String>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    all_day: bool,
    event_type: String,
    importance_level: String,
    metadata: serde_json::Value,
    template_id: Option<String>,
    gps_location: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EventRow {
    fn into_event(self, id: Uuid) -> Result<Event, DbError> {
        let calendar_id = Uuid::parse_str(&self.calendar_id)
            .map_err(|e| DbError::Decode(format!("invalid calendar UUID: {e}")))?;
        let event_type = EventType::parse(&self.event_type)
            .ok_or_else(|| DbError::Decode(format!("unknown event type: {}", self.event_type)))?;
        let importance_level = ImportanceLevel::parse(&self.importance_level).ok_or_else(|| {
            DbError::Decode(format!(
                "unknown importance level: {}",
                self.importance_level
            ))
        })?;
        let template_id = self
            .template_id
            .map(|t| {
                Uuid::parse_str(&t)
                    .map_err(|e| DbError::Decode(format!("invalid template UUID: {e}")))
            })
            .transpose()?;
        let gps_location = self
            .gps_location
            .map(|v| {
                serde_json::from_value::<GpsLocation>(v)
                    .map_err(|e| DbError::Decode(format!("invalid gps location: {e}")))
            })
            .transpose()?;

        Ok(Event {
            id,
            calendar_id,
            title: self.title,
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
            all_day: self.all_day,
            event_type,
            importance_level,
            metadata: self.metadata,
            template_id,
            gps_location,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl EventRowWithId {
    fn try_into_event(self) -> Result<Event, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        EventRow {
            calendar_id: self.calendar_id,
            title: self.title,
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
            all_day: self.all_day,
            event_type: self.event_type,
            importance_level: self.importance_level,
            metadata: self.metadata,
            template_id: self.template_id,
            gps_location: self.gps_location,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_event(id)
    }
}

fn gps_to_value(gps: GpsLocation) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(gps).map_err(|e| DbError::Decode(format!("gps encode: {e}")))
}

/// SurrealDB implementation of the Event repository.
#[derive(Clone)]
pub struct SurrealEventRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealEventRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> EventRepository for SurrealEventRepository<C> {
    async fn create(&self, input: CreateEvent) -> DaybookResult<Event> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let metadata = input
            .metadata
            .unwrap_or(serde_json::Value::Object(Default::default()));
        let gps_location = input.gps_location.map(gps_to_value).transpose()?;

        let result = self
            .db
            .query(
                "CREATE type::record('event', $id) SET \
                 calendar_id = $calendar_id, \
                 title = $title, \
                 description = $description, \
                 start_time = $start_time, \
                 end_time = $end_time, \
                 all_day = $all_day, \
                 event_type = $event_type, \
                 importance_level = $importance_level, \
                 metadata = $metadata, \
                 template_id = $template_id, \
                 gps_location = $gps_location",
            )
            .bind(("id", id_str.clone()))
            .bind(("calendar_id", input.calendar_id.to_string()))
            .bind(("title", input.title))
            .bind(("description", input.description))
            .bind(("start_time", input.start_time))
            .bind(("end_time", input.end_time))
            .bind(("all_day", input.all_day))
            .bind(("event_type", input.event_type.as_str().to_string()))
            .bind((
                "importance_level",
                input.importance_level.as_str().to_string(),
            ))
            .bind(("metadata", metadata))
            .bind(("template_id", input.template_id.map(|t| t.to_string())))
            .bind(("gps_location", gps_location))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<EventRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "event".into(),
            id: id_str,
        })?;

        Ok(row.into_event(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> DaybookResult<Event> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('event', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EventRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "event".into(),
            id: id_str,
        })?;

        Ok(row.into_event(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateEvent) -> DaybookResult<Event> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.start_time.is_some() {
            sets.push("start_time = $start_time");
        }
        if input.end_time.is_some() {
            sets.push("end_time = $end_time");
        }
        if input.all_day.is_some() {
            sets.push("all_day = $all_day");
        }
        if input.event_type.is_some() {
            sets.push("event_type = $event_type");
        }
        if input.importance_level.is_some() {
            sets.push("importance_level = $importance_level");
        }
        if input.metadata.is_some() {
            sets.push("metadata = $metadata");
        }
        if input.template_id.is_some() {
            sets.push("template_id = $template_id");
        }
        if input.gps_location.is_some() {
            sets.push("gps_location = $gps_location");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('event', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(start_time) = input.start_time {
            builder = builder.bind(("start_time", start_time));
        }
        if let Some(end_time) = input.end_time {
            builder = builder.bind(("end_time", end_time));
        }
        if let Some(all_day) = input.all_day {
            builder = builder.bind(("all_day", all_day));
        }
        if let Some(event_type) = input.event_type {
            builder = builder.bind(("event_type", event_type.as_str().to_string()));
        }
        if let Some(importance_level) = input.importance_level {
            builder = builder.bind(("importance_level", importance_level.as_str().to_string()));
        }
        if let Some(metadata) = input.metadata {
            builder = builder.bind(("metadata", metadata));
        }
        if let Some(template_id) = input.template_id {
            builder = builder.bind(("template_id", template_id.to_string()));
        }
        if let Some(gps_location) = input.gps_location {
            builder = builder.bind(("gps_location", gps_to_value(gps_location)?));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<EventRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "event".into(),
            id: id_str,
        })?;

        Ok(row.into_event(id)?)
    }

    async fn delete(&self, id: Uuid) -> DaybookResult<()> {
        self.db
            .query("DELETE type::record('event', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self, calendar_id: Uuid, filter: EventFilter) -> DaybookResult<Vec<Event>> {
        let mut conditions = vec!["calendar_id = $calendar_id"];
        if filter.range.is_some() {
            conditions.push("start_time >= $range_start AND start_time <= $range_end");
        }
        if filter.event_type.is_some() {
            conditions.push("event_type = $event_type");
        }

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM event \
             WHERE {} ORDER BY start_time ASC",
            conditions.join(" AND ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("calendar_id", calendar_id.to_string()));

        if let Some((start, end)) = filter.range {
            builder = builder
                .bind(("range_start", start))
                .bind(("range_end", end));
        }
        if let Some(event_type) = filter.event_type {
            builder = builder.bind(("event_type", event_type.as_str().to_string()));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<EventRowWithId> = result.take(0).map_err(DbError::from)?;

        let events = rows
            .into_iter()
            .map(|row| row.try_into_event())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(events)
    }
}

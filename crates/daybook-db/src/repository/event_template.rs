//! SurrealDB implementation of [`EventTemplateRepository`].

use chrono::{DateTime, Utc};
use daybook_core::error::DaybookResult;
use daybook_core::models::event::EventType;
use daybook_core::models::event_template::{CreateEventTemplate, EventTemplate};
use daybook_core::repository::EventTemplateRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct TemplateRow {
    name: String,
    event_type: String,
    default_duration_mins: Option<u32>,
    default_metadata: serde_json::Value,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct TemplateRowWithId {
    record_id: String,
    name: String,
    event_type: String,
    default_duration_mins: Option<u32>,
    default_metadata: serde_json::Value,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TemplateRow {
    fn into_template(self, id: Uuid) -> Result<EventTemplate, DbError> {
        let event_type = EventType::parse(&self.event_type)
            .ok_or_else(|| DbError::Decode(format!("unknown event type: {}", self.event_type)))?;
        Ok(EventTemplate {
            id,
            name: self.name,
            event_type,
            default_duration_mins: self.default_duration_mins,
            default_metadata: self.default_metadata,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TemplateRowWithId {
    fn try_into_template(self) -> Result<EventTemplate, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        TemplateRow {
            name: self.name,
            event_type: self.event_type,
            default_duration_mins: self.default_duration_mins,
            default_metadata: self.default_metadata,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_template(id)
    }
}

/// SurrealDB implementation of the EventTemplate repository.
#[derive(Clone)]
pub struct SurrealEventTemplateRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealEventTemplateRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> EventTemplateRepository for SurrealEventTemplateRepository<C> {
    async fn create(&self, input: CreateEventTemplate) -> DaybookResult<EventTemplate> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let default_metadata = input
            .default_metadata
            .unwrap_or(serde_json::Value::Object(Default::default()));

        let result = self
            .db
            .query(
                "CREATE type::record('event_template', $id) SET \
                 name = $name, \
                 event_type = $event_type, \
                 default_duration_mins = $default_duration_mins, \
                 default_metadata = $default_metadata",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("event_type", input.event_type.as_str().to_string()))
            .bind(("default_duration_mins", input.default_duration_mins))
            .bind(("default_metadata", default_metadata))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<TemplateRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "event_template".into(),
            id: id_str,
        })?;

        Ok(row.into_template(id)?)
    }

    async fn list_active(&self) -> DaybookResult<Vec<EventTemplate>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM event_template \
                 WHERE is_active = true ORDER BY name ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TemplateRowWithId> = result.take(0).map_err(DbError::from)?;

        let templates = rows
            .into_iter()
            .map(|row| row.try_into_template())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(templates)
    }
}

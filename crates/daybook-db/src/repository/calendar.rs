//! SurrealDB implementation of [`CalendarRepository`].

use chrono::{DateTime, Utc};
use daybook_core::error::DaybookResult;
use daybook_core::models::calendar::{Calendar, CreateCalendar};
use daybook_core::repository::CalendarRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CalendarRow {
    user_id: String,
    name: String,
    description: Option<String>,
    color: String,
    is_default: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CalendarRowWithId {
    record_id: String,
    user_id: String,
    name: String,
    description: Option<String>,
    color: String,
    is_default: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CalendarRow {
    fn into_calendar(self, id: Uuid) -> Result<Calendar, DbError> {
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        Ok(Calendar {
            id,
            user_id,
            name: self.name,
            description: self.description,
            color: self.color,
            is_default: self.is_default,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl CalendarRowWithId {
    fn try_into_calendar(self) -> Result<Calendar, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        CalendarRow {
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            color: self.color,
            is_default: self.is_default,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_calendar(id)
    }
}

/// SurrealDB implementation of the Calendar repository.
#[derive(Clone)]
pub struct SurrealCalendarRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCalendarRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CalendarRepository for SurrealCalendarRepository<C> {
    async fn create(&self, input: CreateCalendar) -> DaybookResult<Calendar> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('calendar', $id) SET \
                 user_id = $user_id, \
                 name = $name, \
                 description = $description, \
                 color = $color, \
                 is_default = $is_default",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("color", input.color))
            .bind(("is_default", input.is_default))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<CalendarRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "calendar".into(),
            id: id_str,
        })?;

        Ok(row.into_calendar(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> DaybookResult<Calendar> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('calendar', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CalendarRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "calendar".into(),
            id: id_str,
        })?;

        Ok(row.into_calendar(id)?)
    }

    async fn get_default_for_user(&self, user_id: Uuid) -> DaybookResult<Calendar> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM calendar \
                 WHERE user_id = $user_id AND is_default = true \
                 LIMIT 1",
            )
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CalendarRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "calendar".into(),
            id: format!("user_id={user_id}"),
        })?;

        Ok(row.try_into_calendar()?)
    }
}

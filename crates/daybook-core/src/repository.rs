//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. The auth and server layers depend
//! only on these traits, never on a concrete database crate.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DaybookResult;
use crate::models::{
    calendar::{Calendar, CreateCalendar},
    event::{CreateEvent, Event, EventType, UpdateEvent},
    event_template::{CreateEventTemplate, EventTemplate},
    user::{CreateUser, User},
};

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = DaybookResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DaybookResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = DaybookResult<User>> + Send;
}

pub trait CalendarRepository: Send + Sync {
    fn create(&self, input: CreateCalendar)
    -> impl Future<Output = DaybookResult<Calendar>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DaybookResult<Calendar>> + Send;
    fn get_default_for_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = DaybookResult<Calendar>> + Send;
}

/// Optional filters for event range queries.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Inclusive `[start, end]` window on the event start time.
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub event_type: Option<EventType>,
}

pub trait EventRepository: Send + Sync {
    fn create(&self, input: CreateEvent) -> impl Future<Output = DaybookResult<Event>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DaybookResult<Event>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateEvent,
    ) -> impl Future<Output = DaybookResult<Event>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = DaybookResult<()>> + Send;
    /// Events in a calendar, ordered by start time ascending.
    fn list(
        &self,
        calendar_id: Uuid,
        filter: EventFilter,
    ) -> impl Future<Output = DaybookResult<Vec<Event>>> + Send;
}

pub trait EventTemplateRepository: Send + Sync {
    fn create(
        &self,
        input: CreateEventTemplate,
    ) -> impl Future<Output = DaybookResult<EventTemplate>> + Send;
    /// Active templates, ordered by name ascending.
    fn list_active(&self) -> impl Future<Output = DaybookResult<Vec<EventTemplate>>> + Send;
}

//! Event template domain model.
//!
//! Templates are pre-built event shapes ("Doctor Appointment",
//! "Medication Reminder") that clients offer as starting points when
//! creating events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::event::EventType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTemplate {
    pub id: Uuid,
    pub name: String,
    pub event_type: EventType,
    /// Suggested duration in minutes; 0 means an all-day event.
    pub default_duration_mins: Option<u32>,
    pub default_metadata: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEventTemplate {
    pub name: String,
    pub event_type: EventType,
    pub default_duration_mins: Option<u32>,
    pub default_metadata: Option<serde_json::Value>,
}

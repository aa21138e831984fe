//! Calendar endpoints (all behind the auth middleware).
//!
//! Event reads and writes are scoped through the authenticated user's
//! default calendar; mutations additionally verify that the target
//! event belongs to one of the caller's calendars.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use daybook_auth::Identity;
use daybook_core::error::DaybookError;
use daybook_core::models::calendar::Calendar;
use daybook_core::models::event::{
    CreateEvent, Event, EventType, GpsLocation, ImportanceLevel, UpdateEvent,
};
use daybook_core::models::event_template::EventTemplate;
use daybook_core::repository::{
    CalendarRepository, EventFilter, EventRepository, EventTemplateRepository,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

// -----------------------------------------------------------------------
// Response shapes
// -----------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Event as returned over the API: the domain event decorated with its
/// type color.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    pub id: Uuid,
    pub calendar_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub all_day: bool,
    pub event_type: EventType,
    pub importance_level: ImportanceLevel,
    pub metadata: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_location: Option<GpsLocation>,
    pub color: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventBody {
    fn from(event: Event) -> Self {
        EventBody {
            id: event.id,
            calendar_id: event.calendar_id,
            title: event.title,
            description: event.description,
            start_time: event.start_time,
            end_time: event.end_time,
            all_day: event.all_day,
            color: event.event_type.color(),
            event_type: event.event_type,
            importance_level: event.importance_level,
            metadata: event.metadata,
            template_id: event.template_id,
            gps_location: event.gps_location,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBody {
    pub id: Uuid,
    pub name: String,
    pub event_type: EventType,
    #[serde(rename = "defaultDuration", skip_serializing_if = "Option::is_none")]
    pub default_duration_mins: Option<u32>,
    pub default_metadata: serde_json::Value,
    pub is_active: bool,
    pub color: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventTemplate> for TemplateBody {
    fn from(template: EventTemplate) -> Self {
        TemplateBody {
            id: template.id,
            name: template.name,
            color: template.event_type.color(),
            event_type: template.event_type,
            default_duration_mins: template.default_duration_mins,
            default_metadata: template.default_metadata,
            is_active: template.is_active,
            created_at: template.created_at,
            updated_at: template.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeBody {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub color: &'static str,
    pub display_name: String,
}

// -----------------------------------------------------------------------
// Request shapes
// -----------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventsQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub event_type: Option<EventType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub all_day: Option<bool>,
    pub event_type: Option<EventType>,
    pub importance_level: Option<ImportanceLevel>,
    pub metadata: Option<serde_json::Value>,
    pub template_id: Option<Uuid>,
    pub gps_location: Option<GpsLocation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub all_day: Option<bool>,
    pub event_type: Option<EventType>,
    pub importance_level: Option<ImportanceLevel>,
    pub metadata: Option<serde_json::Value>,
    pub template_id: Option<Uuid>,
    pub gps_location: Option<GpsLocation>,
}

// -----------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------

async fn default_calendar(state: &AppState, identity: &Identity) -> Result<Calendar, ApiError> {
    state
        .calendars
        .get_default_for_user(identity.user_id)
        .await
        .map_err(|e| match e {
            DaybookError::NotFound { .. } => {
                ApiError::NotFound("No calendar found for user".into())
            }
            other => other.into(),
        })
}

/// Fetch an event and verify it belongs to one of the caller's
/// calendars. A foreign or missing event gets the same answer, so
/// existence is not leaked across users.
async fn owned_event(state: &AppState, identity: &Identity, id: Uuid) -> Result<Event, ApiError> {
    let not_found = || ApiError::NotFound("Event not found or access denied".into());

    let event = state.events.get_by_id(id).await.map_err(|e| match e {
        DaybookError::NotFound { .. } => not_found(),
        other => other.into(),
    })?;

    let calendar = state
        .calendars
        .get_by_id(event.calendar_id)
        .await
        .map_err(|e| match e {
            DaybookError::NotFound { .. } => not_found(),
            other => other.into(),
        })?;

    if calendar.user_id != identity.user_id {
        return Err(not_found());
    }

    Ok(event)
}

// -----------------------------------------------------------------------
// Handlers
// -----------------------------------------------------------------------

/// `GET /api/calendar/events`
pub async fn list_events(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<ListResponse<EventBody>>, ApiError> {
    let calendar = default_calendar(&state, &identity).await?;

    let filter = EventFilter {
        // The range applies only when both bounds are present.
        range: query.start_date.zip(query.end_date),
        event_type: query.event_type,
    };

    let events = state.events.list(calendar.id, filter).await?;
    let data: Vec<EventBody> = events.into_iter().map(EventBody::from).collect();

    Ok(Json(ListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// `POST /api/calendar/events`
pub async fn create_event(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<ItemResponse<EventBody>>), ApiError> {
    let calendar = default_calendar(&state, &identity).await?;

    let mut missing = Vec::new();
    if body.title.as_deref().is_none_or(str::is_empty) {
        missing.push("title");
    }
    if body.start_time.is_none() {
        missing.push("startTime");
    }
    if body.end_time.is_none() {
        missing.push("endTime");
    }
    if body.event_type.is_none() {
        missing.push("eventType");
    }
    if !missing.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let (Some(title), Some(start_time), Some(end_time), Some(event_type)) =
        (body.title, body.start_time, body.end_time, body.event_type)
    else {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    };

    let event = state
        .events
        .create(CreateEvent {
            calendar_id: calendar.id,
            title,
            description: body.description,
            start_time,
            end_time,
            all_day: body.all_day.unwrap_or(false),
            event_type,
            importance_level: body.importance_level.unwrap_or_default(),
            metadata: body.metadata,
            template_id: body.template_id,
            gps_location: body.gps_location,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            success: true,
            data: event.into(),
            message: "Event created successfully".into(),
        }),
    ))
}

/// `PUT /api/calendar/events/{id}`
pub async fn update_event(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEventRequest>,
) -> Result<Json<ItemResponse<EventBody>>, ApiError> {
    owned_event(&state, &identity, id).await?;

    let event = state
        .events
        .update(
            id,
            UpdateEvent {
                title: body.title,
                description: body.description,
                start_time: body.start_time,
                end_time: body.end_time,
                all_day: body.all_day,
                event_type: body.event_type,
                importance_level: body.importance_level,
                metadata: body.metadata,
                template_id: body.template_id,
                gps_location: body.gps_location,
            },
        )
        .await?;

    Ok(Json(ItemResponse {
        success: true,
        data: event.into(),
        message: "Event updated successfully".into(),
    }))
}

/// `DELETE /api/calendar/events/{id}`
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::routes::auth::MessageResponse>, ApiError> {
    owned_event(&state, &identity, id).await?;

    state.events.delete(id).await?;

    Ok(Json(crate::routes::auth::MessageResponse {
        success: true,
        message: "Event deleted successfully".into(),
    }))
}

/// `GET /api/calendar/templates`
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<TemplateBody>>, ApiError> {
    let templates = state.templates.list_active().await?;
    let data: Vec<TemplateBody> = templates.into_iter().map(TemplateBody::from).collect();

    Ok(Json(ListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

/// `GET /api/calendar/event-types`
pub async fn list_event_types() -> Json<DataResponse<Vec<EventTypeBody>>> {
    let data = EventType::ALL
        .into_iter()
        .map(|event_type| EventTypeBody {
            event_type,
            color: event_type.color(),
            display_name: event_type.display_name(),
        })
        .collect();

    Json(DataResponse {
        success: true,
        data,
    })
}

//! Event domain model and the fixed event-type catalogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed set of event categories.
///
/// Each category carries a display color that clients use when rendering
/// calendar views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Appointment,
    BillDue,
    Medication,
    MaintenanceAuto,
    MaintenanceHome,
    WorkSchedule,
    Personal,
    Academic,
    Health,
    Social,
    LifeSkills,
    Financial,
    SelfCare,
    Transportation,
}

impl EventType {
    pub const ALL: [EventType; 14] = [
        EventType::Appointment,
        EventType::BillDue,
        EventType::Medication,
        EventType::MaintenanceAuto,
        EventType::MaintenanceHome,
        EventType::WorkSchedule,
        EventType::Personal,
        EventType::Academic,
        EventType::Health,
        EventType::Social,
        EventType::LifeSkills,
        EventType::Financial,
        EventType::SelfCare,
        EventType::Transportation,
    ];

    /// Wire/storage representation, e.g. `MAINTENANCE_AUTO`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Appointment => "APPOINTMENT",
            EventType::BillDue => "BILL_DUE",
            EventType::Medication => "MEDICATION",
            EventType::MaintenanceAuto => "MAINTENANCE_AUTO",
            EventType::MaintenanceHome => "MAINTENANCE_HOME",
            EventType::WorkSchedule => "WORK_SCHEDULE",
            EventType::Personal => "PERSONAL",
            EventType::Academic => "ACADEMIC",
            EventType::Health => "HEALTH",
            EventType::Social => "SOCIAL",
            EventType::LifeSkills => "LIFE_SKILLS",
            EventType::Financial => "FINANCIAL",
            EventType::SelfCare => "SELF_CARE",
            EventType::Transportation => "TRANSPORTATION",
        }
    }

    pub fn parse(s: &str) -> Option<EventType> {
        EventType::ALL.iter().copied().find(|t| t.as_str() == s)
    }

    /// Display color for calendar rendering.
    pub fn color(&self) -> &'static str {
        match self {
            EventType::Appointment => "#4A90E2",
            EventType::BillDue => "#E74C3C",
            EventType::Medication => "#27AE60",
            EventType::MaintenanceAuto => "#F39C12",
            EventType::MaintenanceHome => "#8B4513",
            EventType::WorkSchedule => "#9B59B6",
            EventType::Personal => "#1ABC9C",
            EventType::Academic => "#3498DB",
            EventType::Health => "#2ECC71",
            EventType::Social => "#E67E22",
            EventType::LifeSkills => "#95A5A6",
            EventType::Financial => "#F1C40F",
            EventType::SelfCare => "#E91E63",
            EventType::Transportation => "#34495E",
        }
    }

    /// Human-readable name, e.g. `MAINTENANCE_AUTO` → `Maintenance Auto`.
    pub fn display_name(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportanceLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for ImportanceLevel {
    fn default() -> Self {
        ImportanceLevel::Medium
    }
}

impl ImportanceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportanceLevel::Low => "LOW",
            ImportanceLevel::Medium => "MEDIUM",
            ImportanceLevel::High => "HIGH",
            ImportanceLevel::Critical => "CRITICAL",
        }
    }

    pub fn parse(s: &str) -> Option<ImportanceLevel> {
        match s {
            "LOW" => Some(ImportanceLevel::Low),
            "MEDIUM" => Some(ImportanceLevel::Medium),
            "HIGH" => Some(ImportanceLevel::High),
            "CRITICAL" => Some(ImportanceLevel::Critical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Optional geographic annotation on an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub calendar_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub all_day: bool,
    pub event_type: EventType,
    pub importance_level: ImportanceLevel,
    pub metadata: serde_json::Value,
    pub template_id: Option<Uuid>,
    pub gps_location: Option<GpsLocation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub calendar_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub all_day: bool,
    pub event_type: EventType,
    pub importance_level: ImportanceLevel,
    pub metadata: Option<serde_json::Value>,
    pub template_id: Option<Uuid>,
    pub gps_location: Option<GpsLocation>,
}

/// Partial update — `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_roundtrips_through_str() {
        for t in EventType::ALL {
            assert_eq!(EventType::parse(t.as_str()), Some(t));
        }
    }

    #[test]
    fn event_type_serializes_screaming_snake() {
        let json = serde_json::to_string(&EventType::MaintenanceAuto).unwrap();
        assert_eq!(json, "\"MAINTENANCE_AUTO\"");
    }

    #[test]
    fn display_name_splits_underscores() {
        assert_eq!(EventType::MaintenanceAuto.display_name(), "Maintenance Auto");
        assert_eq!(EventType::Appointment.display_name(), "Appointment");
    }

    #[test]
    fn every_type_has_a_color() {
        for t in EventType::ALL {
            assert!(t.color().starts_with('#'));
            assert_eq!(t.color().len(), 7);
        }
    }
}

//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD first_name ON TABLE user TYPE option<string>;
DEFINE FIELD last_name ON TABLE user TYPE option<string>;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Calendars
-- =======================================================================
DEFINE TABLE calendar SCHEMAFULL;
DEFINE FIELD user_id ON TABLE calendar TYPE string;
DEFINE FIELD name ON TABLE calendar TYPE string;
DEFINE FIELD description ON TABLE calendar TYPE option<string>;
DEFINE FIELD color ON TABLE calendar TYPE string;
DEFINE FIELD is_default ON TABLE calendar TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE calendar TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE calendar TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_calendar_user ON TABLE calendar COLUMNS user_id;

-- =======================================================================
-- Events
-- =======================================================================
DEFINE TABLE event SCHEMAFULL;
DEFINE FIELD calendar_id ON TABLE event TYPE string;
DEFINE FIELD title ON TABLE event TYPE string;
DEFINE FIELD description ON TABLE event TYPE option<string>;
DEFINE FIELD start_time ON TABLE event TYPE datetime;
DEFINE FIELD end_time ON TABLE event TYPE datetime;
DEFINE FIELD all_day ON TABLE event TYPE bool DEFAULT false;
DEFINE FIELD event_type ON TABLE event TYPE string \
    ASSERT $value IN ['APPOINTMENT', 'BILL_DUE', 'MEDICATION', \
    'MAINTENANCE_AUTO', 'MAINTENANCE_HOME', 'WORK_SCHEDULE', \
    'PERSONAL', 'ACADEMIC', 'HEALTH', 'SOCIAL', 'LIFE_SKILLS', \
    'FINANCIAL', 'SELF_CARE', 'TRANSPORTATION'];
DEFINE FIELD importance_level ON TABLE event TYPE string \
    ASSERT $value IN ['LOW', 'MEDIUM', 'HIGH', 'CRITICAL'];
DEFINE FIELD metadata ON TABLE event TYPE object FLEXIBLE DEFAULT {};
DEFINE FIELD template_id ON TABLE event TYPE option<string>;
DEFINE FIELD gps_location ON TABLE event TYPE option<object> FLEXIBLE;
DEFINE FIELD created_at ON TABLE event TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE event TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_event_calendar_start ON TABLE event \
    COLUMNS calendar_id, start_time;

-- =======================================================================
-- Event templates
-- =======================================================================
DEFINE TABLE event_template SCHEMAFULL;
DEFINE FIELD name ON TABLE event_template TYPE string;
DEFINE FIELD event_type ON TABLE event_template TYPE string \
    ASSERT $value IN ['APPOINTMENT', 'BILL_DUE', 'MEDICATION', \
    'MAINTENANCE_AUTO', 'MAINTENANCE_HOME', 'WORK_SCHEDULE', \
    'PERSONAL', 'ACADEMIC', 'HEALTH', 'SOCIAL', 'LIFE_SKILLS', \
    'FINANCIAL', 'SELF_CARE', 'TRANSPORTATION'];
DEFINE FIELD default_duration_mins ON TABLE event_template \
    TYPE option<int>;
DEFINE FIELD default_metadata ON TABLE event_template TYPE object \
    FLEXIBLE DEFAULT {};
DEFINE FIELD is_active ON TABLE event_template TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE event_template TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE event_template TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_event_template_name ON TABLE event_template \
    COLUMNS name;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

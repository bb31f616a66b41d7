use log::{error, info, warn};
use serde_json::Value;

use crate::models::skill::{clamp_level, MAX_LEVEL};
use crate::models::ResourceKind;
use crate::store::{KeyedRecordStore, StoreError};

pub const SCHEMA_VERSION_KEY: &str = "__schemaVersion";

/// Historical timeline keys, in the order older readers checked them.
pub const LEGACY_TIMELINE_KEYS: [&str; 3] = ["timelineData", "timeline", "timelineItems"];

struct Migration {
    version: u32,
    name: &'static str,
    apply: fn(&dyn KeyedRecordStore) -> Result<(), StoreError>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "consolidate timeline keys",
        apply: consolidate_timeline,
    },
    Migration {
        version: 2,
        name: "normalize skill records",
        apply: normalize_skills,
    },
];

pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

pub fn current_version(store: &dyn KeyedRecordStore) -> u32 {
    store
        .get(SCHEMA_VERSION_KEY)
        .ok()
        .flatten()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Apply every migration newer than the stored version, in order. Each step
/// bumps the stored version, so a failure leaves earlier steps recorded.
/// Returns the version the store ends at.
pub fn run(store: &dyn KeyedRecordStore) -> Result<u32, StoreError> {
    let start = current_version(store);
    let mut version = start;
    for migration in MIGRATIONS.iter().filter(|m| m.version > start) {
        info!("applying migration {}: {}", migration.version, migration.name);
        if let Err(e) = (migration.apply)(store) {
            error!("migration {} failed: {}", migration.version, e);
            return Err(e);
        }
        store.set(SCHEMA_VERSION_KEY, &migration.version.to_string())?;
        version = migration.version;
    }
    Ok(version)
}

fn parses_as_array(raw: &str) -> bool {
    matches!(serde_json::from_str::<Value>(raw), Ok(Value::Array(_)))
}

/// First legacy key holding a JSON array becomes the canonical `timeline`;
/// the other legacy keys are dropped.
fn consolidate_timeline(store: &dyn KeyedRecordStore) -> Result<(), StoreError> {
    let canonical = ResourceKind::Timeline.key();

    let mut winner: Option<String> = None;
    for key in LEGACY_TIMELINE_KEYS {
        if let Some(raw) = store.get(key)? {
            if parses_as_array(&raw) {
                winner = Some(raw);
                break;
            }
            warn!("ignoring unparseable timeline data under '{}'", key);
        }
    }

    if let Some(raw) = winner {
        store.set(canonical, &raw)?;
    }
    for key in LEGACY_TIMELINE_KEYS.iter().filter(|k| **k != canonical) {
        store.remove(key)?;
    }
    Ok(())
}

/// Older skill records carried out-of-range levels and no `iconType`.
fn normalize_skills(store: &dyn KeyedRecordStore) -> Result<(), StoreError> {
    let key = ResourceKind::Skills.key();
    let raw = match store.get(key)? {
        Some(raw) => raw,
        None => return Ok(()),
    };
    let mut records = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(records)) => records,
        _ => {
            warn!("skills are not a JSON array, leaving them as-is");
            return Ok(());
        }
    };

    for record in records.iter_mut() {
        let Some(obj) = record.as_object_mut() else { continue };
        let level = obj
            .get("level")
            .and_then(|l| l.as_f64())
            .map(|l| l.round().clamp(0.0, MAX_LEVEL as f64) as u8)
            .unwrap_or(1);
        obj.insert("level".to_string(), Value::from(clamp_level(level)));
        obj.entry("iconType".to_string())
            .or_insert_with(|| Value::from("predefined"));
    }

    match serde_json::to_string(&records) {
        Ok(json) => store.set(key, &json),
        Err(e) => {
            error!("could not re-encode skills: {}", e);
            Ok(())
        }
    }
}

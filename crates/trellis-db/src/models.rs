use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// A recurring annual window expressed as `dd-MM` month-day strings with no
/// year component.
///
/// Invariant: `start` and `end` are either both empty (no window defined) or
/// both `dd-MM`. A range whose start falls calendrically after its end wraps
/// the year boundary (e.g. `15-11` .. `28-02`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// True when no window is defined (either bound empty).
    pub fn is_unset(&self) -> bool {
        self.start.is_empty() || self.end.is_empty()
    }
}

/// One recurring care task for a plant: a label plus its annual window.
///
/// Stored as a JSONB array on the `plants` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareStep {
    pub label: String,
    pub window: DateRange,
}

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

/// A catalog plant -- an immutable snapshot of one remote catalog entry.
///
/// Replaced wholesale on `trellis sync`; never mutated by the evaluators.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plant {
    /// Catalog slug, e.g. `cherry-tomato`. Primary key.
    pub id: String,
    pub name: String,
    pub latin_name: Option<String>,
    /// Display names of declared companion species.
    pub companions: Vec<String>,
    /// Display names of declared incompatible species.
    pub incompatibles: Vec<String>,
    /// Sowing window bounds (`dd-MM`, empty when the catalog defines none).
    pub sowing_start: String,
    pub sowing_end: String,
    pub care_steps: Json<Vec<CareStep>>,
    pub synced_at: DateTime<Utc>,
}

impl Plant {
    /// The sowing window as a [`DateRange`] value.
    pub fn sowing_window(&self) -> DateRange {
        DateRange::new(self.sowing_start.clone(), self.sowing_end.clone())
    }
}

/// A garden -- the top-level grouping of a user's growing space.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Garden {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A location within a garden (a bed, a planter, a windowsill).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: Uuid,
    pub garden_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A placed plant -- the user's instance of a catalog plant at a location.
///
/// Carries its own companion/incompatible lists, seeded from the catalog at
/// placement time and editable afterwards, so a user's copy may diverge from
/// the catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Placement {
    pub id: Uuid,
    pub location_id: Uuid,
    pub plant_id: String,
    pub name: String,
    pub companions: Vec<String>,
    pub incompatibles: Vec<String>,
    pub placed_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_unset_when_either_bound_empty() {
        assert!(DateRange::new("", "").is_unset());
        assert!(DateRange::new("01-04", "").is_unset());
        assert!(DateRange::new("", "30-04").is_unset());
        assert!(!DateRange::new("01-04", "30-04").is_unset());
    }

    #[test]
    fn care_step_json_roundtrip() {
        let step = CareStep {
            label: "prune side shoots".to_owned(),
            window: DateRange::new("01-06", "31-08"),
        };
        let json = serde_json::to_string(&step).expect("should serialize");
        let parsed: CareStep = serde_json::from_str(&json).expect("should parse");
        assert_eq!(step, parsed);
    }

    #[test]
    fn care_step_json_shape() {
        let json = r#"{"label":"mulch","window":{"start":"15-11","end":"28-02"}}"#;
        let parsed: CareStep = serde_json::from_str(json).expect("should parse");
        assert_eq!(parsed.label, "mulch");
        assert_eq!(parsed.window, DateRange::new("15-11", "28-02"));
    }
}

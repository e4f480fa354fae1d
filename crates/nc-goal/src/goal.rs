// goal.rs — Goal, its success criteria, and the persisted State document.
//
// A Goal is a 30-day commitment with an explicit pass/fail rule. After the
// period ends, the next session asks the user whether it was met; until
// then its reflection stays `Unreflected`.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How success is judged over a goal's period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessCriteria {
    /// Number of evaluation points in the period (e.g., one per day).
    pub num_checkpoints: u32,

    /// Failures tolerated across those checkpoints.
    pub permitted_failures: u32,
}

impl SuccessCriteria {
    pub fn new(num_checkpoints: u32, permitted_failures: u32) -> Self {
        Self {
            num_checkpoints,
            permitted_failures,
        }
    }

    /// Whether the permitted failures fit within the checkpoints.
    ///
    /// This is advisory only: inconsistent criteria are still accepted.
    pub fn is_consistent(&self) -> bool {
        self.permitted_failures <= self.num_checkpoints
    }
}

/// Outcome of reflecting on a goal once its period is over.
///
/// Stored in the state file as `null` / `true` / `false` so files written
/// by earlier versions of the tracker stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reflection {
    /// The user has not yet said whether the goal was met.
    #[default]
    Unreflected,
    Succeeded,
    Failed,
}

impl Reflection {
    pub fn is_unreflected(&self) -> bool {
        matches!(self, Reflection::Unreflected)
    }

    fn as_option(&self) -> Option<bool> {
        match self {
            Reflection::Unreflected => None,
            Reflection::Succeeded => Some(true),
            Reflection::Failed => Some(false),
        }
    }
}

impl From<Option<bool>> for Reflection {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Reflection::Unreflected,
            Some(true) => Reflection::Succeeded,
            Some(false) => Reflection::Failed,
        }
    }
}

impl fmt::Display for Reflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reflection::Unreflected => write!(f, "unreflected"),
            Reflection::Succeeded => write!(f, "succeeded"),
            Reflection::Failed => write!(f, "failed"),
        }
    }
}

impl Serialize for Reflection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Reflection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(Reflection::from)
    }
}

/// A single monthly goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    /// What the user commits to (e.g., "Read every evening").
    pub name: String,

    pub success_criteria: SuccessCriteria,

    /// First day of the goal period.
    pub starts_at: NaiveDate,

    /// Last day of the goal period, `starts_at + 30 days`.
    pub ends_at: NaiveDate,

    /// Set during a later session's reflection phase.
    #[serde(default)]
    pub was_successful: Reflection,
}

impl Goal {
    /// Length of every goal period in days.
    pub const GOAL_PERIOD_DAYS: u64 = 30;

    /// Create a goal starting today, not yet reflected on.
    pub fn new(name: impl Into<String>, success_criteria: SuccessCriteria, today: NaiveDate) -> Self {
        Self {
            name: name.into(),
            success_criteria,
            starts_at: today,
            ends_at: days_after(today, Self::GOAL_PERIOD_DAYS),
            was_successful: Reflection::Unreflected,
        }
    }
}

/// The whole persisted document: every goal ever set plus the date of the
/// last completed session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct State {
    /// All goals in creation order. Goals are never removed.
    pub goals: Vec<Goal>,

    /// Date the last goal-setting session completed, if any.
    pub goals_last_updated: Option<NaiveDate>,
}

impl State {
    /// Goals still waiting for the user to say whether they were met.
    pub fn unreflected_goals_mut(&mut self) -> impl Iterator<Item = &mut Goal> {
        self.goals
            .iter_mut()
            .filter(|g| g.was_successful.is_unreflected())
    }

    pub fn has_unreflected_goals(&self) -> bool {
        self.goals.iter().any(|g| g.was_successful.is_unreflected())
    }
}

/// `date + days`, saturating at the last representable date.
pub fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

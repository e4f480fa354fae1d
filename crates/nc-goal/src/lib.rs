//! # nc-goal
//!
//! Monthly goal tracking for the N Commandments routine.
//!
//! On the first day of each month the user reflects on the goals set the
//! month before and commits to new ones. Everything is kept in one local
//! JSON state file.
//!
//! ## Key components
//!
//! - [`Goal`], [`SuccessCriteria`], [`Reflection`], [`State`] — the persisted data model
//! - [`StateStore`] — load/save capability, with [`JsonFileStore`] on disk
//!   and [`MemoryStore`] for tests
//! - [`Clock`] — source of today's date ([`SystemClock`], [`FixedClock`])
//! - [`gate`] — the day-1 / once-per-month checks
//! - [`Prompter`] — interactive answers as structured events ([`TerminalPrompter`])
//! - [`GoalSession`] — the session flow (GateCheck → Reflection → Entry → Persist → Done)

pub mod clock;
pub mod config;
pub mod error;
pub mod gate;
pub mod goal;
pub mod prompt;
pub mod session;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::TrackerConfig;
pub use error::GoalError;
pub use goal::{Goal, Reflection, State, SuccessCriteria};
pub use prompt::{EntryEvent, GoalDraft, GoalEntries, Prompter, ReflectionAnswer, TerminalPrompter};
pub use session::{GoalSession, SessionPhase, SessionSummary};
pub use store::{JsonFileStore, MemoryStore, StateStore};

// session.rs — GoalSession: one monthly goal-setting session.
//
// Phases run strictly in order:
//   GateCheck → Reflection → Entry → Persist → Done
// A gate refusal or a corrupted state file ends the session before anything
// new is written. Any error after loading ends it without saving.

use std::fmt;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::error::GoalError;
use crate::gate;
use crate::goal::{Reflection, State};
use crate::prompt::{GoalEntries, Prompter, ReflectionAnswer};
use crate::store::StateStore;

/// Phase a session is in. Used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    GateCheck,
    Reflection,
    Entry,
    Persist,
    Done,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::GateCheck => write!(f, "gate_check"),
            SessionPhase::Reflection => write!(f, "reflection"),
            SessionPhase::Entry => write!(f, "entry"),
            SessionPhase::Persist => write!(f, "persist"),
            SessionPhase::Done => write!(f, "done"),
        }
    }
}

/// What a completed session changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Goals the user answered for (success or failure).
    pub reflected: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// New goals entered this session.
    pub added: usize,
}

/// Runs a session against injected storage, clock, and prompter.
pub struct GoalSession<'a, S: StateStore + ?Sized, C: Clock + ?Sized, P: Prompter + ?Sized> {
    store: &'a S,
    clock: &'a C,
    prompter: &'a mut P,
}

impl<'a, S, C, P> GoalSession<'a, S, C, P>
where
    S: StateStore + ?Sized,
    C: Clock + ?Sized,
    P: Prompter + ?Sized,
{
    pub fn new(store: &'a S, clock: &'a C, prompter: &'a mut P) -> Self {
        Self {
            store,
            clock,
            prompter,
        }
    }

    /// Run the whole session and persist the result.
    pub fn run(&mut self) -> Result<SessionSummary, GoalError> {
        let today = self.clock.today();
        enter(SessionPhase::GateCheck, today);

        // Day-of-month is checked before the state file is read or created.
        gate::check_first_of_month(today)?;
        let mut state = self.store.load()?;
        gate::check_not_already_updated(today, state.goals_last_updated)?;

        self.prompter.say("Welcome to the N Commandments program.")?;

        let mut summary = SessionSummary::default();

        enter(SessionPhase::Reflection, today);
        self.reflect(&mut state, &mut summary)?;

        enter(SessionPhase::Entry, today);
        self.enter_goals(&mut state, today, &mut summary)?;

        enter(SessionPhase::Persist, today);
        state.goals_last_updated = Some(today);
        self.store.save(&state)?;

        self.prompter.say("Goals saved successfully.")?;
        self.prompter.say("Good luck!")?;

        enter(SessionPhase::Done, today);
        tracing::info!(
            reflected = summary.reflected,
            succeeded = summary.succeeded,
            failed = summary.failed,
            added = summary.added,
            total_goals = state.goals.len(),
            "session complete"
        );
        Ok(summary)
    }

    fn reflect(&mut self, state: &mut State, summary: &mut SessionSummary) -> Result<(), GoalError> {
        if !state.has_unreflected_goals() {
            return Ok(());
        }

        self.prompter.say("You have previously set goals.")?;
        self.prompter.say("Please reflect on your success and failures.")?;
        self.prompter
            .say("Please enter 'y' if you were successful, 'n' if you were not.")?;
        self.prompter.say("Enter 'q' to finish.")?;

        for goal in state.unreflected_goals_mut() {
            let outcome = match self.prompter.ask_reflection(goal)? {
                ReflectionAnswer::Quit => break,
                ReflectionAnswer::Succeeded => {
                    summary.succeeded += 1;
                    Reflection::Succeeded
                }
                ReflectionAnswer::Failed => {
                    summary.failed += 1;
                    Reflection::Failed
                }
            };
            tracing::debug!(goal = %goal.name, %outcome, "reflected on goal");
            goal.was_successful = outcome;
            summary.reflected += 1;
        }
        Ok(())
    }

    fn enter_goals(
        &mut self,
        state: &mut State,
        today: NaiveDate,
        summary: &mut SessionSummary,
    ) -> Result<(), GoalError> {
        self.prompter.say("Please enter your goals for the month.")?;
        self.prompter.say("Enter 'q' to finish.")?;

        for draft in GoalEntries::new(&mut *self.prompter) {
            let draft = draft?;
            if !draft.success_criteria.is_consistent() {
                tracing::warn!(
                    goal = %draft.name,
                    num_checkpoints = draft.success_criteria.num_checkpoints,
                    permitted_failures = draft.success_criteria.permitted_failures,
                    "permitted failures exceed checkpoints; storing goal as entered"
                );
            }
            let goal = draft.into_goal(today);
            tracing::debug!(goal = %goal.name, ends_at = %goal.ends_at, "added goal");
            state.goals.push(goal);
            summary.added += 1;
        }
        Ok(())
    }
}

fn enter(phase: SessionPhase, today: NaiveDate) {
    tracing::info!(%phase, %today, "session phase");
}

// prompt.rs — Interactive prompts for reflection and goal entry.
//
// The session never reads stdin directly. It asks a Prompter for structured
// answers (ReflectionAnswer, EntryEvent) so tests can script a whole session
// through an in-memory reader and writer.

use std::io::{BufRead, BufReader, Read, Write};

use crate::error::GoalError;
use crate::goal::{Goal, SuccessCriteria};

/// Sentinel that ends reflection or goal entry.
pub const QUIT: &str = "q";

/// Whether `input` is the quit sentinel (`q` or `quit`, any case).
pub fn is_quit(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.eq_ignore_ascii_case(QUIT) || trimmed.eq_ignore_ascii_case("quit")
}

/// The user's answer to "were you successful?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionAnswer {
    Succeeded,
    Failed,
    /// Stop reflecting; remaining goals stay unreflected.
    Quit,
}

impl ReflectionAnswer {
    /// `y` is success, `q` quits, anything else counts as a failure.
    pub fn parse(input: &str) -> Self {
        if is_quit(input) {
            return ReflectionAnswer::Quit;
        }
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => ReflectionAnswer::Succeeded,
            _ => ReflectionAnswer::Failed,
        }
    }
}

/// A goal as entered by the user, before dates are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraft {
    pub name: String,
    pub success_criteria: SuccessCriteria,
}

impl GoalDraft {
    /// Attach the goal period starting `today`.
    pub fn into_goal(self, today: chrono::NaiveDate) -> Goal {
        Goal::new(self.name, self.success_criteria, today)
    }
}

/// One step of the goal-entry loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryEvent {
    Submit(GoalDraft),
    Finish,
}

/// Source of user answers and sink for user-facing messages.
pub trait Prompter {
    /// Print a line of text for the user.
    fn say(&mut self, message: &str) -> Result<(), GoalError>;

    /// Ask whether `goal` was met.
    fn ask_reflection(&mut self, goal: &Goal) -> Result<ReflectionAnswer, GoalError>;

    /// Ask for the next goal, or learn that the user is done.
    fn next_entry(&mut self) -> Result<EntryEvent, GoalError>;
}

/// Iterator over submitted goal drafts; stops at `EntryEvent::Finish`.
///
/// Errors are yielded once and end the iteration.
pub struct GoalEntries<'a, P: Prompter + ?Sized> {
    prompter: &'a mut P,
    done: bool,
}

impl<'a, P: Prompter + ?Sized> GoalEntries<'a, P> {
    pub fn new(prompter: &'a mut P) -> Self {
        Self {
            prompter,
            done: false,
        }
    }
}

impl<P: Prompter + ?Sized> Iterator for GoalEntries<'_, P> {
    type Item = Result<GoalDraft, GoalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.prompter.next_entry() {
            Ok(EntryEvent::Submit(draft)) => Some(Ok(draft)),
            Ok(EntryEvent::Finish) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// A Prompter over a line-oriented reader and writer.
///
/// Use `TerminalPrompter::stdio()` for the real terminal, or pass in-memory
/// I/O for tests.
pub struct TerminalPrompter {
    reader: BufReader<Box<dyn Read>>,
    writer: Box<dyn Write>,
}

impl TerminalPrompter {
    pub fn new(reader: Box<dyn Read>, writer: Box<dyn Write>) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Read from stdin, write to stdout.
    pub fn stdio() -> Self {
        Self::new(Box::new(std::io::stdin()), Box::new(std::io::stdout()))
    }

    fn write_out(&mut self, text: &str) -> Result<(), GoalError> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|source| GoalError::IoError {
                path: "<terminal>".into(),
                source,
            })
    }

    /// Show `question` and return the answer line without its line ending.
    fn ask(&mut self, question: &str) -> Result<String, GoalError> {
        self.write_out(question)?;

        let mut line = String::new();
        let bytes = self
            .reader
            .read_line(&mut line)
            .map_err(|source| GoalError::IoError {
                path: "<terminal>".into(),
                source,
            })?;
        if bytes == 0 {
            return Err(GoalError::InputClosed);
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Ask for a number until `parse` accepts one.
    fn ask_number(
        &mut self,
        question: &str,
        field: &'static str,
        parse: fn(&str, &'static str) -> Result<u32, GoalError>,
    ) -> Result<u32, GoalError> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer, field) {
                Ok(n) => return Ok(n),
                Err(e) => {
                    tracing::debug!(field, input = %answer, "rejected numeric input");
                    self.say(&format!("Error: {}", e))?;
                }
            }
        }
    }
}

/// Parse a count typed by the user.
pub fn parse_count(input: &str, field: &'static str) -> Result<u32, GoalError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| GoalError::InvalidNumber {
            field,
            input: input.trim().to_string(),
        })
}

/// Parse a count that must be at least one.
pub fn parse_positive_count(input: &str, field: &'static str) -> Result<u32, GoalError> {
    match parse_count(input, field)? {
        0 => Err(GoalError::InvalidNumber {
            field,
            input: input.trim().to_string(),
        }),
        n => Ok(n),
    }
}

impl Prompter for TerminalPrompter {
    fn say(&mut self, message: &str) -> Result<(), GoalError> {
        self.write_out(&format!("{}\n", message))
    }

    fn ask_reflection(&mut self, goal: &Goal) -> Result<ReflectionAnswer, GoalError> {
        self.say(&format!("Goal: {} started on {}.", goal.name, goal.starts_at))?;
        let answer = self.ask("Were you successful? (y/n/q): ")?;
        Ok(ReflectionAnswer::parse(&answer))
    }

    fn next_entry(&mut self) -> Result<EntryEvent, GoalError> {
        let name = loop {
            let name = self.ask("Goal name: ")?;
            if is_quit(&name) {
                return Ok(EntryEvent::Finish);
            }
            let name = name.trim();
            if !name.is_empty() {
                break name.to_string();
            }
            self.say("Error: goal name cannot be empty.")?;
        };

        let num_checkpoints = self.ask_number(
            "Number of checkpoints: ",
            "number of checkpoints",
            parse_positive_count,
        )?;
        let permitted_failures =
            self.ask_number("Permitted failures: ", "permitted failures", parse_count)?;

        Ok(EntryEvent::Submit(GoalDraft {
            name,
            success_criteria: SuccessCriteria::new(num_checkpoints, permitted_failures),
        }))
    }
}

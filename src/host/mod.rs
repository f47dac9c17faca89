// src/host/mod.rs

//! Collaborators the console program wires around the simulator: where
//! answers come from, how announcements are spoken, and the question
//! sequence that ties them together (`session`).

pub mod session;

pub use session::{Session, SessionOutcome, SessionReport, Traveler, key_turns};

use crate::core::QuantumError;
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, warn};

/// Errors raised by the console program around the simulator.
#[derive(Debug)]
pub enum HostError {
    /// An answer was empty or whitespace only.
    EmptyInput,
    /// The input source ran out before the question sequence finished.
    InputClosed,
    /// An answer that must be an integer was not.
    InvalidNumber {
        /// The rejected answer
        input: String,
    },
    /// A dimension count outside what the program is willing to simulate.
    DimensionsOutOfRange {
        /// Requested dimensions
        dimensions: i64,
        /// Largest accepted value
        max: i64,
    },
    /// Reading answers or writing narrative text failed.
    Io(io::Error),
    /// The simulator rejected the request.
    Quantum(QuantumError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::EmptyInput => write!(f, "Input cannot be empty."),
            HostError::InputClosed => write!(f, "Input closed before all questions were answered."),
            HostError::InvalidNumber { input } => write!(f, "Expected a whole number, got {:?}.", input),
            HostError::DimensionsOutOfRange { dimensions, max } => {
                write!(f, "A universe needs between 1 and {} dimensions, got {}.", max, dimensions)
            }
            HostError::Io(e) => write!(f, "I/O error: {}", e),
            HostError::Quantum(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Io(e) => Some(e),
            HostError::Quantum(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HostError {
    fn from(e: io::Error) -> Self {
        HostError::Io(e)
    }
}

impl From<QuantumError> for HostError {
    fn from(e: QuantumError) -> Self {
        HostError::Quantum(e)
    }
}

/// Source of answers to the program's questions.
pub trait InputProvider {
    /// Poses `question` and returns the trimmed, non-empty answer.
    fn ask(&mut self, question: &str) -> Result<String, HostError>;
}

/// Trims `answer` and rejects it if nothing is left.
fn non_empty(answer: &str) -> Result<String, HostError> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        Err(HostError::EmptyInput)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Asks on a writer and reads one line per answer from a reader.
/// `LineInput::stdio()` is the interactive console.
pub struct LineInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl LineInput<io::StdinLock<'static>, io::Stdout> {
    /// Questions on stdout, answers from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InputProvider for LineInput<R, W> {
    fn ask(&mut self, question: &str) -> Result<String, HostError> {
        write!(self.writer, "{}", question)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(HostError::InputClosed);
        }
        non_empty(&line)
    }
}

/// Answers questions from a fixed queue and remembers what was asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }

    /// Every question posed so far, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl InputProvider for ScriptedInput {
    fn ask(&mut self, question: &str) -> Result<String, HostError> {
        self.questions.push(question.to_string());
        let answer = self.answers.pop_front().ok_or(HostError::InputClosed)?;
        non_empty(&answer)
    }
}

/// Fire-and-forget announcer. Nothing about the announcement's completion
/// or success flows back to the caller.
pub trait Speech {
    fn announce(&self, phrase: &str);
}

/// Does not speak.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Speech for Silent {
    fn announce(&self, _phrase: &str) {}
}

/// Speaks through an external `espeak`-compatible program, once per voice,
/// on a detached thread. A voice only runs if the previous one succeeded.
#[derive(Debug, Clone)]
pub struct Espeak {
    program: String,
    voices: Vec<String>,
}

impl Default for Espeak {
    fn default() -> Self {
        Self::new("espeak", ["de+f1", "en+f1"])
    }
}

impl Espeak {
    pub fn new<I, S>(program: impl Into<String>, voices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            voices: voices.into_iter().map(Into::into).collect(),
        }
    }
}

impl Speech for Espeak {
    fn announce(&self, phrase: &str) {
        let program = self.program.clone();
        let voices = self.voices.clone();
        let phrase = phrase.to_string();

        let spawned = thread::Builder::new()
            .name("qdoor-speech".to_string())
            .spawn(move || {
                for voice in &voices {
                    let status = Command::new(&program)
                        .args(["-v", voice.as_str(), phrase.as_str()])
                        .stdin(Stdio::null())
                        .stdout(Stdio::null())
                        .stderr(Stdio::null())
                        .status();
                    match status {
                        Ok(status) if status.success() => debug!(voice = voice.as_str(), "announced"),
                        Ok(status) => {
                            warn!(program = program.as_str(), voice = voice.as_str(), %status, "speech synthesis failed");
                            break;
                        }
                        Err(e) => {
                            warn!(program = program.as_str(), error = %e, "could not start speech synthesis");
                            break;
                        }
                    }
                }
            });

        if let Err(e) = spawned {
            warn!(error = %e, "could not spawn speech thread");
        }
    }
}

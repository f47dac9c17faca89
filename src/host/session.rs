// src/host/session.rs

//! The console program's question sequence.
//!
//! Each question is asked in a fixed order and blocks until answered. The
//! register is only touched between the universe questions and the key
//! question: create, transform every qubit, collapse.

use super::{HostError, InputProvider, Speech};
use crate::core::Register;
use crate::operations::transform_all;
use crate::simulation::Simulator;
use crate::universe::UniverseParams;
use std::io::Write;
use tracing::info;

/// Largest number of dimensions a session will simulate (`2^24` amplitudes).
/// Counts below 1 are left to `Register::new` to reject.
pub const MAX_SESSION_DIMENSIONS: i64 = 24;

/// Who is travelling. Collected for the record; the simulation ignores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traveler {
    pub name: String,
    pub date_of_birth: String,
    pub location: String,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The traveler chose not to turn the key.
    DoorwayClosed,
    /// The key was turned but the collapse landed on index 0.
    KeyFailed,
    /// The doorway opened and the traveler swapped universes.
    Swapped,
    /// The doorway opened and the traveler stayed.
    Declined,
}

/// Everything a finished session collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub traveler: Traveler,
    pub current: UniverseParams,
    pub target: UniverseParams,
    /// Basis index the doorway register collapsed to.
    pub collapsed_index: usize,
    pub outcome: SessionOutcome,
}

/// Door policy: the key turns iff the collapse landed anywhere in
/// `1..=register_size - 1`. Index 0 means failure.
pub fn key_turns(collapsed_index: usize, register_size: usize) -> bool {
    collapsed_index >= 1 && collapsed_index < register_size
}

/// One run of the question sequence, wired to its collaborators.
pub struct Session<I, S, W> {
    input: I,
    speech: S,
    out: W,
    simulator: Simulator,
}

impl<I: InputProvider, S: Speech, W: Write> Session<I, S, W> {
    pub fn new(input: I, speech: S, out: W, simulator: Simulator) -> Self {
        Self { input, speech, out, simulator }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Runs every question in order and reports how the session ended.
    ///
    /// # Errors
    /// Any empty answer, non-numeric dimension count, out-of-range
    /// dimensions, I/O failure or simulator error ends the session.
    pub fn run(&mut self) -> Result<SessionReport, HostError> {
        let traveler = Traveler {
            name: self.input.ask("Please enter your name: ")?,
            date_of_birth: self.input.ask("Please enter your date of birth (DD/MM/YYYY): ")?,
            location: self.input.ask("Please enter your location coordinates (latitude, longitude): ")?,
        };
        let current = UniverseParams {
            dimensions: self.ask_number("Enter the number of dimensions for the current universe: ")?,
            laws: self.input.ask("Enter the physical laws for the current universe: ")?,
            particles: self.input.ask("Enter the fundamental particles for the current universe: ")?,
        };
        info!(name = traveler.name.as_str(), "traveler registered");

        let target = self.choose_target(&current)?;
        let (collapsed_index, register_size) = self.open_doorway(&target)?;

        let turn = self.input.ask("Do you want to turn the key to open the doorway to the new universe? (y/n)")?;
        let outcome = if turn != "y" {
            self.narrate("The doorway to the new universe remains closed.")?;
            SessionOutcome::DoorwayClosed
        } else if !key_turns(collapsed_index, register_size) {
            self.narrate("The key failed to turn. Please try again.")?;
            SessionOutcome::KeyFailed
        } else {
            self.walk_through(&current, &target)?
        };

        info!(?outcome, collapsed_index, "session finished");
        Ok(SessionReport { traveler, current, target, collapsed_index, outcome })
    }

    /// Asks for the new universe by hand, or generates one at random.
    fn choose_target(&mut self, current: &UniverseParams) -> Result<UniverseParams, HostError> {
        let generate = self.input.ask("Do you want to generate a random universe? (y/n)")?;
        if generate == "n" {
            return Ok(UniverseParams {
                dimensions: self.ask_number(&format!(
                    "Enter the number of dimensions for the new universe (current universe has {} dimensions): ",
                    current.dimensions
                ))?,
                laws: self.input.ask(&format!(
                    "Enter the physical laws for the new universe (current laws: {}): ",
                    current.laws
                ))?,
                particles: self.input.ask(&format!(
                    "Enter the fundamental particles for the new universe (current particles: {}): ",
                    current.particles
                ))?,
            });
        }

        let target = UniverseParams::random(self.simulator.rng_mut());
        writeln!(self.out, "A new universe has been generated with the following parameters: ")?;
        writeln!(self.out, "{}", target)?;
        self.speech.announce("A new universe has been generated");
        Ok(target)
    }

    /// Builds the doorway register for `target`, puts every qubit through the
    /// transform and collapses it. Returns the surviving index and the
    /// register size.
    fn open_doorway(&mut self, target: &UniverseParams) -> Result<(usize, usize), HostError> {
        if target.dimensions > MAX_SESSION_DIMENSIONS {
            return Err(HostError::DimensionsOutOfRange {
                dimensions: target.dimensions,
                max: MAX_SESSION_DIMENSIONS,
            });
        }

        let mut register = Register::new(target.dimensions)?;
        transform_all(&mut register)?;
        let index = self.simulator.collapse_all(&mut register)?;
        info!(dimensions = target.dimensions, index, "doorway register collapsed");
        Ok((index, register.size()))
    }

    fn walk_through(&mut self, current: &UniverseParams, target: &UniverseParams) -> Result<SessionOutcome, HostError> {
        writeln!(self.out, "The key has successfully turned and the doorway to the new universe has been opened!")?;
        writeln!(self.out, "Welcome to the new universe with the following parameters: ")?;
        writeln!(self.out, "{}", target)?;
        self.speech.announce("The key turned, a doorway has been opened");

        let swap = self.input.ask("Do you want to swap to the new universe? (y/n)")?;
        if swap == "y" {
            writeln!(self.out, "You have successfully swapped to the new universe.")?;
            writeln!(self.out, "The previous universe had the following parameters: ")?;
            writeln!(self.out, "{}", current)?;
            self.speech.announce("universe swapped");
            Ok(SessionOutcome::Swapped)
        } else {
            self.narrate("You chose not to swap to the new universe.")?;
            Ok(SessionOutcome::Declined)
        }
    }

    /// Prints `line` and speaks it.
    fn narrate(&mut self, line: &str) -> Result<(), HostError> {
        writeln!(self.out, "{}", line)?;
        self.speech.announce(line);
        Ok(())
    }

    fn ask_number(&mut self, question: &str) -> Result<i64, HostError> {
        let answer = self.input.ask(question)?;
        answer.parse().map_err(|_| HostError::InvalidNumber { input: answer })
    }
}

// tests/session_tests.rs

use qdoor::host::{HostError, ScriptedInput, Session, SessionOutcome, Silent, Speech};
use qdoor::{QuantumError, Simulator, SimulatorConfig};
use std::cell::RefCell;

// Records announcements instead of speaking them
#[derive(Default)]
struct Recorder {
    phrases: RefCell<Vec<String>>,
}

impl Speech for Recorder {
    fn announce(&self, phrase: &str) {
        self.phrases.borrow_mut().push(phrase.to_string());
    }
}

// Name, birth date, location, then the current universe
fn traveler_answers() -> Vec<&'static str> {
    vec!["Ada", "10/12/1815", "51.5, -0.1", "3", "Quantum Mechanics", "Photon"]
}

fn seeded(seed: u64) -> Simulator {
    Simulator::with_config(SimulatorConfig::seeded(seed))
}

#[test]
fn test_keep_doorway_closed() -> Result<(), HostError> {
    let mut answers = traveler_answers();
    answers.extend(["n", "2", "Chaos Theory", "Axion", "n"]);

    let mut session = Session::new(ScriptedInput::new(answers), Recorder::default(), Vec::new(), seeded(1));
    let report = session.run()?;

    assert_eq!(report.outcome, SessionOutcome::DoorwayClosed);
    assert_eq!(report.traveler.name, "Ada");
    assert_eq!(report.current.dimensions, 3);
    assert_eq!(report.target.dimensions, 2);
    assert_eq!(report.target.laws, "Chaos Theory");
    assert!(report.collapsed_index < 4);

    let output = String::from_utf8_lossy(session.output()).to_string();
    assert!(output.contains("The doorway to the new universe remains closed."));
    assert_eq!(*session.speech().phrases.borrow(), ["The doorway to the new universe remains closed."]);
    Ok(())
}

#[test]
fn test_manual_prompts_quote_current_universe() -> Result<(), HostError> {
    let mut answers = traveler_answers();
    answers.extend(["n", "1", "String Theory", "Gluon", "n"]);

    let mut session = Session::new(ScriptedInput::new(answers), Silent, Vec::new(), seeded(2));
    session.run()?;

    let questions = session.input().questions();
    assert_eq!(questions.len(), 11);
    assert!(questions[7].contains("current universe has 3 dimensions"));
    assert!(questions[8].contains("current laws: Quantum Mechanics"));
    assert!(questions[9].contains("current particles: Photon"));
    Ok(())
}

#[test]
fn test_random_universe_is_announced() -> Result<(), HostError> {
    let mut answers = traveler_answers();
    answers.extend(["y", "n"]);

    let mut session = Session::new(ScriptedInput::new(answers), Recorder::default(), Vec::new(), seeded(3));
    let report = session.run()?;

    assert!((1..=10).contains(&report.target.dimensions));
    let output = String::from_utf8_lossy(session.output()).to_string();
    assert!(output.contains("A new universe has been generated with the following parameters: "));
    assert!(output.contains(&format!("Dimensions: {}", report.target.dimensions)));
    assert_eq!(session.speech().phrases.borrow()[0], "A new universe has been generated");
    Ok(())
}

#[test]
fn test_key_outcome_follows_collapsed_index() -> Result<(), HostError> {
    // One dimension: index 0 (key fails) and index 1 (door opens) are equally likely
    let mut seen = Vec::new();
    for seed in 0..64 {
        for swap in ["y", "n"] {
            let mut answers = traveler_answers();
            answers.extend(["n", "1", "Chaos Theory", "Axion", "y", swap]);
            let mut session = Session::new(ScriptedInput::new(answers), Recorder::default(), Vec::new(), seeded(seed));
            let report = session.run()?;

            let expected = match (report.collapsed_index, swap) {
                (0, _) => SessionOutcome::KeyFailed,
                (_, "y") => SessionOutcome::Swapped,
                _ => SessionOutcome::Declined,
            };
            assert_eq!(report.outcome, expected, "seed {} collapsed to {}", seed, report.collapsed_index);

            let output = String::from_utf8_lossy(session.output()).to_string();
            match report.outcome {
                SessionOutcome::KeyFailed => {
                    assert!(output.contains("The key failed to turn. Please try again."));
                    assert_eq!(session.input().remaining(), 1, "swap question must not be asked");
                }
                SessionOutcome::Swapped => {
                    assert!(output.contains("You have successfully swapped to the new universe."));
                    assert!(output.contains("Physical laws: Quantum Mechanics"));
                    assert_eq!(session.speech().phrases.borrow().last().map(String::as_str), Some("universe swapped"));
                }
                SessionOutcome::Declined => {
                    assert!(output.contains("You chose not to swap to the new universe."));
                }
                SessionOutcome::DoorwayClosed => unreachable!("key was turned"),
            }
            seen.push(report.outcome);
        }
    }
    assert!(seen.contains(&SessionOutcome::KeyFailed));
    assert!(seen.contains(&SessionOutcome::Swapped));
    assert!(seen.contains(&SessionOutcome::Declined));
    Ok(())
}

#[test]
fn test_empty_answer_ends_session() {
    let answers = vec!["Ada", ""];
    let mut session = Session::new(ScriptedInput::new(answers), Silent, Vec::new(), seeded(4));
    assert!(matches!(session.run(), Err(HostError::EmptyInput)));
    assert_eq!(session.input().questions().len(), 2);
}

#[test]
fn test_non_numeric_dimensions() {
    let answers = vec!["Ada", "10/12/1815", "51.5, -0.1", "three"];
    let mut session = Session::new(ScriptedInput::new(answers), Silent, Vec::new(), seeded(5));
    match session.run() {
        Err(HostError::InvalidNumber { input }) => assert_eq!(input, "three"),
        other => panic!("expected InvalidNumber, got {:?}", other),
    }
}

#[test]
fn test_zero_dimensions_reaches_register_error() {
    let mut answers = traveler_answers();
    answers.extend(["n", "0", "Chaos Theory", "Axion"]);
    let mut session = Session::new(ScriptedInput::new(answers), Silent, Vec::new(), seeded(6));
    assert!(matches!(
        session.run(),
        Err(HostError::Quantum(QuantumError::InvalidDimension { .. }))
    ));
}

#[test]
fn test_oversized_dimensions_are_refused() {
    let mut answers = traveler_answers();
    answers.extend(["n", "64", "Chaos Theory", "Axion"]);
    let mut session = Session::new(ScriptedInput::new(answers), Silent, Vec::new(), seeded(7));
    assert!(matches!(session.run(), Err(HostError::DimensionsOutOfRange { dimensions: 64, .. })));
}

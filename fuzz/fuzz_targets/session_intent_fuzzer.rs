//! Fuzz target for the session state machine
//!
//! # Strategy
//!
//! - Player intents: any mode, answer, term, match, proceed or reset
//! - Completions: fresh or stale generations, valid or failed content
//! - Timers: current, superseded or never-issued timer ids
//! - Config: small level counts and quotas so terminal states are reached
//!
//! # Invariants
//!
//! - Every standard session invariant holds after every event
//! - NEVER panic on any event order

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quizling_app::{Session, SessionAction, SessionEvent, TimerId};
use quizling_core::{GameConfig, GameMode};
use quizling_harness::{InvariantRegistry, SessionSnapshot, fixtures};

#[derive(Debug, Arbitrary)]
struct Input {
    max_level: u8,
    quota: u8,
    ops: Vec<Op>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Initialize { vocabulary: bool },
    Answer { choice: u8 },
    SelectTerm { index: u8 },
    SelectMatch { index: u8 },
    Proceed,
    ResetFeedback,
    Load { lag: u8, vocabulary: bool },
    Fail { lag: u8 },
    Fire { offset: u8 },
}

const ANSWERS: [&str; 5] = ["1", "2", "3", "4", " 2 "];
const TERMS: [&str; 4] = ["Apple", "Banana", "Sky", ""];
const MATCHES: [&str; 4] = ["Red", "Yellow", "Blue", "red"];

fn resolve(op: &Op, session: &Session, next_timer: u64) -> Option<SessionEvent> {
    let pick = |items: &[&str], index: u8| items[usize::from(index) % items.len()].to_owned();

    let event = match op {
        Op::Initialize { vocabulary } => SessionEvent::Initialize {
            mode: if *vocabulary { GameMode::Vocabulary } else { GameMode::Arithmetic },
        },
        Op::Answer { choice } => SessionEvent::SubmitAnswer { choice: pick(&ANSWERS, *choice) },
        Op::SelectTerm { index } => SessionEvent::SelectTerm { term: pick(&TERMS, *index) },
        Op::SelectMatch { index } => SessionEvent::SelectMatch { value: pick(&MATCHES, *index) },
        Op::Proceed => SessionEvent::Proceed,
        Op::ResetFeedback => SessionEvent::ResetFeedback,
        Op::Load { lag, vocabulary } => {
            let generation = session.generation().checked_sub(u64::from(lag % 3))?;
            let response =
                if *vocabulary { fixtures::fruit_colors() } else { fixtures::one_plus_one() };
            SessionEvent::ContentLoaded { generation, puzzle: fixtures::puzzle(response, generation) }
        },
        Op::Fail { lag } => SessionEvent::ContentFailed {
            generation: session.generation().checked_sub(u64::from(lag % 3))?,
            reason: "fuzz".into(),
        },
        Op::Fire { offset } => {
            // Offsets reach past the newest timer so unknown ids are covered
            let id = (next_timer + 1).checked_sub(u64::from(offset % 4))?;
            SessionEvent::DismissElapsed { timer: TimerId(id) }
        },
    };
    Some(event)
}

fuzz_target!(|input: Input| {
    let config = GameConfig::default()
        .with_max_level(u32::from(input.max_level % 4) + 1)
        .with_questions_to_level_up(u32::from(input.quota % 4) + 1);
    let Ok(mut session) = Session::new(config) else {
        return;
    };
    let invariants = InvariantRegistry::standard();
    let mut next_timer = 0u64;

    for op in input.ops.iter().take(256) {
        let Some(event) = resolve(op, &session, next_timer) else {
            continue;
        };
        let before = session.view();
        let actions = session.handle(event);

        for action in &actions {
            if let SessionAction::ScheduleDismiss { timer, .. } = action {
                next_timer = next_timer.max(timer.0);
            }
        }

        invariants.assert_all(&SessionSnapshot::step(before, &session), &format!("after {op:?}"));
    }
});

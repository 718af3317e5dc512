//! Scenario tests for the session controller.
//!
//! Each scenario drives a `Session` directly, delivering fetch completions by
//! hand, and checks the standard invariants after every step.

use quizling_app::{FetchTicket, Interaction, Session, SessionAction, SessionEvent, VocabularyState};
use quizling_core::{ContentResponse, Feedback, GameConfig, GameMode, Puzzle};
use quizling_harness::{InvariantRegistry, SessionSnapshot, fixtures};

/// Session wrapper that checks invariants on every step and tracks the
/// outstanding fetch.
struct Scenario {
    session: Session,
    invariants: InvariantRegistry,
    pending: Option<FetchTicket>,
    fetches: Vec<FetchTicket>,
}

impl Scenario {
    fn new(config: GameConfig) -> Self {
        Self {
            session: Session::new(config).unwrap(),
            invariants: InvariantRegistry::standard(),
            pending: None,
            fetches: Vec::new(),
        }
    }

    fn step(&mut self, event: SessionEvent) -> Vec<SessionAction> {
        let context = format!("after {event:?}");
        let before = self.session.view();
        let actions = self.session.handle(event);
        self.invariants.assert_all(&SessionSnapshot::step(before, &self.session), &context);

        for action in &actions {
            if let SessionAction::FetchContent(ticket) = action {
                self.pending = Some(*ticket);
                self.fetches.push(*ticket);
            }
        }
        actions
    }

    /// Complete the outstanding fetch with `response`.
    fn load(&mut self, response: ContentResponse) {
        let ticket = self.pending.take().unwrap();
        let puzzle = fixtures::puzzle(response, ticket.generation);
        let _ = self.step(SessionEvent::ContentLoaded { generation: ticket.generation, puzzle });
    }

    fn answer(&mut self, choice: &str) {
        let _ = self.step(SessionEvent::SubmitAnswer { choice: choice.into() });
    }

    fn pair(&mut self, term: &str, value: &str) {
        let _ = self.step(SessionEvent::SelectTerm { term: term.into() });
        let _ = self.step(SessionEvent::SelectMatch { value: value.into() });
    }

    fn headline(&self) -> Option<&'static str> {
        self.session.feedback().map(Feedback::headline)
    }
}

fn arithmetic_scenario(config: GameConfig) -> Scenario {
    let mut scenario = Scenario::new(config);
    let _ = scenario.step(SessionEvent::Initialize { mode: GameMode::Arithmetic });
    scenario.load(fixtures::one_plus_one());
    scenario
}

fn vocabulary_scenario() -> Scenario {
    let mut scenario = Scenario::new(GameConfig::default());
    let _ = scenario.step(SessionEvent::Initialize { mode: GameMode::Vocabulary });
    scenario.load(fixtures::fruit_colors());
    scenario
}

#[test]
fn correct_answer_awards_ten_stars() {
    let mut scenario = arithmetic_scenario(GameConfig::default());
    scenario.answer("2");

    assert_eq!(scenario.session.score(), 10);
    assert_eq!(scenario.headline(), Some("Correct!"));
}

#[test]
fn wrong_answer_reveals_correct_answer() {
    let mut scenario = arithmetic_scenario(GameConfig::default());
    scenario.answer("3");

    assert_eq!(scenario.session.score(), 0);
    assert_eq!(scenario.headline(), Some("Not Quite!"));
    assert!(scenario.session.feedback().unwrap().detail().contains('2'));
}

#[test]
fn quota_levels_up_and_proceed_fetches_next_level() {
    let mut scenario = arithmetic_scenario(GameConfig::default());

    for round in 1..=3 {
        scenario.answer("2");
        if round < 3 {
            assert_eq!(scenario.headline(), Some("Correct!"));
            let _ = scenario.step(SessionEvent::Proceed);
            scenario.load(fixtures::one_plus_one());
        }
    }
    assert_eq!(scenario.headline(), Some("Level Up!"));
    assert!(scenario.session.is_level_complete());

    let _ = scenario.step(SessionEvent::Proceed);
    assert_eq!(scenario.session.level(), 2);
    assert_eq!(scenario.session.correct_in_level(), 0);

    // Oracle: the last fetch asks for level 2
    let last = scenario.fetches.last().unwrap();
    assert_eq!(last.request.level, 2);
    assert_eq!(last.request.mode, GameMode::Arithmetic);
}

#[test]
fn final_quota_ends_game_without_fetch() {
    let config = GameConfig::default().with_max_level(1);
    let mut scenario = arithmetic_scenario(config);

    for round in 1..=3 {
        scenario.answer("2");
        if round < 3 {
            let _ = scenario.step(SessionEvent::Proceed);
            scenario.load(fixtures::one_plus_one());
        }
    }
    assert_eq!(scenario.headline(), Some("Congratulations!"));
    assert!(scenario.session.feedback().unwrap().detail().contains("30 stars"));
    assert!(scenario.session.is_game_over());

    let fetches_before = scenario.fetches.len();
    let actions = scenario.step(SessionEvent::Proceed);

    assert!(scenario.session.puzzle().is_none());
    assert_eq!(scenario.fetches.len(), fetches_before);
    assert!(actions.contains(&SessionAction::SessionFinished { final_score: 30 }));
    assert_eq!(scenario.session.interaction(), Interaction::Finished);
}

#[test]
fn mismatch_is_transient_and_clears_selection() {
    let mut scenario = vocabulary_scenario();
    scenario.pair("Apple", "Blue");

    assert!(scenario.session.matched_pairs().is_empty());
    assert!(scenario.session.selected_term().is_none());
    assert_eq!(scenario.headline(), Some("Oops!"));
    assert!(scenario.session.feedback().unwrap().is_transient());
}

#[test]
fn all_pairs_score_once_in_any_order() {
    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

    for order in orders {
        let mut scenario = vocabulary_scenario();
        for (position, &index) in order.iter().enumerate() {
            let (term, value) = fixtures::FRUIT_PAIRS[index];
            scenario.pair(term, value);

            if position < 2 {
                assert_eq!(scenario.session.score(), 0, "order {order:?}");
                assert_eq!(scenario.headline(), Some("Good Match!"));
            }
        }

        assert_eq!(scenario.session.score(), 10, "order {order:?}");
        assert_eq!(scenario.headline(), Some("Correct!"));
        assert_eq!(
            scenario.session.interaction(),
            Interaction::Vocabulary(VocabularyState::BlockingFeedback)
        );
    }
}

#[test]
fn mismatches_between_matches_do_not_score() {
    let mut scenario = vocabulary_scenario();
    scenario.pair("Apple", "Red");
    scenario.pair("Banana", "Blue");
    scenario.pair("Banana", "Yellow");
    scenario.pair("Sky", "Red");

    assert_eq!(scenario.session.score(), 0);
    assert_eq!(scenario.session.matched_pairs().len(), 2);

    scenario.pair("Sky", "Blue");
    assert_eq!(scenario.session.score(), 10);
}

#[test]
fn failed_fetch_stays_on_level_until_reinitialized() {
    let mut scenario = arithmetic_scenario(GameConfig::default());
    scenario.answer("2");
    let _ = scenario.step(SessionEvent::Proceed);

    let ticket = scenario.pending.take().unwrap();
    let _ = scenario.step(SessionEvent::ContentFailed {
        generation: ticket.generation,
        reason: "status 503".into(),
    });

    assert_eq!(scenario.session.last_error(), Some(quizling_app::RETRY_MESSAGE));
    assert_eq!(scenario.session.score(), 10);
    assert!(scenario.session.puzzle().is_none());

    // No automatic retry, and intents do nothing
    assert!(scenario.step(SessionEvent::Proceed).is_empty());
    assert!(scenario.step(SessionEvent::SubmitAnswer { choice: "2".into() }).is_empty());

    let _ = scenario.step(SessionEvent::Initialize { mode: GameMode::Arithmetic });
    assert!(scenario.session.last_error().is_none());
    assert!(scenario.session.is_loading());
    assert_eq!(scenario.session.score(), 0);
}

#[test]
fn stale_completion_after_mode_switch_is_discarded() {
    let mut scenario = Scenario::new(GameConfig::default());
    let _ = scenario.step(SessionEvent::Initialize { mode: GameMode::Arithmetic });
    let stale = scenario.pending.unwrap();
    let _ = scenario.step(SessionEvent::Initialize { mode: GameMode::Vocabulary });

    let actions = scenario.step(SessionEvent::ContentLoaded {
        generation: stale.generation,
        puzzle: fixtures::puzzle(fixtures::one_plus_one(), stale.generation),
    });
    assert!(actions.is_empty());
    assert!(scenario.session.is_loading());

    scenario.load(fixtures::fruit_colors());
    assert!(matches!(scenario.session.puzzle(), Some(Puzzle::Vocabulary(_))));
}

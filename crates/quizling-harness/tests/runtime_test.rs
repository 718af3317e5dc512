//! Runtime tests under virtual time.
//!
//! These run the production `Runtime` with `SimDriver`, `ScriptedProvider`
//! and `SimEnv` on a paused tokio clock. Provider latency, dismissal timers
//! and player think-time all advance the same virtual clock, so races between
//! them play out identically on every run.

use std::{sync::Arc, time::Duration};

use quizling_app::{Interaction, RETRY_MESSAGE, Runtime, Session, SessionEvent, VocabularyState};
use quizling_core::{FeedbackKind, GameConfig, GameMode, Puzzle};
use quizling_harness::{
    InvariantRegistry, Reply, ScriptedProvider, SimDriver, SimEnv, Step, fixtures,
};

fn intent(event: SessionEvent) -> Step {
    Step::Intent(event)
}

fn pause(millis: u64) -> Step {
    Step::Pause(Duration::from_millis(millis))
}

fn select(term: &str, value: &str) -> [Step; 2] {
    [
        intent(SessionEvent::SelectTerm { term: term.into() }),
        intent(SessionEvent::SelectMatch { value: value.into() }),
    ]
}

async fn run(
    steps: impl IntoIterator<Item = Step>,
    replies: impl IntoIterator<Item = Reply>,
) -> (Session, SimDriver, Arc<ScriptedProvider>) {
    let driver = SimDriver::scripted(steps).with_invariants(InvariantRegistry::standard());
    let observer = driver.clone();
    let provider = Arc::new(ScriptedProvider::new(replies));
    let runtime = Runtime::with_shared_provider(
        driver,
        Session::default(),
        Arc::clone(&provider),
        SimEnv::with_seed(7),
    );

    let session = runtime.run().await.unwrap();
    (session, observer, provider)
}

#[tokio::test(start_paused = true)]
async fn arithmetic_round_trip() {
    let steps = [
        intent(SessionEvent::Initialize { mode: GameMode::Arithmetic }),
        pause(10),
        intent(SessionEvent::SubmitAnswer { choice: "2".into() }),
    ];
    let (session, driver, provider) = run(steps, [Reply::content(fixtures::one_plus_one())]).await;

    assert_eq!(session.score(), 10);
    assert_eq!(session.feedback().map(|f| f.kind()), Some(FeedbackKind::Correct));
    assert_eq!(provider.requests().len(), 1);
    assert_eq!(driver.last_render().map(|view| view.score), Some(10));
}

#[tokio::test(start_paused = true)]
async fn slow_stale_response_is_discarded() {
    // First fetch (arithmetic) takes 5s; the player switches to vocabulary
    // after 1s and that fetch answers in 1s. The late arithmetic reply must
    // not replace the vocabulary puzzle.
    let steps = [
        intent(SessionEvent::Initialize { mode: GameMode::Arithmetic }),
        pause(1_000),
        intent(SessionEvent::Initialize { mode: GameMode::Vocabulary }),
        pause(10_000),
    ];
    let replies = [
        Reply::content(fixtures::one_plus_one()).after(Duration::from_secs(5)),
        Reply::content(fixtures::fruit_colors()).after(Duration::from_secs(1)),
    ];
    let (session, driver, provider) = run(steps, replies).await;

    assert!(matches!(session.puzzle(), Some(Puzzle::Vocabulary(_))));
    assert_eq!(session.generation(), 2);
    assert_eq!(provider.requests().len(), 2);

    // Oracle: no rendered view ever showed an arithmetic puzzle
    assert!(
        driver
            .renders()
            .iter()
            .all(|view| !matches!(view.puzzle, Some(Puzzle::Arithmetic(_))))
    );
}

#[tokio::test(start_paused = true)]
async fn mismatch_dismisses_after_two_seconds() {
    let mut steps = vec![intent(SessionEvent::Initialize { mode: GameMode::Vocabulary }), pause(10)];
    steps.extend(select("Apple", "Blue"));
    steps.push(pause(1_900));
    let (session, _, _) = run(steps.clone(), [Reply::content(fixtures::fruit_colors())]).await;
    assert_eq!(session.feedback().map(|f| f.kind()), Some(FeedbackKind::Mismatch));

    steps.push(pause(200));
    let (session, _, _) = run(steps, [Reply::content(fixtures::fruit_colors())]).await;
    assert!(session.feedback().is_none());
    assert_eq!(session.interaction(), Interaction::Vocabulary(VocabularyState::NoSelection));
}

#[tokio::test(start_paused = true)]
async fn newer_feedback_cancels_older_timer() {
    // Good match at t=10ms arms a 1.5s timer; a mismatch at t=1s replaces it
    // with a 2s timer. At t=1.6s the first timer would have fired; the
    // mismatch must still be showing.
    let mut steps = vec![intent(SessionEvent::Initialize { mode: GameMode::Vocabulary }), pause(10)];
    steps.extend(select("Apple", "Red"));
    steps.push(pause(990));
    steps.extend(select("Banana", "Blue"));
    steps.push(pause(600));
    let (session, _, _) = run(steps, [Reply::content(fixtures::fruit_colors())]).await;

    assert_eq!(session.feedback().map(|f| f.kind()), Some(FeedbackKind::Mismatch));
    assert_eq!(session.matched_pairs().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn completing_puzzle_cancels_good_match_timer() {
    let mut steps = vec![intent(SessionEvent::Initialize { mode: GameMode::Vocabulary }), pause(10)];
    for (term, value) in fixtures::FRUIT_PAIRS {
        steps.extend(select(term, value));
    }
    steps.push(pause(5_000));
    let (session, _, _) = run(steps, [Reply::content(fixtures::fruit_colors())]).await;

    // Blocking feedback outlives every transient delay
    assert_eq!(session.score(), 10);
    assert_eq!(session.feedback().map(|f| f.kind()), Some(FeedbackKind::Correct));
    assert!(session.pending_dismiss().is_none());
}

#[tokio::test(start_paused = true)]
async fn provider_failure_shows_retry_message() {
    let steps = [intent(SessionEvent::Initialize { mode: GameMode::Arithmetic }), pause(10)];
    let (session, driver, _) = run(steps, [Reply::failure("status 503")]).await;

    assert_eq!(session.last_error(), Some(RETRY_MESSAGE));
    assert_eq!(session.level(), 1);
    assert_eq!(driver.last_render().and_then(|view| view.last_error), Some(RETRY_MESSAGE.to_owned()));
}

#[tokio::test(start_paused = true)]
async fn invalid_content_is_a_failure() {
    let steps = [intent(SessionEvent::Initialize { mode: GameMode::Arithmetic }), pause(10)];
    let duplicate_options = fixtures::arithmetic("1 + 1 = ?", "2", ["2", "2", "3", "4"]);
    let (session, _, _) = run(steps, [Reply::content(duplicate_options)]).await;

    assert!(session.puzzle().is_none());
    assert_eq!(session.last_error(), Some(RETRY_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn wrong_mode_content_is_a_failure() {
    let steps = [intent(SessionEvent::Initialize { mode: GameMode::Arithmetic }), pause(10)];
    let (session, _, _) = run(steps, [Reply::content(fixtures::fruit_colors())]).await;

    assert_eq!(session.last_error(), Some(RETRY_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn full_game_over_offline() {
    // One level, one question: initialize, answer correctly, acknowledge.
    let config = GameConfig::default().with_max_level(1).with_questions_to_level_up(1);
    let steps = [
        intent(SessionEvent::Initialize { mode: GameMode::Arithmetic }),
        pause(10),
    ];
    let driver = SimDriver::scripted(steps).with_invariants(InvariantRegistry::standard());
    let observer = driver.clone();
    let provider = quizling_content::OfflineProvider::new(SimEnv::with_seed(3));
    let runtime = Runtime::new(driver, Session::new(config).unwrap(), provider, SimEnv::with_seed(3));
    let session = runtime.run().await.unwrap();

    let Some(Puzzle::Arithmetic(question)) = session.puzzle() else {
        panic!("expected an arithmetic puzzle, got {:?}", session.puzzle());
    };
    let answer = question.correct_answer().to_owned();

    // Second run replays the same seed, then answers and proceeds
    let steps = [
        intent(SessionEvent::Initialize { mode: GameMode::Arithmetic }),
        pause(10),
        intent(SessionEvent::SubmitAnswer { choice: answer }),
        intent(SessionEvent::Proceed),
    ];
    let driver = SimDriver::scripted(steps).with_invariants(InvariantRegistry::standard());
    let provider = quizling_content::OfflineProvider::new(SimEnv::with_seed(3));
    let runtime = Runtime::new(driver, Session::new(config).unwrap(), provider, SimEnv::with_seed(3));
    let session = runtime.run().await.unwrap();

    assert!(session.is_game_over());
    assert!(session.puzzle().is_none());
    assert_eq!(session.score(), 10);
    assert_eq!(session.interaction(), Interaction::Finished);
    assert!(!observer.renders().is_empty());
}

#[tokio::test(start_paused = true)]
async fn quit_stops_runtime() {
    let steps = [
        intent(SessionEvent::Initialize { mode: GameMode::Arithmetic }),
        intent(SessionEvent::Quit),
        intent(SessionEvent::Initialize { mode: GameMode::Vocabulary }),
    ];
    let driver = SimDriver::scripted(steps);
    let observer = driver.clone();
    let provider = ScriptedProvider::new([Reply::content(fixtures::one_plus_one()).after(Duration::from_secs(60))]);
    let runtime = Runtime::new(driver, Session::default(), provider, SimEnv::default());
    let session = runtime.run().await.unwrap();

    assert_eq!(session.mode(), Some(GameMode::Arithmetic));
    assert!(session.is_loading());
    assert!(observer.has_pending());
}

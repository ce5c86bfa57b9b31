//! End-to-end game scenarios driven through the public engine API, with the
//! computer's delayed moves fired by hand.

use guessterm::core::rng::FixedRandom;
use guessterm::engine::scheduler::QueuedScheduler;
use guessterm::{GameConfig, GameEvent, GameResult, GuessOutcome, GuessingGameEngine, Hint, Side, StrategyKind};
use tokio::sync::mpsc;

type Engine = GuessingGameEngine<FixedRandom, QueuedScheduler>;

fn engine_with_targets(config: GameConfig, targets: &[i64]) -> (Engine, mpsc::UnboundedReceiver<GameEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut engine = GuessingGameEngine::new(
        config,
        StrategyKind::BinarySearch,
        FixedRandom::new(targets.iter().copied()),
        QueuedScheduler::default(),
    );
    engine.subscribe(tx);
    (engine, rx)
}

fn fire_computer(engine: &mut Engine) -> Option<GuessOutcome> {
    let ticket = engine.scheduler_mut().pop()?;
    engine.computer_move(ticket)
}

#[test]
fn player_guesses_the_target_first_try() {
    let (mut engine, _rx) = engine_with_targets(GameConfig::default(), &[50]);
    engine.start_new_game();

    assert_eq!(engine.submit_input("50"), Ok(GuessOutcome::Win(Side::Player)));
    assert!(!engine.state().active);
    assert_eq!(engine.state().attempts_used, 1);
    assert!(engine.scheduler().is_empty());
}

#[test]
fn computer_closes_in_on_seven() {
    let (mut engine, _rx) = engine_with_targets(GameConfig::default(), &[7]);
    engine.start_new_game();

    assert_eq!(engine.submit_guess(100, Side::Player), Ok(GuessOutcome::Hint(Hint::Lower)));
    assert_eq!(engine.state().current_turn, Side::Computer);

    assert_eq!(fire_computer(&mut engine), Some(GuessOutcome::Hint(Hint::Lower)));
    assert_eq!(engine.search().guess_history, vec![50]);
    assert_eq!(engine.search().high_bound, 49);

    // The player keeps guessing low; the computer keeps halving.
    let mut player_guesses = 1..;
    let outcome = loop {
        let guess = player_guesses.next().unwrap();
        let outcome = engine.submit_guess(guess, Side::Player).unwrap();
        if !engine.state().active {
            break outcome;
        }
        let outcome = fire_computer(&mut engine).unwrap();
        if !engine.state().active {
            break outcome;
        }
    };

    assert_eq!(engine.search().guess_history, vec![50, 25, 12, 6, 9, 7]);
    assert_eq!(outcome, GuessOutcome::Win(Side::Computer));
    assert_eq!(engine.state().attempts_used, 12);
}

#[test]
fn single_attempt_game_is_lost_on_a_miss() {
    let config = GameConfig::new(1, 100, 1).unwrap();
    let (mut engine, mut rx) = engine_with_targets(config, &[42]);
    engine.start_new_game();

    assert_eq!(engine.submit_guess(10, Side::Player), Ok(GuessOutcome::Loss { target: 42 }));
    assert!(!engine.state().active);
    assert!(engine.scheduler().is_empty(), "no computer move after the game ended");

    let events: Vec<GameEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert!(events.contains(&GameEvent::LogAppended {
        text: "Game Over! The correct number was 42".to_string()
    }));
    assert!(events.contains(&GameEvent::GameEnded { result: GameResult::Lost { target: 42 } }));
}

#[test]
fn new_game_after_an_ended_one_starts_clean() {
    let (mut engine, mut rx) = engine_with_targets(GameConfig::default(), &[7, 60]);
    engine.start_new_game();
    engine.submit_guess(100, Side::Player).unwrap();
    fire_computer(&mut engine);
    engine.submit_guess(7, Side::Player).unwrap();
    assert!(!engine.state().active);
    while rx.try_recv().is_ok() {}

    let state = engine.start_new_game();
    assert!(state.active);
    assert_eq!(state.target_number, 60);
    assert_eq!(state.attempts_used, 0);
    assert_eq!(state.current_turn, Side::Player);
    assert_eq!(engine.generation(), 2);
    assert!(engine.search().guess_history.is_empty());
    assert_eq!((engine.search().low_bound, engine.search().high_bound), (1, 100));
    assert_eq!(
        rx.try_recv().ok(),
        Some(GameEvent::GameStarted { generation: 2, max_attempts: 12 })
    );
}

#[test]
fn restart_mid_game_drops_the_pending_computer_move() {
    let (mut engine, _rx) = engine_with_targets(GameConfig::default(), &[7, 60]);
    engine.start_new_game();
    engine.submit_guess(100, Side::Player).unwrap();
    assert_eq!(engine.scheduler().len(), 1);

    engine.start_new_game();
    assert_eq!(fire_computer(&mut engine), None);
    assert_eq!(engine.state().attempts_used, 0);
    assert_eq!(engine.state().target_number, 60);
}

#[test]
fn double_submission_only_counts_once() {
    let (mut engine, _rx) = engine_with_targets(GameConfig::default(), &[7]);
    engine.start_new_game();

    // Enter in the field and a button click racing each other.
    assert!(engine.submit_input("30").is_ok());
    assert!(engine.submit_input("30").is_err());
    assert_eq!(engine.state().attempts_used, 1);
    assert_eq!(engine.scheduler().len(), 1);
}

#[test]
fn independent_engines_do_not_share_state() {
    let (mut a, _ra) = engine_with_targets(GameConfig::default(), &[10]);
    let (mut b, _rb) = engine_with_targets(GameConfig::default(), &[90]);
    a.start_new_game();
    b.start_new_game();

    a.submit_guess(10, Side::Player).unwrap();
    assert!(!a.state().active);
    assert!(b.state().active);
    assert_eq!(b.state().attempts_used, 0);
}

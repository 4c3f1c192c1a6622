//! End-to-end runs of the trainer through its public API.

use notecolors_core::audio::{ToneDispatcher, ToneRequest};
use notecolors_core::config::TrainerConfig;
use notecolors_core::controller::{TrainerController, TrainerEvent};
use notecolors_core::display::ColorBoard;
use notecolors_core::{GuessOutcome, NoteId, PitchClass, TrainerError, TrainerSession, color_for};
use pretty_assertions::assert_eq;
use rand::rngs::mock::StepRng;
use std::time::Duration;

fn id(text: &str) -> NoteId {
    text.parse().unwrap()
}

/// Answers the pending challenge correctly and returns the outcome.
fn answer_correctly<R: rand::Rng>(session: &mut TrainerSession<R>) -> GuessOutcome {
    let challenge = session.issue_challenge().unwrap();
    session.evaluate_guess(&challenge.note).unwrap()
}

#[test]
fn three_note_pool_unlocks_one_note_per_threshold() {
    let pool = vec![id("i4"), id("j4"), id("k4")];
    let mut session = TrainerSession::new(pool, StepRng::new(0, 0)).unwrap();
    assert_eq!(session.active_notes(), &[id("i4")]);

    for _ in 0..2 {
        assert_eq!(answer_correctly(&mut session).unlocked_note, None);
    }
    assert_eq!(answer_correctly(&mut session).unlocked_note, Some(id("j4")));
    assert_eq!(session.active_notes(), &[id("i4"), id("j4")]);

    // A fourth correct answer on i4 does not reach k4.
    assert_eq!(answer_correctly(&mut session).unlocked_note, None);
    assert_eq!(session.active_notes(), &[id("i4"), id("j4")]);
}

#[test]
fn seeded_run_eventually_unlocks_the_whole_pool() {
    let config = TrainerConfig {
        seed: Some(2024),
        ..TrainerConfig::default()
    };
    let mut session = config.build_session().unwrap();

    let mut rounds = 0;
    while !session.is_fully_unlocked() {
        answer_correctly(&mut session);
        rounds += 1;
        assert!(rounds < 10_000, "pool never finished unlocking");
    }

    assert_eq!(session.active_notes().len(), config.pool.len());
    for note in &config.pool {
        assert!(session.is_active(note));
        assert!(session.stats(note).is_some());
    }
    assert_eq!(session.attempt_unlock(), None);
}

#[test]
fn guess_before_any_challenge_is_rejected() {
    let mut session = TrainerSession::new(vec![id("r4")], StepRng::new(0, 0)).unwrap();
    assert_eq!(
        session.evaluate_guess(&id("r4")),
        Err(TrainerError::NoActiveChallenge)
    );
}

#[test]
fn controller_plays_and_paints_through_collaborators() {
    let pool = vec![id("r4"), NoteId::new(PitchClass::I, 5)];
    let session = TrainerSession::new(pool, StepRng::new(0, 0)).unwrap();
    let (tone_tx, tone_rx) = crossbeam_channel::unbounded::<ToneRequest>();
    let mut controller =
        TrainerController::new(session, ToneDispatcher::new(tone_tx, 300), ColorBoard::new());

    for _ in 0..3 {
        controller.handle(TrainerEvent::RequestChallenge).unwrap();
        controller
            .handle(TrainerEvent::PatchSelected(id("r4")))
            .unwrap();
    }

    for _ in 0..3 {
        let request = tone_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(request.frequency_hz, 440.0);
        assert_eq!(request.duration_ms, 300);
    }

    let board = controller.display();
    assert_eq!(board.color("r4"), Some(color_for(&id("r4"))));
    assert_eq!(board.color("i5"), Some(color_for(&id("i5"))));
}

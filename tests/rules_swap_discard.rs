use boom_rs::action::{Action, ActionError, IllegalTarget, Slot};
use boom_rs::cards::Accumulator;
use boom_rs::game::{Game, GamePlayer};
use boom_rs::history::{ActionRecord, DiscardRecord, SwapRecord};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn duel(p1: GamePlayer) -> Game {
    Game::from_players(
        vec![p1, GamePlayer::new("p2", vec![1, 1, 1], vec![Accumulator::new(5)])],
        3,
    )
}

#[test]
fn swap_exchanges_card_and_accumulator() {
    let g = duel(GamePlayer::new(
        "p1",
        vec![8, 2, 0],
        vec![Accumulator::new(3), Accumulator::new(4)],
    ));
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let next = g.attempt("p1", &Action::swap(0, 1), &mut rng).unwrap();

    let p1 = next.player("p1").unwrap();
    assert_eq!(p1.hand(), &[4, 2, 0]);
    assert_eq!(p1.accumulators(), &[Accumulator::new(3), Accumulator::new(8)]);
    assert_eq!(next.current_player().unwrap().id(), "p2", "swap ends the turn");
    assert_eq!(
        next.history()[0].record,
        ActionRecord::Swap(SwapRecord { source_hand_value: 8, target_accumulator_value: 4 })
    );
}

#[test]
fn swap_with_attacked_accumulator_is_rejected() {
    let g = duel(GamePlayer::new(
        "p1",
        vec![9, 2, 0],
        vec![Accumulator::with_attacks(6, vec![2])],
    ));
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    assert_eq!(
        g.attempt("p1", &Action::swap(0, 0), &mut rng),
        Err(IllegalTarget::SwapAttacked.into())
    );
    assert_eq!(g.player("p1").unwrap().hand(), &[9, 2, 0]);
    assert!(g.history().is_empty());
}

#[test]
fn swapping_in_a_face_card_can_lose_the_game() {
    let g = duel(GamePlayer::new("p1", vec![0, 2, 2], vec![Accumulator::new(3)]));
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let next = g.attempt("p1", &Action::swap(0, 0), &mut rng).unwrap();
    assert_eq!(next.winner_id(), Some("p2"));
}

#[test]
fn swap_indices_are_checked() {
    let g = duel(GamePlayer::new("p1", vec![1, 2, 3], vec![Accumulator::new(3)]));
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    assert_eq!(
        g.attempt("p1", &Action::swap(0, 2), &mut rng),
        Err(ActionError::IndexOutOfRange { slot: Slot::Accumulator, index: 2, len: 1 })
    );
}

#[test]
fn discard_replaces_one_card() {
    let g = duel(GamePlayer::new("p1", vec![7, 2, 0], vec![Accumulator::new(3)]));
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let next = g.attempt("p1", &Action::discard(1), &mut rng).unwrap();

    let p1 = next.player("p1").unwrap();
    assert_eq!(p1.hand().len(), 3);
    assert_eq!(p1.hand()[0], 7);
    assert_eq!(p1.hand()[2], 0);
    assert!(p1.hand()[1] <= 9);
    assert_eq!(p1.accumulators(), g.player("p1").unwrap().accumulators());
    assert_eq!(
        next.history()[0].record,
        ActionRecord::Discard(DiscardRecord { source_hand_value: 2 })
    );
    assert_eq!(next.turn(), 1);
}

#[test]
fn discard_out_of_range_is_rejected() {
    let g = duel(GamePlayer::new("p1", vec![7, 2, 0], vec![Accumulator::new(3)]));
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    assert_eq!(
        g.attempt("p1", &Action::discard(3), &mut rng),
        Err(ActionError::IndexOutOfRange { slot: Slot::Hand, index: 3, len: 3 })
    );
}

#[test]
fn short_hands_are_refilled_after_an_action() {
    let g = Game::from_players(
        vec![
            GamePlayer::new("p1", vec![4], vec![Accumulator::new(3)]),
            GamePlayer::new("p2", vec![], vec![Accumulator::new(5)]),
        ],
        3,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let next = g.attempt("p1", &Action::discard(0), &mut rng).unwrap();
    assert!(next.players().iter().all(|p| p.hand().len() == 3));
}

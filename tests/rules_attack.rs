use boom_rs::action::{Action, ActionError, IllegalTarget, Slot};
use boom_rs::cards::{Accumulator, FACE};
use boom_rs::game::{Game, GamePlayer};
use boom_rs::history::ActionRecord;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn accs(values: &[u8]) -> Vec<Accumulator> {
    values.iter().map(|&v| Accumulator::new(v)).collect()
}

fn duel(p1_hand: Vec<u8>, p1: Vec<Accumulator>, p2: Vec<Accumulator>) -> Game {
    Game::from_players(
        vec![GamePlayer::new("p1", p1_hand, p1), GamePlayer::new("p2", vec![1, 1, 1], p2)],
        3,
    )
}

#[test]
fn attack_reduces_target_and_passes_turn() {
    let g = duel(vec![3, 3, 3], accs(&[5, 5, 5]), accs(&[5, 5, 5]));
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let next = g.attempt("p1", &Action::attack("p2", 0, 0), &mut rng).unwrap();

    let p2 = next.player("p2").unwrap();
    assert_eq!(p2.accumulators()[0].attacks(), &[3]);
    assert_eq!(p2.accumulators()[0].remaining(), 2);
    assert_eq!(p2.remaining_hp(), 12);
    assert_eq!(next.player("p1").unwrap().hand().len(), 3);
    assert_eq!(next.current_player().unwrap().id(), "p2");
    assert_eq!(next.turn(), 1);

    let entry = &next.history()[0];
    assert_eq!(entry.turn, 0);
    assert_eq!(entry.source_player_id, "p1");
    match &entry.record {
        ActionRecord::Attack(a) => {
            assert_eq!(a.target_player_id, "p2");
            assert_eq!(a.source_hand_value, 3);
            assert_eq!(a.target_accumulator_value, 5);
            assert_eq!(a.obtained_extra_accumulator, None);
        }
        other => panic!("unexpected record {other:?}"),
    }
}

#[test]
fn face_accumulator_cannot_be_attacked() {
    let g = duel(vec![3, 3, 3], accs(&[5]), accs(&[FACE, 5]));
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let err = g.attempt("p1", &Action::attack("p2", 0, 0), &mut rng).unwrap_err();
    assert_eq!(err, ActionError::IllegalTarget(IllegalTarget::FaceAccumulator));
    assert_eq!(g.turn(), 0);
    assert!(g.history().is_empty());
}

#[test]
fn self_attack_is_rejected() {
    let g = duel(vec![3, 3, 3], accs(&[5]), accs(&[5]));
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    assert_eq!(
        g.attempt("p1", &Action::attack("p1", 0, 0), &mut rng),
        Err(IllegalTarget::SelfAttack.into())
    );
}

#[test]
fn unknown_target_is_rejected() {
    let g = duel(vec![3, 3, 3], accs(&[5]), accs(&[5]));
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert_eq!(
        g.attempt("p1", &Action::attack("ghost", 0, 0), &mut rng),
        Err(IllegalTarget::UnknownPlayer("ghost".into()).into())
    );
}

#[test]
fn card_larger_than_remaining_is_rejected() {
    let g = duel(vec![7, 1, 1], accs(&[5]), vec![Accumulator::with_attacks(8, vec![3])]);
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    assert_eq!(
        g.attempt("p1", &Action::attack("p2", 0, 0), &mut rng),
        Err(IllegalTarget::ExceedsRemaining { remaining: 5, value: 7 }.into())
    );
}

#[test]
fn out_of_range_indices_are_reported() {
    let g = duel(vec![3, 3, 3], accs(&[5]), accs(&[5]));
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    assert_eq!(
        g.attempt("p1", &Action::attack("p2", 3, 0), &mut rng),
        Err(ActionError::IndexOutOfRange { slot: Slot::Hand, index: 3, len: 3 })
    );
    assert_eq!(
        g.attempt("p1", &Action::attack("p2", 0, 1), &mut rng),
        Err(ActionError::IndexOutOfRange { slot: Slot::Accumulator, index: 1, len: 1 })
    );
}

#[test]
fn last_player_standing_wins() {
    let g = duel(vec![4, 1, 1], accs(&[6]), vec![Accumulator::with_attacks(7, vec![3])]);
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let next = g.attempt("p1", &Action::attack("p2", 0, 0), &mut rng).unwrap();

    assert_eq!(next.winner_id(), Some("p1"));
    assert!(next.is_over());
    assert!(next.player("p2").unwrap().accumulators().is_empty());
    assert_eq!(next.history_len(), 1);

    for who in ["p1", "p2"] {
        assert_eq!(
            next.attempt(who, &Action::discard(0), &mut rng),
            Err(ActionError::GameAlreadyEnded)
        );
    }
}

#[test]
fn one_hit_kill_earns_an_extra_accumulator() {
    let g = duel(vec![5, 1, 1], accs(&[6]), accs(&[5, 4]));
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let next = g.attempt("p1", &Action::attack("p2", 0, 0), &mut rng).unwrap();

    let p1 = next.player("p1").unwrap();
    assert_eq!(p1.accumulators().len(), 2);
    let bonus = &p1.accumulators()[1];
    assert!(bonus.original_value() > 0);
    assert!(!bonus.is_attacked());

    assert_eq!(next.player("p2").unwrap().accumulators(), &[Accumulator::new(4)]);
    match &next.history()[0].record {
        ActionRecord::Attack(a) => {
            assert_eq!(a.obtained_extra_accumulator, Some(bonus.original_value()));
        }
        other => panic!("unexpected record {other:?}"),
    }
}

#[test]
fn finishing_an_attacked_accumulator_earns_nothing() {
    let g = duel(vec![2, 1, 1], accs(&[6]), vec![Accumulator::with_attacks(5, vec![3]), Accumulator::new(4)]);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let next = g.attempt("p1", &Action::attack("p2", 0, 0), &mut rng).unwrap();
    assert_eq!(next.player("p1").unwrap().accumulators().len(), 1);
    assert_eq!(next.player("p2").unwrap().accumulators().len(), 1);
}

#[test]
fn wrong_player_is_rejected_before_anything_else() {
    let g = duel(vec![3, 3, 3], accs(&[5]), accs(&[5]));
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    assert_eq!(
        g.attempt("p2", &Action::attack("ghost", 99, 99), &mut rng),
        Err(ActionError::NotPlayersTurn { expected: "p1".into(), got: "p2".into() })
    );
}

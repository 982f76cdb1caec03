use boom_rs::action::{Action, IllegalTarget};
use boom_rs::cards::{Accumulator, FACE};
use boom_rs::game::{Game, GamePlayer, GameStatus};
use boom_rs::history::{ActionRecord, BoomRecord};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn accs(values: &[u8]) -> Vec<Accumulator> {
    values.iter().map(|&v| Accumulator::new(v)).collect()
}

#[test]
fn boom_destroys_every_matching_accumulator() {
    let g = Game::from_players(
        vec![
            GamePlayer::new("p1", vec![0, 0, 0], accs(&[3, 8])),
            GamePlayer::new("p2", vec![1, 1, 1], vec![Accumulator::new(5), Accumulator::with_attacks(9, vec![4])]),
            GamePlayer::new("p3", vec![1, 1, 1], accs(&[5, 2])),
        ],
        3,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let next = g.attempt("p1", &Action::boom(5), &mut rng).unwrap();

    assert!(next.player("p2").unwrap().accumulators().is_empty());
    assert_eq!(next.player("p3").unwrap().accumulators(), &[Accumulator::new(2)]);
    assert_eq!(next.player("p1").unwrap().accumulators(), g.player("p1").unwrap().accumulators());
    assert_eq!(next.player("p1").unwrap().hand().len(), 3);
    assert_eq!(
        next.history()[0].record,
        ActionRecord::Boom(BoomRecord { target_value: 5, accumulators_destroyed_quantity: 3 })
    );
    // p2 is out, so p3 acts next.
    assert_eq!(next.current_player().unwrap().id(), "p3");
    assert_eq!(next.turn(), 2);
}

#[test]
fn boom_with_no_match_still_ends_the_turn() {
    let g = Game::from_players(
        vec![
            GamePlayer::new("p1", vec![0, 0], accs(&[3])),
            GamePlayer::new("p2", vec![1, 1], accs(&[4])),
        ],
        2,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let next = g.attempt("p1", &Action::boom(7), &mut rng).unwrap();
    assert_eq!(next.current_player().unwrap().id(), "p2");
    assert_eq!(
        next.history()[0].record,
        ActionRecord::Boom(BoomRecord { target_value: 7, accumulators_destroyed_quantity: 0 })
    );
}

#[test]
fn boom_that_kills_everyone_is_a_draw() {
    let g = Game::from_players(
        vec![
            GamePlayer::new("p1", vec![0, 0, 0], accs(&[4])),
            GamePlayer::new("p2", vec![1, 1, 1], accs(&[4, 4])),
        ],
        3,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let next = g.attempt("p1", &Action::boom(4), &mut rng).unwrap();
    assert!(next.is_draw());
    assert_eq!(next.status(), GameStatus::Draw);
    assert_eq!(next.winner_id(), None);
}

#[test]
fn boom_needs_a_hand_of_faces() {
    let g = Game::from_players(
        vec![
            GamePlayer::new("p1", vec![0, 1, 0], accs(&[4])),
            GamePlayer::new("p2", vec![1, 1, 1], accs(&[4])),
        ],
        3,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    assert_eq!(
        g.attempt("p1", &Action::boom(4), &mut rng),
        Err(IllegalTarget::HandNotAllFaces.into())
    );
}

#[test]
fn boom_target_must_be_positive() {
    let g = Game::from_players(
        vec![
            GamePlayer::new("p1", vec![0, 0, 0], accs(&[4])),
            GamePlayer::new("p2", vec![1, 1, 1], accs(&[FACE, 4])),
        ],
        3,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    assert_eq!(
        g.attempt("p1", &Action::boom(0), &mut rng),
        Err(IllegalTarget::NonPositiveBoomTarget(0).into())
    );
}

use boom_rs::game::{Game, GameConfig, SetupError};
use boom_rs::player::Player;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

fn lobby(n: usize) -> Vec<Player> {
    (1..=n).map(|i| Player::new(format!("p{i}"), format!("Player {i}"))).collect()
}

#[test]
fn every_player_is_seated_once() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let g = Game::create(&lobby(5), &GameConfig::default(), &mut rng).unwrap();
    let ids: HashSet<&str> = g.players().iter().map(|p| p.id()).collect();
    assert_eq!(ids.len(), 5);
    for p in lobby(5) {
        assert!(ids.contains(p.id.as_str()));
    }
}

#[test]
fn deal_follows_config() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let cfg = GameConfig::default()
        .with_hand_cards_count(5)
        .with_initial_accumulators_count(4)
        .with_ai_delay_ms(0);
    let g = Game::create(&lobby(3), &cfg, &mut rng).unwrap();
    assert_eq!(g.hand_cards_count(), 5);
    assert_eq!(g.ai_delay_ms(), 0);
    for p in g.players() {
        assert_eq!(p.hand().len(), 5);
        assert!(p.hand().iter().all(|&c| c <= 9));
        assert_eq!(p.accumulators().len(), 4);
        assert!(p.accumulators().iter().all(|a| (1..=9).contains(&a.original_value())));
        assert!(p.is_alive());
    }
    assert!(!g.is_over());
    assert_eq!(g.history_len(), 0);
}

#[test]
fn seat_order_is_shuffled() {
    let players = lobby(6);
    let orders: HashSet<Vec<String>> = (0..20)
        .map(|seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let g = Game::create(&players, &GameConfig::default(), &mut rng).unwrap();
            g.players().iter().map(|p| p.id().to_string()).collect()
        })
        .collect();
    assert!(orders.len() > 1);
}

#[test]
fn same_seed_same_deal() {
    let players = lobby(3);
    let a = Game::create(&players, &GameConfig::default(), &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
    let b = Game::create(&players, &GameConfig::default(), &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_setups_are_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert_eq!(
        Game::create(&[], &GameConfig::default(), &mut rng),
        Err(SetupError::NotEnoughPlayers { got: 0 })
    );
    let none = GameConfig::default().with_initial_accumulators_count(0);
    assert_eq!(Game::create(&lobby(2), &none, &mut rng), Err(SetupError::NoAccumulators));
}

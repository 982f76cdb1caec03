use boom_rs::action::{Action, ActionError};
use boom_rs::engine::{GameEngine, GameStore};
use boom_rs::game::{GameConfig, SetupError};
use boom_rs::player::Player;

fn lobby() -> Vec<Player> {
    vec![
        Player::new("p1", "Paco"),
        Player::new("p2", "Quinn").with_ai("Opportunist"),
        Player::new("p3", "Rhea"),
    ]
}

#[test]
fn rejected_action_leaves_state_untouched() {
    let mut store = GameStore::with_seed(1);
    store.start_game(&lobby(), &GameConfig::default()).unwrap();
    let before = store.game().cloned();
    let cur = store.current_player_id().unwrap().to_string();

    let err = store.attempt_action(&cur, &Action::discard(42)).unwrap_err();
    assert!(matches!(err, ActionError::IndexOutOfRange { .. }));
    assert_eq!(store.game().cloned(), before);
    assert!(!store.try_action("nobody", &Action::discard(0)));
    assert_eq!(store.game().cloned(), before);
}

#[test]
fn submit_goes_through_the_engine_trait() {
    let mut store = GameStore::with_seed(2);
    store.start_game(&lobby(), &GameConfig::default()).unwrap();
    let engine: &mut dyn GameEngine = &mut store;
    let cur = engine.current_player_id().unwrap().to_string();
    engine.submit(&cur, &Action::discard(1)).unwrap();
    assert_ne!(engine.current_player_id(), Some(cur.as_str()));
    assert!(!engine.is_over());
}

#[test]
fn failed_setup_keeps_previous_game() {
    let mut store = GameStore::with_seed(3);
    store.start_game(&lobby(), &GameConfig::default()).unwrap();
    let before = store.game().cloned();
    let err = store.start_game(&lobby()[..1], &GameConfig::default()).unwrap_err();
    assert_eq!(err, SetupError::NotEnoughPlayers { got: 1 });
    assert_eq!(store.game().cloned(), before);
}

#[test]
fn roster_lookups() {
    let mut store = GameStore::with_seed(4);
    store.start_game(&lobby(), &GameConfig::default()).unwrap();
    assert_eq!(store.roster().len(), 3);
    assert_eq!(store.name_of("p3"), Some("Rhea"));
    assert_eq!(store.name_of("p9"), None);
    assert!(store.lobby_player("p2").is_some_and(Player::is_bot));
    assert_eq!(store.current_player().map(|p| p.id()), store.current_player_id());
}

#[test]
fn seeded_stores_replay_identically() {
    let mut a = GameStore::with_seed(5);
    let mut b = GameStore::with_seed(5);
    a.start_game(&lobby(), &GameConfig::default()).unwrap();
    b.start_game(&lobby(), &GameConfig::default()).unwrap();
    for _ in 0..5 {
        let cur = a.current_player_id().unwrap().to_string();
        a.attempt_action(&cur, &Action::discard(0)).unwrap();
        b.attempt_action(&cur, &Action::discard(0)).unwrap();
    }
    assert_eq!(a.game(), b.game());
}

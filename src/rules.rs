//! Action validation and application.
//!
//! [`attempt_action`] is the only path that changes a [`Game`]. It never
//! touches the game it is given: on success it returns the next state, on
//! failure an [`ActionError`] and the caller keeps the state it had.

use crate::action::{Action, ActionError, IllegalTarget, Slot};
use crate::cards::{Accumulator, Card, FACE};
use crate::deck::{random_card, random_life_card};
use crate::game::{Game, GamePlayer};
use crate::history::{ActionRecord, AttackRecord, BoomRecord, DiscardRecord, SwapRecord};
use rand::Rng;

/// Validate `action` for `player_id` and produce the next game state.
///
/// Checks run in a fixed order: a game exists, it has not ended, it is
/// `player_id`'s turn, the parameters are well formed, then the action's own
/// rules. On success exactly one history entry is appended and the turn
/// advances (or the game ends).
pub fn attempt_action<R: Rng + ?Sized>(
    game: Option<&Game>,
    player_id: &str,
    action: &Action,
    rng: &mut R,
) -> Result<Game, ActionError> {
    let game = game.ok_or(ActionError::NoActiveGame)?;
    match apply(game, player_id, action, rng) {
        Ok(next) => {
            log::debug!("turn {}: {player_id} played {}", game.turn(), action.kind());
            Ok(next)
        }
        Err(e) => {
            log::warn!("rejected {} from {player_id}: {e}", action.kind());
            Err(e)
        }
    }
}

/// Run every check for `action` without producing a new state.
pub fn validate(game: &Game, player_id: &str, action: &Action) -> Result<(), ActionError> {
    check_global(game, player_id, action)?;
    let actor = actor_index(game, player_id)?;
    match action {
        Action::Attack { target_player_id, source_hand_index, target_accumulator_index } => {
            check_attack(game, actor, target_player_id, *source_hand_index, *target_accumulator_index)
                .map(|_| ())
        }
        Action::Swap { source_hand_index, target_accumulator_index } => {
            check_swap(&game.players[actor], *source_hand_index, *target_accumulator_index)
        }
        Action::Discard { source_hand_index } => {
            check_hand_index(&game.players[actor], *source_hand_index)
        }
        Action::Boom { target_value } => check_boom(&game.players[actor], *target_value),
    }
}

/// Every action `player_id` could legally take right now, with booms limited
/// to values that currently match at least one accumulator.
pub fn legal_actions(game: &Game, player_id: &str) -> Vec<Action> {
    let mut out = Vec::new();
    let Some(me) = game.player(player_id) else {
        return out;
    };
    for hand in 0..me.hand().len() {
        for target in game.players() {
            for acc in 0..target.accumulators().len() {
                out.push(Action::attack(target.id(), hand, acc));
            }
        }
        for acc in 0..me.accumulators().len() {
            out.push(Action::swap(hand, acc));
        }
        out.push(Action::discard(hand));
    }
    let mut values: Vec<u32> = game
        .players()
        .iter()
        .flat_map(|p| p.accumulators().iter().map(Accumulator::remaining))
        .filter(|&v| v > 0)
        .collect();
    values.sort_unstable();
    values.dedup();
    out.extend(values.into_iter().map(Action::boom));
    out.retain(|a| validate(game, player_id, a).is_ok());
    out
}

fn check_global(game: &Game, player_id: &str, action: &Action) -> Result<(), ActionError> {
    if game.is_over() {
        return Err(ActionError::GameAlreadyEnded);
    }
    let current = game
        .current_player()
        .ok_or_else(|| ActionError::InternalInvariant("game has no players".into()))?;
    if current.id() != player_id {
        return Err(ActionError::NotPlayersTurn {
            expected: current.id().to_string(),
            got: player_id.to_string(),
        });
    }
    if let Action::Attack { target_player_id, .. } = action {
        if target_player_id.is_empty() {
            return Err(ActionError::MalformedParams("attack needs a target player id"));
        }
    }
    Ok(())
}

fn actor_index(game: &Game, player_id: &str) -> Result<usize, ActionError> {
    game.player_index(player_id)
        .ok_or_else(|| ActionError::InternalInvariant(format!("acting player {player_id} not seated")))
}

fn check_hand_index(player: &GamePlayer, index: usize) -> Result<(), ActionError> {
    let len = player.hand.len();
    if index >= len {
        return Err(ActionError::IndexOutOfRange { slot: Slot::Hand, index, len });
    }
    Ok(())
}

fn check_accumulator_index(player: &GamePlayer, index: usize) -> Result<(), ActionError> {
    let len = player.accumulators.len();
    if index >= len {
        return Err(ActionError::IndexOutOfRange { slot: Slot::Accumulator, index, len });
    }
    Ok(())
}

/// Returns the target's seat index and its remaining HP before the attack.
fn check_attack(
    game: &Game,
    actor: usize,
    target_id: &str,
    hand_index: usize,
    acc_index: usize,
) -> Result<(usize, u32), ActionError> {
    let target = game
        .player_index(target_id)
        .ok_or_else(|| IllegalTarget::UnknownPlayer(target_id.to_string()))?;
    if target == actor {
        return Err(IllegalTarget::SelfAttack.into());
    }
    let me = &game.players[actor];
    let them = &game.players[target];
    check_hand_index(me, hand_index)?;
    check_accumulator_index(them, acc_index)?;

    let card = me.hand[hand_index];
    let acc = &them.accumulators[acc_index];
    if acc.is_face() {
        return Err(IllegalTarget::FaceAccumulator.into());
    }
    if acc.is_attacked() && card == FACE {
        return Err(IllegalTarget::ZeroOnAttacked.into());
    }
    let remaining = acc.remaining();
    if remaining < u32::from(card) {
        return Err(IllegalTarget::ExceedsRemaining { remaining, value: card }.into());
    }
    Ok((target, remaining))
}

fn check_swap(me: &GamePlayer, hand_index: usize, acc_index: usize) -> Result<(), ActionError> {
    check_hand_index(me, hand_index)?;
    check_accumulator_index(me, acc_index)?;
    if me.accumulators[acc_index].is_attacked() {
        return Err(IllegalTarget::SwapAttacked.into());
    }
    Ok(())
}

fn check_boom(me: &GamePlayer, target_value: u32) -> Result<(), ActionError> {
    if target_value == 0 {
        return Err(IllegalTarget::NonPositiveBoomTarget(target_value).into());
    }
    if !me.has_all_faces() {
        return Err(IllegalTarget::HandNotAllFaces.into());
    }
    Ok(())
}

fn apply<R: Rng + ?Sized>(
    game: &Game,
    player_id: &str,
    action: &Action,
    rng: &mut R,
) -> Result<Game, ActionError> {
    check_global(game, player_id, action)?;
    let actor = actor_index(game, player_id)?;
    let turn = game.turn();

    let (next, record) = match action {
        Action::Attack { target_player_id, source_hand_index, target_accumulator_index } => {
            let (target, remaining) = check_attack(
                game,
                actor,
                target_player_id,
                *source_hand_index,
                *target_accumulator_index,
            )?;
            let mut next = game.clone();
            let record = attack(
                &mut next,
                actor,
                target,
                *source_hand_index,
                *target_accumulator_index,
                remaining,
                rng,
            );
            (next, ActionRecord::Attack(record))
        }
        Action::Swap { source_hand_index, target_accumulator_index } => {
            check_swap(&game.players[actor], *source_hand_index, *target_accumulator_index)?;
            let mut next = game.clone();
            let me = &mut next.players[actor];
            let card = me.hand[*source_hand_index];
            let old = std::mem::replace(
                &mut me.accumulators[*target_accumulator_index],
                Accumulator::new(card),
            );
            me.hand[*source_hand_index] = old.original_value();
            (
                next,
                ActionRecord::Swap(SwapRecord {
                    source_hand_value: card,
                    target_accumulator_value: old.original_value(),
                }),
            )
        }
        Action::Discard { source_hand_index } => {
            check_hand_index(&game.players[actor], *source_hand_index)?;
            let mut next = game.clone();
            let slot = &mut next.players[actor].hand[*source_hand_index];
            let card = std::mem::replace(slot, random_card(rng));
            (next, ActionRecord::Discard(DiscardRecord { source_hand_value: card }))
        }
        Action::Boom { target_value } => {
            check_boom(&game.players[actor], *target_value)?;
            let mut next = game.clone();
            let destroyed = boom(&mut next, actor, *target_value, rng);
            (
                next,
                ActionRecord::Boom(BoomRecord {
                    target_value: *target_value,
                    accumulators_destroyed_quantity: destroyed,
                }),
            )
        }
    };
    finish(next, turn, player_id, record, rng)
}

fn attack<R: Rng + ?Sized>(
    next: &mut Game,
    actor: usize,
    target: usize,
    hand_index: usize,
    acc_index: usize,
    remaining: u32,
    rng: &mut R,
) -> AttackRecord {
    let card = next.players[actor].hand[hand_index];
    let acc = &mut next.players[target].accumulators[acc_index];
    let one_hit_kill = remaining == u32::from(card) && !acc.is_attacked();
    acc.record_attack(card);

    let me = &mut next.players[actor];
    me.hand[hand_index] = random_card(rng);
    let extra = if one_hit_kill {
        let value = random_life_card(rng);
        me.accumulators.push(Accumulator::new(value));
        Some(value)
    } else {
        None
    };

    AttackRecord {
        target_player_id: next.players[target].id.clone(),
        source_hand_value: card,
        target_accumulator_value: remaining,
        obtained_extra_accumulator: extra,
    }
}

fn boom<R: Rng + ?Sized>(next: &mut Game, actor: usize, target_value: u32, rng: &mut R) -> usize {
    let mut destroyed = 0;
    // Remaining HP never exceeds a card value, so a matching target fits in a Card.
    let amount = Card::try_from(target_value).unwrap_or(Card::MAX);
    for player in &mut next.players {
        for acc in &mut player.accumulators {
            if !acc.is_face() && acc.remaining() == target_value {
                acc.record_attack(amount);
                destroyed += 1;
            }
        }
    }
    let me = &mut next.players[actor];
    for card in &mut me.hand {
        *card = random_card(rng);
    }
    destroyed
}

/// Hand refill, depleted-accumulator cleanup, history and turn advancement.
fn finish<R: Rng + ?Sized>(
    mut next: Game,
    turn: u64,
    player_id: &str,
    record: ActionRecord,
    rng: &mut R,
) -> Result<Game, ActionError> {
    let hand_size = next.hand_cards_count;
    for player in &mut next.players {
        if player.hand.len() < hand_size {
            log::warn!(
                "{} holds {} cards, refilling to {hand_size}",
                player.id,
                player.hand.len()
            );
            while player.hand.len() < hand_size {
                player.hand.push(random_card(rng));
            }
        }
        player.accumulators.retain(|a| !a.is_depleted());
    }
    next.record_history(turn, player_id, record);
    next.advance_turn()?;
    if let Some(winner) = next.winner_id() {
        log::info!("{winner} wins after turn {turn}");
    } else if next.is_draw() {
        log::info!("game ends in a draw after turn {turn}");
    }
    Ok(next)
}

impl Game {
    /// Method form of [`attempt_action`] for a game that is known to exist.
    ///
    /// ```
    /// use boom_rs::action::Action;
    /// use boom_rs::cards::Accumulator;
    /// use boom_rs::game::{Game, GamePlayer};
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let game = Game::from_players(
    ///     vec![
    ///         GamePlayer::new("a", vec![3, 3, 3], vec![Accumulator::new(5)]),
    ///         GamePlayer::new("b", vec![1, 1, 1], vec![Accumulator::new(5)]),
    ///     ],
    ///     3,
    /// );
    /// let mut rng = ChaCha8Rng::seed_from_u64(7);
    /// let next = game.attempt("a", &Action::attack("b", 0, 0), &mut rng).unwrap();
    /// assert_eq!(next.player("b").unwrap().remaining_hp(), 2);
    /// assert_eq!(next.current_player().unwrap().id(), "b");
    /// ```
    pub fn attempt<R: Rng + ?Sized>(
        &self,
        player_id: &str,
        action: &Action,
        rng: &mut R,
    ) -> Result<Game, ActionError> {
        attempt_action(Some(self), player_id, action, rng)
    }
}

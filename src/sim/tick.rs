//! Variable timestep simulation tick
//!
//! Advances the session by the wall-clock time elapsed since the previous
//! animation callback. Large deltas are applied in a single step: every fruit
//! gets exactly one catch/miss evaluation per tick.

use super::collision::is_caught;
use super::spawn::spawn_fruit;
use super::state::{BackgroundTier, GameEvent, GameState};

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, dt_ms: f32) {
    if !state.is_active() {
        return;
    }

    advance_timers(state, dt_ms);
    update_tier(state);
    update_fruits(state, dt_ms);
}

/// Difficulty step, then spawn check
fn advance_timers(state: &mut GameState, dt_ms: f32) {
    state.spawn_timer += dt_ms;
    state.difficulty_timer += dt_ms;

    if state.difficulty_timer > state.tuning.difficulty_period_ms {
        let next = (state.spawn_interval - state.tuning.spawn_interval_step_ms)
            .max(state.tuning.min_spawn_interval_ms);
        state.difficulty_timer = 0.0;
        if next != state.spawn_interval {
            state.spawn_interval = next;
            log::debug!("Spawn interval now {}ms", next);
            state.push_event(GameEvent::SpawnIntervalChanged(next));
        }
    }

    // Excess time past the interval is dropped, not carried over
    if state.spawn_timer > state.spawn_interval {
        let id = state.next_entity_id();
        let fruit = spawn_fruit(
            &mut state.rng,
            id,
            state.score,
            &state.playfield,
            &state.tuning,
        );
        state.push_event(GameEvent::FruitSpawned { id, kind: fruit.kind });
        state.fruits.push(fruit);
        state.spawn_timer = 0.0;
    }
}

fn update_tier(state: &mut GameState) {
    let tier = BackgroundTier::for_score(state.score, &state.tuning);
    if tier != state.tier {
        state.tier = tier;
        state.push_event(GameEvent::TierChanged(tier));
    }
}

/// Move, animate, then resolve catch (first) or miss for every fruit
fn update_fruits(state: &mut GameState, dt_ms: f32) {
    let basket = state.basket.bounds();
    let miss_y = state.playfield.height + state.tuning.miss_margin;
    let frame_duration = state.tuning.frame_duration_ms;

    let mut score = state.score;
    let mut lives = state.lives;
    let mut events = Vec::new();
    let mut over = false;

    state.fruits.retain_mut(|fruit| {
        // Session ended earlier this tick: leave the rest for the next start
        if over {
            return true;
        }

        fruit.pos.y += fruit.fall_speed * (dt_ms / 1000.0);
        fruit.animate(dt_ms, frame_duration);

        if is_caught(&fruit.bounds(), &basket) {
            score = score.saturating_add(fruit.value);
            events.push(GameEvent::FruitCaught {
                id: fruit.id,
                kind: fruit.kind,
                value: fruit.value,
            });
            events.push(GameEvent::ScoreChanged(score));
            return false;
        }

        if fruit.pos.y > miss_y {
            lives = lives.saturating_sub(1);
            events.push(GameEvent::FruitMissed { id: fruit.id, kind: fruit.kind });
            events.push(GameEvent::LivesChanged(lives));
            if lives == 0 {
                over = true;
            }
            return false;
        }

        true
    });

    state.score = score;
    state.lives = lives;
    state.events.extend(events);

    if over {
        state.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetId;
    use crate::sim::catalog::FruitKind;
    use crate::sim::state::{Fruit, GamePhase, Playfield};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn active_state() -> GameState {
        let mut state = GameState::new(12345, Tuning::default(), Playfield::new(800.0, 600.0));
        state.start();
        state.drain_events();
        state
    }

    fn fruit_at(state: &mut GameState, x: f32, y: f32, speed: f32) -> u32 {
        let id = state.next_entity_id();
        state.fruits.push(Fruit {
            id,
            kind: FruitKind::Apple,
            pos: Vec2::new(x, y),
            size: 100.0,
            fall_speed: speed,
            value: 5,
            frame_index: 0,
            frame_timer: 0.0,
            frames: 2,
            asset: AssetId::Fruit(FruitKind::Apple),
        });
        id
    }

    #[test]
    fn idle_state_does_not_tick() {
        let mut state = GameState::new(1, Tuning::default(), Playfield::new(800.0, 600.0));
        tick(&mut state, 5000.0);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.fruits.is_empty());
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn spawns_after_interval_and_resets_timer() {
        let mut state = active_state();
        tick(&mut state, 900.0);
        assert!(state.fruits.is_empty(), "spawn requires strictly exceeding the interval");

        tick(&mut state, 1.0);
        assert_eq!(state.fruits.len(), 1);
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn large_delta_spawns_only_once() {
        let mut state = active_state();
        tick(&mut state, 5000.0);
        assert_eq!(state.fruits.len(), 1);
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn difficulty_steps_every_period() {
        let mut state = active_state();
        tick(&mut state, 8000.0);
        assert_eq!(state.spawn_interval, 900.0);
        tick(&mut state, 1.0);
        assert_eq!(state.spawn_interval, 820.0);
        assert_eq!(state.difficulty_timer, 0.0);
    }

    #[test]
    fn difficulty_floors_at_minimum() {
        let mut state = active_state();
        // Nothing is ever missed on an endless field
        state.playfield.height = f32::MAX;
        for _ in 0..20 {
            tick(&mut state, 8001.0);
        }
        assert!(state.is_active());
        assert_eq!(state.spawn_interval, 300.0);
    }

    #[test]
    fn catch_adds_value_and_removes() {
        let mut state = active_state();
        let bx = state.basket.pos.x;
        let by = state.basket.pos.y;
        fruit_at(&mut state, bx + 20.0, by - 100.0, 0.0);

        tick(&mut state, 16.0);
        assert_eq!(state.score, 5);
        assert!(state.fruits.is_empty());

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged(5)));
        assert!(events.iter().any(|e| matches!(e, GameEvent::FruitCaught { value: 5, .. })));
    }

    #[test]
    fn miss_costs_one_life() {
        let mut state = active_state();
        fruit_at(&mut state, 0.0, 641.0, 0.0);

        tick(&mut state, 16.0);
        assert_eq!(state.lives, 2);
        assert!(state.fruits.is_empty());
        assert!(state.drain_events().contains(&GameEvent::LivesChanged(2)));
    }

    #[test]
    fn exactly_at_threshold_is_not_missed() {
        let mut state = active_state();
        fruit_at(&mut state, 0.0, 640.0, 0.0);
        tick(&mut state, 16.0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.fruits.len(), 1);
    }

    #[test]
    fn catch_wins_over_miss() {
        let mut state = active_state();
        // Tall basket that extends past the miss line
        state.basket.size.y = 400.0;
        let bx = state.basket.pos.x;
        fruit_at(&mut state, bx + 10.0, 650.0, 0.0);

        tick(&mut state, 16.0);
        assert_eq!(state.score, 5);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn last_life_ends_session() {
        let mut state = active_state();
        state.lives = 1;
        fruit_at(&mut state, 0.0, 700.0, 0.0);
        fruit_at(&mut state, 0.0, 700.0, 0.0);

        tick(&mut state, 16.0);
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.lives, 0);
        assert_eq!(state.fruits.len(), 1, "fruit after game over is left untouched");

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { final_score: 0 }));

        // No further spawns while over
        tick(&mut state, 10_000.0);
        assert_eq!(state.fruits.len(), 1);
    }

    #[test]
    fn tier_changes_with_score() {
        let mut state = active_state();
        state.score = 25;
        tick(&mut state, 1.0);
        assert_eq!(state.tier, BackgroundTier::Level2);
        assert!(state.drain_events().contains(&GameEvent::TierChanged(BackgroundTier::Level2)));

        tick(&mut state, 1.0);
        assert!(state.drain_events().is_empty(), "tier event fires once");
    }

    #[test]
    fn fruit_falls_by_speed_times_seconds() {
        let mut state = active_state();
        let id = fruit_at(&mut state, 0.0, 0.0, 200.0);
        tick(&mut state, 250.0);
        let fruit = state.fruits.iter().find(|f| f.id == id).unwrap();
        assert_eq!(fruit.pos.y, 50.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = active_state();
        let mut state2 = active_state();

        for dt in [16.0, 950.0, 17.0, 1200.0, 16.0, 3000.0] {
            tick(&mut state1, dt);
            tick(&mut state2, dt);
        }

        assert_eq!(state1.fruits, state2.fruits);
        assert_eq!(state1.score, state2.score);
    }
}

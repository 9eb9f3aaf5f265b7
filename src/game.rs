//! Game session driver
//!
//! [`Game`] is the single owner of all mutable game data. Input handlers and
//! the animation callback both go through it, one call at a time.

use crate::assets::AssetRegistry;
use crate::driver::{FrameClock, TickError, run_guarded};
use crate::input::{BasketController, InputEvent, InputQueue};
use crate::renderer::{Surface, build_frame};
use crate::sim::{GameEvent, GameState, Playfield, tick};
use crate::tuning::Tuning;
use crate::ui::Overlay;

/// Game instance holding all state
pub struct Game<O: Overlay> {
    pub state: GameState,
    pub assets: AssetRegistry,
    controller: BasketController,
    input: InputQueue,
    clock: FrameClock,
    overlay: O,
}

impl<O: Overlay> Game<O> {
    pub fn new(seed: u64, tuning: Tuning, playfield: Playfield, overlay: O) -> Self {
        Self {
            state: GameState::new(seed, tuning, playfield),
            assets: AssetRegistry::with_game_assets(),
            controller: BasketController::new(),
            input: InputQueue::new(),
            clock: FrameClock::new(),
            overlay,
        }
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn is_running(&self) -> bool {
        self.state.is_active()
    }

    /// Queue an input event for the next frame
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Forget held keys (focus lost)
    pub fn release_keys(&mut self) {
        self.controller.release_all();
    }

    /// Begin a new session; `now` is the delta baseline (ms)
    pub fn start(&mut self, now: f64) {
        self.state.start();
        self.overlay.set_loading_visible(false);
        self.overlay.hide_game_over();
        self.clock.start(now);
        self.forward_events();
    }

    /// New logical canvas size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(Playfield::new(width, height));
    }

    /// One animation callback: input, update, render
    ///
    /// Failures are logged and the session carries on with the next frame.
    /// Returns whether this frame completed.
    pub fn frame<S: Surface + ?Sized>(&mut self, now: f64, surface: &mut S) -> bool {
        run_guarded(|| self.step(now, surface))
    }

    fn step<S: Surface + ?Sized>(&mut self, now: f64, surface: &mut S) -> Result<(), TickError> {
        self.process_input();
        if !self.state.is_active() {
            return Ok(());
        }

        let dt = self.clock.delta(now)?;
        let step = self.state.tuning.control_dt;
        self.controller
            .control_tick(&mut self.state.basket, &self.state.playfield, step);

        tick(&mut self.state, dt);
        self.forward_events();

        // The frame that ends the session is still drawn
        build_frame(&self.state, &self.assets).submit(surface)?;
        Ok(())
    }

    fn process_input(&mut self) {
        for event in self.input.drain() {
            self.controller
                .apply(&event, &mut self.state.basket, &self.state.playfield);
        }
    }

    fn forward_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => self.overlay.set_score(score),
                GameEvent::LivesChanged(lives) => self.overlay.set_lives(lives),
                GameEvent::TierChanged(tier) => self.overlay.set_background(tier),
                GameEvent::GameOver { final_score } => self.overlay.show_game_over(final_score),
                other => log::trace!("{:?}", other),
            }
        }
    }
}

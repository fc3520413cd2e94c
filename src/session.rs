//! Frame driver: input in, fixed ticks, snapshot out
//!
//! A `Session` owns the game state for one play session along with the
//! input source and renderer it talks to. The host calls `frame` once per
//! display refresh and `command` whenever the UI raises an action.

use crate::consts::*;
use crate::error::CommandError;
use crate::platform::{InputContext, InputSource};
use crate::sim::{Command, GameEvent, GameState, tick};
use crate::snapshot::{FrameSnapshot, HudSummary, Renderer};

pub struct Session<I: InputSource, R: Renderer> {
    state: GameState,
    input: I,
    renderer: R,
    /// Unsimulated wall time carried between frames (seconds)
    accumulator: f32,
}

impl<I: InputSource, R: Renderer> Session<I, R> {
    pub fn new(seed: u64, input: I, renderer: R) -> Self {
        log::info!("New session (seed {seed})");
        Self {
            state: GameState::new(seed),
            input,
            renderer,
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Presentation preferences and viewport can change mid-session
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Advance exactly one tick and render it
    pub fn step(&mut self) {
        self.run_tick();
        self.render();
    }

    /// Run however many fixed ticks `elapsed` seconds of wall time covers,
    /// then render once. Returns the number of ticks run.
    pub fn frame(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.run_tick();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.render();
        substeps
    }

    fn run_tick(&mut self) {
        let input = self.input.sample(&InputContext::new(&self.state));
        tick(&mut self.state, &input, SIM_DT);
    }

    fn render(&mut self) {
        let frame = FrameSnapshot::capture(&self.state);
        self.renderer.render(&frame);
    }

    /// Forward a UI action to the phase machine
    pub fn command(&mut self, command: Command) -> Result<(), CommandError> {
        let result = self.state.apply(command);
        if let Err(err) = &result {
            log::warn!("Rejected {}: {err}", command.as_str());
        }
        result
    }

    pub fn hud(&self) -> HudSummary {
        HudSummary::capture(&self.state)
    }

    /// Events since the last drain, for audio cues and UI flashes
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }
}

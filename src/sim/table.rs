//! Table simulation facade
//!
//! The single object a game loop owns. Lifecycle is explicit: nothing works
//! before [`TableSimulation::init`] and `init` may not run twice without a
//! [`TableSimulation::deinit`] in between.

use glam::Vec2;

use super::shot::ShotController;
use super::state::{Ball, Table, TableEvent, TableSnapshot};
use super::tick::tick;
use crate::config::SimConfig;
use crate::consts::*;
use crate::error::{Result, SimError, check_index};
use crate::presentation::PresentationSink;

const NOT_INITIALIZED: &str = "table used before init()";

#[derive(Debug)]
pub struct TableSimulation {
    config: SimConfig,
    table: Option<Table>,
    shot: ShotController,
    /// Events since the last `take_events`
    events: Vec<TableEvent>,
}

impl Default for TableSimulation {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSimulation {
    /// Uninitialized simulation with the default configuration
    pub fn new() -> Self {
        Self::build(SimConfig::default())
    }

    /// Uninitialized simulation with a validated custom configuration
    pub fn with_config(config: SimConfig) -> Result<Self> {
        config.validate()?;
        log::debug!("table config: {config:?}");
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        Self {
            shot: ShotController::new(config.charge_time, config.max_shot_speed),
            config,
            table: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.table.is_some()
    }

    // === Lifecycle ===

    /// Rack the balls and place the pockets
    pub fn init(&mut self) -> Result<()> {
        if self.table.is_some() {
            return Err(SimError::PreconditionViolation("init() called twice"));
        }
        self.table = Some(Table::new(self.config.geometry()));
        self.shot.cancel();
        self.events.clear();
        log::info!(
            "table initialized: {}x{}, {} balls, {} pockets",
            self.config.table_width,
            self.config.table_height,
            BALL_COUNT,
            POCKET_COUNT
        );
        Ok(())
    }

    /// Drop all ball and pocket records
    pub fn deinit(&mut self) -> Result<()> {
        if self.table.take().is_none() {
            return Err(SimError::PreconditionViolation("deinit() before init()"));
        }
        self.shot.cancel();
        self.events.clear();
        log::info!("table cleared");
        Ok(())
    }

    /// Start a new rack on an initialized table
    pub fn reset(&mut self) -> Result<()> {
        self.deinit()?;
        self.init()
    }

    fn table(&self) -> Result<&Table> {
        self.table
            .as_ref()
            .ok_or(SimError::PreconditionViolation(NOT_INITIALIZED))
    }

    fn table_mut(&mut self) -> Result<&mut Table> {
        self.table
            .as_mut()
            .ok_or(SimError::PreconditionViolation(NOT_INITIALIZED))
    }

    fn ball(&self, index: usize) -> Result<&Ball> {
        let table = self.table()?;
        check_index(index, BALL_COUNT)?;
        Ok(&table.balls[index])
    }

    fn active_ball_mut(&mut self, index: usize) -> Result<&mut Ball> {
        let table = self.table_mut()?;
        check_index(index, BALL_COUNT)?;
        let ball = &mut table.balls[index];
        if ball.is_pocketed() {
            return Err(SimError::InvalidState("ball is pocketed"));
        }
        Ok(ball)
    }

    // === Simulation ===

    /// Advance physics by `dt` seconds
    pub fn step(&mut self, dt: f32) -> Result<()> {
        let config = &self.config;
        let table = self
            .table
            .as_mut()
            .ok_or(SimError::PreconditionViolation(NOT_INITIALIZED))?;
        let events = tick(table, config, dt);
        self.events.extend(events);
        Ok(())
    }

    /// One presentation frame: charge the shot, then step physics
    pub fn update(&mut self, dt: f32) -> Result<()> {
        self.charge_update(dt)?;
        self.step(dt)
    }

    /// Set a ball's velocity directly
    pub fn apply_impulse(&mut self, index: usize, velocity: Vec2) -> Result<()> {
        let ball = self.active_ball_mut(index)?;
        ball.vel = velocity;
        Ok(())
    }

    /// Move a ball (ball in hand, scenario setup). Velocity is kept.
    ///
    /// The position is taken as given; the next `step` clamps it onto the
    /// cloth and separates it from any ball it overlaps.
    pub fn set_ball_position(&mut self, index: usize, position: Vec2) -> Result<()> {
        let ball = self.active_ball_mut(index)?;
        ball.pos = position;
        Ok(())
    }

    // === Shot commands ===

    pub fn start_charging(&mut self) -> Result<()> {
        self.table()?;
        self.shot.press();
        Ok(())
    }

    pub fn charge_update(&mut self, dt: f32) -> Result<()> {
        self.table()?;
        self.shot.update(dt);
        Ok(())
    }

    /// Release the shot toward `direction`
    ///
    /// Returns the velocity given to the cue ball, or `None` when the release
    /// had no effect (not charging, zero direction or charge, cue ball pocketed).
    /// An uncharged release leaves the cue ball's velocity alone rather than
    /// setting it to `direction * 0 * max_shot_speed`.
    pub fn release_shot(&mut self, direction: Vec2) -> Result<Option<Vec2>> {
        self.table()?;
        let Some(velocity) = self.shot.release(direction) else {
            return Ok(None);
        };

        match self.apply_impulse(CUE_BALL, velocity) {
            Ok(()) => {
                log::debug!("shot fired: {velocity:?}");
                self.events.push(TableEvent::ShotFired {
                    ball: CUE_BALL,
                    velocity,
                });
                Ok(Some(velocity))
            }
            Err(SimError::InvalidState(reason)) => {
                log::debug!("shot had no effect: {reason}");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    // === Queries ===

    pub fn ball_position(&self, index: usize) -> Result<Vec2> {
        Ok(self.ball(index)?.pos)
    }

    pub fn ball_velocity(&self, index: usize) -> Result<Vec2> {
        Ok(self.ball(index)?.vel)
    }

    pub fn is_pocketed(&self, index: usize) -> Result<bool> {
        Ok(self.ball(index)?.is_pocketed())
    }

    /// Pocket that captured the ball, if any
    pub fn pocketed_in(&self, index: usize) -> Result<Option<usize>> {
        Ok(self.ball(index)?.pocketed)
    }

    pub fn pocket_position(&self, index: usize) -> Result<Vec2> {
        let table = self.table()?;
        check_index(index, POCKET_COUNT)?;
        Ok(table.pockets[index].pos)
    }

    pub fn balls(&self) -> Result<&[Ball; BALL_COUNT]> {
        Ok(&self.table()?.balls)
    }

    pub fn balls_remaining(&self) -> Result<usize> {
        Ok(self.table()?.balls_remaining())
    }

    pub fn is_at_rest(&self) -> Result<bool> {
        Ok(self.table()?.is_at_rest())
    }

    pub fn total_kinetic_energy(&self) -> Result<f32> {
        Ok(self.table()?.total_kinetic_energy())
    }

    /// Charge fraction for the progress bar (0 when idle)
    pub fn charge_progress(&self) -> f32 {
        self.shot.progress()
    }

    pub fn is_charging(&self) -> bool {
        self.shot.is_charging()
    }

    /// Drain events recorded since the previous call
    pub fn take_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    /// Owned copy of the observable state
    pub fn snapshot(&self) -> Result<TableSnapshot> {
        Ok(TableSnapshot {
            balls: self.table()?.balls.to_vec(),
            charging: self.shot.is_charging(),
            charge_progress: self.shot.progress(),
        })
    }

    /// Push current state to a presentation layer
    pub fn present(&self, sink: &mut impl PresentationSink) -> Result<()> {
        let table = self.table()?;
        for ball in &table.balls {
            match ball.pocketed {
                Some(pocket) => sink.ball_pocketed(ball.id, pocket),
                None => sink.ball_moved(ball.id, ball.pos),
            }
        }
        sink.charge_progress(self.shot.progress());
        Ok(())
    }
}

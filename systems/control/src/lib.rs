#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Mission controller that orchestrates validation and step-wise execution.
//!
//! One execution attempt at a time: the `running` guard rejects concurrent
//! starts instead of queueing them. The controller drives the interpreter one
//! instruction per [`MissionController::advance`] call so adapters can pace
//! presentation between steps, evaluates the objective flags once the plan
//! completes, and owns the adapter-fed mission clock.

use std::time::Duration;

use rover_mission_core::{
    Command, Event, MissionOutcome, RawInstruction, StepFailure, ValidationError,
};
use rover_mission_system_interpreter::{ExecutionPhase, Interpreter};
use rover_mission_system_validator::Validator;
use rover_mission_world::{apply, query, World};

/// Progress reported after driving the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissionProgress {
    /// No step was driven: no attempt is active, or a concurrent start was
    /// refused by the `running` guard.
    Idle,
    /// The pending step succeeded and more steps remain.
    InProgress {
        /// Index of the next step awaiting evaluation.
        next_step: usize,
    },
    /// The attempt aborted; a full reset is required before retrying.
    Aborted {
        /// Index of the step that failed.
        step: usize,
        /// Specific reason the step failed.
        reason: StepFailure,
    },
    /// Every step ran; the objectives were evaluated.
    Finished {
        /// Whether both objectives were met.
        outcome: MissionOutcome,
    },
}

/// Orchestrates one execution attempt over validator, interpreter and world.
#[derive(Debug, Default)]
pub struct MissionController {
    validator: Validator,
    interpreter: Interpreter,
    running: bool,
    elapsed: Duration,
}

impl MissionController {
    /// Reports whether an execution attempt is currently active.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Current reading of the mission clock.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Advances the mission clock by adapter-measured time.
    pub fn advance_time(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Zeroes the mission clock, as on a full game restart.
    ///
    /// Kept separate from [`MissionController::reset`]: the clock keeps
    /// running across retry attempts.
    pub fn reset_clock(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Validates the sequence and starts a new execution attempt.
    ///
    /// Returns `Ok(false)` without touching any state while an attempt is
    /// already running. Otherwise the previous attempt's world state is
    /// cleared, the sequence is compiled, and the first step becomes pending.
    /// Validation failures leave the controller stopped and the plan editable.
    pub fn begin(
        &mut self,
        world: &mut World,
        sequence: &[RawInstruction],
        out_events: &mut Vec<Event>,
    ) -> Result<bool, ValidationError> {
        if self.running {
            return Ok(false);
        }

        self.interpreter.reset();
        apply(world, Command::ResetMission, out_events);

        let plan = self.validator.validate(sequence)?;
        if !self.interpreter.start(plan) {
            return Ok(false);
        }
        self.running = true;
        Ok(true)
    }

    /// Drives exactly one interpreter step of the active attempt.
    pub fn advance(&mut self, world: &mut World, out_events: &mut Vec<Event>) -> MissionProgress {
        if !self.running {
            return MissionProgress::Idle;
        }

        match self.interpreter.step(world, out_events) {
            ExecutionPhase::StepPending(next_step) => MissionProgress::InProgress { next_step },
            ExecutionPhase::Completed => {
                self.running = false;
                let outcome = if query::sample_collected(world) && query::sample_analyzed(world) {
                    MissionOutcome::Success
                } else {
                    MissionOutcome::Incomplete
                };
                out_events.push(Event::MissionCompleted {
                    outcome,
                    elapsed: self.elapsed,
                });
                MissionProgress::Finished { outcome }
            }
            ExecutionPhase::Aborted { step, reason } => {
                self.running = false;
                MissionProgress::Aborted { step, reason }
            }
            ExecutionPhase::Idle => {
                self.running = false;
                MissionProgress::Idle
            }
        }
    }

    /// Runs a whole attempt back to back: validate, start, then step to rest.
    ///
    /// Produces the same logical result as pacing individual
    /// [`MissionController::advance`] calls.
    pub fn execute(
        &mut self,
        world: &mut World,
        sequence: &[RawInstruction],
        out_events: &mut Vec<Event>,
    ) -> Result<MissionProgress, ValidationError> {
        if !self.begin(world, sequence, out_events)? {
            return Ok(MissionProgress::Idle);
        }

        loop {
            let progress = self.advance(world, out_events);
            if !matches!(progress, MissionProgress::InProgress { .. }) {
                return Ok(progress);
            }
        }
    }

    /// Full reset after an abort or an incomplete run.
    ///
    /// Restores the rover start pose, clears the objective flags, returns the
    /// interpreter to idle and drops the run guard. The externally held plan
    /// is untouched; the caller may retry with the same or an edited
    /// sequence.
    pub fn reset(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        self.interpreter.reset();
        self.running = false;
        apply(world, Command::ResetMission, out_events);
    }
}

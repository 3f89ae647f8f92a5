#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Step-wise execution interpreter for validated rover plans.
//!
//! The interpreter is a caller-driven state machine: each [`Interpreter::step`]
//! call evaluates exactly one pending instruction against the world, so
//! adapters are free to pace animation or audio between steps. The logical
//! result is identical whether steps run paced or back to back.

use rover_mission_core::{Command, Event, Instruction, Plan, StepFailure};
use rover_mission_world::{apply, query, World};

/// Resting state of the interpreter between `step` calls.
///
/// Evaluation of an instruction is transient: a pending step either succeeds
/// (moving to the next pending index or to [`ExecutionPhase::Completed`]) or
/// fails (moving to [`ExecutionPhase::Aborted`]) within a single [`Interpreter::step`]
/// call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionPhase {
    /// No plan is active; `start` may adopt one.
    Idle,
    /// The instruction at the contained index awaits evaluation.
    StepPending(usize),
    /// Every step ran without error; terminal for this attempt.
    Completed,
    /// A step failed and execution halted permanently for this attempt.
    Aborted {
        /// Index of the step that failed.
        step: usize,
        /// Specific reason the step failed.
        reason: StepFailure,
    },
}

/// Executes one plan at a time, one instruction per `step` call.
#[derive(Debug, Default)]
pub struct Interpreter {
    plan: Plan,
    phase: ExecutionPhase,
}

impl Default for ExecutionPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl Interpreter {
    /// Adopts a compiled plan for execution.
    ///
    /// Only accepted from [`ExecutionPhase::Idle`]; returns `false` (and
    /// changes nothing) while another attempt is active or awaiting reset.
    /// An empty plan settles immediately in [`ExecutionPhase::Completed`] so
    /// the controller's objective check still runs; the validator rejects
    /// empty sequences upstream.
    pub fn start(&mut self, plan: Plan) -> bool {
        if self.phase != ExecutionPhase::Idle {
            return false;
        }

        self.phase = if plan.is_empty() {
            ExecutionPhase::Completed
        } else {
            ExecutionPhase::StepPending(0)
        };
        self.plan = plan;
        true
    }

    /// Current resting phase of the state machine.
    #[must_use]
    pub const fn phase(&self) -> ExecutionPhase {
        self.phase
    }

    /// Index of the step awaiting evaluation, if any.
    #[must_use]
    pub const fn current_step(&self) -> Option<usize> {
        match self.phase {
            ExecutionPhase::StepPending(index) => Some(index),
            _ => None,
        }
    }

    /// Evaluates the pending instruction, mutating the world through its
    /// command surface and emitting step lifecycle events.
    ///
    /// Calls while no step is pending change nothing and return the resting
    /// phase unchanged.
    pub fn step(&mut self, world: &mut World, out_events: &mut Vec<Event>) -> ExecutionPhase {
        let ExecutionPhase::StepPending(index) = self.phase else {
            return self.phase;
        };
        let Some(instruction) = self.plan.get(index).copied() else {
            self.phase = ExecutionPhase::Completed;
            return self.phase;
        };

        out_events.push(Event::StepStarted { index });
        match evaluate(world, instruction, out_events) {
            Ok(()) => {
                out_events.push(Event::StepCompleted { index });
                self.phase = if index + 1 < self.plan.len() {
                    ExecutionPhase::StepPending(index + 1)
                } else {
                    ExecutionPhase::Completed
                };
            }
            Err(reason) => {
                out_events.push(Event::StepFailed { index, reason });
                self.phase = ExecutionPhase::Aborted {
                    step: index,
                    reason,
                };
            }
        }

        self.phase
    }

    /// Drops the adopted plan copy and returns to [`ExecutionPhase::Idle`].
    pub fn reset(&mut self) {
        self.plan = Plan::default();
        self.phase = ExecutionPhase::Idle;
    }
}

/// Applies one instruction's semantics; the single source of truth for
/// per-kind step behavior.
fn evaluate(
    world: &mut World,
    instruction: Instruction,
    out_events: &mut Vec<Event>,
) -> Result<(), StepFailure> {
    match instruction {
        Instruction::Advance(steps) => {
            // Each unit move is independently checked and committed, so a
            // blocked cell fails the whole instruction while the rover keeps
            // the progress already made.
            for _ in 0..steps.get() {
                let pose = query::rover(world);
                let candidate = pose.position.stepped(pose.direction);
                if let Some(obstruction) = query::obstruction(world, candidate) {
                    return Err(obstruction.into());
                }
                apply(world, Command::MoveRover { to: candidate }, out_events);
            }
            Ok(())
        }
        Instruction::Turn(toward) => {
            apply(world, Command::TurnRover { toward }, out_events);
            Ok(())
        }
        Instruction::Collect => {
            let at = query::rover(world).position;
            apply(world, Command::CollectSample, out_events);
            if query::is_at_collect_point(world, at) {
                Ok(())
            } else {
                Err(StepFailure::NotAtCollectPoint)
            }
        }
        Instruction::Analyze => {
            let at = query::rover(world).position;
            let ready = query::is_at_analysis_point(world, at) && query::sample_collected(world);
            apply(world, Command::AnalyzeSample, out_events);
            if ready {
                Ok(())
            } else {
                Err(StepFailure::NotReadyToAnalyze)
            }
        }
    }
}

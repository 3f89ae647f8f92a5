#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rover Mission engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The sequence builder supplies
//! [`RawInstruction`] values, the validator compiles them into a [`Plan`],
//! the interpreter drives the world through [`Command`] values, and the
//! world broadcasts [`Event`] values for presentation adapters to react to
//! deterministically.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as x and y coordinates.
///
/// Coordinates are signed so that candidate cells one step past a grid edge
/// remain representable; the world's obstruction check rejects them before
/// any commit happens.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the neighbouring cell one unit move away in `direction`.
    ///
    /// Pure candidate computation: the result may lie outside the grid and
    /// must be checked for obstruction before being committed.
    #[must_use]
    pub const fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Heading the rover can face on the grid.
///
/// Turn arithmetic runs over the fixed cycle `[Right, Down, Left, Up]`: a
/// right turn advances the cycle index by one, a left turn retreats by one.
/// The ordering is a preserved design decision from the original game, not
/// geometric rotation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward increasing x.
    Right,
    /// Movement toward increasing y.
    Down,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward decreasing y.
    Up,
}

const TURN_CYCLE: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

impl Direction {
    /// Unit vector of a single move in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Up => (0, -1),
        }
    }

    /// Heading after turning toward `turn` within the fixed 4-cycle.
    #[must_use]
    pub fn turned(self, turn: TurnDirection) -> Self {
        let index = TURN_CYCLE
            .iter()
            .position(|direction| *direction == self)
            .unwrap_or(0);
        let next = match turn {
            TurnDirection::Right => (index + 1) % TURN_CYCLE.len(),
            TurnDirection::Left => (index + TURN_CYCLE.len() - 1) % TURN_CYCLE.len(),
        };
        TURN_CYCLE[next]
    }
}

/// Relative rotation applied by a turn instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    /// Counter-cycle rotation.
    Left,
    /// Forward-cycle rotation.
    Right,
}

/// Number of unit moves requested by an advance instruction.
///
/// Constructible only with values strictly greater than zero, so a validated
/// instruction can never request a zero-length advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepCount(u32);

impl StepCount {
    /// Creates a step count, rejecting zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Retrieves the number of unit moves.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position and heading of the rover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverPose {
    /// Grid cell currently occupied by the rover.
    pub position: Position,
    /// Heading the rover currently faces.
    pub direction: Direction,
}

impl RoverPose {
    /// Creates a new rover pose.
    #[must_use]
    pub const fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// Kinds of instruction the sequence builder can assemble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Move forward a parameterized number of cells.
    Advance,
    /// Rotate toward a parameterized turn direction.
    Turn,
    /// Pick up the sample at the collect point.
    Collect,
    /// Analyze the sample at the analysis point.
    Analyze,
}

/// Static registry describing the parameter each [`CommandKind`] accepts.
pub mod catalog {
    use super::{CommandKind, Instruction, StepCount, TurnDirection};

    /// Shape of the parameter a command kind requires.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum ParameterSchema {
        /// The kind takes no parameter; any supplied value is ignored.
        None,
        /// The kind requires an integer strictly greater than zero.
        PositiveInteger,
        /// The kind requires one of the two turn directions.
        TurnDirection,
    }

    /// Per-value failure raised while validating a raw parameter.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum ParameterFault {
        /// The kind requires a parameter but none was recorded.
        Missing,
        /// The recorded value does not satisfy the kind's schema.
        Invalid,
    }

    /// Retrieves the parameter schema registered for `kind`.
    #[must_use]
    pub const fn parameter_schema(kind: CommandKind) -> ParameterSchema {
        match kind {
            CommandKind::Advance => ParameterSchema::PositiveInteger,
            CommandKind::Turn => ParameterSchema::TurnDirection,
            CommandKind::Collect | CommandKind::Analyze => ParameterSchema::None,
        }
    }

    /// Validates a raw parameter value against the schema for `kind`.
    ///
    /// On success the pair is compiled into a typed [`Instruction`] whose
    /// payload invariants hold by construction.
    pub fn validate_parameter(
        kind: CommandKind,
        raw_value: Option<&str>,
    ) -> Result<Instruction, ParameterFault> {
        match kind {
            CommandKind::Advance => {
                let raw = raw_value.ok_or(ParameterFault::Missing)?;
                let value = raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| ParameterFault::Invalid)?;
                let steps = StepCount::new(value).ok_or(ParameterFault::Invalid)?;
                Ok(Instruction::Advance(steps))
            }
            CommandKind::Turn => {
                let raw = raw_value.ok_or(ParameterFault::Missing)?;
                match raw.trim() {
                    "left" => Ok(Instruction::Turn(TurnDirection::Left)),
                    "right" => Ok(Instruction::Turn(TurnDirection::Right)),
                    _ => Err(ParameterFault::Invalid),
                }
            }
            CommandKind::Collect => Ok(Instruction::Collect),
            CommandKind::Analyze => Ok(Instruction::Analyze),
        }
    }
}

/// Untyped instruction as assembled by the external sequence builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInstruction {
    /// Kind of command the builder selected.
    pub kind: CommandKind,
    /// Raw parameter value recorded alongside the command, if any.
    pub raw_parameter: Option<String>,
}

impl RawInstruction {
    /// Creates a raw instruction without a recorded parameter.
    #[must_use]
    pub const fn bare(kind: CommandKind) -> Self {
        Self {
            kind,
            raw_parameter: None,
        }
    }

    /// Creates a raw instruction with a recorded parameter value.
    #[must_use]
    pub fn with_parameter(kind: CommandKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            raw_parameter: Some(value.into()),
        }
    }
}

/// Validated, order-significant instruction ready for execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Move forward the contained number of cells.
    Advance(StepCount),
    /// Rotate toward the contained turn direction.
    Turn(TurnDirection),
    /// Pick up the sample at the collect point.
    Collect,
    /// Analyze the sample at the analysis point.
    Analyze,
}

impl Instruction {
    /// Kind of command this instruction was compiled from.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Advance(_) => CommandKind::Advance,
            Self::Turn(_) => CommandKind::Turn,
            Self::Collect => CommandKind::Collect,
            Self::Analyze => CommandKind::Analyze,
        }
    }
}

/// Ordered sequence of validated instructions.
///
/// Plans are owned by the presentation layer; the engine consumes a copy per
/// execution attempt and a reset never clears the caller's plan.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Plan {
    instructions: Vec<Instruction>,
}

impl Plan {
    /// Creates a plan from validated instructions.
    #[must_use]
    pub fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Number of instructions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Reports whether the plan holds no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Retrieves the instruction at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Iterator over the instructions in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Commits the rover to the provided cell without validation.
    ///
    /// The interpreter checks obstruction on the candidate cell first; this
    /// command is the commit half of the compute/commit split.
    MoveRover {
        /// Cell the rover should occupy after the move.
        to: Position,
    },
    /// Rotates the rover toward the provided turn direction.
    TurnRover {
        /// Relative rotation to apply.
        toward: TurnDirection,
    },
    /// Attempts to pick up the sample at the rover's current cell.
    CollectSample,
    /// Attempts to analyze the collected sample at the rover's current cell.
    AnalyzeSample,
    /// Restores the configured start pose and clears the objective flags.
    ResetMission,
}

/// Events broadcast by the engine after processing commands and steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the rover committed a single unit move.
    RoverMoved {
        /// Cell the rover occupied before the move.
        from: Position,
        /// Cell the rover occupies after the move.
        to: Position,
    },
    /// Confirms that the rover rotated to a new heading.
    RoverTurned {
        /// Heading before the rotation.
        from: Direction,
        /// Heading after the rotation.
        to: Direction,
    },
    /// Confirms that the sample was collected.
    SampleCollected {
        /// Cell where the collection happened.
        at: Position,
    },
    /// Confirms that the sample was analyzed.
    SampleAnalyzed {
        /// Cell where the analysis happened.
        at: Position,
    },
    /// Reports that a collect attempt away from the collect point was refused.
    CollectRejected {
        /// Cell the rover occupied during the attempt.
        at: Position,
    },
    /// Reports that an analyze attempt was refused.
    ///
    /// Covers both "wrong cell" and "sample not yet collected"; the two are
    /// deliberately not distinguished in the outcome.
    AnalyzeRejected {
        /// Cell the rover occupied during the attempt.
        at: Position,
    },
    /// Confirms that the mission state returned to the configured start.
    MissionReset,
    /// Announces that evaluation of a plan step began.
    StepStarted {
        /// Zero-based index of the step within the plan.
        index: usize,
    },
    /// Confirms that a plan step completed successfully.
    StepCompleted {
        /// Zero-based index of the step within the plan.
        index: usize,
    },
    /// Reports that a plan step failed and the attempt aborted.
    StepFailed {
        /// Zero-based index of the step within the plan.
        index: usize,
        /// Specific reason the step failed.
        reason: StepFailure,
    },
    /// Announces the outcome of a fully executed plan.
    MissionCompleted {
        /// Whether both objectives were met.
        outcome: MissionOutcome,
        /// Mission clock reading at completion.
        elapsed: Duration,
    },
}

/// Pre-execution failures detected while compiling a plan.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The plan holds zero instructions.
    #[error("the plan contains no instructions")]
    EmptyPlan,
    /// A parameterized instruction has no recorded value.
    #[error("instruction {index} requires a parameter but none was recorded")]
    MissingParameter {
        /// Zero-based index of the offending instruction.
        index: usize,
    },
    /// A recorded parameter value does not satisfy its schema.
    #[error("instruction {index} has invalid parameter '{value}'")]
    InvalidParameter {
        /// Zero-based index of the offending instruction.
        index: usize,
        /// Raw value that failed validation.
        value: String,
    },
}

/// Reasons a plan step may fail during execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum StepFailure {
    /// A unit move targeted a cell outside the grid.
    #[error("the rover would leave the grid")]
    OutOfBounds,
    /// A unit move targeted an obstacle cell.
    #[error("the rover ran into an obstacle")]
    Obstacle,
    /// A collect attempt happened away from the collect point.
    #[error("the rover is not at the collect point")]
    NotAtCollectPoint,
    /// An analyze attempt happened away from the analysis point or before a
    /// successful collect.
    #[error("the rover is not ready to analyze the sample")]
    NotReadyToAnalyze,
}

/// Outcome of a plan whose every step executed without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MissionOutcome {
    /// Both objectives were met; the mission is over.
    Success,
    /// All steps ran but at least one objective flag remained unset.
    Incomplete,
}

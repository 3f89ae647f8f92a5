#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Rover Mission.
//!
//! The world owns the validated [`WorldConfig`], the rover pose, and the
//! objective flags. Mutation happens exclusively through the [`apply`] entry
//! point, which broadcasts [`Event`] values describing what changed; systems
//! inspect state through the read-only [`query`] module.

use std::collections::BTreeSet;

use rover_mission_core::{Command, Direction, Event, Position, RoverPose, StepFailure};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_GRID_SIZE: i32 = 10;
const DEFAULT_ROVER_START: RoverPose = RoverPose::new(Position::new(0, 0), Direction::Right);
const DEFAULT_COLLECT_POINT: Position = Position::new(4, 3);
const DEFAULT_ANALYSIS_POINT: Position = Position::new(7, 8);
const DEFAULT_OBSTACLES: [Position; 6] = [
    Position::new(2, 1),
    Position::new(3, 2),
    Position::new(5, 4),
    Position::new(1, 5),
    Position::new(6, 6),
    Position::new(8, 3),
];

/// Immutable mission configuration loaded once at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Side length of the square grid measured in cells.
    pub grid_size: i32,
    /// Pose the rover occupies at mission start and after every reset.
    pub rover_start: RoverPose,
    /// Cell holding the sample to collect.
    pub collect_point: Position,
    /// Cell where the collected sample must be analyzed.
    pub analysis_point: Position,
    /// Impassable cells; duplicates collapse in the set.
    pub obstacles: BTreeSet<Position>,
}

impl WorldConfig {
    /// Checks the configuration invariants, failing fast before play starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 1 {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
            });
        }

        for (label, point) in [
            ("rover start", self.rover_start.position),
            ("collect point", self.collect_point),
            ("analysis point", self.analysis_point),
        ] {
            if !self.contains(point) {
                return Err(ConfigError::PointOutOfBounds { label, at: point });
            }
            if self.obstacles.contains(&point) {
                return Err(ConfigError::PointOnObstacle { label, at: point });
            }
        }

        if self.collect_point == self.analysis_point {
            return Err(ConfigError::CoincidentPoints {
                at: self.collect_point,
            });
        }

        Ok(())
    }

    /// Reports whether `position` lies inside the grid bounds.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.x() >= 0
            && position.y() >= 0
            && position.x() < self.grid_size
            && position.y() < self.grid_size
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            rover_start: DEFAULT_ROVER_START,
            collect_point: DEFAULT_COLLECT_POINT,
            analysis_point: DEFAULT_ANALYSIS_POINT,
            obstacles: DEFAULT_OBSTACLES.into_iter().collect(),
        }
    }
}

/// Configuration invariant violations detected at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid must contain at least one cell.
    #[error("grid size must be at least 1, got {size}")]
    GridTooSmall {
        /// Rejected grid side length.
        size: i32,
    },
    /// A named point lies outside the grid bounds.
    #[error("{label} at {at:?} lies outside the grid")]
    PointOutOfBounds {
        /// Which configured point violated the invariant.
        label: &'static str,
        /// Offending position.
        at: Position,
    },
    /// A named point collides with an obstacle.
    #[error("{label} at {at:?} collides with an obstacle")]
    PointOnObstacle {
        /// Which configured point violated the invariant.
        label: &'static str,
        /// Offending position.
        at: Position,
    },
    /// The collect and analysis points occupy the same cell.
    #[error("collect and analysis points coincide at {at:?}")]
    CoincidentPoints {
        /// Shared position of both points.
        at: Position,
    },
}

/// Reason a candidate cell cannot be entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Obstruction {
    /// The cell lies outside the grid bounds.
    OutOfBounds,
    /// The cell holds an obstacle.
    Obstacle,
}

impl From<Obstruction> for StepFailure {
    fn from(obstruction: Obstruction) -> Self {
        match obstruction {
            Obstruction::OutOfBounds => Self::OutOfBounds,
            Obstruction::Obstacle => Self::Obstacle,
        }
    }
}

/// Represents the authoritative Rover Mission world state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    rover: RoverPose,
    sample_collected: bool,
    sample_analyzed: bool,
}

impl World {
    /// Creates a new world after validating the provided configuration.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rover = config.rover_start;
        Ok(Self {
            config,
            rover,
            sample_collected: false,
            sample_analyzed: false,
        })
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default()).expect("default configuration is valid")
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MoveRover { to } => {
            let from = world.rover.position;
            world.rover.position = to;
            out_events.push(Event::RoverMoved { from, to });
        }
        Command::TurnRover { toward } => {
            let from = world.rover.direction;
            let to = from.turned(toward);
            world.rover.direction = to;
            out_events.push(Event::RoverTurned { from, to });
        }
        Command::CollectSample => {
            let at = world.rover.position;
            if at == world.config.collect_point {
                world.sample_collected = true;
                out_events.push(Event::SampleCollected { at });
            } else {
                out_events.push(Event::CollectRejected { at });
            }
        }
        Command::AnalyzeSample => {
            let at = world.rover.position;
            if at == world.config.analysis_point && world.sample_collected {
                world.sample_analyzed = true;
                out_events.push(Event::SampleAnalyzed { at });
            } else {
                out_events.push(Event::AnalyzeRejected { at });
            }
        }
        Command::ResetMission => {
            world.rover = world.config.rover_start;
            world.sample_collected = false;
            world.sample_analyzed = false;
            out_events.push(Event::MissionReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Obstruction, World, WorldConfig};
    use rover_mission_core::{Position, RoverPose};

    /// Current pose of the rover.
    #[must_use]
    pub fn rover(world: &World) -> RoverPose {
        world.rover
    }

    /// Provides read-only access to the mission configuration.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Classifies why `position` cannot be entered, if it cannot.
    #[must_use]
    pub fn obstruction(world: &World, position: Position) -> Option<Obstruction> {
        if !world.config.contains(position) {
            Some(Obstruction::OutOfBounds)
        } else if world.config.obstacles.contains(&position) {
            Some(Obstruction::Obstacle)
        } else {
            None
        }
    }

    /// Reports whether `position` is outside the grid or holds an obstacle.
    #[must_use]
    pub fn is_blocked(world: &World, position: Position) -> bool {
        obstruction(world, position).is_some()
    }

    /// Reports whether `position` equals the configured collect point.
    #[must_use]
    pub fn is_at_collect_point(world: &World, position: Position) -> bool {
        position == world.config.collect_point
    }

    /// Reports whether `position` equals the configured analysis point.
    #[must_use]
    pub fn is_at_analysis_point(world: &World, position: Position) -> bool {
        position == world.config.analysis_point
    }

    /// Reports whether the sample was collected during this attempt.
    #[must_use]
    pub fn sample_collected(world: &World) -> bool {
        world.sample_collected
    }

    /// Reports whether the sample was analyzed during this attempt.
    #[must_use]
    pub fn sample_analyzed(world: &World) -> bool {
        world.sample_analyzed
    }

    /// Captures a read-only snapshot of the mission-relevant state.
    #[must_use]
    pub fn mission_snapshot(world: &World) -> MissionSnapshot {
        MissionSnapshot {
            rover: world.rover,
            sample_collected: world.sample_collected,
            sample_analyzed: world.sample_analyzed,
        }
    }

    /// Immutable representation of the mission state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MissionSnapshot {
        /// Pose the rover currently occupies.
        pub rover: RoverPose,
        /// Whether the sample was collected during this attempt.
        pub sample_collected: bool,
        /// Whether the sample was analyzed during this attempt.
        pub sample_analyzed: bool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_mission_core::TurnDirection;

    fn default_world() -> World {
        World::default()
    }

    #[test]
    fn default_config_matches_original_layout() {
        let config = WorldConfig::default();
        assert_eq!(config.grid_size, 10);
        assert_eq!(
            config.rover_start,
            RoverPose::new(Position::new(0, 0), Direction::Right)
        );
        assert_eq!(config.collect_point, Position::new(4, 3));
        assert_eq!(config.analysis_point, Position::new(7, 8));
        assert_eq!(config.obstacles.len(), 6);
        assert!(config.obstacles.contains(&Position::new(5, 4)));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_degenerate_grid() {
        let config = WorldConfig {
            grid_size: 0,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::GridTooSmall { size: 0 }));
    }

    #[test]
    fn validation_rejects_points_outside_grid() {
        let config = WorldConfig {
            analysis_point: Position::new(10, 8),
            ..WorldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PointOutOfBounds {
                label: "analysis point",
                at: Position::new(10, 8),
            })
        );
    }

    #[test]
    fn validation_rejects_points_on_obstacles() {
        let config = WorldConfig {
            collect_point: Position::new(5, 4),
            ..WorldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PointOnObstacle {
                label: "collect point",
                at: Position::new(5, 4),
            })
        );
    }

    #[test]
    fn validation_rejects_coincident_goal_points() {
        let config = WorldConfig {
            analysis_point: Position::new(4, 3),
            ..WorldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::CoincidentPoints {
                at: Position::new(4, 3),
            })
        );
    }

    #[test]
    fn move_rover_commits_without_validation() {
        let mut world = default_world();
        let mut events = Vec::new();

        // The commit half trusts its caller; even an obstacle cell is accepted.
        apply(
            &mut world,
            Command::MoveRover {
                to: Position::new(5, 4),
            },
            &mut events,
        );

        assert_eq!(query::rover(&world).position, Position::new(5, 4));
        assert_eq!(
            events,
            vec![Event::RoverMoved {
                from: Position::new(0, 0),
                to: Position::new(5, 4),
            }]
        );
    }

    #[test]
    fn turn_rover_follows_fixed_cycle() {
        let mut world = default_world();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::TurnRover {
                toward: TurnDirection::Right,
            },
            &mut events,
        );

        assert_eq!(query::rover(&world).direction, Direction::Down);
        assert_eq!(
            events,
            vec![Event::RoverTurned {
                from: Direction::Right,
                to: Direction::Down,
            }]
        );
    }

    #[test]
    fn collect_requires_the_collect_point() {
        let mut world = default_world();
        let mut events = Vec::new();

        apply(&mut world, Command::CollectSample, &mut events);
        assert!(!query::sample_collected(&world));
        assert_eq!(
            events,
            vec![Event::CollectRejected {
                at: Position::new(0, 0),
            }]
        );

        events.clear();
        apply(
            &mut world,
            Command::MoveRover {
                to: Position::new(4, 3),
            },
            &mut events,
        );
        apply(&mut world, Command::CollectSample, &mut events);
        assert!(query::sample_collected(&world));
        assert_eq!(
            events.last(),
            Some(&Event::SampleCollected {
                at: Position::new(4, 3),
            })
        );
    }

    #[test]
    fn analyze_requires_point_and_prior_collect() {
        let mut world = default_world();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MoveRover {
                to: Position::new(7, 8),
            },
            &mut events,
        );
        apply(&mut world, Command::AnalyzeSample, &mut events);
        assert!(!query::sample_analyzed(&world));
        assert_eq!(
            events.last(),
            Some(&Event::AnalyzeRejected {
                at: Position::new(7, 8),
            })
        );

        apply(
            &mut world,
            Command::MoveRover {
                to: Position::new(4, 3),
            },
            &mut events,
        );
        apply(&mut world, Command::CollectSample, &mut events);
        apply(
            &mut world,
            Command::MoveRover {
                to: Position::new(7, 8),
            },
            &mut events,
        );
        apply(&mut world, Command::AnalyzeSample, &mut events);
        assert!(query::sample_analyzed(&world));
        assert_eq!(
            events.last(),
            Some(&Event::SampleAnalyzed {
                at: Position::new(7, 8),
            })
        );
    }

    #[test]
    fn reset_restores_start_pose_and_clears_flags() {
        let mut world = default_world();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MoveRover {
                to: Position::new(4, 3),
            },
            &mut events,
        );
        apply(&mut world, Command::CollectSample, &mut events);
        apply(&mut world, Command::ResetMission, &mut events);

        let snapshot = query::mission_snapshot(&world);
        assert_eq!(
            snapshot.rover,
            RoverPose::new(Position::new(0, 0), Direction::Right)
        );
        assert!(!snapshot.sample_collected);
        assert!(!snapshot.sample_analyzed);
        assert_eq!(events.last(), Some(&Event::MissionReset));
    }

    #[test]
    fn obstruction_classifies_bounds_and_obstacles() {
        let world = default_world();

        assert_eq!(
            query::obstruction(&world, Position::new(-1, 0)),
            Some(Obstruction::OutOfBounds)
        );
        assert_eq!(
            query::obstruction(&world, Position::new(0, 10)),
            Some(Obstruction::OutOfBounds)
        );
        assert_eq!(
            query::obstruction(&world, Position::new(5, 4)),
            Some(Obstruction::Obstacle)
        );
        assert_eq!(query::obstruction(&world, Position::new(5, 5)), None);
        assert!(query::is_blocked(&world, Position::new(2, 1)));
        assert!(!query::is_blocked(&world, Position::new(9, 9)));
    }
}

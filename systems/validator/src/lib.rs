#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure validation system that compiles raw command sequences into plans.

use rover_mission_core::{
    catalog::{self, ParameterFault},
    Plan, RawInstruction, ValidationError,
};

/// Compiles builder-assembled sequences into executable plans.
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    /// Validates the whole sequence before any step runs.
    ///
    /// Fails with [`ValidationError::EmptyPlan`] for a zero-length sequence
    /// and with a per-instruction error for the first missing or invalid
    /// parameter. Never touches world or mission state.
    pub fn validate(&self, sequence: &[RawInstruction]) -> Result<Plan, ValidationError> {
        if sequence.is_empty() {
            return Err(ValidationError::EmptyPlan);
        }

        let mut instructions = Vec::with_capacity(sequence.len());
        for (index, raw) in sequence.iter().enumerate() {
            let compiled = catalog::validate_parameter(raw.kind, raw.raw_parameter.as_deref());
            let instruction = compiled.map_err(|fault| match fault {
                ParameterFault::Missing => ValidationError::MissingParameter { index },
                ParameterFault::Invalid => ValidationError::InvalidParameter {
                    index,
                    value: raw.raw_parameter.clone().unwrap_or_default(),
                },
            })?;
            instructions.push(instruction);
        }

        Ok(Plan::from_instructions(instructions))
    }
}

use std::{error::Error, fmt};

use rover_mission_core::{CommandKind, RawInstruction};

/// Delimiter separating a command name from its recorded parameter.
const PARAMETER_DELIMITER: char = ':';

/// Parses builder-style plan tokens (`advance:4`, `turn:left`, `collect`,
/// `analyze`) into the raw sequence consumed by the engine.
///
/// Parameter *values* are deliberately not checked here; the validator owns
/// that so the CLI reports the same errors a graphical builder would.
pub(crate) fn parse_sequence(tokens: &[String]) -> Result<Vec<RawInstruction>, PlanArgError> {
    let mut sequence = Vec::with_capacity(tokens.len());
    for token in tokens {
        sequence.push(parse_token(token)?);
    }
    Ok(sequence)
}

fn parse_token(token: &str) -> Result<RawInstruction, PlanArgError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(PlanArgError::EmptyToken);
    }

    let (name, parameter) = match trimmed.split_once(PARAMETER_DELIMITER) {
        Some((name, parameter)) => (name, Some(parameter)),
        None => (trimmed, None),
    };

    let kind = match name {
        "advance" => CommandKind::Advance,
        "turn" => CommandKind::Turn,
        "collect" => CommandKind::Collect,
        "analyze" => CommandKind::Analyze,
        _ => return Err(PlanArgError::UnknownCommand(name.to_owned())),
    };

    Ok(RawInstruction {
        kind,
        raw_parameter: parameter.map(str::to_owned),
    })
}

/// Errors that can occur while parsing plan tokens from the command line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PlanArgError {
    /// A plan token was empty or contained only whitespace.
    EmptyToken,
    /// A plan token named a command the catalog does not know.
    UnknownCommand(String),
}

impl fmt::Display for PlanArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "plan token was empty"),
            Self::UnknownCommand(name) => {
                write!(
                    f,
                    "unknown command '{name}' (expected advance, turn, collect or analyze)"
                )
            }
        }
    }
}

impl Error for PlanArgError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parameterized_and_bare_tokens() {
        let tokens = vec![
            "advance:4".to_owned(),
            "turn:right".to_owned(),
            "collect".to_owned(),
            "analyze".to_owned(),
        ];

        let sequence = parse_sequence(&tokens).expect("tokens parse");

        assert_eq!(
            sequence,
            vec![
                RawInstruction::with_parameter(CommandKind::Advance, "4"),
                RawInstruction::with_parameter(CommandKind::Turn, "right"),
                RawInstruction::bare(CommandKind::Collect),
                RawInstruction::bare(CommandKind::Analyze),
            ]
        );
    }

    #[test]
    fn parameter_values_pass_through_unchecked() {
        let sequence =
            parse_sequence(&["advance:many".to_owned()]).expect("value validation happens later");
        assert_eq!(
            sequence,
            vec![RawInstruction::with_parameter(CommandKind::Advance, "many")]
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert_eq!(
            parse_sequence(&["fly:2".to_owned()]),
            Err(PlanArgError::UnknownCommand("fly".to_owned()))
        );
    }

    #[test]
    fn empty_token_is_rejected() {
        assert_eq!(
            parse_sequence(&["  ".to_owned()]),
            Err(PlanArgError::EmptyToken)
        );
    }
}

use rover_mission_core::{
    CommandKind, Instruction, RawInstruction, StepCount, TurnDirection, ValidationError,
};
use rover_mission_system_validator::Validator;

fn full_sequence() -> Vec<RawInstruction> {
    vec![
        RawInstruction::with_parameter(CommandKind::Advance, "4"),
        RawInstruction::with_parameter(CommandKind::Turn, "right"),
        RawInstruction::bare(CommandKind::Collect),
        RawInstruction::bare(CommandKind::Analyze),
    ]
}

#[test]
fn valid_sequence_compiles_in_order() {
    let validator = Validator::default();

    let plan = validator
        .validate(&full_sequence())
        .expect("sequence validates");

    let instructions: Vec<_> = plan.iter().copied().collect();
    assert_eq!(
        instructions,
        vec![
            Instruction::Advance(StepCount::new(4).expect("non-zero")),
            Instruction::Turn(TurnDirection::Right),
            Instruction::Collect,
            Instruction::Analyze,
        ]
    );
}

#[test]
fn empty_sequence_is_rejected() {
    let validator = Validator::default();

    assert_eq!(validator.validate(&[]), Err(ValidationError::EmptyPlan));
}

#[test]
fn unrecorded_parameter_is_reported_with_its_index() {
    let validator = Validator::default();
    let sequence = vec![
        RawInstruction::bare(CommandKind::Collect),
        RawInstruction::bare(CommandKind::Advance),
    ];

    assert_eq!(
        validator.validate(&sequence),
        Err(ValidationError::MissingParameter { index: 1 }),
    );
}

#[test]
fn malformed_parameter_is_reported_with_its_value() {
    let validator = Validator::default();
    let sequence = vec![
        RawInstruction::with_parameter(CommandKind::Advance, "0"),
        RawInstruction::bare(CommandKind::Collect),
    ];

    assert_eq!(
        validator.validate(&sequence),
        Err(ValidationError::InvalidParameter {
            index: 0,
            value: "0".to_owned(),
        }),
    );
}

#[test]
fn unknown_turn_value_is_rejected() {
    let validator = Validator::default();
    let sequence = vec![RawInstruction::with_parameter(CommandKind::Turn, "north")];

    assert_eq!(
        validator.validate(&sequence),
        Err(ValidationError::InvalidParameter {
            index: 0,
            value: "north".to_owned(),
        }),
    );
}

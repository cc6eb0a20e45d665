//! Exercise Module - data-driven exercise definitions

pub mod types;
pub mod catalog;

pub use types::{
    AngleRange, CountedTransition, ExerciseDefinition, ExerciseKind, JointRule, JointSpec,
    JointTriple, StateFamily, UnknownExercise, Zone,
};
pub use catalog::{all, definition};

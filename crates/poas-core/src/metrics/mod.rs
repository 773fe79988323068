pub mod calculator;
pub mod defaults;
pub mod interpretation;
pub mod targets;

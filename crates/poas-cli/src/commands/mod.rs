pub mod analysis;
pub mod interpret;
pub mod metrics;
pub mod sensitivity;
pub mod suggest;
pub mod targets;

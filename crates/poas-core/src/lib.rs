pub mod config;
pub mod error;
pub mod metrics;
pub mod types;
pub mod validation;

#[cfg(feature = "analysis")]
pub mod analysis;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

pub use config::EngineConfig;
pub use error::PoasError;
pub use metrics::calculator::{calculate_all, calculate_poas, calculate_roas};
pub use metrics::defaults::{suggest_defaults, suggest_defaults_for_revenue, SuggestionPolicy};
pub use metrics::interpretation::{interpret_poas, PoasStatus};
pub use metrics::targets::{calculate_roas_targets, calculate_target_poas};
pub use types::*;

/// Standard result type for fallible POAS operations
pub type PoasResult<T> = Result<T, PoasError>;

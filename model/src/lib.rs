pub mod analytics;
pub mod model;
pub mod position_metrics;

pub use analytics::*;
pub use model::*;
pub use position_metrics::*;

// One-page layout core.
// Implements: per-section height estimation, spacing/distribution planning.
// Pure and stateless — concurrent plans for different documents share nothing.

pub mod estimator;
pub mod handlers;
pub mod page;
pub mod planner;

// Re-export the public API consumed by other modules (config, state).
pub use page::{default_page_budget, PageBudget};

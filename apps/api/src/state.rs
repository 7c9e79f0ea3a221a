use crate::layout::PageBudget;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Default page budget for requests that don't carry their own.
    /// A4 with an 80mm header allowance unless overridden by env.
    pub page_budget: PageBudget,
}

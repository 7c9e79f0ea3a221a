//! Page geometry for the layout planner.
//!
//! All dimensions are millimeters. The budget is a parameter of every compute
//! call — a constant per template family, not a hardcoded literal — so
//! alternate page sizes or header heights remain supportable.

use serde::{Deserialize, Serialize};

/// Vertical space available to body content on a single page.
///
/// `available_body_height_mm` = page height minus the header allowance minus
/// the bottom margin. A degenerate budget (non-positive body height) is not
/// guarded: it produces a negative extra-space figure inside the planner and
/// lands in the tightest-spacing branch, same as any other overflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBudget {
    pub page_height_mm: f32,
    pub header_height_mm: f32,
    pub bottom_margin_mm: f32,
}

impl PageBudget {
    pub fn available_body_height_mm(&self) -> f32 {
        self.page_height_mm - self.header_height_mm - self.bottom_margin_mm
    }

    /// True when every dimension is a finite number. Used only at the HTTP
    /// edge — the planner itself accepts anything.
    pub fn is_finite(&self) -> bool {
        self.page_height_mm.is_finite()
            && self.header_height_mm.is_finite()
            && self.bottom_margin_mm.is_finite()
    }
}

/// Returns the default page budget: A4 (297mm), ~80mm header allowance,
/// 10mm bottom margin → 207mm of body height.
pub fn default_page_budget() -> PageBudget {
    PageBudget {
        page_height_mm: 297.0,
        header_height_mm: 80.0,
        bottom_margin_mm: 10.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget_is_a4_with_207mm_body() {
        let budget = default_page_budget();
        assert!((budget.page_height_mm - 297.0).abs() < 1e-6);
        assert!((budget.available_body_height_mm() - 207.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_budget_goes_negative_not_panic() {
        let budget = PageBudget {
            page_height_mm: 50.0,
            header_height_mm: 80.0,
            bottom_margin_mm: 10.0,
        };
        assert!(budget.available_body_height_mm() < 0.0);
    }

    #[test]
    fn test_is_finite_rejects_nan() {
        let mut budget = default_page_budget();
        assert!(budget.is_finite());
        budget.header_height_mm = f32::NAN;
        assert!(!budget.is_finite());
    }
}

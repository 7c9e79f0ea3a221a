//! Spacing planner — decides how to spend the leftover vertical space.
#![allow(dead_code)]
//!
//! Walks the populated sections in canonical order, sums their estimated
//! heights, compares the total against the page budget, and picks a single
//! uniform inter-section spacing plus a distribution mode. The markup layer
//! applies the spacing as the gap between section blocks and the mode as its
//! container alignment (stack-from-top vs. spread-evenly).
//!
//! Total function: every input, including a document too long for the page,
//! yields a usable plan. Overflow is signaled only by falling back to the
//! tightest spacing — never by an error and never by truncation.

use serde::Serialize;
use tracing::{debug, warn};

use crate::layout::estimator::{estimate_section_height, SectionKind, FIXED_SECTION_ORDER};
use crate::layout::page::PageBudget;
use crate::models::document::StructuredDocument;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One populated section with its estimated height. Derived fresh on every
/// compute call; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SectionEntry {
    pub kind: SectionKind,
    /// Markup-layer identifier: the slug for fixed sections, the data-defined
    /// name for additional sections.
    pub label: String,
    #[serde(rename = "heightMillimeters")]
    pub height_mm: f32,
}

/// The spacing decision. Single-use: a changed document invalidates any
/// previously computed plan, so callers recompute per render rather than
/// caching across edits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPlan {
    /// Uniform gap between section blocks, rounded to whole millimeters.
    #[serde(rename = "spacingMillimeters")]
    pub spacing_mm: f32,
    /// True: spread leftover space evenly between sections.
    /// False: stack from the top with fixed gaps.
    #[serde(rename = "distributeEvenly")]
    pub distribute_evenly: bool,
}

/// Plan plus the figures it was derived from, for the markup layer (which
/// needs the section-presence list) and for observability.
#[derive(Debug, Clone, Serialize)]
pub struct PlanBreakdown {
    pub entries: Vec<SectionEntry>,
    #[serde(rename = "totalContentHeightMillimeters")]
    pub total_content_height_mm: f32,
    #[serde(rename = "availableBodyHeightMillimeters")]
    pub available_body_height_mm: f32,
    #[serde(rename = "extraSpaceMillimeters")]
    pub extra_space_mm: f32,
    pub plan: LayoutPlan,
}

// ────────────────────────────────────────────────────────────────────────────
// Spacing thresholds (first match wins, strictly greater-than)
// ────────────────────────────────────────────────────────────────────────────

/// Overflow fallback: accept visual crowding over truncation.
const TIGHT_SPACING_MM: f32 = 10.0;
/// Baseline spacing when the page is close to full.
const DEFAULT_SPACING_MM: f32 = 12.0;
/// Above this much leftover space, few sections get spread over the page.
const DISTRIBUTE_EXTRA_MM: f32 = 100.0;
/// Distribution only kicks in below this section count; a dense document
/// reads better stacked even with room to spare.
const DISTRIBUTE_MAX_SECTIONS: usize = 6;
const ROOMY_EXTRA_MM: f32 = 50.0;
const LOOSE_EXTRA_MM: f32 = 20.0;

// ────────────────────────────────────────────────────────────────────────────
// Planning
// ────────────────────────────────────────────────────────────────────────────

/// Collects the populated sections in canonical order: the fixed schema
/// sections first, then each additional section in document order. Skipped
/// sections contribute nothing — no empty headers, no base overhead.
pub fn active_sections(document: &StructuredDocument) -> Vec<SectionEntry> {
    let fixed = FIXED_SECTION_ORDER.iter().copied();
    let additional = (0..document.additional_sections.len()).map(SectionKind::Additional);

    fixed
        .chain(additional)
        .filter(|kind| kind.is_populated(document))
        .map(|kind| SectionEntry {
            kind,
            label: kind.label(document),
            height_mm: estimate_section_height(kind, document),
        })
        .collect()
}

/// Computes the spacing decision plus its derivation figures.
pub fn plan_breakdown(document: &StructuredDocument, budget: &PageBudget) -> PlanBreakdown {
    let entries = active_sections(document);
    let total_content_height_mm: f32 = entries.iter().map(|e| e.height_mm).sum();
    let available_body_height_mm = budget.available_body_height_mm();
    let extra_space_mm = available_body_height_mm - total_content_height_mm;

    // At least one conceptual gap, so 0- and 1-section documents divide safely.
    let gap_count = entries.len().saturating_sub(1).max(1) as f32;
    let plan = decide_spacing(extra_space_mm, entries.len(), gap_count);

    if extra_space_mm < 0.0 {
        warn!(
            total_content_height_mm,
            available_body_height_mm,
            "estimated content exceeds the page body; using tightest spacing"
        );
    }
    debug!(
        active_sections = entries.len(),
        total_content_height_mm,
        extra_space_mm,
        spacing_mm = plan.spacing_mm,
        distribute_evenly = plan.distribute_evenly,
        "layout plan computed"
    );

    PlanBreakdown {
        entries,
        total_content_height_mm,
        available_body_height_mm,
        extra_space_mm,
        plan,
    }
}

/// The one operation consumers call, once per render.
pub fn compute_layout_plan(document: &StructuredDocument, budget: &PageBudget) -> LayoutPlan {
    plan_breakdown(document, budget).plan
}

/// Ordered threshold tree. Evaluated top to bottom, first match wins; the
/// comparisons are strictly greater-than, so an extra space of exactly 100,
/// 50, or 20 falls through to the next branch.
fn decide_spacing(extra_space_mm: f32, active_count: usize, gap_count: f32) -> LayoutPlan {
    let per_gap = extra_space_mm / gap_count;

    let (spacing_mm, distribute_evenly) = if extra_space_mm < 0.0 {
        (TIGHT_SPACING_MM, false)
    } else if extra_space_mm > DISTRIBUTE_EXTRA_MM && active_count < DISTRIBUTE_MAX_SECTIONS {
        (per_gap.clamp(15.0, 40.0), true)
    } else if extra_space_mm > ROOMY_EXTRA_MM {
        (per_gap.clamp(15.0, 25.0), false)
    } else if extra_space_mm > LOOSE_EXTRA_MM {
        (per_gap.max(DEFAULT_SPACING_MM), false)
    } else {
        (DEFAULT_SPACING_MM, false)
    };

    LayoutPlan {
        spacing_mm: spacing_mm.round(),
        distribute_evenly,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

//! Axum route handlers for the Layout API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::layout::page::PageBudget;
use crate::layout::planner::{plan_breakdown, LayoutPlan};
use crate::models::document::StructuredDocument;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub document: StructuredDocument,
    /// Optional override; the server default (A4) applies when omitted.
    #[serde(default)]
    pub page_budget: Option<PageBudget>,
}

/// One populated section, in canonical order — the presence list the markup
/// layer must mirror exactly when emitting section blocks.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub id: String,
    pub height_millimeters: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub plan: LayoutPlan,
    pub sections: Vec<SectionSummary>,
    pub total_content_height_millimeters: f32,
    pub available_body_height_millimeters: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/layout/plan
///
/// Computes the spacing plan for one document against a page budget. Always
/// succeeds for a well-formed request — an overflowing document gets the
/// tightest spacing, not an error.
pub async fn handle_compute_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let budget = request.page_budget.unwrap_or_else(|| state.page_budget.clone());
    if !budget.is_finite() {
        return Err(AppError::Validation(
            "pageBudget dimensions must be finite numbers".to_string(),
        ));
    }

    let breakdown = plan_breakdown(&request.document, &budget);

    info!(
        active_sections = breakdown.entries.len(),
        total_content_height_mm = breakdown.total_content_height_mm,
        spacing_mm = breakdown.plan.spacing_mm,
        distribute_evenly = breakdown.plan.distribute_evenly,
        "layout plan served"
    );

    let sections = breakdown
        .entries
        .iter()
        .map(|entry| SectionSummary {
            id: entry.label.clone(),
            height_millimeters: entry.height_mm,
        })
        .collect();

    Ok(Json(PlanResponse {
        plan: breakdown.plan,
        sections,
        total_content_height_millimeters: breakdown.total_content_height_mm,
        available_body_height_millimeters: breakdown.available_body_height_mm,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page::default_page_budget;

    fn make_state() -> AppState {
        AppState { page_budget: default_page_budget() }
    }

    fn parse_document(json: &str) -> StructuredDocument {
        serde_json::from_str(json).expect("valid document json")
    }

    #[tokio::test]
    async fn test_plan_falls_back_to_server_default_budget() {
        let request = PlanRequest {
            document: parse_document(r#"{ "summary": "Engineer with a decade of systems work." }"#),
            page_budget: None,
        };
        let Json(response) = handle_compute_plan(State(make_state()), Json(request))
            .await
            .expect("plan always computes");
        assert_eq!(response.available_body_height_millimeters, 207.0);
        assert_eq!(response.sections.len(), 1);
        assert_eq!(response.sections[0].id, "summary");
        assert!(response.plan.distribute_evenly, "one short section on an A4 page spreads");
    }

    #[tokio::test]
    async fn test_plan_uses_request_budget_when_given() {
        let request = PlanRequest {
            document: parse_document(r#"{ "skills": ["Rust", "Tokio"] }"#),
            page_budget: Some(PageBudget {
                page_height_mm: 150.0,
                header_height_mm: 80.0,
                bottom_margin_mm: 10.0,
            }),
        };
        let Json(response) = handle_compute_plan(State(make_state()), Json(request))
            .await
            .expect("plan always computes");
        assert_eq!(response.available_body_height_millimeters, 60.0);
        // skills = 12mm, extra = 48 > 20 → max(12, 48/1) = 48
        assert_eq!(response.plan.spacing_mm, 48.0);
        assert!(!response.plan.distribute_evenly);
    }

    #[tokio::test]
    async fn test_plan_rejects_non_finite_budget() {
        let request = PlanRequest {
            document: parse_document("{}"),
            page_budget: Some(PageBudget {
                page_height_mm: f32::INFINITY,
                header_height_mm: 80.0,
                bottom_margin_mm: 10.0,
            }),
        };
        let result = handle_compute_plan(State(make_state()), Json(request)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_overflowing_document_still_succeeds() {
        let bullets: Vec<String> = (0..8).map(|i| format!("\"bullet {i}\"")).collect();
        let entries: Vec<String> = (0..8)
            .map(|i| {
                format!(
                    r#"{{ "role": "Role {i}", "company": "Acme", "bullets": [{}] }}"#,
                    bullets.join(",")
                )
            })
            .collect();
        let json = format!(r#"{{ "experience": [{}] }}"#, entries.join(","));
        let request = PlanRequest { document: parse_document(&json), page_budget: None };
        let Json(response) = handle_compute_plan(State(make_state()), Json(request))
            .await
            .expect("overflow is not an error");
        assert!(response.total_content_height_millimeters > 207.0);
        assert_eq!(response.plan.spacing_mm, 10.0);
        assert!(!response.plan.distribute_evenly);
    }
}

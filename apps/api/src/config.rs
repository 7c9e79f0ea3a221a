use anyhow::{Context, Result};

use crate::layout::{default_page_budget, PageBudget};

/// Application configuration loaded from environment variables.
/// Everything has a default — the service starts with no environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Page geometry served as the default budget when a request omits one.
    /// Overridable per template family via PAGE_HEIGHT_MM / HEADER_HEIGHT_MM /
    /// BOTTOM_MARGIN_MM.
    pub page_budget: PageBudget,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = default_page_budget();
        let page_budget = PageBudget {
            page_height_mm: env_mm("PAGE_HEIGHT_MM", defaults.page_height_mm)?,
            header_height_mm: env_mm("HEADER_HEIGHT_MM", defaults.header_height_mm)?,
            bottom_margin_mm: env_mm("BOTTOM_MARGIN_MM", defaults.bottom_margin_mm)?,
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            page_budget,
        })
    }
}

fn env_mm(key: &str, default: f32) -> Result<f32> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<f32>()
            .with_context(|| format!("{key} must be a number of millimeters")),
        Err(_) => Ok(default),
    }
}

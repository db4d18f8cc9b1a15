use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::gateway::Product;

// ============================================================================
// Kitchen Planning Rules
// ============================================================================

const BASE_MINUTES: u32 = 10;
const MINUTES_PER_PRODUCT: u32 = 5;

/// How urgently the kitchen should pick an order up, by waiting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Média")]
    Medium,
    #[serde(rename = "Baixa")]
    Low,
}

/// Minutes to prepare an order with `line_count` products.
pub fn estimated_time(line_count: usize) -> u32 {
    BASE_MINUTES + MINUTES_PER_PRODUCT * line_count as u32
}

/// More than 30 minutes waiting is high, more than 15 is medium.
pub fn priority(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Priority {
    let minutes_waiting = (now - created_at).num_milliseconds() as f64 / 60_000.0;

    if minutes_waiting > 30.0 {
        Priority::High
    } else if minutes_waiting > 15.0 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// One preparation note per product, worded by category.
pub fn production_notes(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|product| match product.category.as_str() {
            "Bebidas" => format!("Preparar {} gelado", product.name),
            "Sobremesas" => format!("Manter {} refrigerado", product.name),
            _ => format!("Preparar {} conforme padrão", product.name),
        })
        .collect()
}

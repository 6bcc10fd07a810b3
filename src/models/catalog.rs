//! Typed rows for the authenticated resource fetches.
//!
//! These are deliberately thin summaries. The web console owns the full CRUD
//! surface for products, orders, and vendors; the terminal client only needs
//! enough shape to render a screen after the guard lets it through.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Headline numbers for the dashboard screen.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub orders_today: i64,
    #[serde(default)]
    pub revenue_today: f64,
    #[serde(default)]
    pub pending_refunds: i64,
    #[serde(default)]
    pub open_tickets: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub vendor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i64,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub placed_at: Option<DateTime<Utc>>,
}

impl OrderSummary {
    pub fn status_display(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashboard_summary() {
        let json = r#"{"ordersToday": 42, "revenueToday": 1234.5, "pendingRefunds": 3, "openTickets": 7}"#;
        let summary: DashboardSummary = serde_json::from_str(json).expect("parse summary");
        assert_eq!(summary.orders_today, 42);
        assert_eq!(summary.pending_refunds, 3);
    }

    #[test]
    fn test_parse_order_with_missing_fields() {
        let json = r#"{"id": 9001, "total": 59.99}"#;
        let order: OrderSummary = serde_json::from_str(json).expect("parse order");
        assert_eq!(order.id, 9001);
        assert_eq!(order.status_display(), "unknown");
        assert!(order.placed_at.is_none());
    }

    #[test]
    fn test_parse_product_list() {
        let json = r#"[
            {"id": 1, "name": "Mug", "price": 12.0, "stock": 30, "vendor": "Acme"},
            {"id": 2, "name": "Poster", "price": 8.5}
        ]"#;
        let products: Vec<ProductSummary> = serde_json::from_str(json).expect("parse products");
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].stock, None);
    }
}

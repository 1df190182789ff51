//! # Request / Response DTOs
//!
//! Wire shapes for the service surface. All JSON is camelCase; money is
//! integer cents end to end. Totals are supplied by the client at order
//! time and stored as-is, matching the receipt the cashier saw.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use bakery_core::{Item, Order, OrderLine, OrderStatus};

// =============================================================================
// Orders
// =============================================================================

/// Request to place a new order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlaceOrderRequest {
    pub customer_name: String,
    pub cashier_name: String,
    /// Initial status; omitted means `pending`.
    #[serde(default)]
    pub status: OrderStatus,
    /// Order timestamp; omitted means "now" server-side.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub ordered_at: Option<DateTime<Utc>>,
    /// Total in cents as computed on the client's receipt.
    pub total_cents: i64,
    pub lines: Vec<OrderLineRequest>,
}

/// One line of a placement request.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLineRequest {
    pub item_id: i64,
    /// Item name to freeze onto the line.
    pub item_name: String,
    pub quantity: i64,
    /// Unit price in cents to freeze onto the line.
    pub unit_price_cents: i64,
}

/// Response to a successful placement.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlaceOrderResponse {
    pub order_id: i64,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub line_count: usize,
}

/// A full order with its lines, as the client sees it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderResponse {
    pub id: i64,
    pub status: OrderStatus,
    pub ordered_at: String,
    pub customer_name: String,
    pub cashier_name: String,
    pub total_cents: i64,
    pub inventory_applied: bool,
    pub lines: Vec<OrderLineResponse>,
}

/// One line of an order response.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLineResponse {
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl OrderResponse {
    pub(crate) fn from_parts(order: Order, lines: Vec<OrderLine>) -> Self {
        OrderResponse {
            id: order.id,
            status: order.status,
            ordered_at: order.ordered_at.to_rfc3339(),
            customer_name: order.customer_name,
            cashier_name: order.cashier_name,
            total_cents: order.total_cents,
            inventory_applied: order.inventory_applied,
            lines: lines
                .into_iter()
                .map(|l| OrderLineResponse {
                    item_id: l.item_id,
                    item_name: l.item_name.clone(),
                    quantity: l.quantity,
                    unit_price_cents: l.unit_price_cents,
                    line_total_cents: l.line_total().cents(),
                })
                .collect(),
        }
    }
}

/// Summary row for order listings (no lines attached).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub id: i64,
    pub status: OrderStatus,
    pub ordered_at: String,
    pub customer_name: String,
    pub cashier_name: String,
    pub total_cents: i64,
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        OrderSummary {
            id: order.id,
            status: order.status,
            ordered_at: order.ordered_at.to_rfc3339(),
            customer_name: order.customer_name,
            cashier_name: order.cashier_name,
            total_cents: order.total_cents,
        }
    }
}

/// Response to a status change.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChangeStatusResponse {
    pub order_id: i64,
    pub status: OrderStatus,
    /// Whether stock has been deducted for this order.
    pub inventory_applied: bool,
}

// =============================================================================
// Inventory
// =============================================================================

/// One entry of a stock deduction request.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeductionRequest {
    pub item_id: i64,
    pub quantity: i64,
}

// =============================================================================
// Catalog
// =============================================================================

/// Request to create a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub quantity: i64,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub unit_price_cents: i64,
}

fn default_unit() -> String {
    "pcs".to_string()
}

/// A catalog item as the client sees it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub quantity: i64,
    pub unit: String,
    pub unit_price_cents: i64,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        ItemResponse {
            id: item.id,
            name: item.name,
            description: item.description,
            category_id: item.category_id,
            quantity: item.quantity,
            unit: item.unit,
            unit_price_cents: item.unit_price_cents,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_order_request_defaults() {
        let json = r#"{
            "customerName": "Alice",
            "cashierName": "Maya",
            "totalCents": 600,
            "lines": [
                { "itemId": 7, "itemName": "Croissant", "quantity": 2, "unitPriceCents": 150 }
            ]
        }"#;

        let req: PlaceOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, OrderStatus::Pending);
        assert!(req.ordered_at.is_none());
        assert_eq!(req.lines[0].item_id, 7);
    }

    #[test]
    fn test_response_is_camel_case() {
        let resp = ChangeStatusResponse {
            order_id: 1,
            status: OrderStatus::Completed,
            inventory_applied: true,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["orderId"], 1);
        assert_eq!(json["inventoryApplied"], true);
        assert_eq!(json["status"], "completed");
    }
}

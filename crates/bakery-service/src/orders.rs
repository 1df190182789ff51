//! # Order Operations

use chrono::Utc;
use tracing::{debug, info};

use crate::dto::{
    ChangeStatusResponse, OrderResponse, OrderSummary, PlaceOrderRequest, PlaceOrderResponse,
};
use crate::error::ApiError;
use crate::PosService;
use bakery_core::{validation, LineDraft, OrderDraft, OrderStatus};

impl PosService {
    /// Places a new order with all of its lines.
    ///
    /// Validation happens up front; a request that fails validation never
    /// opens a transaction. The stored total is the client's receipt total,
    /// taken as-is. Stock is untouched until the order completes.
    pub async fn place_order(&self, req: PlaceOrderRequest) -> Result<PlaceOrderResponse, ApiError> {
        debug!(customer = %req.customer_name, lines = req.lines.len(), "place_order");

        validation::validate_name("customerName", &req.customer_name)?;
        validation::validate_name("cashierName", &req.cashier_name)?;
        validation::validate_price_cents(req.total_cents).map_err(|_| {
            ApiError::validation("totalCents must not be negative")
        })?;

        let lines: Vec<LineDraft> = req
            .lines
            .iter()
            .map(|l| LineDraft {
                item_id: l.item_id,
                item_name: l.item_name.clone(),
                quantity: l.quantity,
                unit_price_cents: l.unit_price_cents,
            })
            .collect();
        validation::validate_lines(&lines)?;

        let draft = OrderDraft {
            status: req.status,
            ordered_at: req.ordered_at.unwrap_or_else(Utc::now),
            customer_name: req.customer_name.trim().to_string(),
            cashier_name: req.cashier_name.trim().to_string(),
            total_cents: req.total_cents,
        };

        let order = self.db().orders().place_order(&draft, &lines).await?;

        info!(order_id = order.id, total_cents = order.total_cents, "Order placed");

        Ok(PlaceOrderResponse {
            order_id: order.id,
            status: order.status,
            total_cents: order.total_cents,
            line_count: lines.len(),
        })
    }

    /// Gets an order with its lines.
    pub async fn get_order(&self, order_id: i64) -> Result<OrderResponse, ApiError> {
        let orders = self.db().orders();

        let order = orders
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Order", order_id))?;
        let lines = orders.get_lines(order_id).await?;

        Ok(OrderResponse::from_parts(order, lines))
    }

    /// Lists orders, optionally filtered by status, newest first.
    pub async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderSummary>, ApiError> {
        let orders = self.db().orders().list(status).await?;
        Ok(orders.into_iter().map(OrderSummary::from).collect())
    }

    /// Changes an order's status.
    ///
    /// Moving to `completed` also deducts stock for every line, in the
    /// same transaction as the status write. If any line cannot be
    /// satisfied the order stays where it was and the error names the
    /// short item.
    pub async fn change_order_status(
        &self,
        order_id: i64,
        new_status: OrderStatus,
    ) -> Result<ChangeStatusResponse, ApiError> {
        debug!(order_id, status = %new_status, "change_order_status");

        let order = self.db().orders().change_status(order_id, new_status).await?;

        Ok(ChangeStatusResponse {
            order_id: order.id,
            status: order.status,
            inventory_applied: order.inventory_applied,
        })
    }

    /// Deletes an order and its lines. Stock is not restored.
    pub async fn delete_order(&self, order_id: i64) -> Result<(), ApiError> {
        debug!(order_id, "delete_order");
        self.db().orders().delete(order_id).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::OrderLineRequest;
    use crate::ErrorCode;
    use bakery_core::NewItem;
    use bakery_db::{Database, DbConfig};

    async fn test_service() -> PosService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        PosService::new(db)
    }

    async fn seed_item(svc: &PosService, name: &str, quantity: i64, price_cents: i64) -> i64 {
        svc.db()
            .items()
            .insert(&NewItem {
                name: name.to_string(),
                description: None,
                category_id: Some(1),
                quantity,
                unit: "pcs".to_string(),
                unit_price_cents: price_cents,
            })
            .await
            .unwrap()
            .id
    }

    fn request(item_id: i64, lines: &[(i64, i64)], total_cents: i64) -> PlaceOrderRequest {
        PlaceOrderRequest {
            customer_name: "Alice".to_string(),
            cashier_name: "Maya".to_string(),
            status: OrderStatus::Pending,
            ordered_at: None,
            total_cents,
            lines: lines
                .iter()
                .map(|&(quantity, unit_price_cents)| OrderLineRequest {
                    item_id,
                    item_name: "Croissant".to_string(),
                    quantity,
                    unit_price_cents,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_place_and_fetch_order() {
        let svc = test_service().await;
        let croissant = seed_item(&svc, "Croissant", 10, 150).await;

        let placed = svc
            .place_order(request(croissant, &[(2, 150)], 300))
            .await
            .unwrap();
        assert_eq!(placed.line_count, 1);
        assert_eq!(placed.status, OrderStatus::Pending);

        let order = svc.get_order(placed.order_id).await.unwrap();
        assert_eq!(order.customer_name, "Alice");
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].line_total_cents, 300);
        assert!(!order.inventory_applied);
    }

    #[tokio::test]
    async fn test_empty_lines_rejected_before_any_write() {
        let svc = test_service().await;

        let err = svc.place_order(request(1, &[], 0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(svc.list_orders(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_customer_rejected() {
        let svc = test_service().await;
        let mut req = request(1, &[(1, 150)], 150);
        req.customer_name = "   ".to_string();

        let err = svc.place_order(req).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("customerName"));
    }

    #[tokio::test]
    async fn test_bad_line_names_its_index() {
        let svc = test_service().await;
        let croissant = seed_item(&svc, "Croissant", 10, 150).await;

        let err = svc
            .place_order(request(croissant, &[(2, 150), (0, 150)], 300))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("entry 1"));
    }

    #[tokio::test]
    async fn test_full_lifecycle_deducts_stock() {
        let svc = test_service().await;
        let croissant = seed_item(&svc, "Croissant", 10, 150).await;

        let placed = svc
            .place_order(request(croissant, &[(2, 150)], 300))
            .await
            .unwrap();

        let resp = svc
            .change_order_status(placed.order_id, OrderStatus::Preparing)
            .await
            .unwrap();
        assert!(!resp.inventory_applied);

        let resp = svc
            .change_order_status(placed.order_id, OrderStatus::Completed)
            .await
            .unwrap();
        assert!(resp.inventory_applied);

        let item = svc.get_item(croissant).await.unwrap();
        assert_eq!(item.quantity, 8);
    }

    #[tokio::test]
    async fn test_completion_failure_reports_insufficient_stock() {
        let svc = test_service().await;
        let croissant = seed_item(&svc, "Croissant", 1, 150).await;

        let placed = svc
            .place_order(request(croissant, &[(5, 150)], 750))
            .await
            .unwrap();

        let err = svc
            .change_order_status(placed.order_id, OrderStatus::Completed)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        // Order still pending, stock untouched.
        let order = svc.get_order(placed.order_id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(svc.get_item(croissant).await.unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_invalid_transition_is_business_logic_error() {
        let svc = test_service().await;
        let croissant = seed_item(&svc, "Croissant", 10, 150).await;
        let placed = svc
            .place_order(request(croissant, &[(1, 150)], 150))
            .await
            .unwrap();

        svc.change_order_status(placed.order_id, OrderStatus::Cancelled)
            .await
            .unwrap();
        let err = svc
            .change_order_status(placed.order_id, OrderStatus::Completed)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[tokio::test]
    async fn test_list_orders_by_status() {
        let svc = test_service().await;
        let croissant = seed_item(&svc, "Croissant", 10, 150).await;

        let a = svc
            .place_order(request(croissant, &[(1, 150)], 150))
            .await
            .unwrap();
        svc.place_order(request(croissant, &[(1, 150)], 150))
            .await
            .unwrap();
        svc.change_order_status(a.order_id, OrderStatus::Preparing)
            .await
            .unwrap();

        assert_eq!(svc.list_orders(None).await.unwrap().len(), 2);
        let preparing = svc
            .list_orders(Some(OrderStatus::Preparing))
            .await
            .unwrap();
        assert_eq!(preparing.len(), 1);
        assert_eq!(preparing[0].id, a.order_id);
    }

    #[tokio::test]
    async fn test_delete_order() {
        let svc = test_service().await;
        let croissant = seed_item(&svc, "Croissant", 10, 150).await;
        let placed = svc
            .place_order(request(croissant, &[(1, 150)], 150))
            .await
            .unwrap();

        svc.delete_order(placed.order_id).await.unwrap();

        let err = svc.get_order(placed.order_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}

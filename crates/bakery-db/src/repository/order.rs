//! # Order Repository
//!
//! Database operations for orders and their lines.
//!
//! ## Placement Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Placement (atomic)                           │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO orders (status, customer, cashier, total, ...)           │
//! │    id ← last_insert_rowid()                                             │
//! │    for each line:                                                       │
//! │      INSERT INTO order_items (order_id=id, item snapshot, qty, price)   │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any line failing rolls back the order header too; an order either      │
//! │  exists with ALL of its lines or not at all. Placement never touches    │
//! │  stock.                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Completion Transaction
//! Moving an order to `completed` changes the status AND deducts stock for
//! every line in ONE transaction, guarded by the `inventory_applied` latch.
//! There is no window where the order reads as completed but the shelves
//! still show the stock, and no path that deducts twice.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::item::conditional_decrement;
use bakery_core::{CoreError, Deduction, LineDraft, Order, OrderDraft, OrderLine, OrderStatus};

const SELECT_ORDER: &str = r#"
    SELECT id, status, ordered_at, customer_name, cashier_name,
           total_cents, inventory_applied
    FROM orders
"#;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Places an order with all of its lines, atomically.
    ///
    /// Header and every line land in one transaction; if any line insert
    /// fails the header rolls back with it. Stock is NOT touched here;
    /// deduction happens when the order completes.
    ///
    /// ## Returns
    /// The stored order with its generated id.
    pub async fn place_order(&self, draft: &OrderDraft, lines: &[LineDraft]) -> DbResult<Order> {
        debug!(
            customer = %draft.customer_name,
            lines = lines.len(),
            "Placing order"
        );

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (
                status, ordered_at, customer_name, cashier_name,
                total_cents, inventory_applied
            ) VALUES (?1, ?2, ?3, ?4, ?5, 0)
            "#,
        )
        .bind(draft.status)
        .bind(draft.ordered_at)
        .bind(&draft.customer_name)
        .bind(&draft.cashier_name)
        .bind(draft.total_cents)
        .execute(&mut *tx)
        .await?;

        let order_id = result.last_insert_rowid();

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    order_id, item_id, item_name, quantity, unit_price_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(order_id)
            .bind(line.item_id)
            .bind(&line.item_name)
            .bind(line.quantity)
            .bind(line.unit_price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            order_id,
            lines = lines.len(),
            total_cents = draft.total_cents,
            "Order placed"
        );

        Ok(Order {
            id: order_id,
            status: draft.status,
            ordered_at: draft.ordered_at,
            customer_name: draft.customer_name.clone(),
            cashier_name: draft.cashier_name.clone(),
            total_cents: draft.total_cents,
            inventory_applied: false,
        })
    }

    /// Gets an order by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Gets the lines of an order, in insertion order.
    pub async fn get_lines(&self, order_id: i64) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT id, order_id, item_id, item_name, quantity, unit_price_cents
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lists orders, optionally filtered by status, newest first.
    pub async fn list(&self, status: Option<OrderStatus>) -> DbResult<Vec<Order>> {
        let orders = match status {
            Some(status) => {
                sqlx::query_as::<_, Order>(&format!(
                    "{SELECT_ORDER} WHERE status = ?1 ORDER BY ordered_at DESC, id DESC"
                ))
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Order>(&format!(
                    "{SELECT_ORDER} ORDER BY ordered_at DESC, id DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(orders)
    }

    /// Changes an order's status, enforcing the lifecycle rules.
    ///
    /// ## Lifecycle
    /// ```text
    /// pending ──► preparing ──► completed   (terminal)
    ///    │             │
    ///    └─────────────┴──────► cancelled   (terminal)
    /// pending ─────────────────► completed  (walk-in fast path)
    /// ```
    ///
    /// ## Algorithm
    /// One transaction:
    /// 1. Read the order; missing → `NotFound`
    /// 2. Check the transition against the lifecycle table
    /// 3. Guarded `UPDATE ... WHERE status = <observed>`; zero rows means
    ///    a concurrent writer moved the order first, so abort
    /// 4. If the new status is `completed`: check-and-set the
    ///    `inventory_applied` latch, then run the conditional decrement
    ///    for every line on this same transaction
    /// 5. Commit
    ///
    /// Any failure (invalid transition, latch already set, insufficient
    /// stock on any line) rolls back BOTH the status change and every
    /// decrement; the order stays exactly where it was.
    pub async fn change_status(&self, order_id: i64, new_status: OrderStatus) -> DbResult<Order> {
        debug!(order_id, status = %new_status, "Changing order status");

        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Order", order_id))?;

        // Lifecycle check; an early return drops `tx`, rolling back.
        order.status.transition(new_status).map_err(DbError::from)?;

        let result = sqlx::query("UPDATE orders SET status = ?1 WHERE id = ?2 AND status = ?3")
            .bind(new_status)
            .bind(order_id)
            .bind(order.status)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            warn!(order_id, "Order changed under us; aborting status update");
            return Err(DbError::TransactionFailed(format!(
                "order {order_id} was modified concurrently"
            )));
        }

        let mut inventory_applied = order.inventory_applied;
        if new_status == OrderStatus::Completed {
            // One-time latch: set in the same transaction as the
            // decrements, so stock for an order can never come off twice.
            if order.inventory_applied {
                return Err(CoreError::InventoryAlreadyApplied { order_id }.into());
            }

            let latch =
                sqlx::query("UPDATE orders SET inventory_applied = 1 WHERE id = ?1 AND inventory_applied = 0")
                    .bind(order_id)
                    .execute(&mut *tx)
                    .await?;
            if latch.rows_affected() == 0 {
                return Err(CoreError::InventoryAlreadyApplied { order_id }.into());
            }

            let lines = sqlx::query_as::<_, OrderLine>(
                r#"
                SELECT id, order_id, item_id, item_name, quantity, unit_price_cents
                FROM order_items
                WHERE order_id = ?1
                ORDER BY id
                "#,
            )
            .bind(order_id)
            .fetch_all(&mut *tx)
            .await?;

            let now = Utc::now();
            for (index, line) in lines.iter().enumerate() {
                conditional_decrement(&mut tx, index, &Deduction::from(line), now).await?;
            }

            inventory_applied = true;
            debug!(order_id, lines = lines.len(), "Inventory applied for completed order");
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            order_id,
            from = %order.status,
            to = %new_status,
            "Order status changed"
        );

        Ok(Order {
            status: new_status,
            inventory_applied,
            ..order
        })
    }

    /// Deletes an order and its lines.
    ///
    /// Stock is NOT restored; deletion is bookkeeping, not a refund.
    pub async fn delete(&self, order_id: i64) -> DbResult<()> {
        debug!(order_id, "Deleting order");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order_id));
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = ?1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(order_id, "Order deleted");
        Ok(())
    }

    /// Counts orders (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Item Repository
//!
//! Database operations for the catalog, including the inventory
//! adjustment transaction.
//!
//! ## The Conditional Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               Why One Statement Instead of Read-Then-Write              │
//! │                                                                         │
//! │  ❌ WRONG: separate check and update (races under concurrency)        │
//! │     SELECT quantity FROM item WHERE id = ?        -- both callers: 2   │
//! │     UPDATE item SET quantity = quantity - 2 ...   -- both "pass"       │
//! │     → stock ends at -2, two sales of the last two croissants           │
//! │                                                                         │
//! │  ✅ CORRECT: sufficiency check and mutation in ONE statement           │
//! │     UPDATE item SET quantity = quantity - ?                            │
//! │     WHERE id = ? AND quantity >= ?                                     │
//! │                                                                         │
//! │  Zero rows affected = item missing OR not enough stock. Two            │
//! │  concurrent batches over the same item serialize on the row; only      │
//! │  one can win the last of the stock.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Batch Semantics
//! `apply_deductions` runs the whole batch inside one transaction, in
//! caller order, first failure wins. An error anywhere (validation,
//! missing item, insufficiency, storage) rolls back every decrement
//! already applied in the batch; readers never observe a half-applied
//! batch.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use bakery_core::{validation, CoreError, Deduction, Item, NewItem};

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT
                id, name, description, category_id,
                quantity, unit, unit_price_cents,
                created_at, updated_at
            FROM item
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists the whole catalog, sorted by name.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT
                id, name, description, category_id,
                quantity, unit, unit_price_cents,
                created_at, updated_at
            FROM item
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists items belonging to one category.
    pub async fn list_by_category(&self, category_id: i64) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT
                id, name, description, category_id,
                quantity, unit, unit_price_cents,
                created_at, updated_at
            FROM item
            WHERE category_id = ?1
            ORDER BY name
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a new catalog item.
    ///
    /// ## Returns
    /// The stored item with its generated id.
    pub async fn insert(&self, new: &NewItem) -> DbResult<Item> {
        debug!(name = %new.name, "Inserting item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO item (
                name, description, category_id,
                quantity, unit, unit_price_cents,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.category_id)
        .bind(new.quantity)
        .bind(&new.unit)
        .bind(new.unit_price_cents)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            name: new.name.clone(),
            description: new.description.clone(),
            category_id: new.category_id,
            quantity: new.quantity,
            unit: new.unit.clone(),
            unit_price_cents: new.unit_price_cents,
            created_at: now,
            updated_at: now,
        })
    }

    /// Deletes an item from the catalog.
    ///
    /// Order lines keep their name/price snapshots; only the live catalog
    /// row goes away.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting item");

        let result = sqlx::query("DELETE FROM item WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Counts catalog items (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM item")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Applies a batch of stock deductions, all-or-nothing.
    ///
    /// ## Algorithm
    /// One transaction; per entry, in caller order:
    /// 1. Validate the entry (positive id and quantity) - a malformed
    ///    entry aborts the whole batch before touching its row
    /// 2. Run the conditional decrement
    /// 3. Zero rows affected → abort with `ItemNotFound` or
    ///    `InsufficientStock` naming the item
    ///
    /// First failure wins; the transaction rolls back and none of the
    /// batch's decrements persist. The caller decides whether to retry
    /// with adjusted quantities. No internal retries.
    pub async fn apply_deductions(&self, batch: &[Deduction]) -> DbResult<()> {
        debug!(entries = batch.len(), "Applying inventory deduction batch");

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        for (index, deduction) in batch.iter().enumerate() {
            // An early return drops `tx`, which rolls the batch back.
            conditional_decrement(&mut tx, index, deduction, now).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(entries = batch.len(), "Inventory deduction batch committed");
        Ok(())
    }
}

/// Runs one validated conditional decrement on the given connection.
///
/// Shared between `apply_deductions` and the order-completion transaction
/// so both paths get identical sufficiency semantics on whatever
/// transaction they are already inside.
pub(crate) async fn conditional_decrement(
    conn: &mut SqliteConnection,
    index: usize,
    deduction: &Deduction,
    now: DateTime<Utc>,
) -> DbResult<()> {
    validation::validate_deduction(index, deduction).map_err(CoreError::from)?;

    let result = sqlx::query(
        r#"
        UPDATE item
        SET quantity = quantity - ?1, updated_at = ?2
        WHERE id = ?3 AND quantity >= ?1
        "#,
    )
    .bind(deduction.quantity)
    .bind(now)
    .bind(deduction.item_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        // Distinguish "no such item" from "not enough stock" for the
        // caller; either way the enclosing transaction aborts.
        let available: Option<i64> = sqlx::query_scalar("SELECT quantity FROM item WHERE id = ?1")
            .bind(deduction.item_id)
            .fetch_optional(&mut *conn)
            .await?;

        return Err(match available {
            None => CoreError::ItemNotFound(deduction.item_id).into(),
            Some(available) => CoreError::InsufficientStock {
                item_id: deduction.item_id,
                available,
                requested: deduction.quantity,
            }
            .into(),
        });
    }

    debug!(
        item_id = deduction.item_id,
        quantity = deduction.quantity,
        "Stock decremented"
    );
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use bakery_core::ValidationError;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn bakery_item(name: &str, quantity: i64, unit_price_cents: i64) -> NewItem {
        NewItem {
            name: name.to_string(),
            description: None,
            category_id: Some(1),
            quantity,
            unit: "pcs".to_string(),
            unit_price_cents,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.items();

        let stored = repo.insert(&bakery_item("Croissant", 10, 150)).await.unwrap();
        assert!(stored.id > 0);

        let fetched = repo.get_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Croissant");
        assert_eq!(fetched.quantity, 10);
        assert_eq!(fetched.unit_price_cents, 150);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        assert!(db.items().get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let db = test_db().await;
        let repo = db.items();

        repo.insert(&bakery_item("Croissant", 5, 150)).await.unwrap();
        let mut rye = bakery_item("Rye Loaf", 3, 450);
        rye.category_id = Some(2);
        repo.insert(&rye).await.unwrap();

        let breads = repo.list_by_category(2).await.unwrap();
        assert_eq!(breads.len(), 1);
        assert_eq!(breads[0].name, "Rye Loaf");
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = test_db().await;
        let err = db.items().delete(42).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_deduction_at_exact_stock_boundary() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.insert(&bakery_item("Croissant", 2, 150)).await.unwrap();

        // Requesting exactly the stock on hand must succeed and leave zero.
        repo.apply_deductions(&[Deduction { item_id: item.id, quantity: 2 }])
            .await
            .unwrap();

        let after = repo.get_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 0);
    }

    #[tokio::test]
    async fn test_deduction_over_stock_fails_and_leaves_stock() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.insert(&bakery_item("Croissant", 2, 150)).await.unwrap();

        let err = repo
            .apply_deductions(&[Deduction { item_id: item.id, quantity: 3 }])
            .await
            .unwrap_err();

        match err {
            DbError::Domain(CoreError::InsufficientStock {
                item_id,
                available,
                requested,
            }) => {
                assert_eq!(item_id, item.id);
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("unexpected error: {other}"),
        }

        let after = repo.get_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 2);
    }

    #[tokio::test]
    async fn test_deduction_for_missing_item() {
        let db = test_db().await;
        let err = db
            .items()
            .apply_deductions(&[Deduction { item_id: 999, quantity: 1 }])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::ItemNotFound(999))
        ));
    }

    #[tokio::test]
    async fn test_batch_rolls_back_earlier_decrements() {
        let db = test_db().await;
        let repo = db.items();
        let croissant = repo.insert(&bakery_item("Croissant", 2, 150)).await.unwrap();
        let baguette = repo.insert(&bakery_item("Baguette", 0, 300)).await.unwrap();

        // First entry succeeds inside the transaction, second fails; the
        // whole batch must be undone.
        let err = repo
            .apply_deductions(&[
                Deduction { item_id: croissant.id, quantity: 2 },
                Deduction { item_id: baguette.id, quantity: 1 },
            ])
            .await
            .unwrap_err();

        match err {
            DbError::Domain(CoreError::InsufficientStock { item_id, .. }) => {
                assert_eq!(item_id, baguette.id)
            }
            other => panic!("unexpected error: {other}"),
        }

        let after = repo.get_by_id(croissant.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 2, "first decrement must be rolled back");
    }

    #[tokio::test]
    async fn test_malformed_entry_aborts_whole_batch() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.insert(&bakery_item("Croissant", 5, 150)).await.unwrap();

        let err = repo
            .apply_deductions(&[
                Deduction { item_id: item.id, quantity: 1 },
                Deduction { item_id: item.id, quantity: -4 },
            ])
            .await
            .unwrap_err();

        match err {
            DbError::Domain(CoreError::Validation(ValidationError::InvalidEntry {
                index, ..
            })) => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }

        let after = repo.get_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 5, "valid first entry must be rolled back too");
    }

    #[tokio::test]
    async fn test_same_item_twice_in_one_batch() {
        let db = test_db().await;
        let repo = db.items();
        let item = repo.insert(&bakery_item("Croissant", 3, 150)).await.unwrap();

        repo.apply_deductions(&[
            Deduction { item_id: item.id, quantity: 1 },
            Deduction { item_id: item.id, quantity: 2 },
        ])
        .await
        .unwrap();

        let after = repo.get_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 0);
    }

    #[tokio::test]
    async fn test_concurrent_batches_cannot_oversell() {
        // Needs a real file so two pooled connections share one database.
        let path = std::env::temp_dir().join(format!("bakery-test-{}.db", uuid::Uuid::new_v4()));
        let db = Database::new(DbConfig::new(&path).max_connections(2))
            .await
            .unwrap();
        let repo = db.items();
        let item = repo.insert(&bakery_item("Croissant", 4, 150)).await.unwrap();

        // Two batches that each want the FULL stock. The repositories must
        // outlive the join, so bind them before building the futures.
        let full = [Deduction { item_id: item.id, quantity: 4 }];
        let (first, second) = (db.items(), db.items());
        let (a, b) = tokio::join!(
            first.apply_deductions(&full),
            second.apply_deductions(&full),
        );

        // Exactly one wins; the loser sees insufficiency against the
        // winner's committed state, never a busy or storage error.
        assert_ne!(a.is_ok(), b.is_ok(), "exactly one batch must succeed");
        let loser = if a.is_ok() { b } else { a };
        match loser.unwrap_err() {
            DbError::Domain(CoreError::InsufficientStock {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 0);
                assert_eq!(requested, 4);
            }
            other => panic!("unexpected error: {other}"),
        }

        let after = repo.get_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 0, "no lost update, no overselling");

        db.close().await;
        let _ = std::fs::remove_file(&path);
    }
}

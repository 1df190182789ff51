//! # Catalog Operations

use tracing::{debug, info};

use crate::dto::{CreateItemRequest, ItemResponse};
use crate::error::ApiError;
use crate::PosService;
use bakery_core::{validation, NewItem};

impl PosService {
    /// Creates a catalog item.
    pub async fn create_item(&self, req: CreateItemRequest) -> Result<ItemResponse, ApiError> {
        debug!(name = %req.name, "create_item");

        validation::validate_name("name", &req.name)?;
        validation::validate_price_cents(req.unit_price_cents)?;
        if req.quantity < 0 {
            return Err(ApiError::validation("quantity must not be negative"));
        }

        let item = self
            .db()
            .items()
            .insert(&NewItem {
                name: req.name.trim().to_string(),
                description: req.description,
                category_id: req.category_id,
                quantity: req.quantity,
                unit: req.unit,
                unit_price_cents: req.unit_price_cents,
            })
            .await?;

        info!(item_id = item.id, name = %item.name, "Item created");
        Ok(ItemResponse::from(item))
    }

    /// Gets a catalog item.
    pub async fn get_item(&self, item_id: i64) -> Result<ItemResponse, ApiError> {
        let item = self
            .db()
            .items()
            .get_by_id(item_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Item", item_id))?;
        Ok(ItemResponse::from(item))
    }

    /// Lists the catalog, optionally one category, sorted by name.
    pub async fn list_items(&self, category_id: Option<i64>) -> Result<Vec<ItemResponse>, ApiError> {
        let items = match category_id {
            Some(category_id) => self.db().items().list_by_category(category_id).await?,
            None => self.db().items().list().await?,
        };
        Ok(items.into_iter().map(ItemResponse::from).collect())
    }

    /// Deletes a catalog item. Existing order lines keep their snapshots.
    pub async fn delete_item(&self, item_id: i64) -> Result<(), ApiError> {
        debug!(item_id, "delete_item");
        self.db().items().delete(item_id).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use bakery_db::{Database, DbConfig};

    async fn test_service() -> PosService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        PosService::new(db)
    }

    fn croissant() -> CreateItemRequest {
        CreateItemRequest {
            name: "Croissant".to_string(),
            description: Some("Butter croissant".to_string()),
            category_id: Some(2),
            quantity: 12,
            unit: "pcs".to_string(),
            unit_price_cents: 150,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let svc = test_service().await;

        let created = svc.create_item(croissant()).await.unwrap();
        assert!(created.id > 0);

        let all = svc.list_items(None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Croissant");

        assert!(svc.list_items(Some(99)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let svc = test_service().await;
        let mut req = croissant();
        req.name = "  ".to_string();

        let err = svc.create_item(req).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let svc = test_service().await;
        let mut req = croissant();
        req.unit_price_cents = -1;

        let err = svc.create_item(req).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let svc = test_service().await;
        let created = svc.create_item(croissant()).await.unwrap();

        svc.delete_item(created.id).await.unwrap();
        let err = svc.get_item(created.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}

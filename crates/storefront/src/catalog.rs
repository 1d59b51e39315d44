//! Product catalog assembled from backend inventory records.
//!
//! The storefront sells inventory entries rather than bare products: each
//! entry pairs one product with the supplier, stock, and sale price of a
//! specific inventory record. [`CatalogStore::refresh`] replaces the whole
//! listing atomically, so readers never observe a half-applied update.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use minimarket_api::models::Inventory;
use minimarket_api::{ApiClient, ApiError};
use minimarket_core::{InventoryId, ProductId};
use rust_decimal::Decimal;

/// One sellable catalog entry, flattened from an inventory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub product_id: ProductId,
    /// Inventory record backing this entry; orders reference this id.
    pub inventory_id: InventoryId,
    pub name: String,
    pub description: String,
    pub unit_price: Decimal,
    pub category_name: String,
    pub supplier_name: String,
    /// Stock as last reported by the backend. The backend resolves the
    /// real availability again when an order is placed.
    pub stock: u32,
    pub image_ref: Option<String>,
}

impl From<Inventory> for CatalogEntry {
    fn from(inventory: Inventory) -> Self {
        Self {
            product_id: inventory.product.id,
            inventory_id: inventory.id,
            name: inventory.product.name,
            description: inventory.product.description,
            unit_price: inventory.sale_price,
            category_name: inventory.product.category.name,
            supplier_name: inventory.supplier.name,
            stock: inventory.stock,
            image_ref: inventory.product.image,
        }
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    entries: Vec<CatalogEntry>,
    loading: bool,
    last_error: Option<String>,
}

/// Shared catalog store.
///
/// Cheap to clone; all clones observe the same listing.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    client: ApiClient,
    state: Arc<RwLock<CatalogState>>,
}

impl CatalogStore {
    /// Create an empty catalog backed by `client`. Nothing is fetched
    /// until [`refresh`](Self::refresh) is called.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(CatalogState::default())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch the inventory listing and replace the catalog with it.
    ///
    /// Duplicate inventory ids in the response are collapsed to their
    /// first occurrence. On failure the previous listing is kept and the
    /// error is recorded until the next successful refresh.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] when the fetch fails.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.write().loading = true;
        let fetched = self.client.get_inventories().await;

        let mut state = self.write();
        state.loading = false;
        match fetched {
            Ok(inventories) => {
                state.entries = dedup_entries(inventories);
                state.last_error = None;
                Ok(())
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Snapshot of the current listing, in backend order.
    #[must_use]
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.read().entries.clone()
    }

    /// Look up a single entry by its inventory id.
    #[must_use]
    pub fn entry(&self, inventory_id: InventoryId) -> Option<CatalogEntry> {
        self.read()
            .entries
            .iter()
            .find(|entry| entry.inventory_id == inventory_id)
            .cloned()
    }

    /// Whether a refresh is currently in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// The error recorded by the last failed refresh, if the listing has
    /// not been successfully refreshed since.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.read().last_error.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    #[cfg(test)]
    fn seed(&self, entries: Vec<CatalogEntry>) {
        self.write().entries = entries;
    }
}

/// Collapse duplicate inventory ids, keeping the first occurrence.
fn dedup_entries(inventories: Vec<Inventory>) -> Vec<CatalogEntry> {
    let mut seen = HashSet::new();
    inventories
        .into_iter()
        .filter(|inventory| seen.insert(inventory.id))
        .map(CatalogEntry::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use minimarket_api::ApiConfig;
    use minimarket_api::models::{Product, ProductCategory, SupplierSummary};
    use minimarket_core::{CategoryId, SupplierId};

    use super::*;

    fn inventory(id: i32, stock: u32) -> Inventory {
        Inventory {
            id: InventoryId::new(id),
            stock,
            sale_price: Decimal::new(550, 2),
            product: Product {
                id: ProductId::new(10),
                name: "Leche Gloria".to_string(),
                description: "Tarro 400g".to_string(),
                image: Some("leche.png".to_string()),
                category: ProductCategory {
                    id: CategoryId::new(1),
                    name: "Lacteos".to_string(),
                },
            },
            supplier: SupplierSummary {
                id: SupplierId::new(3),
                name: "Distribuidora Sur".to_string(),
            },
        }
    }

    fn dead_client() -> ApiClient {
        // Nothing listens on port 1; requests fail at connect time.
        ApiClient::new(&ApiConfig::from_base_url("http://127.0.0.1:1/api").unwrap())
    }

    #[test]
    fn test_entry_flattens_inventory_record() {
        let entry = CatalogEntry::from(inventory(7, 12));
        assert_eq!(entry.inventory_id, InventoryId::new(7));
        assert_eq!(entry.product_id, ProductId::new(10));
        assert_eq!(entry.name, "Leche Gloria");
        assert_eq!(entry.unit_price, Decimal::new(550, 2));
        assert_eq!(entry.category_name, "Lacteos");
        assert_eq!(entry.supplier_name, "Distribuidora Sur");
        assert_eq!(entry.stock, 12);
        assert_eq!(entry.image_ref.as_deref(), Some("leche.png"));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let entries = dedup_entries(vec![inventory(1, 5), inventory(2, 8), inventory(1, 99)]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].inventory_id, InventoryId::new(1));
        assert_eq!(entries[0].stock, 5);
        assert_eq!(entries[1].inventory_id, InventoryId::new(2));
    }

    #[test]
    fn test_new_store_is_empty_and_idle() {
        let store = CatalogStore::new(dead_client());
        assert!(store.is_empty());
        assert!(!store.is_loading());
        assert!(store.last_error().is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_listing() {
        let store = CatalogStore::new(dead_client());
        store.seed(vec![CatalogEntry::from(inventory(4, 3))]);

        let result = store.refresh().await;

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
        assert!(store.entry(InventoryId::new(4)).is_some());
        assert!(store.last_error().is_some());
        assert!(!store.is_loading());
    }
}

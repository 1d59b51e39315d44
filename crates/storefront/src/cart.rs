//! Visitor shopping cart.
//!
//! Cart lines snapshot the price and stock of a catalog entry at the time
//! it is added; quantity edits clamp to `1..=available_stock` against that
//! snapshot. Every operation is infallible: the cart is device state, so
//! persistence failures are logged and swallowed. The backend re-checks
//! real stock when the order is placed.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use minimarket_core::{InventoryId, LineId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::storage::Storage;

const CART_KEY: &str = "cart";

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub line_id: LineId,
    pub inventory_id: InventoryId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Stock known when the line was added; the quantity ceiling.
    pub available_stock: u32,
    pub image_ref: Option<String>,
    pub supplier_name: String,
}

impl CartLine {
    fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            line_id: LineId::generate(),
            inventory_id: entry.inventory_id,
            name: entry.name.clone(),
            unit_price: entry.unit_price,
            quantity: 1,
            available_stock: entry.stock,
            image_ref: entry.image_ref.clone(),
            supplier_name: entry.supplier_name.clone(),
        }
    }

    /// Line subtotal, `unit_price * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Shared cart store.
///
/// Cheap to clone; all clones observe the same lines. The persisted copy
/// is replayed on construction, so the cart survives restarts.
#[derive(Debug, Clone)]
pub struct CartStore {
    storage: Storage,
    lines: Arc<RwLock<Vec<CartLine>>>,
}

impl CartStore {
    /// Create a cart over `storage`, restoring any persisted lines.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        let lines = match storage.load::<Vec<CartLine>>(CART_KEY) {
            Ok(Some(lines)) => lines,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to restore persisted cart");
                Vec::new()
            }
        };
        Self {
            storage,
            lines: Arc::new(RwLock::new(lines)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<CartLine>> {
        self.lines.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<CartLine>> {
        self.lines.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, lines: &[CartLine]) {
        if let Err(e) = self.storage.save(CART_KEY, lines) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }

    /// Add a catalog entry to the cart.
    ///
    /// If a line for the same inventory already exists its quantity is
    /// bumped by one, clamped to the line's available stock. An entry with
    /// zero stock is not added.
    // Persisting under the lock keeps the on-disk order of concurrent edits.
    #[allow(clippy::significant_drop_tightening)]
    pub fn add(&self, entry: &CatalogEntry) {
        let mut lines = self.write();
        if let Some(line) = lines
            .iter_mut()
            .find(|line| line.inventory_id == entry.inventory_id)
        {
            let bumped = line.quantity.saturating_add(1).min(line.available_stock);
            if bumped == line.quantity {
                return;
            }
            line.quantity = bumped;
        } else {
            if entry.stock == 0 {
                return;
            }
            lines.push(CartLine::from_entry(entry));
        }
        self.persist(&lines);
    }

    /// Bump a line's quantity by one, clamped to its available stock.
    /// Unknown ids are ignored.
    pub fn increment(&self, line_id: LineId) {
        self.adjust(line_id, 1);
    }

    /// Drop a line's quantity by one, clamped to one. A line at quantity
    /// one stays in the cart; use [`remove`](Self::remove) to drop it.
    /// Unknown ids are ignored.
    pub fn decrement(&self, line_id: LineId) {
        self.adjust(line_id, -1);
    }

    #[allow(clippy::significant_drop_tightening)]
    fn adjust(&self, line_id: LineId, delta: i64) {
        let mut lines = self.write();
        let Some(line) = lines.iter_mut().find(|line| line.line_id == line_id) else {
            return;
        };
        let adjusted = i64::from(line.quantity).saturating_add(delta);
        let clamped = adjusted.clamp(1, i64::from(line.available_stock.max(1)));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let clamped = clamped as u32;
        if clamped == line.quantity {
            return;
        }
        line.quantity = clamped;
        self.persist(&lines);
    }

    /// Remove a line. Unknown ids are ignored.
    #[allow(clippy::significant_drop_tightening)]
    pub fn remove(&self, line_id: LineId) {
        let mut lines = self.write();
        let before = lines.len();
        lines.retain(|line| line.line_id != line_id);
        if lines.len() != before {
            self.persist(&lines);
        }
    }

    /// Empty the cart and delete the persisted copy.
    #[allow(clippy::significant_drop_tightening)]
    pub fn clear(&self) {
        let mut lines = self.write();
        lines.clear();
        if let Err(e) = self.storage.remove(CART_KEY) {
            tracing::warn!(error = %e, "Failed to remove persisted cart");
        }
    }

    /// Snapshot of the current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.read().clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.read().len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.read().iter().map(|line| line.quantity).sum()
    }

    /// Cart total, rounded to two decimal places.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.read()
            .iter()
            .map(CartLine::subtotal)
            .sum::<Decimal>()
            .round_dp(2)
    }
}

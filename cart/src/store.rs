use std::num::NonZeroU32;

use indexmap::IndexMap;
use tracing::{debug, error, info, warn};

use crate::{
    error::StoreError,
    models::{CartEntry, Product},
    storage::Storage,
};

/// Cart entries keyed by product id, written through to one storage slot.
pub struct CartStore<S: Storage> {
    storage: S,
    slot: String,
    entries: IndexMap<u32, CartEntry>,
}

impl<S: Storage> CartStore<S> {
    /// Empty cart. Nothing is read from storage until [`CartStore::load`].
    pub fn new(storage: S, slot: impl Into<String>) -> Self {
        Self {
            storage,
            slot: slot.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn open(storage: S, slot: impl Into<String>) -> Self {
        let mut store = Self::new(storage, slot);
        store.load();
        store
    }

    /// Replaces the in-memory cart with whatever the slot holds.
    ///
    /// A corrupt slot is logged and removed, leaving the cart empty.
    pub fn load(&mut self) {
        self.entries.clear();

        let stored = match self.storage.get_item(&self.slot) {
            Ok(Some(stored)) if !stored.trim().is_empty() => stored,
            Ok(_) => {
                debug!("No stored cart in slot {}", self.slot);
                return;
            }
            Err(e) => {
                warn!("Failed to read cart slot {}: {e}", self.slot);
                return;
            }
        };

        match parse_cart(&stored) {
            Ok(entries) => {
                info!("Loaded {} cart entries", entries.len());
                self.entries = entries;
            }
            Err(e) => {
                error!("Failed to load cart from storage: {e}");

                if let Err(e) = self.storage.remove_item(&self.slot) {
                    warn!("Failed to clear corrupt cart slot {}: {e}", self.slot);
                }
            }
        }
    }

    /// Writes the cart, or removes the slot when the cart is empty.
    pub fn save(&mut self) -> Result<(), StoreError> {
        if self.entries.is_empty() {
            return self.storage.remove_item(&self.slot);
        }

        let serialized = serialize_cart(&self.entries)?;
        self.storage.set_item(&self.slot, &serialized)
    }

    /// Inserts the product at quantity 1. A product already in the cart keeps its quantity.
    pub fn add_to_cart(&mut self, product: &Product) {
        if !self.entries.contains_key(&product.id) {
            self.entries.insert(product.id, CartEntry::new(product.clone()));
        }

        self.sync();
    }

    pub fn remove_from_cart(&mut self, id: u32) {
        self.entries.shift_remove(&id);
        self.sync();
    }

    /// Sets the quantity of an entry already in the cart. Zero or below removes it.
    pub fn update_quantity(&mut self, id: u32, quantity: i64) {
        if quantity <= 0 {
            self.entries.shift_remove(&id);
        } else if let Some(entry) = self.entries.get_mut(&id) {
            let clamped = u32::try_from(quantity).unwrap_or(u32::MAX);
            entry.quantity = NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN);
        }

        self.sync();
    }

    pub fn get(&self, id: u32) -> Option<&CartEntry> {
        self.entries.get(&id)
    }

    pub fn as_list(&self) -> Vec<&CartEntry> {
        self.entries.values().collect()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    fn sync(&mut self) {
        if let Err(e) = self.save() {
            error!("Failed to persist cart to slot {}: {e}", self.slot);
        }
    }
}

pub fn serialize_cart(entries: &IndexMap<u32, CartEntry>) -> Result<String, StoreError> {
    let pairs: Vec<(&u32, &CartEntry)> = entries.iter().collect();

    Ok(serde_json::to_string(&pairs)?)
}

pub fn parse_cart(raw: &str) -> Result<IndexMap<u32, CartEntry>, StoreError> {
    let pairs: Vec<(u32, CartEntry)> = serde_json::from_str(raw)?;
    let mut entries = IndexMap::with_capacity(pairs.len());

    for (key, entry) in pairs {
        if key != entry.id() {
            return Err(StoreError::MismatchedEntry {
                key,
                id: entry.id(),
            });
        }

        if entries.insert(key, entry).is_some() {
            return Err(StoreError::DuplicateEntry(key));
        }
    }

    Ok(entries)
}

//! # Cart
//!
//! Shopping cart state and its persistence.
//!
//! ## Data Structures
//!
//! - Products (id: **u32**, title: **string**, price: **f64**, image: **string**): immutable catalog records,
//!   owned by whoever fetched them.
//!
//! - Cart entries: product fields flattened together with a **non-zero** quantity. A zero quantity cannot be
//!   represented, so the cart never holds an entry that should have been removed.
//!
//! - Cart state: insertion ordered map of product id to cart entry. Rendering follows that order.
//!
//! ## Persistence
//!
//! - One named slot in a [`Storage`] backend, holding a JSON array of `[id, entry]` pairs.
//! - No slot means an empty cart. An empty cart removes the slot rather than writing `[]`.
//! - Every mutation writes through immediately. No batching, no debounce.
//!
//! ## Recovery
//!
//! - A slot that fails to parse is logged, removed, and the cart starts empty.
//! - Storage I/O failures are logged. The in-memory cart stays authoritative.
pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use error::StoreError;
pub use models::{CartEntry, Product};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::CartStore;

pub const CART_SLOT: &str = "cart";

//! Type-safe key-value snapshot storage for classcart.
//!
//! Persists the small bits of storefront state that survive navigation: the
//! login session snapshot and the last completed purchase. Backed by Spin's
//! Key-Value store on wasm32 and an in-memory map on native targets.
//!
//! # Example
//!
//! ```rust,ignore
//! use classcart_cache::{Store, store_key};
//!
//! let store = Store::open_default()?;
//! store.set(&store_key!("session", "current"), &session)?;
//!
//! // Missing or corrupt snapshots read back as None, never an error the
//! // caller has to special-case at startup.
//! let restored: Option<Session> = store.get(&store_key!("session", "current"))?;
//! ```

mod error;
mod kv;

pub use error::StoreError;
pub use kv::Store;

//! Store de documentos en tiempo real
//!
//! Este módulo contiene la abstracción del store jerárquico
//! (`RealtimeStore`), el cliente REST del backend hosteado y el store en
//! memoria usado por los tests.

pub mod client;
pub mod firebase;
pub mod memory;
pub mod paths;
pub mod tree;

pub use client::{RealtimeStore, Snapshot, StoreError, Subscription};
pub use firebase::FirebaseClient;
pub use memory::MemoryStore;

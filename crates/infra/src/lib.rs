//! Infrastructure layer: movement persistence, registries, ledger service.

pub mod movement_store;
pub mod registry;
pub mod stock_ledger;


pub use movement_store::{
    InMemoryMovementStore, JsonFileMovementStore, MovementFilter, MovementStore,
    MovementStoreError,
};
pub use registry::{ArticleRegistry, InMemoryRegistry, Registry, SupplierRegistry};
pub use stock_ledger::StockLedger;

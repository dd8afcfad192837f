//! Supplier registry entries.
//!
//! Movements may reference a supplier by id; the ledger never validates the
//! reference, so this crate stays a standalone collaborator.

pub mod supplier;

pub use supplier::{ContactInfo, Supplier, SupplierDraft, SupplierUpdate};

use std::sync::Arc;

use crate::ports::SupplierPort;

/// Identifier naming a requested capability within a registry snapshot.
pub type TypeKey = String;

/// The single payload/result type every supplier exchanges. Typed hosts
/// layer serde on top via `supplier::typed_supplier`.
pub type Payload = serde_json::Value;

pub type Supplier = Arc<dyn SupplierPort>;

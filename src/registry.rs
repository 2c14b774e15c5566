use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use crate::types::{Supplier, TypeKey};

/// One immutable snapshot of the key-to-supplier mapping. Extension
/// never mutates a snapshot in place; it derives the next one.
#[derive(Clone, Default)]
pub struct SupplierRegistry {
    suppliers: Arc<BTreeMap<TypeKey, Supplier>>,
}

impl SupplierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_suppliers(suppliers: BTreeMap<TypeKey, Supplier>) -> Self {
        Self {
            suppliers: Arc::new(suppliers),
        }
    }

    pub fn get(&self, key: &str) -> Option<Supplier> {
        self.suppliers.get(key).map(Arc::clone)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.suppliers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.suppliers.keys().map(String::as_str)
    }

    /// Derives the next snapshot: clear first, then removals, then
    /// additions, so an `add` always wins over a `remove` of the same
    /// key. Never fails; removing an absent key is a no-op.
    pub fn apply(&self, extension: &RegistryExtension) -> SupplierRegistry {
        if extension.is_identity() {
            return self.clone();
        }

        let mut next: BTreeMap<TypeKey, Supplier> = if extension.clear {
            BTreeMap::new()
        } else {
            self.suppliers.as_ref().clone()
        };
        for key in &extension.remove {
            next.remove(key);
        }
        for (key, supplier) in &extension.add {
            next.insert(key.clone(), Arc::clone(supplier));
        }

        SupplierRegistry {
            suppliers: Arc::new(next),
        }
    }
}

/// Declarative delta applied to a registry snapshot during a demand.
/// The default value is the identity extension.
#[derive(Clone, Default)]
pub struct RegistryExtension {
    pub add: BTreeMap<TypeKey, Supplier>,
    pub remove: BTreeSet<TypeKey>,
    pub clear: bool,
}

impl RegistryExtension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_supplier(mut self, key: impl Into<TypeKey>, supplier: Supplier) -> Self {
        self.add.insert(key.into(), supplier);
        self
    }

    pub fn without(mut self, key: impl Into<TypeKey>) -> Self {
        self.remove.insert(key.into());
        self
    }

    pub fn cleared(mut self) -> Self {
        self.clear = true;
        self
    }

    pub fn is_identity(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && !self.clear
    }
}

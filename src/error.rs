use std::fmt;

use crate::types::TypeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandErrorKind {
    SupplierNotFound,
    Configuration,
    Supplier,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandError {
    pub kind: DemandErrorKind,
    pub key: Option<TypeKey>,
    pub message: String,
}

impl DemandError {
    pub fn new(kind: DemandErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            key: None,
            message: message.into(),
        }
    }

    pub fn with_key(mut self, key: impl Into<TypeKey>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl fmt::Display for DemandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DemandError {}

pub fn supplier_not_found(key: impl Into<TypeKey>) -> DemandError {
    let key = key.into();
    DemandError::new(
        DemandErrorKind::SupplierNotFound,
        format!("no supplier registered for type key '{}'", key),
    )
    .with_key(key)
}

pub fn configuration(message: impl Into<String>) -> DemandError {
    DemandError::new(DemandErrorKind::Configuration, message)
}

pub fn supplier_failure(message: impl Into<String>) -> DemandError {
    DemandError::new(DemandErrorKind::Supplier, message)
}

pub fn internal_error(message: impl Into<String>) -> DemandError {
    DemandError::new(DemandErrorKind::Internal, message)
}

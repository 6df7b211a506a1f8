//! Read-only component catalog.
//!
//! The catalog is the flat JSON array of components a storefront offers.
//! Components whose `subCategory` is not a slot (peripherals, bundles) are
//! kept but never offered by [`Catalog::for_slot`].

use std::collections::HashSet;
use std::path::Path;

use crate::domain::{Component, ConfiguratorError, Result, Slot};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    components: Vec<Component>,
}

impl Catalog {
    /// Validate and wrap a component list.
    ///
    /// Rejects empty ids, duplicate ids, and negative or non-finite prices.
    pub fn from_components(components: Vec<Component>) -> Result<Self> {
        let mut seen = HashSet::new();
        for c in &components {
            if c.id.trim().is_empty() {
                return Err(ConfiguratorError::InvalidCatalog(format!(
                    "component '{}' has an empty id",
                    c.title
                )));
            }
            if !seen.insert(c.id.as_str()) {
                return Err(ConfiguratorError::InvalidCatalog(format!(
                    "duplicate component id '{}'",
                    c.id
                )));
            }
            if !c.price.is_finite() || c.price < 0.0 {
                return Err(ConfiguratorError::InvalidCatalog(format!(
                    "component '{}' has invalid price {}",
                    c.id, c.price
                )));
            }
        }
        Ok(Self { components })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let components: Vec<Component> = serde_json::from_str(json)?;
        Self::from_components(components)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Like [`Catalog::get`], failing with `ComponentNotFound`.
    pub fn require(&self, id: &str) -> Result<&Component> {
        self.get(id)
            .ok_or_else(|| ConfiguratorError::ComponentNotFound(id.to_string()))
    }

    /// Components that may occupy `slot`, in catalog order.
    pub fn for_slot(&self, slot: Slot) -> impl Iterator<Item = &Component> + '_ {
        self.components.iter().filter(move |c| c.fits(slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> + '_ {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

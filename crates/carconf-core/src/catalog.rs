//! Part definitions and the fixed catalog of parts a session can select.
//!
//! A [`PartRegistry`] is validated once at construction and is read-only
//! afterwards. Catalog order is preserved and used for listing.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfiguratorError, Result};

/// Identifier the external cart service uses for a part.
pub type ExternalId = u64;

/// Internal identifier of a part (e.g. `car-body`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartId(String);

impl PartId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PartId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PartId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for PartId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PartId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A selectable part of the car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Internal identifier.
    pub id: PartId,
    /// Product identifier in the external cart service.
    pub external_id: ExternalId,
    /// Display name.
    pub name: String,
}

impl Part {
    /// Create a new part.
    pub fn new(id: impl Into<String>, external_id: ExternalId, name: impl Into<String>) -> Self {
        Self {
            id: PartId::new(id),
            external_id,
            name: name.into(),
        }
    }
}

/// The fixed, ordered catalog of parts for a session.
#[derive(Debug, Clone)]
pub struct PartRegistry {
    parts: Vec<Part>,
    index: HashMap<PartId, usize>,
}

impl PartRegistry {
    /// Build a registry from catalog entries, preserving their order.
    ///
    /// Fails on an empty catalog or on a repeated id.
    pub fn new(parts: Vec<Part>) -> Result<Self> {
        if parts.is_empty() {
            return Err(ConfiguratorError::EmptyCatalog);
        }

        let mut index = HashMap::with_capacity(parts.len());
        for (pos, part) in parts.iter().enumerate() {
            if index.insert(part.id.clone(), pos).is_some() {
                return Err(ConfiguratorError::DuplicatePart(part.id.to_string()));
            }
        }

        Ok(Self { parts, index })
    }

    /// The built-in five-part car catalog.
    pub fn car_default() -> Result<Self> {
        Self::new(default_parts())
    }

    /// All parts, in catalog order.
    pub fn all_parts(&self) -> &[Part] {
        &self.parts
    }

    /// Look up a part by id.
    pub fn lookup(&self, id: &str) -> Result<&Part> {
        self.index
            .get(id)
            .map(|&pos| &self.parts[pos])
            .ok_or_else(|| ConfiguratorError::PartNotFound(id.to_string()))
    }

    /// Display name of a part, if it is in the catalog.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&pos| self.parts[pos].name.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of parts in the catalog.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Catalog entries for the built-in car.
pub fn default_parts() -> Vec<Part> {
    vec![
        Part::new("car-body", 264179002, "Car Body"),
        Part::new("car-roof", 96397398, "Car Roof"),
        Part::new("car-window", 264181001, "Car Window"),
        Part::new("wheel-rear", 264121059, "Rear Wheel"),
        Part::new("wheel-front", 264156021, "Front Wheel"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_order() {
        let registry = PartRegistry::car_default().unwrap();
        let ids: Vec<&str> = registry.all_parts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["car-body", "car-roof", "car-window", "wheel-rear", "wheel-front"]
        );
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn built_in_catalog_is_valid() {
        let parts = default_parts();
        assert!(!parts.is_empty());
        for (i, part) in parts.iter().enumerate() {
            assert!(
                !parts[i + 1..].iter().any(|p| p.id == part.id),
                "repeated id {}",
                part.id
            );
        }
        assert!(PartRegistry::new(parts).is_ok());
        assert!(PartRegistry::car_default().is_ok());
    }

    #[test]
    fn lookup_known_part() {
        let registry = PartRegistry::car_default().unwrap();
        let part = registry.lookup("car-roof").unwrap();
        assert_eq!(part.external_id, 96397398);
        assert_eq!(part.name, "Car Roof");
        assert_eq!(registry.name_of("wheel-rear"), Some("Rear Wheel"));
    }

    #[test]
    fn lookup_unknown_part() {
        let registry = PartRegistry::car_default().unwrap();
        assert_eq!(
            registry.lookup("car-hood"),
            Err(ConfiguratorError::PartNotFound("car-hood".into()))
        );
        assert_eq!(registry.name_of("car-hood"), None);
        assert!(!registry.contains("car-hood"));
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(
            PartRegistry::new(Vec::new()),
            Err(ConfiguratorError::EmptyCatalog)
        ));
    }

    #[test]
    fn duplicate_id_rejected() {
        let parts = vec![Part::new("a", 1, "A"), Part::new("a", 2, "Also A")];
        assert_eq!(
            PartRegistry::new(parts).unwrap_err(),
            ConfiguratorError::DuplicatePart("a".into())
        );
    }

    #[test]
    fn part_id_compares_with_str() {
        let id = PartId::from("car-body");
        assert_eq!(id, "car-body");
        assert_eq!(id.to_string(), "car-body");
    }

    #[test]
    fn part_deserializes_from_json() {
        let json = r#"{"id":"door","external_id":42,"name":"Door"}"#;
        let part: Part = serde_json::from_str(json).unwrap();
        assert_eq!(part, Part::new("door", 42, "Door"));
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Immutable unit catalog for Lane Rush.
//!
//! The catalog parses the embedded card table exactly once, validates every
//! archetype against the simulation's load-time invariants, and afterwards
//! serves read-only lookups. A card that fails validation aborts the load:
//! a catalog with a zero-speed unit would divide by zero deep inside tick
//! processing, so the failure has to surface here.

use std::{collections::HashMap, sync::Arc};

use lane_rush_core::UnitArchetype;

mod cards;

/// Errors raised while loading or querying the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A card payload was not a valid archetype document.
    #[error("card {index} is not a valid archetype document")]
    MalformedCard {
        /// Zero-based index of the offending card in the embedded table.
        index: usize,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// Two cards share one catalog name.
    #[error("duplicate card name {name:?}")]
    DuplicateName {
        /// Name that appeared more than once.
        name: String,
    },
    /// An archetype stat violates a simulation invariant.
    #[error("archetype {name:?} rejected: {reason}")]
    InvalidArchetype {
        /// Name of the offending archetype.
        name: String,
        /// Invariant that was violated.
        reason: &'static str,
    },
    /// A lookup referenced a name the catalog does not carry.
    #[error("unknown unit {name:?}")]
    UnknownUnit {
        /// Name that failed to resolve.
        name: String,
    },
}

/// Validates the stats of a single archetype.
///
/// Shared with the ingestion boundary, which receives full archetype
/// payloads over the wire and must not admit one the catalog would have
/// refused to load.
pub fn validate(archetype: &UnitArchetype) -> Result<(), CatalogError> {
    let invalid = |reason| CatalogError::InvalidArchetype {
        name: archetype.name.clone(),
        reason,
    };

    if archetype.name.is_empty() {
        return Err(invalid("empty name"));
    }
    if !(archetype.speed > 0.0) {
        return Err(invalid("speed must be positive"));
    }
    if !(archetype.size > 0.0) {
        return Err(invalid("size must be positive"));
    }
    if !(archetype.health > 0.0) {
        return Err(invalid("health must be positive"));
    }
    if !archetype.power.is_finite() {
        return Err(invalid("power must be finite"));
    }
    Ok(())
}

/// Read-only lookup over every purchasable archetype.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<Arc<UnitArchetype>>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Parses and validates the embedded card table.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_cards(cards::CARDS)
    }

    fn from_cards(cards: &[&str]) -> Result<Self, CatalogError> {
        let mut entries = Vec::with_capacity(cards.len());
        let mut by_name = HashMap::with_capacity(cards.len());

        for (index, card) in cards.iter().enumerate() {
            let archetype: UnitArchetype = serde_json::from_str(card)
                .map_err(|source| CatalogError::MalformedCard { index, source })?;
            validate(&archetype)?;

            if by_name
                .insert(archetype.name.clone(), entries.len())
                .is_some()
            {
                return Err(CatalogError::DuplicateName {
                    name: archetype.name,
                });
            }
            entries.push(Arc::new(archetype));
        }

        Ok(Self { entries, by_name })
    }

    /// Resolves an archetype by catalog name.
    pub fn get(&self, name: &str) -> Result<&Arc<UnitArchetype>, CatalogError> {
        self.by_name
            .get(name)
            .map(|index| &self.entries[*index])
            .ok_or_else(|| CatalogError::UnknownUnit {
                name: name.to_owned(),
            })
    }

    /// Iterator over every archetype in embedded card order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<UnitArchetype>> {
        self.entries.iter()
    }

    /// Number of archetypes carried by the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

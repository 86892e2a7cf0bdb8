//! The ordered property collection and its document encoding.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rules;
use crate::types::{Property, PropertyId};

/// Ordered collection of properties, newest first.
///
/// Invariants: no two records share an id, and every record satisfies the
/// roof-size bound. Both are checked on every way in: [`insert_front`] and
/// [`from_records`].
///
/// [`insert_front`]: PropertyCollection::insert_front
/// [`from_records`]: PropertyCollection::from_records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyCollection {
    records: Vec<Property>,
}

impl PropertyCollection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from records in stored order, checking both
    /// collection invariants.
    pub fn from_records(records: Vec<Property>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id().clone()) {
                return Err(Error::DuplicateId {
                    id: record.id().to_string(),
                });
            }
            if !record.has_valid_roof_size() {
                return Err(Error::validation_field(
                    "roofArea",
                    format!(
                        "property {} has roof area {} outside the accepted bounds",
                        record.id(),
                        record.roof_area()
                    ),
                ));
            }
        }
        Ok(Self { records })
    }

    /// Decode a synchronization document (a JSON array of records).
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let records: Vec<Property> = serde_json::from_slice(bytes)?;
        Self::from_records(records)
    }

    /// Encode as a synchronization document: a pretty-printed JSON array
    /// with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Insert a new record at the front. Rejects a duplicate id without
    /// changing the collection.
    pub fn insert_front(&mut self, property: Property) -> Result<()> {
        if self.contains(property.id()) {
            return Err(Error::DuplicateId {
                id: property.id().to_string(),
            });
        }
        self.records.insert(0, property);
        Ok(())
    }

    /// Remove a record by id, returning it if it was present.
    pub fn remove(&mut self, id: &PropertyId) -> Option<Property> {
        let index = self.records.iter().position(|p| p.id() == id)?;
        Some(self.records.remove(index))
    }

    /// Look up a record by id.
    pub fn get(&self, id: &PropertyId) -> Option<&Property> {
        self.records.iter().find(|p| p.id() == id)
    }

    /// Whether a record with this id exists.
    pub fn contains(&self, id: &PropertyId) -> bool {
        self.get(id).is_some()
    }

    /// Records, newest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.records.iter()
    }

    /// Records as a slice, newest first.
    pub fn as_slice(&self) -> &[Property] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of stored capacity snapshots, in watts.
    pub fn total_capacity_watts(&self) -> f64 {
        self.records.iter().map(Property::capacity_watts).sum()
    }

    /// Portfolio totals.
    pub fn summary(&self) -> PortfolioSummary {
        let total_capacity_watts = self.total_capacity_watts();
        PortfolioSummary {
            properties: self.len(),
            total_capacity_watts,
            total_capacity_mw: rules::to_mw(total_capacity_watts),
        }
    }
}

impl<'de> Deserialize<'de> for PropertyCollection {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<Property>::deserialize(deserializer)?;
        Self::from_records(records).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a PropertyCollection {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Totals across a portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioSummary {
    /// Number of properties.
    pub properties: usize,
    /// Total capacity in watts.
    pub total_capacity_watts: f64,
    /// Total capacity in megawatts.
    pub total_capacity_mw: f64,
}

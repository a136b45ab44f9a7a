//! The in-memory station catalog.

use std::collections::HashMap;

use crate::domain::{StationId, StationRecord};

/// Error building a catalog from source records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// Two records share an id
    #[error("duplicate station id {0}")]
    DuplicateId(StationId),
}

/// Immutable set of station records, loaded once per run.
///
/// Iteration order is insertion order, which for file-backed catalogs is
/// the order of entries in the source file. Resolution tie-breaks depend on
/// this order, so it is never re-sorted.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    records: Vec<StationRecord>,
    by_id: HashMap<StationId, usize>,
}

impl StationCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(records: Vec<StationRecord>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }

        Ok(Self { records, by_id })
    }

    /// Look up a record by exact id.
    pub fn get(&self, id: &StationId) -> Option<&StationRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    /// All records in catalog order.
    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationRecord> {
        self.records.iter()
    }

    /// Records whose name matches exactly, in catalog order.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a StationRecord> + 'a {
        self.records.iter().filter(move |r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn record(id: &str, name: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord::new(StationId::parse(id).unwrap(), name, Coordinate::new(lat, lon))
    }

    #[test]
    fn lookup_by_id() {
        let catalog = StationCatalog::new(vec![
            record("101", "Union Sq", 40.7359, -73.9911),
            record("250", "Grand Central", 40.7527, -73.9772),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let gc = catalog.get(&StationId::parse("250").unwrap()).unwrap();
        assert_eq!(gc.name, "Grand Central");
        assert!(catalog.get(&StationId::parse("999").unwrap()).is_none());
    }

    #[test]
    fn preserves_insertion_order() {
        let catalog = StationCatalog::new(vec![
            record("Z1", "Last Alphabetically", 0.0, 0.0),
            record("A1", "First Alphabetically", 0.0, 0.0),
        ])
        .unwrap();

        let ids: Vec<_> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Z1", "A1"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = StationCatalog::new(vec![
            record("101", "Union Sq", 40.7359, -73.9911),
            record("101", "Union Sq", 40.7359, -73.9911),
        ])
        .unwrap_err();

        assert_eq!(err, CatalogError::DuplicateId(StationId::parse("101").unwrap()));
        assert_eq!(err.to_string(), "duplicate station id 101");
    }

    #[test]
    fn named_filters_exact_name() {
        let catalog = StationCatalog::new(vec![
            record("101", "Union Sq", 40.7359, -73.9911),
            record("101N", "Union Sq", 40.73591, -73.99109),
            record("102", "Union Square", 40.7359, -73.9911),
        ])
        .unwrap();

        let ids: Vec<_> = catalog.named("Union Sq").map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["101", "101N"]);
    }

    #[test]
    fn empty_catalog() {
        let catalog = StationCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.iter().count(), 0);
    }
}

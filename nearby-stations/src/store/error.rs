//! Store error types.

use std::path::PathBuf;

use crate::catalog::CatalogError;

/// Errors reading or writing the data files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// File could not be read or written
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not the expected JSON
    #[error("{}: invalid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A station entry could not be turned into a record
    #[error("station {id}: {message}")]
    Station { id: String, message: String },

    /// The station records do not form a valid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Station {
            id: "101".into(),
            message: "invalid coordinates".into(),
        };
        assert_eq!(err.to_string(), "station 101: invalid coordinates");

        let err = StoreError::Io {
            path: PathBuf::from("data/stations.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "data/stations.json: not found");
    }
}

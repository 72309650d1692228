use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Site;

/// Errors that can occur while fetching the candidate list
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Supplies the unranked candidate list for a query
///
/// Failures surface here, before any candidate reaches the ranking engine.
pub trait CatalogSource {
    fn sites(&self) -> Result<Vec<Site>, CatalogError>;
}

/// Catalog backed by a fixed list of sites
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    sites: Vec<Site>,
}

impl InMemoryCatalog {
    pub fn new(sites: Vec<Site>) -> Self {
        Self { sites }
    }
}

impl CatalogSource for InMemoryCatalog {
    fn sites(&self) -> Result<Vec<Site>, CatalogError> {
        Ok(self.sites.clone())
    }
}

/// Catalog read from a JSON array of sites on every call
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn sites(&self) -> Result<Vec<Site>, CatalogError> {
        tracing::debug!("Reading catalog from {}", self.path.display());

        let raw = fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;

        let sites: Vec<Site> = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("Loaded {} sites from {}", sites.len(), self.path.display());
        Ok(sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_json_catalog_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "S1", "name": "Colosseum", "type": "MONUMENT",
                 "location": {{"latitude": 41.8902, "longitude": 12.4922}},
                 "averageRating": 9.1}}]"#
        )
        .unwrap();

        let sites = JsonFileCatalog::new(file.path()).sites().unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].name, "Colosseum");
    }

    #[test]
    fn test_invalid_coordinate_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "S1", "name": "Nowhere", "type": "MONUMENT",
                 "location": {{"latitude": 141.0, "longitude": 12.0}},
                 "averageRating": 5.0}}]"#
        )
        .unwrap();

        let err = JsonFileCatalog::new(file.path()).sites().unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = JsonFileCatalog::new("/definitely/not/here.json").sites().unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}

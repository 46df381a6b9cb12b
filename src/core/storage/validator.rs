//! Catalog consistency checking.
//!
//! Compares the document directories on disk with the ids listed in the
//! catalog. Nothing is modified; the report says what disagrees.

use crate::core::error::Result;
use crate::core::storage::file_store::FileStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A catalogued directory missing one of its files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteDocument {
    pub id: String,
    pub missing_body: bool,
    pub missing_config: bool,
}

/// Result of a consistency scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub documents_in_catalog: usize,
    pub directories_scanned: usize,

    /// Directories on disk with no catalog entry
    pub orphan_dirs: Vec<String>,

    /// Catalog entries with no directory
    pub missing_dirs: Vec<String>,

    pub incomplete: Vec<IncompleteDocument>,

    pub is_consistent: bool,

    /// RFC 3339 timestamp
    pub validated_at: String,
}

/// Directory scan result for one entry under the root
struct DirScan {
    name: String,
    missing_body: bool,
    missing_config: bool,
}

/// Read-only validator over a document tree
pub struct Validator<'a> {
    files: &'a FileStore,
}

impl<'a> Validator<'a> {
    pub fn new(files: &'a FileStore) -> Self {
        Self { files }
    }

    /// Scan every directory, `batch_size` at a time, against `catalog_ids`
    pub async fn validate(
        &self,
        catalog_ids: &BTreeSet<String>,
        batch_size: usize,
    ) -> Result<ValidationReport> {
        let files = self.files;
        let mut scans = files
            .for_each_document_dir(
                |name| async move {
                    let found = files.inspect_document_dir(&name).await?;
                    Ok(Some(DirScan {
                        name,
                        missing_body: !found.has_body,
                        missing_config: !found.has_config,
                    }))
                },
                batch_size,
            )
            .await?;
        scans.sort_by(|a, b| a.name.cmp(&b.name));

        let on_disk: BTreeSet<&str> = scans.iter().map(|s| s.name.as_str()).collect();

        let orphan_dirs: Vec<String> = scans
            .iter()
            .filter(|s| !catalog_ids.contains(&s.name))
            .map(|s| s.name.clone())
            .collect();

        let missing_dirs: Vec<String> = catalog_ids
            .iter()
            .filter(|id| !on_disk.contains(id.as_str()))
            .cloned()
            .collect();

        let incomplete: Vec<IncompleteDocument> = scans
            .iter()
            .filter(|s| catalog_ids.contains(&s.name) && (s.missing_body || s.missing_config))
            .map(|s| IncompleteDocument {
                id: s.name.clone(),
                missing_body: s.missing_body,
                missing_config: s.missing_config,
            })
            .collect();

        let is_consistent =
            orphan_dirs.is_empty() && missing_dirs.is_empty() && incomplete.is_empty();

        if !is_consistent {
            tracing::warn!(
                "Document tree {:?} is inconsistent: {} orphan, {} missing, {} incomplete",
                files.root(),
                orphan_dirs.len(),
                missing_dirs.len(),
                incomplete.len()
            );
        }

        Ok(ValidationReport {
            documents_in_catalog: catalog_ids.len(),
            directories_scanned: scans.len(),
            orphan_dirs,
            missing_dirs,
            incomplete,
            is_consistent,
            validated_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

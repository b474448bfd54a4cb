//! Read-only merchant registry snapshot.
//!
//! Built once at startup and shared as `Arc<Registry>`; nothing mutates it
//! afterwards, so concurrent readers need no synchronisation.
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::MerchantRecord;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: Vec<MerchantRecord>,
}

impl Registry {
    /// Build a snapshot. Records without an id get their position as id;
    /// duplicate ids are rejected since ids drive dedup and intersection.
    pub fn from_records(records: Vec<MerchantRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(records.len());
        for (i, mut record) in records.into_iter().enumerate() {
            if record.id.is_empty() { record.id = i.to_string(); }
            if !seen.insert(record.id.clone()) {
                return Err(Error::InvalidConfig(format!("duplicate store id '{}'", record.id)));
            }
            out.push(record);
        }
        debug!(records = out.len(), "registry snapshot built");
        Ok(Self { records: out })
    }

    /// Load a JSON array of records.
    pub fn load_json(path: &Path) -> Result<Self> {
        if !path.exists() { return Err(Error::NotFound(path.display().to_string())); }
        let content = fs::read_to_string(path)?;
        let records: Vec<MerchantRecord> = serde_json::from_str(&content)?;
        let registry = Self::from_records(records)?;
        info!(path = %path.display(), records = registry.len(), "registry loaded");
        Ok(registry)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() { fs::create_dir_all(parent)?; }
        }
        fs::write(path, serde_json::to_string_pretty(&self.records)?)?;
        Ok(())
    }

    pub fn records(&self) -> &[MerchantRecord] { &self.records }
    pub fn into_records(self) -> Vec<MerchantRecord> { self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn get(&self, id: &str) -> Option<&MerchantRecord> { self.records.iter().find(|r| r.id == id) }

    /// Number of records carrying a description embedding.
    pub fn embedded_count(&self) -> usize { self.records.iter().filter(|r| r.embedding.is_some()).count() }
}

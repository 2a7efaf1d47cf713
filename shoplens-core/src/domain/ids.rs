use serde::{Deserialize, Serialize};
use std::fmt;

/// Content hash of a loaded dataset (BLAKE3 over canonical row content).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetHash(pub String);

impl DatasetHash {
    pub fn from_hash(hash: &str) -> Self {
        Self(hash.to_string())
    }
}

impl fmt::Display for DatasetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a filtered table: the dataset it came from plus the exact rows selected.
///
/// Two date ranges that select the same rows share a fingerprint, so the
/// aggregate cache treats them as the same input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableFingerprint(pub String);

impl TableFingerprint {
    /// Fingerprint a selection of row indices from a dataset.
    pub fn of_selection(dataset: &DatasetHash, indices: &[usize]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(dataset.0.as_bytes());
        hasher.update(&(indices.len() as u64).to_le_bytes());
        for &i in indices {
            hasher.update(&(i as u64).to_le_bytes());
        }
        Self(hasher.finalize().to_hex().to_string())
    }

    /// Short prefix for log lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for TableFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

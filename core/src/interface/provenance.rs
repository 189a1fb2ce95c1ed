use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceEntry {
    pub stage: String,
    pub value: String,
}

/// Append-only audit trail of processing stages.
///
/// `append` leaves the receiver untouched and returns the extended log, so
/// the metadata record and each target record can carry their own copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    entries: Vec<ProvenanceEntry>,
}

impl Provenance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, stage: &str, value: impl ToString) -> Provenance {
        let mut entries = self.entries.clone();
        entries.push(ProvenanceEntry {
            stage: stage.to_string(),
            value: value.to_string(),
        });
        Provenance { entries }
    }

    pub fn entries(&self) -> &[ProvenanceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", entry.stage, entry.value)?;
        }
        Ok(())
    }
}

//! Batch Collector: every record of a pass, gathered before emission

use crate::record::CandidateRecord;

/// Ordered records of one pass, in the order the locator streamed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateBatch {
    records: Vec<CandidateRecord>,
}

impl CandidateBatch {
    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the pass produced no record
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in stream order
    pub fn iter(&self) -> impl Iterator<Item = &CandidateRecord> {
        self.records.iter()
    }
}

/// Projector output is collected as-is; `None` entries are dropped
impl FromIterator<Option<CandidateRecord>> for CandidateBatch {
    fn from_iter<I: IntoIterator<Item = Option<CandidateRecord>>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().flatten().collect(),
        }
    }
}

impl<'batch> IntoIterator for &'batch CandidateBatch {
    type Item = &'batch CandidateRecord;
    type IntoIter = std::slice::Iter<'batch, CandidateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

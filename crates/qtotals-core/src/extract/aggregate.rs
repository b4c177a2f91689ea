//! Folds classified rows into the lookup structure.

use thiserror::Error;

use crate::models::totals::{Bucket, BucketKey, QualifyingTotal, QualifyingTotals, Row, WeightClass};

/// A second row for a weight class already present in its bucket.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("duplicate weight class {weight_class} in {key}: kept {kept}, rejected {rejected}")]
pub struct DuplicateWeightClass {
    pub key: BucketKey,
    pub weight_class: WeightClass,
    /// Total of the first occurrence, which stays in the bucket.
    pub kept: QualifyingTotal,
    /// Total of the rejected row.
    pub rejected: QualifyingTotal,
}

/// Incremental builder for [`QualifyingTotals`].
///
/// Buckets are created on first sight and keep first-seen order. Weight
/// classes are unique per bucket; the first occurrence wins.
#[derive(Debug, Default)]
pub struct TotalsBuilder {
    totals: QualifyingTotals,
}

impl TotalsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row to its bucket.
    pub fn push(&mut self, row: Row) -> Result<(), DuplicateWeightClass> {
        let key = row.key();
        let index = match self.totals.index.get(&key) {
            Some(&index) => index,
            None => {
                let index = self.totals.buckets.len();
                self.totals.buckets.push(Bucket {
                    key: key.clone(),
                    entries: Vec::new(),
                });
                self.totals.index.insert(key, index);
                index
            }
        };

        let bucket = &mut self.totals.buckets[index];
        if let Some(existing) = bucket
            .entries
            .iter()
            .find(|entry| entry.weight_class == row.weight_class)
        {
            return Err(DuplicateWeightClass {
                key: bucket.key.clone(),
                weight_class: row.weight_class,
                kept: existing.qualifying_total.clone(),
                rejected: row.qualifying_total,
            });
        }

        bucket.entries.push(row.into_entry());
        Ok(())
    }

    /// Number of rows accepted so far.
    pub fn row_count(&self) -> usize {
        self.totals.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn finish(self) -> QualifyingTotals {
        self.totals
    }
}

//! Aggregation of sampler reads.

use crate::sampler::Sample;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Distinct assignment with its multiplicity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleEntry {
    pub sample: Sample,
    pub num_occurrences: usize,
}

/// Reads merged by assignment, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    entries: Vec<SampleEntry>,
    num_reads: usize,
}

impl SampleSet {
    /// Merges identical assignments; each entry keeps the energy of its first
    /// occurrence.
    pub fn aggregate(samples: Vec<Sample>) -> Self {
        let num_reads = samples.len();
        let mut entries: Vec<SampleEntry> = Vec::new();
        let mut index: HashMap<Vec<u8>, usize> = HashMap::with_capacity(num_reads);

        for sample in samples {
            match index.get(&sample.assignment) {
                Some(&slot) => entries[slot].num_occurrences += 1,
                None => {
                    index.insert(sample.assignment.clone(), entries.len());
                    entries.push(SampleEntry {
                        sample,
                        num_occurrences: 1,
                    });
                }
            }
        }

        Self { entries, num_reads }
    }

    pub fn entries(&self) -> &[SampleEntry] {
        &self.entries
    }

    /// Number of distinct assignments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads that went into this set.
    pub fn num_reads(&self) -> usize {
        self.num_reads
    }

    /// Minimum-energy entry; among equal energies the first seen wins.
    ///
    /// Entries with a NaN energy are never selected.
    pub fn lowest(&self) -> Option<&SampleEntry> {
        self.entries
            .iter()
            .filter(|entry| !entry.sample.energy.is_nan())
            .fold(None, |best, entry| match best {
                Some(current) if current.sample.energy.total_cmp(&entry.sample.energy).is_le() => {
                    Some(current)
                }
                _ => Some(entry),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(bits: &[u8], energy: f64) -> Sample {
        Sample::new(bits.to_vec(), energy)
    }

    #[test]
    fn test_duplicates_merge() {
        let set = SampleSet::aggregate(vec![
            sample(&[1, 0], -1.0),
            sample(&[0, 1], -2.0),
            sample(&[1, 0], -1.0),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.num_reads(), 3);
        assert_eq!(set.entries()[0].num_occurrences, 2);
        assert_eq!(set.entries()[1].num_occurrences, 1);
    }

    #[test]
    fn test_lowest_prefers_first_seen_on_tie() {
        let set = SampleSet::aggregate(vec![
            sample(&[1, 1], 0.0),
            sample(&[0, 1], -2.0),
            sample(&[1, 0], -2.0),
            sample(&[0, 1], -2.0),
        ]);
        let best = set.lowest().unwrap();
        assert_eq!(best.sample.assignment, vec![0, 1]);
        assert_eq!(best.num_occurrences, 2);
    }

    #[test]
    fn test_nan_energy_never_selected() {
        let set = SampleSet::aggregate(vec![
            sample(&[1, 0], -1.0),
            sample(&[0, 1], f64::NAN),
        ]);
        assert_eq!(set.lowest().unwrap().sample.assignment, vec![1, 0]);

        let only_nan = SampleSet::aggregate(vec![sample(&[1, 1], f64::NAN)]);
        assert!(only_nan.lowest().is_none());
    }

    #[test]
    fn test_empty_set_has_no_lowest() {
        let set = SampleSet::aggregate(Vec::new());
        assert!(set.is_empty());
        assert!(set.lowest().is_none());
    }
}

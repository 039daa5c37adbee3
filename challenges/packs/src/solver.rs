use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ConfigError;

/// Pack sizes offered when no configuration overrides them.
pub const DEFAULT_PACK_SIZES: [u64; 5] = [250, 500, 1000, 2000, 5000];

/// The pack sizes available to the solver: non-empty, strictly ascending, all positive.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSizes(Vec<u64>);

impl PackSizes {
    pub fn new(mut sizes: Vec<u64>) -> Result<PackSizes, ConfigError> {
        if sizes.is_empty() {
            return Err(ConfigError::Empty);
        }
        if sizes.contains(&0) {
            return Err(ConfigError::NonPositive);
        }
        sizes.sort_unstable();
        sizes.dedup();
        Ok(PackSizes(sizes))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn smallest(&self) -> u64 {
        self.0[0]
    }

    pub fn largest(&self) -> u64 {
        self.0[self.0.len() - 1]
    }

    pub fn contains(&self, size: u64) -> bool {
        self.0.binary_search(&size).is_ok()
    }

    pub fn solve(&self, target: u64) -> PackSelection {
        solve(self, target)
    }
}

impl Default for PackSizes {
    fn default() -> Self {
        PackSizes(DEFAULT_PACK_SIZES.to_vec())
    }
}

/// Pack size to number of packs of that size. Every stored count is at least 1.
///
/// Serializes as a JSON object keyed by the decimal pack size, e.g. `{"250":1,"500":1}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackSelection(BTreeMap<u64, u64>);

impl PackSelection {
    fn add(&mut self, size: u64, count: u64) {
        if count > 0 {
            *self.0.entry(size).or_insert(0) += count;
        }
    }

    pub fn count(&self, size: u64) -> u64 {
        self.0.get(&size).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.0.iter().map(|(size, count)| (*size, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct pack sizes used.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of items shipped, `sum(size * count)`.
    pub fn total_items(&self) -> u64 {
        self.iter().map(|(size, count)| size * count).sum()
    }

    /// Number of packs shipped, `sum(count)`.
    pub fn pack_count(&self) -> u64 {
        self.0.values().sum()
    }
}

impl From<BTreeMap<u64, u64>> for PackSelection {
    fn from(map: BTreeMap<u64, u64>) -> Self {
        let mut selection = PackSelection::default();
        for (size, count) in map {
            selection.add(size, count);
        }
        selection
    }
}

// Greedy selection, largest sizes first.
//
// A target above the largest size is first reduced with as many of the largest
// packs as fit. The remainder is then walked down the adjacent size pairs
// (lo, hi): when lo <= target <= hi, a single hi pack wins if the shortfall
// hi - target is smaller than the smallest pack, because no combination of
// smaller packs could fill that gap without an extra pack. Otherwise as many
// lo packs as fit are taken and the walk continues with the remainder.
// Whatever is left at the end is below the smallest size and gets one of those.
pub fn solve(sizes: &PackSizes, target: u64) -> PackSelection {
    let smallest = sizes.smallest();
    let largest = sizes.largest();

    let mut selection = PackSelection::default();
    let mut target = target;

    if target > largest {
        selection.add(largest, target / largest);
        target %= largest;
    }

    for pair in sizes.as_slice().windows(2).rev() {
        if target == 0 {
            break;
        }
        let (lo, hi) = (pair[0], pair[1]);
        if lo <= target && target <= hi {
            if hi - target < smallest {
                selection.add(hi, 1);
                target = 0;
            } else {
                selection.add(lo, target / lo);
                target %= lo;
            }
        }
    }

    if target > 0 {
        selection.add(smallest, 1);
    }

    selection
}

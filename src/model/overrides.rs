use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Manually placed spot centers keyed by `(row, col)`.
///
/// Keys are not bounds-checked; `GridSession` clears the map whenever the
/// lattice shape or origin changes so stale indices never survive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<OverrideEntry>", into = "Vec<OverrideEntry>")]
pub struct SpotOverrideMap {
    entries: BTreeMap<(u32, u32), (f64, f64)>,
}

/// Persisted form of one override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub row: u32,
    pub col: u32,
    pub x: f64,
    pub y: f64,
}

impl SpotOverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_override(&mut self, row: u32, col: u32, x: f64, y: f64) {
        self.entries.insert((row, col), (x, y));
    }

    pub fn remove(&mut self, row: u32, col: u32) -> Option<(f64, f64)> {
        self.entries.remove(&(row, col))
    }

    pub fn get(&self, row: u32, col: u32) -> Option<(f64, f64)> {
        self.entries.get(&(row, col)).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = OverrideEntry> + '_ {
        self.entries
            .iter()
            .map(|(&(row, col), &(x, y))| OverrideEntry { row, col, x, y })
    }
}

impl From<Vec<OverrideEntry>> for SpotOverrideMap {
    fn from(value: Vec<OverrideEntry>) -> Self {
        let mut map = SpotOverrideMap::new();
        for e in value {
            map.set_override(e.row, e.col, e.x, e.y);
        }
        map
    }
}

impl From<SpotOverrideMap> for Vec<OverrideEntry> {
    fn from(value: SpotOverrideMap) -> Self {
        value.iter().collect()
    }
}

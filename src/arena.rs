//! Arena geometry: a 1-D battle line with per-tile heights and per-team
//! starting offsets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub length: i64,
    /// Tile heights; shorter vectors are treated as flat ground beyond the
    /// listed tiles.
    pub heights: Vec<i32>,
    /// Starting offsets per team, outermost slot first.
    pub starts: [Vec<i64>; 2],
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            length: 20,
            heights: vec![0; 20],
            starts: [vec![1, 2, 3, 4], vec![18, 17, 16, 15]],
        }
    }
}

impl Arena {
    /// Load from a YAML or JSON file, picked by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(&path)?;
        let path_str = path.as_ref().to_string_lossy().to_lowercase();
        if path_str.ends_with(".json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    pub fn clamp(&self, pos: i64) -> i64 {
        pos.clamp(0, self.length - 1)
    }

    /// Starting tile for a team slot; slots beyond the listed offsets stack
    /// on the last one.
    pub fn start(&self, team: usize, slot: usize) -> i64 {
        let offsets = &self.starts[team.min(1)];
        let pos = offsets
            .get(slot)
            .or_else(|| offsets.last())
            .copied()
            .unwrap_or(0);
        self.clamp(pos)
    }

    pub fn height_at(&self, pos: i64) -> i32 {
        if pos < 0 {
            return 0;
        }
        self.heights.get(pos as usize).copied().unwrap_or(0)
    }

    /// Distance between two tiles: (horizontal tiles, elevation delta seen
    /// from `a` looking at `b`).
    pub fn distance(&self, a: i64, b: i64) -> (i64, i32) {
        ((a - b).abs(), self.height_at(b) - self.height_at(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_bounds() {
        let arena = Arena::default();
        assert_eq!(arena.clamp(-3), 0);
        assert_eq!(arena.clamp(25), 19);
        assert_eq!(arena.clamp(7), 7);
    }

    #[test]
    fn distance_reports_horizontal_and_elevation() {
        let arena = Arena {
            length: 6,
            heights: vec![0, 0, 2, 2, 1, 0],
            starts: [vec![0], vec![5]],
        };
        assert_eq!(arena.distance(0, 3), (3, 2));
        assert_eq!(arena.distance(3, 0), (3, -2));
        assert_eq!(arena.distance(4, 4), (0, 0));
    }

    #[test]
    fn start_slots_saturate() {
        let arena = Arena::default();
        assert_eq!(arena.start(0, 0), 1);
        assert_eq!(arena.start(1, 3), 15);
        assert_eq!(arena.start(1, 9), 15);
    }
}

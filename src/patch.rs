//! Patch data: immutable ability, equipment and base-stat lookup tables.
//!
//! Everything here is loaded once and never mutated. Lookups for unknown
//! names fall back to documented defaults instead of erroring, so a matchup
//! file naming gear from a newer patch degrades to "nothing equipped" rather
//! than aborting the run.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::status::Status;

/// Elemental affinity of a weapon or resistance set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Water,
    Earth,
    Wind,
    Holy,
    Dark,
}

/// One piece of gear. A default (all-zero) value doubles as "empty slot".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub name: String,
    /// Free-form weapon class ("katana", "crossbow", ...). Empty for
    /// non-weapons. Validated at damage dispatch, not at load time.
    pub weapon_type: String,
    pub wp: i32,
    pub range: i32,
    pub element: Option<Element>,
    pub hp_bonus: i32,
    pub mp_bonus: i32,
    pub speed_bonus: i32,
    pub pa_bonus: i32,
    pub ma_bonus: i32,
    pub move_bonus: i32,
    pub jump_bonus: i32,
    pub phys_ev: i32,
    pub magic_ev: i32,
    /// Statuses this weapon may inflict on a damaging hit.
    pub chance_to_add: Vec<Status>,
    /// Statuses this weapon may strip on a damaging hit.
    pub chance_to_cancel: Vec<Status>,
    pub absorbs: Vec<Element>,
    pub halves: Vec<Element>,
    pub weaknesses: Vec<Element>,
    pub strengthens: Vec<Element>,
    /// Statuses the wearer can never receive.
    pub immune_to: Vec<Status>,
    /// Statuses the wearer starts the battle with.
    pub initial: Vec<Status>,
}

impl Equipment {
    pub fn is_weapon(&self) -> bool {
        !self.weapon_type.is_empty() || self.wp > 0
    }

    pub fn is_gun(&self) -> bool {
        self.weapon_type.eq_ignore_ascii_case("gun")
    }
}

/// Ability metadata. Only the MP cost matters to the simulator (it feeds the
/// AI's caster-hate heuristic); unknown names cost nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ability {
    pub name: String,
    pub mp_cost: i32,
}

/// Per-job, per-gender base stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    pub hp: i32,
    pub mp: i32,
    pub speed: i32,
    pub pa: i32,
    pub ma: i32,
    #[serde(rename = "move")]
    pub movement: i32,
    pub jump: i32,
    pub class_ev: i32,
    /// Innate skills such as "Fly".
    pub innates: Vec<String>,
}

/// The documented fallback for jobs missing from the patch: a serviceable
/// generic soldier, so a battle with an unknown job still runs.
impl Default for BaseStats {
    fn default() -> Self {
        Self {
            hp: 100,
            mp: 40,
            speed: 8,
            pa: 5,
            ma: 5,
            movement: 3,
            jump: 3,
            class_ev: 5,
            innates: Vec::new(),
        }
    }
}

/// The full patch lookup. Base stats are keyed `"Job/Gender"` with a
/// genderless `"Job"` fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Patch {
    pub equipment: HashMap<String, Equipment>,
    pub abilities: HashMap<String, Ability>,
    pub base_stats: HashMap<String, BaseStats>,
}

impl Patch {
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

    /// Equipment by name; unknown or empty names yield an empty slot.
    pub fn equipment(&self, name: &str) -> Equipment {
        self.equipment.get(name).cloned().unwrap_or_default()
    }

    /// Ability by name; unknown names yield a zero-cost ability.
    pub fn ability(&self, name: &str) -> Ability {
        self.abilities.get(name).cloned().unwrap_or_default()
    }

    /// Base stats for a job/gender pair, falling back to the job alone and
    /// then to the generic default.
    pub fn base_stats(&self, job: &str, gender: &str) -> BaseStats {
        if let Some(stats) = self.base_stats.get(&format!("{job}/{gender}")) {
            return stats.clone();
        }
        self.base_stats.get(job).cloned().unwrap_or_default()
    }
}

//! Matchup files: the two four-unit teams a battle is built from.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

fn default_brave() -> i32 {
    70
}

fn default_faith() -> i32 {
    70
}

/// One raw combatant record as supplied by the team loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitConfig {
    pub name: String,
    pub job: String,
    #[serde(default = "UnitConfig::default_gender")]
    pub gender: String,
    pub sign: String,
    /// Brave and faith as percentages (0-100).
    #[serde(default = "default_brave")]
    pub brave: i32,
    #[serde(default = "default_faith")]
    pub faith: i32,
    #[serde(default)]
    pub mainhand: String,
    #[serde(default)]
    pub offhand: String,
    #[serde(default)]
    pub head: String,
    #[serde(default)]
    pub armor: String,
    #[serde(default)]
    pub accessory: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl UnitConfig {
    fn default_gender() -> String {
        "Monster".to_string()
    }
}

/// A full matchup: team 0 (left) versus team 1 (right).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchupConfig {
    pub left: Vec<UnitConfig>,
    pub right: Vec<UnitConfig>,
}

impl MatchupConfig {
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
}

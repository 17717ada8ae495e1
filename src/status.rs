//! Status conditions: the timed/flag partitions, duration table and
//! cancellation groups.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SimError;

/// Number of timed statuses. The timed variants come first in [`Status`] so
/// their discriminants double as indices into a combatant's counter array.
pub const TIMED_COUNT: usize = 15;

/// Every status condition a combatant can carry.
///
/// Timed statuses start at a fixed duration and tick down once per Status
/// Check phase. Flag statuses are plain booleans. `Critical` and `Death` are
/// derived from HP and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    // Timed.
    Charm,
    DeathSentence,
    DontAct,
    DontMove,
    Faith,
    Haste,
    Innocent,
    Poison,
    Protect,
    Reflect,
    Regen,
    Shell,
    Sleep,
    Slow,
    Stop,
    // Flags.
    Berserk,
    BloodSuck,
    Charging,
    Chicken,
    Confusion,
    Crystal,
    Defending,
    Float,
    Frog,
    Oil,
    Performing,
    Petrify,
    Reraise,
    Silence,
    Transparent,
    Undead,
    // Derived, never stored.
    Critical,
    Death,
}

/// Statuses cleared whenever the bearer takes damage.
pub const CANCELLED_BY_DAMAGE: &[Status] = &[Status::Charm, Status::Confusion, Status::Sleep];

/// Statuses cleared when the bearer dies.
pub const CANCELLED_ON_DEATH: &[Status] = &[
    Status::Berserk,
    Status::BloodSuck,
    Status::Confusion,
    Status::Charm,
    Status::Charging,
    Status::DeathSentence,
    Status::Defending,
    Status::DontMove,
    Status::DontAct,
    Status::Faith,
    Status::Float,
    Status::Haste,
    Status::Innocent,
    Status::Performing,
    Status::Poison,
    Status::Protect,
    Status::Reflect,
    Status::Regen,
    Status::Shell,
    Status::Slow,
    Status::Stop,
    Status::Transparent,
];

impl Status {
    /// Starting duration in ticks, `None` for flag and derived statuses.
    pub fn duration(self) -> Option<i32> {
        let ticks = match self {
            Status::Charm => 32,
            Status::DeathSentence => 32,
            Status::DontAct => 24,
            Status::DontMove => 24,
            Status::Faith => 32,
            Status::Haste => 32,
            Status::Innocent => 32,
            Status::Poison => 36,
            Status::Protect => 32,
            Status::Reflect => 32,
            Status::Regen => 36,
            Status::Shell => 32,
            Status::Sleep => 60,
            Status::Slow => 24,
            Status::Stop => 20,
            _ => return None,
        };
        Some(ticks)
    }

    /// Index into the timed-counter array, `None` for flag/derived statuses.
    pub fn timed_index(self) -> Option<usize> {
        let idx = self as usize;
        (idx < TIMED_COUNT).then_some(idx)
    }

    pub fn is_timed(self) -> bool {
        self.timed_index().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            Status::Charm => "Charm",
            Status::DeathSentence => "Death Sentence",
            Status::DontAct => "Don't Act",
            Status::DontMove => "Don't Move",
            Status::Faith => "Faith",
            Status::Haste => "Haste",
            Status::Innocent => "Innocent",
            Status::Poison => "Poison",
            Status::Protect => "Protect",
            Status::Reflect => "Reflect",
            Status::Regen => "Regen",
            Status::Shell => "Shell",
            Status::Sleep => "Sleep",
            Status::Slow => "Slow",
            Status::Stop => "Stop",
            Status::Berserk => "Berserk",
            Status::BloodSuck => "Blood Suck",
            Status::Charging => "Charging",
            Status::Chicken => "Chicken",
            Status::Confusion => "Confusion",
            Status::Crystal => "Crystal",
            Status::Defending => "Defending",
            Status::Float => "Float",
            Status::Frog => "Frog",
            Status::Oil => "Oil",
            Status::Performing => "Performing",
            Status::Petrify => "Petrify",
            Status::Reraise => "Reraise",
            Status::Silence => "Silence",
            Status::Transparent => "Transparent",
            Status::Undead => "Undead",
            Status::Critical => "Critical",
            Status::Death => "Death",
        }
    }

    /// Parse a status from the name used in patch and matchup files.
    /// Case-insensitive; punctuation and spacing are ignored, so
    /// "Don't Act" and "dont act" both work.
    pub fn parse(name: &str) -> Result<Self, SimError> {
        let folded: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let status = match folded.as_str() {
            "charm" => Status::Charm,
            "deathsentence" => Status::DeathSentence,
            "dontact" => Status::DontAct,
            "dontmove" => Status::DontMove,
            "faith" => Status::Faith,
            "haste" => Status::Haste,
            "innocent" => Status::Innocent,
            "poison" => Status::Poison,
            "protect" => Status::Protect,
            "reflect" => Status::Reflect,
            "regen" => Status::Regen,
            "shell" => Status::Shell,
            "sleep" => Status::Sleep,
            "slow" => Status::Slow,
            "stop" => Status::Stop,
            "berserk" => Status::Berserk,
            "bloodsuck" => Status::BloodSuck,
            "charging" => Status::Charging,
            "chicken" => Status::Chicken,
            "confusion" => Status::Confusion,
            "crystal" => Status::Crystal,
            "defending" => Status::Defending,
            "float" => Status::Float,
            "frog" => Status::Frog,
            "oil" => Status::Oil,
            "performing" => Status::Performing,
            "petrify" => Status::Petrify,
            "reraise" => Status::Reraise,
            "silence" => Status::Silence,
            "transparent" => Status::Transparent,
            "undead" => Status::Undead,
            "critical" => Status::Critical,
            "death" => Status::Death,
            _ => return Err(SimError::UnknownStatus(name.to_string())),
        };
        Ok(status)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Status::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_variants_lead_the_enum() {
        assert_eq!(Status::Charm.timed_index(), Some(0));
        assert_eq!(Status::Stop.timed_index(), Some(TIMED_COUNT - 1));
        assert!(Status::Berserk.timed_index().is_none());
        assert!(Status::Death.timed_index().is_none());
    }

    #[test]
    fn duration_table() {
        assert_eq!(Status::Sleep.duration(), Some(60));
        assert_eq!(Status::Stop.duration(), Some(20));
        assert_eq!(Status::Poison.duration(), Some(36));
        assert_eq!(Status::Haste.duration(), Some(32));
        assert_eq!(Status::Transparent.duration(), None);
    }

    #[test]
    fn cancellation_groups() {
        assert!(CANCELLED_BY_DAMAGE.contains(&Status::Sleep));
        assert!(!CANCELLED_BY_DAMAGE.contains(&Status::Poison));
        assert!(CANCELLED_ON_DEATH.contains(&Status::Transparent));
        assert!(CANCELLED_ON_DEATH.contains(&Status::DeathSentence));
        // Petrify, Undead and Reraise survive death.
        assert!(!CANCELLED_ON_DEATH.contains(&Status::Petrify));
        assert!(!CANCELLED_ON_DEATH.contains(&Status::Undead));
        assert!(!CANCELLED_ON_DEATH.contains(&Status::Reraise));
    }

    #[test]
    fn parse_accepts_display_names() {
        assert_eq!(Status::parse("Don't Act").unwrap(), Status::DontAct);
        assert_eq!(Status::parse("blood suck").unwrap(), Status::BloodSuck);
        assert_eq!(Status::parse("Death Sentence").unwrap(), Status::DeathSentence);
        assert!(Status::parse("Vampirism").is_err());
    }
}

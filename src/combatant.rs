//! Combatant entity: derived stats from base + equipment, status storage,
//! zodiac compatibility and the weapon attack-power dispatch.

use std::collections::HashSet;

use crate::config::UnitConfig;
use crate::error::SimError;
use crate::patch::{BaseStats, Element, Equipment, Patch};
use crate::simulation::Dice;
use crate::status::{Status, CANCELLED_ON_DEATH, TIMED_COUNT};

/// Active turns a dead unit lingers before crystallizing.
pub const CRYSTAL_TURNS: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Monster,
}

impl Gender {
    pub fn parse(name: &str) -> Result<Self, SimError> {
        match name.to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "monster" => Ok(Gender::Monster),
            _ => Err(SimError::UnknownGender(name.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
    Serpentarius,
}

impl Sign {
    pub fn parse(name: &str) -> Result<Self, SimError> {
        let sign = match name.to_ascii_lowercase().as_str() {
            "aries" => Sign::Aries,
            "taurus" => Sign::Taurus,
            "gemini" => Sign::Gemini,
            "cancer" => Sign::Cancer,
            "leo" => Sign::Leo,
            "virgo" => Sign::Virgo,
            "libra" => Sign::Libra,
            "scorpio" => Sign::Scorpio,
            "sagittarius" => Sign::Sagittarius,
            "capricorn" => Sign::Capricorn,
            "aquarius" => Sign::Aquarius,
            "pisces" => Sign::Pisces,
            "serpentarius" => Sign::Serpentarius,
            _ => return Err(SimError::UnknownSign(name.to_string())),
        };
        Ok(sign)
    }

    /// Chart index; Serpentarius sits outside the 12x12 chart.
    fn index(self) -> Option<usize> {
        match self {
            Sign::Serpentarius => None,
            _ => Some(self as usize),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compat {
    Bad,
    Neutral,
    Good,
    /// Opposed signs: resolves by gender at lookup time.
    Uncertain,
}

const fn compat_for(diff: usize) -> Compat {
    match diff {
        3 | 9 => Compat::Bad,
        4 | 8 => Compat::Good,
        6 => Compat::Uncertain,
        _ => Compat::Neutral,
    }
}

const fn build_zodiac_chart() -> [[Compat; 12]; 12] {
    let mut chart = [[Compat::Neutral; 12]; 12];
    let mut a = 0;
    while a < 12 {
        let mut b = 0;
        while b < 12 {
            chart[a][b] = compat_for((12 + b - a) % 12);
            b += 1;
        }
        a += 1;
    }
    chart
}

static ZODIAC_CHART: [[Compat; 12]; 12] = build_zodiac_chart();

/// A charging ability waiting to resolve.
#[derive(Debug, Clone)]
pub struct SlowAction {
    pub ability: String,
    pub ctr: i32,
    pub target: usize,
    pub effect: SlowEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlowEffect {
    Damage(i32),
    Heal(i32),
}

#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub job: String,
    pub gender: Gender,
    pub sign: Sign,
    pub team: usize,
    base: BaseStats,
    /// Brave and faith as fractions in [0, 1].
    pub brave: f64,
    pub faith: f64,
    pub mainhand: Equipment,
    pub offhand: Equipment,
    pub head: Equipment,
    pub armor: Equipment,
    pub accessory: Equipment,
    skills: HashSet<String>,
    immunities: u64,

    pub hp: i32,
    pub mp: i32,
    pub ct: i32,
    timed: [i32; TIMED_COUNT],
    flags: u64,
    pub crystal_counter: i32,
    pub pending_action: Option<SlowAction>,
    pub location: i64,
    pub moved_this_turn: bool,
    pub acted_this_turn: bool,
    pub took_damage_this_turn: bool,
    pub broken_items: i32,
    /// Transient stat modifiers; excluded from the `*_bang` accessors.
    pub pa_mod: i32,
    pub ma_mod: i32,
    pub speed_mod: i32,
    /// Learned abilities with an MP cost, counted once at construction for
    /// the AI's caster-hate heuristic.
    pub num_mp_abilities: i32,
}

impl Combatant {
    pub fn new(
        cfg: &UnitConfig,
        patch: &Patch,
        team: usize,
        location: i64,
    ) -> Result<Self, SimError> {
        let gender = Gender::parse(&cfg.gender)?;
        let sign = Sign::parse(&cfg.sign)?;
        let base = patch.base_stats(&cfg.job, &cfg.gender);
        let skills: HashSet<String> = cfg.skills.iter().cloned().collect();
        let num_mp_abilities = cfg
            .skills
            .iter()
            .filter(|s| patch.ability(s).mp_cost > 0)
            .count() as i32;

        let mut unit = Self {
            name: cfg.name.clone(),
            job: cfg.job.clone(),
            gender,
            sign,
            team,
            base,
            brave: f64::from(cfg.brave.clamp(0, 100)) / 100.0,
            faith: f64::from(cfg.faith.clamp(0, 100)) / 100.0,
            mainhand: patch.equipment(&cfg.mainhand),
            offhand: patch.equipment(&cfg.offhand),
            head: patch.equipment(&cfg.head),
            armor: patch.equipment(&cfg.armor),
            accessory: patch.equipment(&cfg.accessory),
            skills,
            immunities: 0,
            hp: 0,
            mp: 0,
            ct: 0,
            timed: [0; TIMED_COUNT],
            flags: 0,
            crystal_counter: CRYSTAL_TURNS,
            pending_action: None,
            location,
            moved_this_turn: false,
            acted_this_turn: false,
            took_damage_this_turn: false,
            broken_items: 0,
            pa_mod: 0,
            ma_mod: 0,
            speed_mod: 0,
            num_mp_abilities,
        };

        let mut immunities = 0u64;
        let mut initial: Vec<Status> = Vec::new();
        for equip in unit.equips() {
            for &status in &equip.immune_to {
                immunities |= flag_bit(status);
            }
            initial.extend(equip.initial.iter().copied());
        }
        unit.immunities = immunities;
        unit.hp = unit.max_hp();
        unit.mp = unit.max_mp();
        for status in initial {
            unit.add_status(status);
        }
        Ok(unit)
    }

    fn equips(&self) -> [&Equipment; 5] {
        [
            &self.mainhand,
            &self.offhand,
            &self.head,
            &self.armor,
            &self.accessory,
        ]
    }

    // --- Derived stats ---------------------------------------------------

    pub fn max_hp(&self) -> i32 {
        self.base.hp + self.equips().iter().map(|e| e.hp_bonus).sum::<i32>()
    }

    pub fn max_mp(&self) -> i32 {
        self.base.mp + self.equips().iter().map(|e| e.mp_bonus).sum::<i32>()
    }

    pub fn speed(&self) -> i32 {
        self.speed_bang() + self.speed_mod
    }

    pub fn speed_bang(&self) -> i32 {
        self.base.speed + self.equips().iter().map(|e| e.speed_bonus).sum::<i32>()
    }

    pub fn pa(&self) -> i32 {
        self.pa_bang() + self.pa_mod
    }

    /// PA without transient modifiers; the multiplicand for barehanded hits.
    pub fn pa_bang(&self) -> i32 {
        self.base.pa + self.equips().iter().map(|e| e.pa_bonus).sum::<i32>()
    }

    pub fn ma(&self) -> i32 {
        self.ma_bang() + self.ma_mod
    }

    pub fn ma_bang(&self) -> i32 {
        self.base.ma + self.equips().iter().map(|e| e.ma_bonus).sum::<i32>()
    }

    pub fn movement(&self) -> i32 {
        let mut movement =
            self.base.movement + self.equips().iter().map(|e| e.move_bonus).sum::<i32>();
        for (skill, bonus) in [("Move+1", 1), ("Move+2", 2), ("Move+3", 3)] {
            if self.has_skill(skill) {
                movement += bonus;
            }
        }
        if self.has_skill("Fly") {
            movement += 1;
        }
        movement
    }

    pub fn jump(&self) -> i32 {
        let mut jump = self.base.jump + self.equips().iter().map(|e| e.jump_bonus).sum::<i32>();
        for (skill, bonus) in [("Jump+1", 1), ("Jump+2", 2), ("Jump+3", 3)] {
            if self.has_skill(skill) {
                jump += bonus;
            }
        }
        jump
    }

    /// Whether elevation is ignored when moving.
    pub fn ignores_height(&self) -> bool {
        self.has_skill("Ignore Height")
            || self.has_skill("Teleport")
            || self.has_skill("Fly")
            || self.has_status(Status::Float)
    }

    pub fn class_evasion(&self) -> i32 {
        self.base.class_ev
    }

    pub fn accessory_evasion(&self) -> i32 {
        self.accessory.phys_ev
    }

    pub fn shield_evasion(&self) -> i32 {
        self.offhand.phys_ev
    }

    /// Mirrors the physical column of the source data. No magical attack
    /// path consults it yet; it is exposed only so the stat surface stays
    /// in parity with the physical accessors.
    pub fn shield_magic_evasion(&self) -> i32 {
        self.offhand.phys_ev
    }

    /// Weapon evasion only counts with the Weapon Guard support skill.
    pub fn weapon_evasion(&self) -> i32 {
        if self.has_skill("Weapon Guard") {
            self.mainhand.phys_ev
        } else {
            0
        }
    }

    // --- Skills and elements ---------------------------------------------

    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.contains(name) || self.base.innates.iter().any(|s| s == name)
    }

    pub fn attack_up(&self) -> bool {
        self.has_skill("Attack UP")
    }

    pub fn defense_up(&self) -> bool {
        self.has_skill("Defense UP")
    }

    pub fn martial_arts(&self) -> bool {
        self.has_skill("Martial Arts")
    }

    pub fn double_hand(&self) -> bool {
        self.has_skill("Doublehand")
    }

    pub fn concentrate(&self) -> bool {
        self.has_skill("Concentrate")
    }

    pub fn blade_grasp(&self) -> bool {
        self.has_skill("Blade Grasp")
    }

    pub fn arrow_guard(&self) -> bool {
        self.has_skill("Arrow Guard")
    }

    pub fn strengthens(&self, element: Element) -> bool {
        self.equips().iter().any(|e| e.strengthens.contains(&element))
    }

    pub fn absorbs(&self, element: Element) -> bool {
        self.equips().iter().any(|e| e.absorbs.contains(&element))
    }

    pub fn halves(&self, element: Element) -> bool {
        self.equips().iter().any(|e| e.halves.contains(&element))
    }

    pub fn is_weak_to(&self, element: Element) -> bool {
        self.equips().iter().any(|e| e.weaknesses.contains(&element))
    }

    // --- Life state -------------------------------------------------------

    pub fn alive(&self) -> bool {
        self.hp > 0
    }

    pub fn dead(&self) -> bool {
        self.hp == 0
    }

    /// Alive and able to hold the line: not petrified, not a crystal.
    pub fn healthy(&self) -> bool {
        self.alive() && !self.has_status(Status::Petrify) && !self.has_status(Status::Crystal)
    }

    pub fn critical(&self) -> bool {
        self.alive() && self.hp <= self.max_hp() / 5
    }

    // --- Status storage ---------------------------------------------------

    pub fn has_status(&self, status: Status) -> bool {
        match status {
            Status::Critical => self.critical(),
            Status::Death => self.dead(),
            _ => match status.timed_index() {
                Some(idx) => self.timed[idx] > 0,
                None => self.flags & flag_bit(status) != 0,
            },
        }
    }

    /// Remaining duration of a timed status, zero when inactive.
    pub fn status_duration(&self, status: Status) -> i32 {
        status.timed_index().map_or(0, |idx| self.timed[idx])
    }

    pub fn is_immune(&self, status: Status) -> bool {
        self.immunities & flag_bit(status) != 0
    }

    /// Apply a status. Returns true only when the unit's state changed, so
    /// re-application and immune targets report nothing.
    pub fn add_status(&mut self, status: Status) -> bool {
        if self.is_immune(status) {
            return false;
        }
        match status {
            Status::Death => {
                if self.dead() {
                    return false;
                }
                self.die();
                true
            }
            Status::Critical => false,
            _ => match status.timed_index() {
                Some(idx) => {
                    if self.timed[idx] > 0 {
                        return false;
                    }
                    self.timed[idx] = status.duration().unwrap_or(0);
                    true
                }
                None => {
                    let bit = flag_bit(status);
                    if self.flags & bit != 0 {
                        return false;
                    }
                    self.flags |= bit;
                    true
                }
            },
        }
    }

    /// Remove a status. Returns true only when it was active.
    pub fn cancel_status(&mut self, status: Status) -> bool {
        match status {
            Status::Critical | Status::Death => false,
            _ => match status.timed_index() {
                Some(idx) => {
                    let was_active = self.timed[idx] > 0;
                    self.timed[idx] = 0;
                    was_active
                }
                None => {
                    let bit = flag_bit(status);
                    let was_active = self.flags & bit != 0;
                    self.flags &= !bit;
                    was_active
                }
            },
        }
    }

    /// Tick every timed counter down one; returns the statuses that expired
    /// this tick.
    pub fn decrement_timed_statuses(&mut self) -> Vec<Status> {
        let mut expired = Vec::new();
        for idx in 0..TIMED_COUNT {
            if self.timed[idx] > 0 {
                self.timed[idx] -= 1;
                if self.timed[idx] == 0 {
                    expired.push(TIMED_ORDER[idx]);
                }
            }
        }
        expired
    }

    /// Death bookkeeping: zero HP, drop the cancelled-on-death group, forget
    /// any charging action and arm the crystal counter.
    pub fn die(&mut self) {
        self.hp = 0;
        for &status in CANCELLED_ON_DEATH {
            self.cancel_status(status);
        }
        self.pending_action = None;
        self.crystal_counter = CRYSTAL_TURNS;
    }

    // --- Zodiac -----------------------------------------------------------

    /// Zodiac damage multiplier, one of {0.5, 0.75, 1.0, 1.25, 1.5}.
    pub fn zodiac_compatibility(&self, other: &Combatant) -> f64 {
        let (Some(a), Some(b)) = (self.sign.index(), other.sign.index()) else {
            return 1.0;
        };
        match ZODIAC_CHART[a][b] {
            Compat::Good => 1.25,
            Compat::Bad => 0.75,
            Compat::Neutral => 1.0,
            Compat::Uncertain => {
                if self.gender == Gender::Monster || other.gender == Gender::Monster {
                    0.75
                } else if self.gender != other.gender {
                    1.5
                } else {
                    0.5
                }
            }
        }
    }

    // --- Weapon attack power ----------------------------------------------

    /// Base attack power (XA) for a weapon class. The weapon type string
    /// comes straight from patch data; anything unrecognized is a fatal
    /// data-integrity error.
    pub fn calculate_weapon_xa(
        &self,
        weapon: &Equipment,
        bonus: i32,
        dice: &mut dyn Dice,
    ) -> Result<i32, SimError> {
        let pa = self.pa() + bonus;
        let xa = match weapon.weapon_type.to_ascii_lowercase().as_str() {
            "" | "katana" | "knight sword" => (f64::from(pa) * self.brave) as i32,
            "bow" | "longbow" => (pa + self.speed()) / 2,
            "knife" | "ninja sword" | "sword" | "rod" | "pole" | "spear" | "crossbow" => pa,
            "staff" | "stick" => self.ma() + bonus,
            "flail" | "axe" | "bag" => dice.roll(1, pa.max(1)),
            "cloth" | "harp" | "book" => (self.pa() + self.ma()) / 2 + bonus,
            "gun" => weapon.wp,
            other => return Err(SimError::UnknownWeaponType(other.to_string())),
        };
        Ok(xa)
    }
}

const fn flag_bit(status: Status) -> u64 {
    1u64 << (status as u32)
}

/// Timed statuses in discriminant order, for mapping counter indices back to
/// statuses.
const TIMED_ORDER: [Status; TIMED_COUNT] = [
    Status::Charm,
    Status::DeathSentence,
    Status::DontAct,
    Status::DontMove,
    Status::Faith,
    Status::Haste,
    Status::Innocent,
    Status::Poison,
    Status::Protect,
    Status::Reflect,
    Status::Regen,
    Status::Shell,
    Status::Sleep,
    Status::Slow,
    Status::Stop,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::FastRng;

    fn unit(sign: &str, gender: &str) -> Combatant {
        let cfg = UnitConfig {
            name: "Test".into(),
            job: "Squire".into(),
            gender: gender.into(),
            sign: sign.into(),
            brave: 70,
            faith: 70,
            mainhand: String::new(),
            offhand: String::new(),
            head: String::new(),
            armor: String::new(),
            accessory: String::new(),
            skills: vec![],
        };
        Combatant::new(&cfg, &Patch::default(), 0, 0).unwrap()
    }

    #[test]
    fn derived_stats_sum_equipment() {
        let mut patch = Patch::default();
        patch.equipment.insert(
            "Bronze Helmet".into(),
            Equipment { hp_bonus: 40, ..Equipment::default() },
        );
        patch.equipment.insert(
            "Battle Boots".into(),
            Equipment { move_bonus: 1, phys_ev: 10, ..Equipment::default() },
        );
        let cfg = UnitConfig {
            name: "Knight".into(),
            job: "Knight".into(),
            gender: "Male".into(),
            sign: "Leo".into(),
            brave: 70,
            faith: 70,
            mainhand: String::new(),
            offhand: String::new(),
            head: "Bronze Helmet".into(),
            armor: String::new(),
            accessory: "Battle Boots".into(),
            skills: vec!["Move+1".into()],
        };
        let unit = Combatant::new(&cfg, &patch, 0, 0).unwrap();
        assert_eq!(unit.max_hp(), BaseStats::default().hp + 40);
        assert_eq!(unit.hp, unit.max_hp());
        assert_eq!(unit.movement(), BaseStats::default().movement + 2);
        assert_eq!(unit.accessory_evasion(), 10);
    }

    #[test]
    fn shield_magic_evasion_mirrors_physical() {
        let mut patch = Patch::default();
        patch.equipment.insert(
            "Buckler".into(),
            Equipment { phys_ev: 13, magic_ev: 4, ..Equipment::default() },
        );
        let cfg = UnitConfig {
            name: "Guard".into(),
            job: "Knight".into(),
            gender: "Male".into(),
            sign: "Leo".into(),
            brave: 70,
            faith: 70,
            mainhand: String::new(),
            offhand: "Buckler".into(),
            head: String::new(),
            armor: String::new(),
            accessory: String::new(),
            skills: vec![],
        };
        let unit = Combatant::new(&cfg, &patch, 0, 0).unwrap();
        // The source data repeats the physical column for the magical
        // shield value; both accessors read phys_ev.
        assert_eq!(unit.shield_evasion(), 13);
        assert_eq!(unit.shield_magic_evasion(), unit.shield_evasion());
    }

    #[test]
    fn status_application_is_idempotent() {
        let mut unit = unit("Aries", "Male");
        assert!(unit.add_status(Status::Haste));
        assert!(!unit.add_status(Status::Haste));
        assert!(unit.cancel_status(Status::Haste));
        assert!(!unit.cancel_status(Status::Haste));
        assert!(unit.add_status(Status::Berserk));
        assert!(!unit.add_status(Status::Berserk));
    }

    #[test]
    fn immunity_makes_application_a_noop() {
        let mut patch = Patch::default();
        patch.equipment.insert(
            "Ribbon".into(),
            Equipment {
                immune_to: vec![Status::Sleep, Status::Charm],
                ..Equipment::default()
            },
        );
        let cfg = UnitConfig {
            name: "Dancer".into(),
            job: "Dancer".into(),
            gender: "Female".into(),
            sign: "Virgo".into(),
            brave: 70,
            faith: 70,
            mainhand: String::new(),
            offhand: String::new(),
            head: "Ribbon".into(),
            armor: String::new(),
            accessory: String::new(),
            skills: vec![],
        };
        let mut unit = Combatant::new(&cfg, &patch, 0, 0).unwrap();
        assert!(!unit.add_status(Status::Sleep));
        assert!(!unit.has_status(Status::Sleep));
        assert!(unit.add_status(Status::Poison));
    }

    #[test]
    fn death_application_kills_and_cancels() {
        let mut unit = unit("Aries", "Male");
        unit.add_status(Status::Haste);
        unit.add_status(Status::Berserk);
        unit.add_status(Status::Reraise);
        assert!(unit.add_status(Status::Death));
        assert!(unit.dead());
        assert!(!unit.has_status(Status::Haste));
        assert!(!unit.has_status(Status::Berserk));
        // Reraise survives death so it can fire on the next active turn.
        assert!(unit.has_status(Status::Reraise));
        assert!(!unit.add_status(Status::Death));
    }

    #[test]
    fn critical_is_derived_from_hp() {
        let mut unit = unit("Aries", "Male");
        assert!(!unit.has_status(Status::Critical));
        unit.hp = unit.max_hp() / 5;
        assert!(unit.has_status(Status::Critical));
        assert!(!unit.add_status(Status::Critical));
    }

    #[test]
    fn zodiac_chart_resolution() {
        let aries_m = unit("Aries", "Male");
        let leo_f = unit("Leo", "Female");
        let cancer_m = unit("Cancer", "Male");
        let libra_m = unit("Libra", "Male");
        let libra_f = unit("Libra", "Female");
        let libra_monster = unit("Libra", "Monster");
        let serpent = unit("Serpentarius", "Male");

        // Leo is 120 degrees from Aries: good.
        assert_eq!(aries_m.zodiac_compatibility(&leo_f), 1.25);
        // Cancer is 90 degrees from Aries: bad.
        assert_eq!(aries_m.zodiac_compatibility(&cancer_m), 0.75);
        // Libra opposes Aries: resolves by gender.
        assert_eq!(aries_m.zodiac_compatibility(&libra_f), 1.5);
        assert_eq!(aries_m.zodiac_compatibility(&libra_m), 0.5);
        assert_eq!(aries_m.zodiac_compatibility(&libra_monster), 0.75);
        // Same sign and Serpentarius are neutral.
        assert_eq!(aries_m.zodiac_compatibility(&aries_m.clone()), 1.0);
        assert_eq!(aries_m.zodiac_compatibility(&serpent), 1.0);
    }

    #[test]
    fn weapon_xa_dispatch() {
        let mut rng = FastRng::new(7);
        let unit = unit("Aries", "Male");
        let pa = unit.pa();
        let ma = unit.ma();
        let speed = unit.speed();

        let katana = Equipment { weapon_type: "Katana".into(), wp: 9, ..Equipment::default() };
        assert_eq!(
            unit.calculate_weapon_xa(&katana, 0, &mut rng).unwrap(),
            (f64::from(pa) * 0.70) as i32
        );

        let bow = Equipment { weapon_type: "Bow".into(), wp: 6, ..Equipment::default() };
        assert_eq!(
            unit.calculate_weapon_xa(&bow, 0, &mut rng).unwrap(),
            (pa + speed) / 2
        );

        let staff = Equipment { weapon_type: "Staff".into(), wp: 4, ..Equipment::default() };
        assert_eq!(unit.calculate_weapon_xa(&staff, 0, &mut rng).unwrap(), ma);

        let gun = Equipment { weapon_type: "Gun".into(), wp: 12, ..Equipment::default() };
        assert_eq!(unit.calculate_weapon_xa(&gun, 0, &mut rng).unwrap(), 12);

        let flail = Equipment { weapon_type: "Flail".into(), wp: 9, ..Equipment::default() };
        let rolled = unit.calculate_weapon_xa(&flail, 0, &mut rng).unwrap();
        assert!((1..=pa).contains(&rolled));

        let chaos = Equipment { weapon_type: "Chainsaw".into(), wp: 9, ..Equipment::default() };
        assert_eq!(
            unit.calculate_weapon_xa(&chaos, 0, &mut rng),
            Err(SimError::UnknownWeaponType("chainsaw".into()))
        );
    }

    #[test]
    fn timed_statuses_expire_in_order() {
        let mut unit = unit("Aries", "Male");
        unit.add_status(Status::Stop);
        for _ in 0..19 {
            assert!(unit.decrement_timed_statuses().is_empty());
        }
        assert_eq!(unit.decrement_timed_statuses(), vec![Status::Stop]);
        assert!(!unit.has_status(Status::Stop));
        assert!(unit.decrement_timed_statuses().is_empty());
    }
}

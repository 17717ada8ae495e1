//! Action resolvers: attack, jump and throw damage plus the physical
//! evasion roll. Pure functions over two combatants and a dice source;
//! negative damage is healing (elemental absorb).
//!
//! Every multiplier in the chains truncates immediately, in chain order.
//! Reordering steps or deferring the division changes results, so each
//! chain is written out step by step.

use crate::combatant::Combatant;
use crate::error::SimError;
use crate::patch::{Element, Equipment};
use crate::simulation::Dice;
use crate::status::Status;

/// Critical hits land 1 time in 20.
const CRIT_CHANCE: f64 = 0.05;

/// Weapon add/cancel status procs fire at a flat rate per listed status.
pub const WEAPON_PROC_CHANCE: f64 = 0.25;

fn mult(value: i32, num: i32, den: i32) -> i32 {
    value * num / den
}

/// The shared target-side multiplier chain: statuses on the victim that
/// scale incoming physical damage.
fn target_status_chain(mut xa: i32, target: &Combatant) -> i32 {
    if target.defense_up() {
        xa = mult(xa, 2, 3);
    }
    if target.has_status(Status::Protect) {
        xa = mult(xa, 2, 3);
    }
    if target.has_status(Status::Charging) {
        xa = mult(xa, 3, 2);
    }
    if target.has_status(Status::Sleep) {
        xa = mult(xa, 3, 2);
    }
    if target.has_status(Status::Chicken) || target.has_status(Status::Frog) {
        xa = mult(xa, 3, 2);
    }
    xa
}

fn apply_zodiac(xa: i32, user: &Combatant, target: &Combatant) -> i32 {
    (f64::from(xa) * user.zodiac_compatibility(target)).floor() as i32
}

/// Weak doubles, half halves, absorb turns the hit into healing.
fn apply_elemental(mut damage: i32, element: Option<Element>, target: &Combatant) -> i32 {
    let Some(element) = element else {
        return damage;
    };
    if target.is_weak_to(element) {
        damage *= 2;
    }
    if target.halves(element) {
        damage /= 2;
    }
    if target.absorbs(element) {
        damage = -damage;
    }
    damage
}

/// Weapon attack damage.
pub fn calculate_attack(
    user: &Combatant,
    weapon: &Equipment,
    target: &Combatant,
    bonus: i32,
    dice: &mut dyn Dice,
) -> Result<i32, SimError> {
    let mut xa = user.calculate_weapon_xa(weapon, bonus, dice)?;
    if dice.chance(CRIT_CHANCE) {
        xa += dice.roll(1, xa.max(1)) - 1;
    }
    if weapon.element.is_some_and(|el| user.strengthens(el)) {
        xa = mult(xa, 5, 4);
    }
    if user.attack_up() {
        xa = mult(xa, 4, 3);
    }
    if !weapon.is_weapon() && user.martial_arts() {
        xa = mult(xa, 3, 2);
    }
    if user.has_status(Status::Berserk) {
        xa = mult(xa, 3, 2);
    }
    xa = target_status_chain(xa, target);
    xa = apply_zodiac(xa, user, target);

    let multiplicand = if weapon.is_weapon() { weapon.wp } else { user.pa_bang() };
    let mut damage = xa * multiplicand;
    if user.double_hand() && !weapon.is_gun() {
        damage *= 2;
    }
    Ok(apply_elemental(damage, weapon.element, target))
}

/// Jump damage: the target-status chain on PA, a spear bonus, zodiac, then
/// the weapon multiplicand. No elemental interaction.
pub fn calculate_jump(user: &Combatant, weapon: &Equipment, target: &Combatant) -> i32 {
    let mut xa = if weapon.is_weapon() {
        user.pa()
    } else {
        (f64::from(user.pa()) * user.brave) as i32
    };
    xa = target_status_chain(xa, target);
    if weapon.weapon_type.eq_ignore_ascii_case("spear") {
        xa = mult(xa, 3, 2);
    }
    xa = apply_zodiac(xa, user, target);
    if weapon.is_weapon() {
        xa * weapon.wp
    } else {
        xa * user.pa_bang()
    }
}

/// Throw damage: the same target-status chain applied to Speed, zodiac,
/// times the thrown weapon's power, then elemental adjustments.
pub fn calculate_throw(user: &Combatant, thrown: &Equipment, target: &Combatant) -> i32 {
    let mut xa = user.speed();
    xa = target_status_chain(xa, target);
    xa = apply_zodiac(xa, user, target);
    apply_elemental(xa * thrown.wp, thrown.element, target)
}

/// How a physical attack was avoided, if it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvasionOutcome {
    Hit,
    BladeGrasp,
    ArrowGuard,
    Accessory,
    Shield,
    Weapon,
    Class,
}

impl EvasionOutcome {
    pub fn blocked(self) -> bool {
        self != EvasionOutcome::Hit
    }

    pub fn describe(self) -> &'static str {
        match self {
            EvasionOutcome::Hit => "is hit",
            EvasionOutcome::BladeGrasp => "grasps the blade",
            EvasionOutcome::ArrowGuard => "guards the arrow",
            EvasionOutcome::Accessory => "evades with an accessory",
            EvasionOutcome::Shield => "blocks with a shield",
            EvasionOutcome::Weapon => "parries",
            EvasionOutcome::Class => "dodges",
        }
    }
}

/// Statuses that leave the target unable to react at all.
const CANNOT_EVADE: &[Status] = &[
    Status::Sleep,
    Status::Stop,
    Status::Charm,
    Status::Confusion,
    Status::Petrify,
];

fn is_projectile(weapon: &Equipment) -> bool {
    matches!(
        weapon.weapon_type.to_ascii_lowercase().as_str(),
        "bow" | "longbow" | "crossbow" | "gun"
    )
}

/// Physical evasion, checked in fixed priority order. Special reactions
/// short-circuit before generic evasion; a Transparent or Concentrate
/// attacker disables everything generic.
pub fn physical_evasion(
    user: &Combatant,
    weapon: &Equipment,
    target: &Combatant,
    dice: &mut dyn Dice,
) -> EvasionOutcome {
    if CANNOT_EVADE.iter().any(|&s| target.has_status(s)) {
        return EvasionOutcome::Hit;
    }
    if target.blade_grasp() && dice.chance(target.brave) {
        return EvasionOutcome::BladeGrasp;
    }
    if target.arrow_guard() && is_projectile(weapon) && dice.chance(target.brave) {
        return EvasionOutcome::ArrowGuard;
    }
    if user.has_status(Status::Transparent) || user.concentrate() {
        return EvasionOutcome::Hit;
    }
    if dice.chance(f64::from(target.accessory_evasion()) / 100.0) {
        return EvasionOutcome::Accessory;
    }
    if dice.chance(f64::from(target.shield_evasion()) / 2.0 / 100.0) {
        return EvasionOutcome::Shield;
    }
    if dice.chance(f64::from(target.weapon_evasion()) / 2.0 / 100.0) {
        return EvasionOutcome::Weapon;
    }
    if dice.chance(f64::from(target.class_evasion()) / 2.0 / 100.0) {
        return EvasionOutcome::Class;
    }
    EvasionOutcome::Hit
}

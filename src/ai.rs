//! Per-turn decision making: target scoring, candidate actions and 1-D
//! movement.

use crate::combatant::Combatant;
use crate::damage::{calculate_attack, physical_evasion, WEAPON_PROC_CHANCE};
use crate::error::SimError;
use crate::simulation::{Dice, Simulation};
use crate::status::Status;

/// Weight of each broken equipment piece in the target-value score.
pub const BROKEN_ITEM_WEIGHT: f64 = 0.51;

const ITEM_RANGE: i32 = 1;
const THROW_ITEM_RANGE: i32 = 4;

/// Consumables the engine knows how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Potion,
    HiPotion,
    XPotion,
    PhoenixDown,
}

impl Item {
    pub fn heals(self) -> i32 {
        match self {
            Item::Potion => 30,
            Item::HiPotion => 70,
            Item::XPotion => 150,
            Item::PhoenixDown => 0,
        }
    }

    pub fn skill_name(self) -> &'static str {
        match self {
            Item::Potion => "Potion",
            Item::HiPotion => "Hi-Potion",
            Item::XPotion => "X-Potion",
            Item::PhoenixDown => "Phoenix Down",
        }
    }
}

/// One candidate action: ephemeral, rebuilt every decision cycle.
#[derive(Debug, Clone, Copy)]
pub struct Action {
    pub target: usize,
    pub range: i32,
    pub kind: ActionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Attack,
    UseItem(Item),
}

/// Summed per-status weight of everything a unit is suffering or enjoying.
/// The Slow/Stop/Sleep penalties are suppressed when the unit is already
/// out of the fight through charm or confusion (the enemy is doing our work
/// for us), and Sleep additionally suppresses Slow/Stop.
pub fn status_value(unit: &Combatant) -> f64 {
    let mut value = 0.0;
    let puppeted = unit.has_status(Status::Charm) || unit.has_status(Status::Confusion);
    let idle = puppeted || unit.has_status(Status::Sleep);

    if unit.dead() {
        value += -1.5;
    }
    if unit.has_status(Status::Petrify) {
        value += -0.906;
    }
    if unit.has_status(Status::Frog) {
        value += -0.6;
    }
    if unit.has_status(Status::Chicken) {
        value += -0.57;
    }
    if unit.has_status(Status::BloodSuck) {
        value += -0.452;
    }
    if unit.has_status(Status::Confusion) {
        value += -0.5;
    }
    if unit.has_status(Status::Charm) {
        value += -0.512;
    }
    if unit.has_status(Status::Sleep) && !puppeted {
        value += -0.581;
    }
    if unit.has_status(Status::DontAct) {
        value += -0.512;
    }
    if unit.has_status(Status::DontMove) {
        value += -0.151;
    }
    if unit.has_status(Status::Stop) && !idle {
        value += -0.7;
    }
    if unit.has_status(Status::Slow) && !idle {
        value += -0.31;
    }
    if unit.has_status(Status::Berserk) {
        value += -0.2;
    }
    if unit.has_status(Status::DeathSentence) {
        value += -0.725;
    }
    if unit.has_status(Status::Poison) {
        value += -0.25;
    }
    if unit.has_status(Status::Oil) {
        value += -0.05;
    }
    if unit.has_status(Status::Silence) {
        value += -0.254;
    }
    if unit.has_status(Status::Undead) {
        value += -0.181;
    }
    if unit.has_status(Status::Innocent) {
        value += -0.35;
    }
    if unit.has_status(Status::Faith) {
        value += 0.042;
    }
    if unit.has_status(Status::Haste) {
        value += 0.168;
    }
    if unit.has_status(Status::Protect) {
        value += 0.195;
    }
    if unit.has_status(Status::Shell) {
        value += 0.191;
    }
    if unit.has_status(Status::Regen) {
        value += 0.187;
    }
    if unit.has_status(Status::Reraise) {
        value += 0.398;
    }
    if unit.has_status(Status::Transparent) {
        value += 0.29;
    }
    if unit.has_status(Status::Float) {
        value += 0.026;
    }
    if unit.has_status(Status::Reflect) {
        value += 0.076;
    }
    if unit.has_status(Status::Defending) {
        value += 0.05;
    }
    if unit.has_status(Status::Charging) {
        value += -0.05;
    }
    if unit.has_status(Status::Critical) {
        value += -0.267;
    }
    value
}

/// Casters with a full MP pool are worth focusing down.
fn caster_hate(unit: &Combatant) -> f64 {
    if unit.num_mp_abilities == 0 || unit.max_mp() == 0 {
        return 0.0;
    }
    (f64::from(unit.mp) / f64::from(unit.max_mp())) / 16.0 * f64::from(unit.num_mp_abilities)
}

/// The actor-relative worth of a unit. Negated for opponents, so sorting
/// ascending puts both the most valuable enemy and the neediest ally first.
pub fn target_value(actor: &Combatant, unit: &Combatant) -> f64 {
    let max_hp = unit.max_hp().max(1);
    let value = f64::from(unit.hp) / f64::from(max_hp)
        + BROKEN_ITEM_WEIGHT * f64::from(unit.broken_items)
        + status_value(unit)
        + caster_hate(unit);
    if unit.team == actor.team {
        value
    } else {
        -value
    }
}

/// Run one active turn for `idx`: score, pick, move, act.
pub fn take_active_turn(sim: &mut Simulation, idx: usize) -> Result<(), SimError> {
    if sim.combatants[idx].has_status(Status::DontAct) {
        retreat(sim, idx);
        return Ok(());
    }

    let candidates = enumerate_candidates(sim, idx);
    for action in &candidates {
        let actor = &sim.combatants[idx];
        let target_loc = sim.combatants[action.target].location;
        let (dist, _) = sim.arena.distance(actor.location, target_loc);
        let can_move = !actor.moved_this_turn && !actor.has_status(Status::DontMove);
        let mut reach = i64::from(action.range);
        if can_move {
            reach += i64::from(actor.movement());
        }
        if dist > reach {
            continue;
        }
        if dist > i64::from(action.range) {
            step_toward(sim, idx, target_loc, i64::from(action.range));
            let (dist, _) = sim.arena.distance(sim.combatants[idx].location, target_loc);
            // Terrain can cut an approach short.
            if dist > i64::from(action.range) {
                continue;
            }
        }
        perform(sim, idx, *action)?;
        return Ok(());
    }

    // Nothing in reach this turn: close on the best target, or fall back.
    if let Some(best) = candidates.first() {
        let target_loc = sim.combatants[best.target].location;
        step_toward(sim, idx, target_loc, i64::from(best.range));
    } else {
        retreat(sim, idx);
    }
    Ok(())
}

/// A critical unit hides behind healthier allies instead of trading.
fn is_cowardly(sim: &Simulation, idx: usize) -> bool {
    let actor = &sim.combatants[idx];
    if !actor.critical() {
        return false;
    }
    sim.combatants
        .iter()
        .enumerate()
        .any(|(j, u)| j != idx && u.team == actor.team && u.healthy() && !u.critical())
}

fn choose_item(actor: &Combatant, ally: &Combatant) -> Option<Item> {
    if ally.dead() {
        if !ally.has_status(Status::Undead) && actor.has_skill(Item::PhoenixDown.skill_name()) {
            return Some(Item::PhoenixDown);
        }
        return None;
    }
    if ally.hp >= ally.max_hp() {
        return None;
    }
    [Item::XPotion, Item::HiPotion, Item::Potion]
        .into_iter()
        .find(|item| actor.has_skill(item.skill_name()))
}

/// Items over every eligible ally, then attacks over every eligible enemy,
/// sorted ascending by target score.
fn enumerate_candidates(sim: &Simulation, idx: usize) -> Vec<Action> {
    let actor = &sim.combatants[idx];
    let cowardly = is_cowardly(sim, idx);
    let item_range = if actor.has_skill("Throw Item") {
        THROW_ITEM_RANGE
    } else {
        ITEM_RANGE
    };

    let mut scored: Vec<(f64, Action)> = Vec::new();
    for (j, unit) in sim.combatants.iter().enumerate() {
        if unit.team != actor.team || unit.has_status(Status::Crystal) {
            continue;
        }
        if cowardly && j != idx {
            continue;
        }
        if let Some(item) = choose_item(actor, unit) {
            scored.push((
                target_value(actor, unit),
                Action { target: j, range: item_range, kind: ActionKind::UseItem(item) },
            ));
        }
    }
    if !cowardly {
        let attack_range = actor.mainhand.range.max(1);
        for (j, unit) in sim.combatants.iter().enumerate() {
            if unit.team == actor.team
                || !unit.alive()
                || unit.has_status(Status::Petrify)
                || unit.has_status(Status::Crystal)
            {
                continue;
            }
            scored.push((
                target_value(actor, unit),
                Action { target: j, range: attack_range, kind: ActionKind::Attack },
            ));
        }
    }

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(_, action)| action).collect()
}

fn perform(sim: &mut Simulation, idx: usize, action: Action) -> Result<(), SimError> {
    match action.kind {
        ActionKind::UseItem(item) => {
            sim.report(format!(
                "{} uses {} on {}",
                sim.combatants[idx].name,
                item.skill_name(),
                sim.combatants[action.target].name
            ));
            match item {
                Item::PhoenixDown => {
                    let hp = (sim.combatants[action.target].max_hp() / 4).max(1);
                    sim.revive(action.target, hp);
                }
                _ => sim.apply_damage(action.target, -item.heals()),
            }
        }
        ActionKind::Attack => {
            let weapon = sim.combatants[idx].mainhand.clone();
            sim.report(format!(
                "{} attacks {}",
                sim.combatants[idx].name, sim.combatants[action.target].name
            ));
            let outcome = physical_evasion(
                &sim.combatants[idx],
                &weapon,
                &sim.combatants[action.target],
                &mut sim.rng,
            );
            if outcome.blocked() {
                sim.report(format!(
                    "{} {}",
                    sim.combatants[action.target].name,
                    outcome.describe()
                ));
            } else {
                let damage = calculate_attack(
                    &sim.combatants[idx],
                    &weapon,
                    &sim.combatants[action.target],
                    0,
                    &mut sim.rng,
                )?;
                sim.apply_damage(action.target, damage);
                if damage > 0 {
                    for &status in &weapon.chance_to_add {
                        if sim.rng.chance(WEAPON_PROC_CHANCE) {
                            sim.add_status(action.target, status);
                        }
                    }
                    for &status in &weapon.chance_to_cancel {
                        if sim.rng.chance(WEAPON_PROC_CHANCE) {
                            sim.cancel_status(action.target, status);
                        }
                    }
                }
            }
        }
    }
    sim.combatants[idx].acted_this_turn = true;
    Ok(())
}

/// Walk up to the unit's move toward `dest`, stopping once within
/// `stop_range` tiles or at a ledge it cannot jump.
fn step_toward(sim: &mut Simulation, idx: usize, dest: i64, stop_range: i64) {
    let actor = &sim.combatants[idx];
    if actor.moved_this_turn || actor.has_status(Status::DontMove) {
        return;
    }
    let start = actor.location;
    let jump = actor.jump();
    let ignores_height = actor.ignores_height();
    let mut steps = actor.movement();
    let dir = (dest - start).signum();
    if dir == 0 {
        return;
    }

    let mut pos = start;
    while steps > 0 {
        let (dist, _) = sim.arena.distance(pos, dest);
        if dist <= stop_range {
            break;
        }
        let next = sim.arena.clamp(pos + dir);
        if next == pos {
            break;
        }
        let climb = (sim.arena.height_at(next) - sim.arena.height_at(pos)).abs();
        if !ignores_height && climb > jump {
            break;
        }
        pos = next;
        steps -= 1;
    }

    if pos != start {
        sim.combatants[idx].location = pos;
        sim.combatants[idx].moved_this_turn = true;
        sim.report(format!("{} moves to {}", sim.combatants[idx].name, pos));
    }
}

/// Back away from the nearest living enemy.
fn retreat(sim: &mut Simulation, idx: usize) {
    let actor = &sim.combatants[idx];
    let (loc, team, movement) = (actor.location, actor.team, actor.movement());
    let nearest = sim
        .combatants
        .iter()
        .filter(|u| u.team != team && u.healthy())
        .min_by_key(|u| (u.location - loc).abs())
        .map(|u| u.location);
    let Some(enemy_loc) = nearest else {
        return;
    };
    let dir = match enemy_loc.cmp(&loc) {
        std::cmp::Ordering::Greater => -1,
        std::cmp::Ordering::Less => 1,
        // Sharing a tile: fall back toward our own edge.
        std::cmp::Ordering::Equal => {
            if team == 0 {
                -1
            } else {
                1
            }
        }
    };
    let dest = sim.arena.clamp(loc + dir * i64::from(movement));
    step_toward(sim, idx, dest, 0);
}

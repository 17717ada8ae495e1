//! The tick engine: CT scheduling, the five per-tick phases, and the
//! Monte-Carlo battle runners.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::ai;
use crate::arena::Arena;
use crate::combatant::{Combatant, SlowAction, SlowEffect};
use crate::config::{MatchupConfig, UnitConfig};
use crate::error::SimError;
use crate::patch::Patch;
use crate::report::BattleReport;
use crate::status::{Status, CANCELLED_BY_DAMAGE};

/// Ticks before a battle is abandoned as a stalemate.
pub const MAX_TICKS: u64 = 10_000;

const CT_TURN_THRESHOLD: i32 = 100;

/// Randomness source. Everything random in a battle flows through this, so
/// a scripted implementation can pin down any single formula in tests.
pub trait Dice {
    fn f64(&mut self) -> f64;

    /// Uniform integer in `low..=high`.
    fn roll(&mut self, low: i32, high: i32) -> i32;

    /// True with probability `p`. Skips the draw entirely when `p` is not
    /// positive, so impossible events never perturb the stream.
    fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        self.f64() < p
    }
}

/// The production dice: a seeded fastrand generator.
pub struct FastRng {
    inner: fastrand::Rng,
}

impl FastRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Dice for FastRng {
    fn f64(&mut self) -> f64 {
        self.inner.f64()
    }

    fn roll(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.inner.i32(low..=high)
    }
}

/// One battle in progress.
pub struct Simulation {
    pub combatants: Vec<Combatant>,
    pub arena: Arena,
    pub rng: FastRng,
    pub tick: u64,
    slow_queue: VecDeque<usize>,
    active_queue: VecDeque<usize>,
    trace: Option<Vec<String>>,
}

impl Simulation {
    /// Build a battle from two team rosters. Team 0 is "left".
    pub fn new(
        left: &[UnitConfig],
        right: &[UnitConfig],
        patch: &Patch,
        arena: Arena,
        seed: u64,
    ) -> Result<Self, SimError> {
        let mut combatants = Vec::with_capacity(left.len() + right.len());
        for (slot, cfg) in left.iter().enumerate() {
            let location = arena.start(0, slot);
            combatants.push(Combatant::new(cfg, patch, 0, location)?);
        }
        for (slot, cfg) in right.iter().enumerate() {
            let location = arena.start(1, slot);
            combatants.push(Combatant::new(cfg, patch, 1, location)?);
        }
        Ok(Self {
            combatants,
            arena,
            rng: FastRng::new(seed),
            tick: 0,
            slow_queue: VecDeque::new(),
            active_queue: VecDeque::new(),
            trace: None,
        })
    }

    /// Record a line per event; dominates runtime, so off by default.
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    /// Run to completion. A stalemate past [`MAX_TICKS`] counts as a loss
    /// for the left team.
    pub fn run(mut self) -> Result<BattleReport, SimError> {
        loop {
            if let Some(left_wins) = self.victory() {
                tracing::debug!(ticks = self.tick, left_wins, "battle decided");
                return Ok(BattleReport {
                    left_wins,
                    timeout: false,
                    ticks: self.tick,
                    trace: self.trace,
                });
            }
            if self.tick >= MAX_TICKS {
                tracing::debug!(ticks = self.tick, "battle abandoned as a stalemate");
                self.report("stalemate, battle abandoned".to_string());
                return Ok(BattleReport {
                    left_wins: false,
                    timeout: true,
                    ticks: self.tick,
                    trace: self.trace,
                });
            }
            self.tick += 1;
            self.phase_status_check();
            self.phase_slow_action_charge();
            self.phase_slow_action_resolve();
            self.phase_ct_charge();
            self.phase_active_turns()?;
        }
    }

    /// `Some(left_wins)` once a side has no unit left standing.
    pub fn victory(&self) -> Option<bool> {
        let left_standing = self.combatants.iter().any(|u| u.team == 0 && u.healthy());
        let right_standing = self.combatants.iter().any(|u| u.team == 1 && u.healthy());
        if !left_standing {
            Some(false)
        } else if !right_standing {
            Some(true)
        } else {
            None
        }
    }

    // --- Tick phases -------------------------------------------------------

    fn phase_status_check(&mut self) {
        for idx in 0..self.combatants.len() {
            if self.combatants[idx].dead() {
                continue;
            }
            for status in self.combatants[idx].decrement_timed_statuses() {
                if status == Status::DeathSentence {
                    self.report(format!(
                        "{}'s death sentence is carried out",
                        self.combatants[idx].name
                    ));
                    self.combatants[idx].die();
                    self.report(format!("{} dies", self.combatants[idx].name));
                } else {
                    self.report(format!(
                        "{}'s {} wears off",
                        self.combatants[idx].name, status
                    ));
                }
            }
        }
    }

    fn phase_slow_action_charge(&mut self) {
        for idx in 0..self.combatants.len() {
            let unit = &mut self.combatants[idx];
            if unit.dead() || unit.has_status(Status::Stop) {
                continue;
            }
            if let Some(action) = unit.pending_action.as_mut() {
                action.ctr -= 1;
                if action.ctr <= 0 {
                    self.slow_queue.push_back(idx);
                }
            }
        }
    }

    fn phase_slow_action_resolve(&mut self) {
        while let Some(idx) = self.slow_queue.pop_front() {
            let Some(action) = self.combatants[idx].pending_action.take() else {
                continue;
            };
            self.combatants[idx].cancel_status(Status::Charging);
            if self.combatants[idx].dead() {
                continue;
            }
            self.report(format!(
                "{} unleashes {} on {}",
                self.combatants[idx].name,
                action.ability,
                self.combatants[action.target].name
            ));
            match action.effect {
                SlowEffect::Damage(amount) => self.apply_damage(action.target, amount),
                SlowEffect::Heal(amount) => self.apply_damage(action.target, -amount),
            }
        }
    }

    fn phase_ct_charge(&mut self) {
        for idx in 0..self.combatants.len() {
            let unit = &mut self.combatants[idx];
            // Corpses keep charging so crystal decay gets its turns; a dead
            // unit can still carry Sleep, which must not freeze it.
            if unit.alive() && (unit.has_status(Status::Stop) || unit.has_status(Status::Sleep)) {
                continue;
            }
            let mut speed = unit.speed();
            if unit.has_status(Status::Haste) {
                speed = speed * 3 / 2;
            }
            if unit.has_status(Status::Slow) {
                speed = speed * 2 / 3;
            }
            unit.ct += speed;
            if unit.ct >= CT_TURN_THRESHOLD && !self.active_queue.contains(&idx) {
                self.active_queue.push_back(idx);
            }
        }
    }

    fn phase_active_turns(&mut self) -> Result<(), SimError> {
        while let Some(idx) = self.active_queue.pop_front() {
            let unit = &self.combatants[idx];
            if unit.has_status(Status::Crystal) {
                continue;
            }

            // The dead-unit branch comes before the disable skips: a corpse
            // carrying Sleep still owes its Reraise/crystal processing.
            if unit.dead() {
                self.dead_unit_turn(idx);
                self.pay_turn_cost(idx);
                continue;
            }

            if unit.has_status(Status::Petrify)
                || unit.has_status(Status::Stop)
                || unit.has_status(Status::Sleep)
            {
                continue;
            }

            self.combatants[idx].moved_this_turn = false;
            self.combatants[idx].acted_this_turn = false;
            self.combatants[idx].took_damage_this_turn = false;

            if self.combatants[idx].has_status(Status::Regen) {
                let heal = self.combatants[idx].max_hp() / 8;
                self.apply_damage(idx, -heal);
            }
            if self.combatants[idx].has_status(Status::Poison) {
                let hurt = self.combatants[idx].max_hp() / 8;
                self.report(format!(
                    "{} suffers from poison",
                    self.combatants[idx].name
                ));
                self.apply_damage(idx, hurt);
            }

            if self.combatants[idx].alive() {
                ai::take_active_turn(self, idx)?;
            }

            self.pay_turn_cost(idx);

            let unit = &self.combatants[idx];
            if (unit.acted_this_turn || unit.took_damage_this_turn)
                && unit.has_status(Status::Transparent)
            {
                self.combatants[idx].cancel_status(Status::Transparent);
                self.report(format!(
                    "{} is no longer transparent",
                    self.combatants[idx].name
                ));
            }
        }
        Ok(())
    }

    /// Reraise fires first; otherwise the corpse counts down to a crystal.
    fn dead_unit_turn(&mut self, idx: usize) {
        let unit = &self.combatants[idx];
        if unit.has_status(Status::Reraise) && !unit.has_status(Status::Undead) {
            self.combatants[idx].cancel_status(Status::Reraise);
            let hp = (self.combatants[idx].max_hp() / 10).max(1);
            self.revive(idx, hp);
            return;
        }
        self.combatants[idx].crystal_counter -= 1;
        if self.combatants[idx].crystal_counter <= 0 {
            self.combatants[idx].add_status(Status::Crystal);
            self.report(format!("{} crystallizes", self.combatants[idx].name));
        }
    }

    fn pay_turn_cost(&mut self, idx: usize) {
        let unit = &mut self.combatants[idx];
        let mut cost = 60;
        if unit.moved_this_turn {
            cost += 20;
        }
        if unit.acted_this_turn {
            cost += 20;
        }
        unit.ct = (unit.ct - cost).min(60);
    }

    // --- Effect plumbing used by the decision engine -----------------------

    pub fn report(&mut self, message: String) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(format!("T{:05}: {}", self.tick, message));
        }
    }

    /// Damage for positive amounts, healing for negative ones. Dead units
    /// are inert; revival goes through [`Simulation::revive`].
    pub fn apply_damage(&mut self, idx: usize, amount: i32) {
        if self.combatants[idx].dead() {
            return;
        }
        let max = self.combatants[idx].max_hp();
        let new_hp = (self.combatants[idx].hp - amount).clamp(0, max);
        let delta = self.combatants[idx].hp - new_hp;
        self.combatants[idx].hp = new_hp;

        if amount > 0 {
            self.combatants[idx].took_damage_this_turn = true;
            self.report(format!(
                "{} takes {} damage",
                self.combatants[idx].name, delta
            ));
            for &status in CANCELLED_BY_DAMAGE {
                if self.combatants[idx].cancel_status(status) {
                    self.report(format!(
                        "{}'s {} is broken by the hit",
                        self.combatants[idx].name, status
                    ));
                }
            }
            if self.combatants[idx].dead() {
                self.combatants[idx].die();
                self.report(format!("{} dies", self.combatants[idx].name));
            }
        } else if delta < 0 {
            self.report(format!(
                "{} recovers {} HP",
                self.combatants[idx].name, -delta
            ));
        }
    }

    pub fn revive(&mut self, idx: usize, hp: i32) {
        if !self.combatants[idx].dead() || self.combatants[idx].has_status(Status::Crystal) {
            return;
        }
        self.combatants[idx].hp = hp.clamp(1, self.combatants[idx].max_hp());
        self.report(format!(
            "{} rises with {} HP",
            self.combatants[idx].name, self.combatants[idx].hp
        ));
    }

    pub fn change_mp(&mut self, idx: usize, amount: i32) {
        let max = self.combatants[idx].max_mp();
        self.combatants[idx].mp = (self.combatants[idx].mp + amount).clamp(0, max);
    }

    pub fn add_status(&mut self, idx: usize, status: Status) {
        if self.combatants[idx].add_status(status) {
            if status == Status::Death {
                self.report(format!("{} dies", self.combatants[idx].name));
            } else {
                self.report(format!(
                    "{} is afflicted by {}",
                    self.combatants[idx].name, status
                ));
            }
        }
    }

    pub fn cancel_status(&mut self, idx: usize, status: Status) {
        if self.combatants[idx].cancel_status(status) {
            self.report(format!(
                "{} shakes off {}",
                self.combatants[idx].name, status
            ));
        }
    }

    /// Start charging a slow action; it matures in the slow-action phases.
    pub fn queue_slow_action(&mut self, idx: usize, action: SlowAction) {
        self.report(format!(
            "{} begins charging {}",
            self.combatants[idx].name, action.ability
        ));
        self.combatants[idx].pending_action = Some(action);
        self.combatants[idx].add_status(Status::Charging);
    }
}

// --- Battle runners --------------------------------------------------------

pub fn run_battle(
    matchup: &MatchupConfig,
    patch: &Patch,
    arena: &Arena,
    seed: u64,
    trace: bool,
) -> Result<BattleReport, SimError> {
    let mut sim = Simulation::new(&matchup.left, &matchup.right, patch, arena.clone(), seed)?;
    if trace {
        sim = sim.with_trace();
    }
    sim.run()
}

pub fn run_battles_sequential(
    matchup: &MatchupConfig,
    patch: &Patch,
    arena: &Arena,
    num_sims: u64,
) -> Result<Vec<BattleReport>, SimError> {
    (0..num_sims)
        .map(|seed| run_battle(matchup, patch, arena, seed, false))
        .collect()
}

/// One battle per seed `0..num_sims`, fanned out over the rayon pool.
pub fn run_battles_parallel(
    matchup: &MatchupConfig,
    patch: &Patch,
    arena: &Arena,
    num_sims: u64,
) -> Result<Vec<BattleReport>, SimError> {
    (0..num_sims)
        .into_par_iter()
        .map(|seed| run_battle(matchup, patch, arena, seed, false))
        .collect()
}

//! End-to-end battles built from in-memory configuration.

use tactics_sim::arena::Arena;
use tactics_sim::config::{MatchupConfig, UnitConfig};
use tactics_sim::patch::{Equipment, Patch};
use tactics_sim::report::MatchupStats;
use tactics_sim::simulation::{run_battle, run_battles_parallel, MAX_TICKS};
use tactics_sim::status::Status;

fn unit(name: &str, job: &str, sign: &str, mainhand: &str, skills: &[&str]) -> UnitConfig {
    UnitConfig {
        name: name.into(),
        job: job.into(),
        gender: "Male".into(),
        sign: sign.into(),
        brave: 70,
        faith: 70,
        mainhand: mainhand.into(),
        offhand: String::new(),
        head: String::new(),
        armor: String::new(),
        accessory: String::new(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

fn patch() -> Patch {
    let mut patch = Patch::default();
    patch.equipment.insert(
        "Long Sword".into(),
        Equipment {
            name: "Long Sword".into(),
            weapon_type: "Sword".into(),
            wp: 8,
            range: 1,
            ..Equipment::default()
        },
    );
    patch.equipment.insert(
        "Hunting Bow".into(),
        Equipment {
            name: "Hunting Bow".into(),
            weapon_type: "Bow".into(),
            wp: 5,
            range: 3,
            ..Equipment::default()
        },
    );
    patch
}

fn matchup() -> MatchupConfig {
    MatchupConfig {
        left: vec![
            unit("Ramza", "Squire", "Capricorn", "Long Sword", &["Potion"]),
            unit("Agrias", "Knight", "Cancer", "Long Sword", &[]),
            unit("Mustadio", "Archer", "Virgo", "Hunting Bow", &[]),
            unit("Rad", "Squire", "Taurus", "Long Sword", &["Phoenix Down"]),
        ],
        right: vec![
            unit("Wiegraf", "Knight", "Aries", "Long Sword", &[]),
            unit("Miluda", "Knight", "Libra", "Long Sword", &[]),
            unit("Gragoroth", "Archer", "Leo", "Hunting Bow", &[]),
            unit("Golagros", "Squire", "Pisces", "Long Sword", &["Potion"]),
        ],
    }
}

#[test]
fn full_battle_terminates_with_a_single_outcome() {
    let patch = patch();
    let arena = Arena::default();
    for seed in 0..20 {
        let report = run_battle(&matchup(), &patch, &arena, seed, false).unwrap();
        assert!(report.ticks <= MAX_TICKS, "seed {} overran", seed);
        if report.timeout {
            assert!(!report.left_wins, "seed {} won on timeout", seed);
        }
    }
}

#[test]
fn same_seed_reproduces_the_battle_exactly() {
    let patch = patch();
    let arena = Arena::default();
    let a = run_battle(&matchup(), &patch, &arena, 1234, true).unwrap();
    let b = run_battle(&matchup(), &patch, &arena, 1234, true).unwrap();
    assert_eq!(a.left_wins, b.left_wins);
    assert_eq!(a.timeout, b.timeout);
    assert_eq!(a.ticks, b.ticks);
    assert_eq!(a.trace, b.trace);
}

#[test]
fn trace_records_the_battle() {
    let report = run_battle(&matchup(), &patch(), &Arena::default(), 5, true).unwrap();
    let trace = report.trace.expect("trace requested");
    assert!(!trace.is_empty());
    assert!(trace.iter().any(|line| line.contains("attacks")));
}

#[test]
fn untraced_battles_carry_no_trace() {
    let report = run_battle(&matchup(), &patch(), &Arena::default(), 5, false).unwrap();
    assert!(report.trace.is_none());
}

#[test]
fn parallel_runs_aggregate_cleanly() {
    let results = run_battles_parallel(&matchup(), &patch(), &Arena::default(), 50).unwrap();
    assert_eq!(results.len(), 50);
    let stats = MatchupStats::from_results(&results);
    assert_eq!(stats.runs, 50);
    assert!(stats.left_win_rate >= 0.0 && stats.left_win_rate <= 1.0);
    assert!(stats.min_ticks <= stats.max_ticks);
}

#[test]
fn parallel_matches_sequential_per_seed() {
    let patch = patch();
    let arena = Arena::default();
    let parallel = run_battles_parallel(&matchup(), &patch, &arena, 10).unwrap();
    for (seed, report) in parallel.iter().enumerate() {
        let solo = run_battle(&matchup(), &patch, &arena, seed as u64, false).unwrap();
        assert_eq!(report.left_wins, solo.left_wins);
        assert_eq!(report.ticks, solo.ticks);
    }
}

#[test]
fn a_stacked_matchup_is_a_blowout() {
    // Four armed knights against four unarmed squires with a bad sign
    // spread should win essentially always.
    let strong: Vec<UnitConfig> = (0..4)
        .map(|i| unit(&format!("K{}", i), "Knight", "Aries", "Long Sword", &[]))
        .collect();
    let weak: Vec<UnitConfig> = (0..4)
        .map(|i| unit(&format!("S{}", i), "Squire", "Cancer", "", &[]))
        .collect();
    let mut patch = patch();
    patch.base_stats.insert(
        "Knight".into(),
        tactics_sim::patch::BaseStats {
            hp: 150,
            pa: 8,
            ..tactics_sim::patch::BaseStats::default()
        },
    );
    let matchup = MatchupConfig { left: strong, right: weak };
    let results = run_battles_parallel(&matchup, &patch, &Arena::default(), 40).unwrap();
    let stats = MatchupStats::from_results(&results);
    assert!(
        stats.left_win_rate > 0.8,
        "expected a blowout, got {}",
        stats.left_win_rate
    );
}

#[test]
fn initial_equipment_statuses_apply_at_spawn() {
    let mut patch = patch();
    patch.equipment.insert(
        "Angel Ring".into(),
        Equipment {
            name: "Angel Ring".into(),
            initial: vec![Status::Reraise],
            immune_to: vec![Status::DeathSentence],
            ..Equipment::default()
        },
    );
    let mut matchup = matchup();
    matchup.left[0].accessory = "Angel Ring".into();
    let sim = tactics_sim::simulation::Simulation::new(
        &matchup.left,
        &matchup.right,
        &patch,
        Arena::default(),
        9,
    )
    .unwrap();
    assert!(sim.combatants[0].has_status(Status::Reraise));
    assert!(sim.combatants[0].is_immune(Status::DeathSentence));
    assert!(!sim.combatants[1].has_status(Status::Reraise));
}

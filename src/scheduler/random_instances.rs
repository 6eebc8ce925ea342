//! Invariant checks over seeded random instances.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::config::TimetableConfig;
use crate::heuristics::rules::{InputOrder, LeastFilledDay};
use crate::heuristics::{PendingSlot, SearchContext};
use crate::models::{ClassGroup, ClockTime, SpecialPeriod, Subject, Teacher};

const DAYS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

fn random_problem(rng: &mut StdRng) -> TimetableProblem {
    let days: Vec<String> = DAYS[..rng.random_range(2..=5)]
        .iter()
        .map(|d| d.to_string())
        .collect();
    let periods = rng.random_range(2..=6u32);
    let mut config = TimetableConfig::new(
        days.clone(),
        "08:00",
        ClockTime::from_hm(8 + periods, 0).to_string(),
        1.0,
    )
    .with_fill_all_periods(rng.random_bool(0.5))
    .with_branching_limit(rng.random_range(1..=5))
    .with_per_day_subject_cap(rng.random_range(1..=2));
    if rng.random_bool(0.3) {
        let day = days[rng.random_range(0..days.len())].clone();
        config = config.with_special_period(SpecialPeriod::new(day, "08:00", "09:00", "Assembly"));
    }

    let subject_count = rng.random_range(2..=6);
    let subjects: Vec<Subject> = (0..subject_count)
        .map(|i| {
            Subject::new(format!("S{i}"))
                .with_credits(rng.random_range(1..=5))
                .with_weekly_sessions(rng.random_range(1..=4))
        })
        .collect();

    let teacher_count = rng.random_range(2..=6);
    let teachers: Vec<Teacher> = (0..teacher_count)
        .map(|i| {
            let mut t = Teacher::new(format!("T{i}"))
                .with_max_daily_hours(rng.random_range(1..=5))
                .with_rating(rng.random_range(0.0..5.0));
            for (s, subject) in subjects.iter().enumerate() {
                if s % teacher_count == i || rng.random_bool(0.3) {
                    t = if rng.random_bool(0.3) {
                        t.with_primary_subject(subject.id.clone())
                    } else {
                        t.with_subject(subject.id.clone())
                    };
                }
            }
            if rng.random_bool(0.5) {
                for day in &days {
                    if rng.random_bool(0.7) {
                        let from = rng.random_range(0..periods);
                        let to = rng.random_range(from + 1..=periods);
                        t = t.with_availability(
                            day.to_lowercase(),
                            ClockTime::from_hm(8 + from, 0),
                            ClockTime::from_hm(8 + to, 0),
                        );
                    }
                }
            }
            t
        })
        .collect();

    let classes: Vec<ClassGroup> = (0..rng.random_range(1..=4))
        .map(|i| {
            let mut c = ClassGroup::new(format!("C{i}")).with_room(format!("R{i}"));
            for subject in &subjects {
                if c.subjects.is_empty() || rng.random_bool(0.5) {
                    c = c.with_subject(subject.id.clone());
                }
            }
            c
        })
        .collect();

    TimetableProblem::new(teachers, classes, subjects, config).unwrap()
}

#[test]
fn test_hard_constraints_hold() {
    for seed in 0..60 {
        let mut rng = StdRng::seed_from_u64(seed);
        let problem = random_problem(&mut rng);
        let result = TimetableGenerator::new().generate(problem);

        assert!(result.success(), "seed {seed}: default mode always completes");
        let violations = audit(result.problem(), result.timetable());
        assert!(violations.is_empty(), "seed {seed}: {violations:?}");

        let t = result.timetable();
        assert_eq!(
            t.assigned_count() + t.free_count() + t.special_count(),
            t.classes().len() * t.slots().len()
        );
        for (s, slot) in t.slots().iter().enumerate() {
            if slot.is_special_period {
                assert!(t.classes().iter().all(|c| !c.cells[s].is_assigned()));
            }
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    for seed in 100..130 {
        let problem = random_problem(&mut StdRng::seed_from_u64(seed));
        let a = TimetableGenerator::new().generate(problem.clone());
        let b = TimetableGenerator::new().generate(problem);
        assert_eq!(a.timetable(), b.timetable(), "seed {seed}");
        assert_eq!(a.stats(), b.stats(), "seed {seed}");
    }
}

#[test]
fn test_alternative_heuristics_keep_constraints() {
    for seed in 200..230 {
        let problem = random_problem(&mut StdRng::seed_from_u64(seed));
        for generator in [
            TimetableGenerator::new().with_slot_selector(InputOrder),
            TimetableGenerator::new().with_slot_selector(LeastFilledDay),
        ] {
            let result = generator.generate(problem.clone());
            assert!(audit(result.problem(), result.timetable()).is_empty(), "seed {seed}");
        }
    }
}

#[test]
fn test_strict_mode_with_budget_stays_consistent() {
    for seed in 300..320 {
        let mut rng = StdRng::seed_from_u64(seed);
        let base = random_problem(&mut rng);
        let config = base
            .config()
            .clone()
            .with_max_free_ratio(rng.random_range(0.0..0.5))
            .with_max_search_steps(300);
        let problem = TimetableProblem::new(
            base.teachers().to_vec(),
            base.classes().to_vec(),
            base.subjects().to_vec(),
            config,
        )
        .unwrap();

        let result = TimetableGenerator::new().generate(problem);
        assert!(audit(result.problem(), result.timetable()).is_empty(), "seed {seed}");
        if result.success() {
            let kpi = result.kpi();
            let ratio = result.problem().config().max_free_ratio.unwrap_or(1.0);
            assert!(
                kpi.free_cells <= (ratio * kpi.assignable_cells as f64).floor() as usize,
                "seed {seed}: strict success above the allowance"
            );
        }
    }
}

#[test]
fn test_commit_rollback_symmetry() {
    for seed in 400..440 {
        let mut rng = StdRng::seed_from_u64(seed);
        let problem = random_problem(&mut rng);
        let memo = AvailabilityMemo::new(&problem);
        let mut state = SearchState::new(&problem);
        let scorer = crate::heuristics::rules::CreditRatingScorer;

        let mut history = vec![(state.caches().clone(), state.timetable().clone())];
        let cells: Vec<PendingSlot> = pending_slots(&problem, &state);
        for cell in cells {
            if !rng.random_bool(0.6) {
                continue;
            }
            let candidates: Vec<Candidate> = {
                let context = SearchContext::new(&problem, &state, &memo);
                ranked_candidates(&context, &scorer, cell.class, cell.slot)
                    .into_iter()
                    .filter(|c| is_legal(&context, cell.class, cell.slot, c.teacher, c.subject))
                    .collect()
            };
            if candidates.is_empty() {
                continue;
            }
            let pick = candidates[rng.random_range(0..candidates.len())];
            state.commit(
                &problem,
                Placement {
                    class: cell.class,
                    slot: cell.slot,
                    teacher: pick.teacher,
                    subject: pick.subject,
                },
            );
            history.push((state.caches().clone(), state.timetable().clone()));
            assert!(audit(&problem, state.timetable()).is_empty(), "seed {seed}");
            assert_eq!(state.caches().occupied_count(), state.timetable().assigned_count());
        }

        while state.depth() > 0 {
            history.pop();
            state.rollback(&problem);
            let (caches, timetable) = history.last().unwrap();
            assert_eq!(state.caches(), caches, "seed {seed}");
            assert_eq!(state.timetable(), timetable, "seed {seed}");
        }
        assert_eq!(state.caches(), &ConstraintCaches::default());
    }
}

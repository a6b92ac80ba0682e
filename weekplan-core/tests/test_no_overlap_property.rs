use std::collections::HashSet;

use proptest::prelude::*;
use weekplan_core::time::{day_index, hour_of};
use weekplan_core::{Outcome, SearchLimits, TaskRecord, schedule};

fn tasks_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<TaskRecord>> {
    proptest::collection::vec((0u32..24, 1u32..=8), 1..=max_tasks).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (hour, hours))| {
                let start = format!("{hour:02}:00");
                TaskRecord::parse(format!("task_{i}"), format!("T{i}"), &start, i64::from(hours))
                    .unwrap()
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placements_never_overlap(tasks in tasks_strategy(9)) {
        let r = schedule(&tasks, &SearchLimits::default()).unwrap();
        let ps = r.state.placements();

        for (i, a) in ps.iter().enumerate() {
            for b in &ps[i + 1..] {
                prop_assert!(!a.overlaps(b.start, b.end()), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn placements_keep_identity_and_time_of_day(tasks in tasks_strategy(9)) {
        let r = schedule(&tasks, &SearchLimits::default()).unwrap();

        let mut seen = HashSet::new();
        for p in r.state.placements() {
            let t = tasks.iter().find(|t| t.id() == p.task_id);
            prop_assert!(t.is_some());
            let t = t.unwrap();
            prop_assert!(seen.insert(p.task_id.clone()));
            prop_assert_eq!(hour_of(p.start), t.start_hour());
            prop_assert_eq!(p.duration_hours, t.duration_hours());
            prop_assert!((0..7).contains(&day_index(p.start)));
        }

        prop_assert_eq!(seen.len() + r.unplaced.len(), tasks.len());
        prop_assert_eq!(r.outcome == Outcome::Scheduled, r.unplaced.is_empty());
    }

    #[test]
    fn scheduling_is_deterministic(tasks in tasks_strategy(7)) {
        let a = schedule(&tasks, &SearchLimits::default()).unwrap();
        let b = schedule(&tasks, &SearchLimits::default()).unwrap();
        prop_assert_eq!(a, b);
    }
}

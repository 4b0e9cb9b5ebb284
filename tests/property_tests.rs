//! Invariants that must hold for any sequence of actions and ticks.

use proptest::prelude::*;
use virtual_pet::{Action, ActivityLog, Outcome, PetState};

#[derive(Debug, Clone, Copy)]
enum Op {
    Act(Action),
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Act(Action::Feed)),
        Just(Op::Act(Action::Play)),
        Just(Op::Act(Action::Clean)),
        Just(Op::Act(Action::Sleep)),
        Just(Op::Tick),
    ]
}

proptest! {
    #[test]
    fn stats_stay_in_range(ops in proptest::collection::vec(op(), 0..300)) {
        let mut pet = PetState::new();
        for op in ops {
            match op {
                Op::Act(a) => { let _ = pet.apply(a); }
                Op::Tick => pet.tick(),
            }
            for (stat, v) in pet.stats().iter() {
                prop_assert!((0..=100).contains(&v), "{:?} = {}", stat, v);
            }
        }
    }

    #[test]
    fn log_is_bounded_and_counts_actions(ops in proptest::collection::vec(op(), 0..40)) {
        let mut pet = PetState::new();
        let mut logged = 1usize;
        for op in ops {
            match op {
                Op::Act(a) => { let _ = pet.apply(a); logged += 1; }
                Op::Tick => pet.tick(),
            }
        }
        prop_assert_eq!(pet.activity_log().len(), logged.min(ActivityLog::CAPACITY));
    }

    #[test]
    fn asleep_actions_change_nothing(
        action in prop_oneof![Just(Action::Feed), Just(Action::Play), Just(Action::Clean)],
        ticks in 0usize..20,
    ) {
        let mut pet = PetState::new();
        for _ in 0..ticks {
            pet.tick();
        }
        let _ = pet.sleep();
        let before = pet.stats();
        prop_assert_eq!(pet.apply(action), Outcome::RejectedBecauseAsleep);
        prop_assert_eq!(pet.stats(), before);
        prop_assert!(pet.is_sleeping());
    }

    #[test]
    fn sleep_is_a_pure_toggle(n in 0usize..25) {
        let mut pet = PetState::new();
        for _ in 0..n {
            prop_assert!(pet.sleep().is_applied());
        }
        prop_assert_eq!(pet.is_sleeping(), n % 2 == 1);
    }
}

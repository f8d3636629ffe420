use proptest::prelude::*;
use roster_activities::{RosterErrorKind, RosterManager};
use roster_domain::activity::{Activity, Catalog};

const ACTIVITIES: [&str; 2] = ["Chess Club", "Drama Club"];

#[derive(Debug, Clone)]
enum Op {
    Enroll(usize, u8),
    Unregister(usize, u8),
}

fn op() -> impl Strategy<Value = Op> {
    // Index 2 addresses an unknown activity.
    prop_oneof![
        (0..3usize, 0..8u8).prop_map(|(a, e)| Op::Enroll(a, e)),
        (0..3usize, 0..8u8).prop_map(|(a, e)| Op::Unregister(a, e)),
    ]
}

fn manager(capacity: u32) -> RosterManager {
    let catalog = ACTIVITIES
        .iter()
        .fold(Catalog::new(), |c, name| c.with(*name, Activity::new("", "", capacity)));
    RosterManager::new(catalog).unwrap()
}

fn name(index: usize) -> &'static str {
    ACTIVITIES.get(index).copied().unwrap_or("Unknown Club")
}

proptest! {
    #[test]
    fn invariants_hold_over_random_sequences(
        capacity in 1..5u32,
        ops in proptest::collection::vec(op(), 0..64),
    ) {
        let manager = manager(capacity);

        for op in ops {
            let (index, email, enroll) = match op {
                Op::Enroll(a, e) => (a, format!("s{e}@x"), true),
                Op::Unregister(a, e) => (a, format!("s{e}@x"), false),
            };
            let activity = name(index);
            let before = manager.activity(activity).ok();
            let result = if enroll {
                manager.enroll(activity, &email)
            } else {
                manager.unregister(activity, &email)
            };

            let Some(before) = before else {
                prop_assert_eq!(result.unwrap_err().kind(), RosterErrorKind::NotFound);
                continue;
            };
            let after = manager.activity(activity).unwrap();
            let was_member = before.participants.contains(&email);

            match (enroll, result) {
                (true, Ok(_)) => {
                    prop_assert!(!was_member);
                    prop_assert_eq!(after.participants.last(), Some(&email));
                    prop_assert_eq!(after.participants.len(), before.participants.len() + 1);
                },
                (true, Err(err)) => {
                    let expected = if was_member {
                        RosterErrorKind::AlreadyRegistered
                    } else {
                        RosterErrorKind::CapacityExceeded
                    };
                    prop_assert_eq!(err.kind(), expected);
                    prop_assert_eq!(&after, &before);
                },
                (false, Ok(_)) => {
                    prop_assert!(was_member);
                    prop_assert!(!after.participants.contains(&email));
                    prop_assert_eq!(after.participants.len(), before.participants.len() - 1);
                },
                (false, Err(err)) => {
                    prop_assert!(!was_member);
                    prop_assert_eq!(err.kind(), RosterErrorKind::NotRegistered);
                    prop_assert_eq!(&after, &before);
                },
            }

            prop_assert!(after.participants.len() <= capacity as usize);
            let mut unique = after.participants.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), after.participants.len());
        }
    }

    #[test]
    fn enroll_then_unregister_restores_roster(
        seeded in proptest::collection::btree_set(0..20u8, 0..6),
        extra in 20..40u8,
    ) {
        let participants: Vec<String> = seeded.iter().map(|n| format!("s{n}@x")).collect();
        let catalog = Catalog::new()
            .with("Chess Club", Activity::new("", "", 12).with_participants(participants));
        let manager = RosterManager::new(catalog).unwrap();
        let before = manager.activity("Chess Club").unwrap();

        let email = format!("s{extra}@x");
        manager.enroll("Chess Club", &email).unwrap();
        manager.unregister("Chess Club", &email).unwrap();

        prop_assert_eq!(manager.activity("Chess Club").unwrap(), before);
    }
}

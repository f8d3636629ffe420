//! The roster manager: the only owner of mutable enrollment state.
//!
//! The set of activities is fixed at construction. Each activity's roster sits behind its own
//! [`Mutex`], so every check-then-mutate sequence (existence is lock-free, then duplicate,
//! capacity and append, or membership and removal) runs atomically per activity while
//! different activities never contend.

use crate::error::RosterError;
use crate::events::Change;
use fxhash::{FxHashMap, FxHashSet};
use parking_lot::Mutex;
use roster_domain::activity::{Activity, Catalog};
use tracing::{debug, info};

/// Acknowledgement of a committed enroll or unregister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub activity: String,
    pub email: String,
    pub change: Change,
    /// Roster size after the change.
    pub participants: usize,
    pub max_participants: u32,
}

impl Enrollment {
    /// Client-facing confirmation text.
    #[must_use]
    pub fn message(&self) -> String {
        match self.change {
            Change::Enrolled => format!("Signed up {} for {}", self.email, self.activity),
            Change::Unregistered => format!("Unregistered {} from {}", self.email, self.activity),
        }
    }
}

#[derive(Debug)]
struct Slot {
    name: String,
    activity: Mutex<Activity>,
}

/// In-memory catalog with per-activity atomic enrollment.
#[derive(Debug)]
pub struct RosterManager {
    slots: Vec<Slot>,
    index: FxHashMap<String, usize>,
}

impl RosterManager {
    /// Takes ownership of a seed catalog after validating it.
    ///
    /// # Errors
    /// [`RosterError::InvalidSeed`] when a name repeats, a capacity is zero, a roster repeats
    /// an email or a roster is already over capacity.
    pub fn new(catalog: Catalog) -> Result<Self, RosterError> {
        let mut slots = Vec::with_capacity(catalog.len());
        let mut index = FxHashMap::default();

        for (name, activity) in catalog {
            validate(&name, &activity)?;
            if index.insert(name.clone(), slots.len()).is_some() {
                return Err(RosterError::invalid_seed(format!("duplicate activity '{name}'")));
            }
            slots.push(Slot { name, activity: Mutex::new(activity) });
        }

        debug!(activities = slots.len(), "Roster manager ready");
        Ok(Self { slots, index })
    }

    /// Snapshot of every activity in catalog order.
    ///
    /// Activities are locked one at a time: each entry is internally consistent, but the
    /// snapshot as a whole may interleave with concurrent writes to other activities.
    #[must_use]
    pub fn list_activities(&self) -> Catalog {
        self.slots.iter().map(|slot| (slot.name.clone(), slot.activity.lock().clone())).collect()
    }

    /// Snapshot of a single activity.
    ///
    /// # Errors
    /// [`RosterError::NotFound`] for an unknown name.
    pub fn activity(&self, name: &str) -> Result<Activity, RosterError> {
        Ok(self.slot(name)?.activity.lock().clone())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn activity_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Appends `email` to the activity's roster.
    ///
    /// Checks run in a fixed order: existence, duplicate, then capacity. A student who is
    /// already enrolled in a full activity therefore gets `AlreadyRegistered`.
    ///
    /// # Errors
    /// [`RosterError::NotFound`], [`RosterError::AlreadyRegistered`] or
    /// [`RosterError::CapacityExceeded`]; the roster is unchanged in every case.
    pub fn enroll(&self, name: &str, email: &str) -> Result<Enrollment, RosterError> {
        let slot = self.slot(name)?;
        let mut activity = slot.activity.lock();

        if activity.has_participant(email) {
            debug!(activity = %slot.name, email = %email, "Enroll rejected: already registered");
            return Err(RosterError::AlreadyRegistered {
                activity: slot.name.clone(),
                email: email.to_owned(),
            });
        }
        if activity.is_full() {
            debug!(activity = %slot.name, email = %email, "Enroll rejected: activity full");
            return Err(RosterError::CapacityExceeded {
                activity: slot.name.clone(),
                max_participants: activity.max_participants,
            });
        }

        activity.participants.push(email.to_owned());
        info!(
            activity = %slot.name,
            email = %email,
            participants = activity.participants.len(),
            spots_left = activity.spots_left(),
            "Participant enrolled"
        );
        Ok(ack(&slot.name, email, Change::Enrolled, &activity))
    }

    /// Removes `email` from the activity's roster, keeping the order of the others.
    ///
    /// # Errors
    /// [`RosterError::NotFound`] or [`RosterError::NotRegistered`]; the roster is unchanged.
    pub fn unregister(&self, name: &str, email: &str) -> Result<Enrollment, RosterError> {
        let slot = self.slot(name)?;
        let mut activity = slot.activity.lock();

        let Some(position) = activity.participants.iter().position(|p| p == email) else {
            debug!(activity = %slot.name, email = %email, "Unregister rejected: not registered");
            return Err(RosterError::NotRegistered {
                activity: slot.name.clone(),
                email: email.to_owned(),
            });
        };

        activity.participants.remove(position);
        info!(
            activity = %slot.name,
            email = %email,
            participants = activity.participants.len(),
            "Participant unregistered"
        );
        Ok(ack(&slot.name, email, Change::Unregistered, &activity))
    }

    fn slot(&self, name: &str) -> Result<&Slot, RosterError> {
        self.index.get(name).map(|&i| &self.slots[i]).ok_or_else(|| {
            debug!(activity = %name, "Unknown activity");
            RosterError::NotFound { name: name.to_owned() }
        })
    }
}

fn ack(name: &str, email: &str, change: Change, activity: &Activity) -> Enrollment {
    Enrollment {
        activity: name.to_owned(),
        email: email.to_owned(),
        change,
        participants: activity.participants.len(),
        max_participants: activity.max_participants,
    }
}

fn validate(name: &str, activity: &Activity) -> Result<(), RosterError> {
    if activity.max_participants == 0 {
        return Err(RosterError::invalid_seed(format!("'{name}' has zero capacity")));
    }
    if activity.participants.len() > activity.capacity() {
        return Err(RosterError::invalid_seed(format!(
            "'{name}' has {} participants but only {} places",
            activity.participants.len(),
            activity.max_participants
        )));
    }

    let mut seen = FxHashSet::default();
    if let Some(email) = activity.participants.iter().find(|email| !seen.insert(email.as_str())) {
        return Err(RosterError::invalid_seed(format!("'{name}' lists {email} twice")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterErrorKind;

    fn chess(max: u32) -> RosterManager {
        RosterManager::new(Catalog::new().with(
            "Chess Club",
            Activity::new("Learn strategies", "Fridays, 3:30 PM - 5:00 PM", max),
        ))
        .unwrap()
    }

    fn roster(manager: &RosterManager) -> Vec<String> {
        manager.activity("Chess Club").unwrap().participants
    }

    #[test]
    fn full_chess_club_scenario() {
        let manager = chess(2);

        manager.enroll("Chess Club", "a@x.com").unwrap();
        assert_eq!(roster(&manager), ["a@x.com"]);
        manager.enroll("Chess Club", "b@x.com").unwrap();
        assert_eq!(roster(&manager), ["a@x.com", "b@x.com"]);

        let full = manager.enroll("Chess Club", "c@x.com").unwrap_err();
        assert_eq!(full.kind(), RosterErrorKind::CapacityExceeded);
        assert_eq!(roster(&manager), ["a@x.com", "b@x.com"]);

        let dup = manager.enroll("Chess Club", "a@x.com").unwrap_err();
        assert_eq!(dup.kind(), RosterErrorKind::AlreadyRegistered);

        manager.unregister("Chess Club", "a@x.com").unwrap();
        assert_eq!(roster(&manager), ["b@x.com"]);

        let gone = manager.unregister("Chess Club", "a@x.com").unwrap_err();
        assert_eq!(gone.kind(), RosterErrorKind::NotRegistered);
    }

    #[test]
    fn duplicate_wins_over_capacity() {
        let manager = chess(1);
        manager.enroll("Chess Club", "a@x.com").unwrap();

        let err = manager.enroll("Chess Club", "a@x.com").unwrap_err();
        assert_eq!(err.kind(), RosterErrorKind::AlreadyRegistered);
    }

    #[test]
    fn unknown_activity_is_not_found_for_both_operations() {
        let manager = chess(2);
        for err in [
            manager.enroll("chess club", "a@x.com").unwrap_err(),
            manager.unregister("Invalid<>Activity", "").unwrap_err(),
        ] {
            assert_eq!(err.kind(), RosterErrorKind::NotFound);
        }
    }

    #[test]
    fn acknowledgement_reports_roster_size() {
        let manager = chess(3);
        let ack = manager.enroll("Chess Club", "a+b@x.com").unwrap();

        assert_eq!(ack.participants, 1);
        assert_eq!(ack.max_participants, 3);
        assert_eq!(ack.message(), "Signed up a+b@x.com for Chess Club");

        let ack = manager.unregister("Chess Club", "a+b@x.com").unwrap();
        assert_eq!(ack.participants, 0);
        assert_eq!(ack.message(), "Unregistered a+b@x.com from Chess Club");
    }

    #[test]
    fn unregister_keeps_relative_order() {
        let manager = chess(5);
        for email in ["a", "b", "c", "d"] {
            manager.enroll("Chess Club", email).unwrap();
        }
        manager.unregister("Chess Club", "b").unwrap();
        assert_eq!(roster(&manager), ["a", "c", "d"]);
    }

    #[test]
    fn keys_are_opaque() {
        let manager = chess(5);
        manager.enroll("Chess Club", "").unwrap();
        manager.enroll("Chess Club", "Élodie Ünïcode@x").unwrap();
        manager.enroll("Chess Club", "A@X.COM").unwrap();
        manager.enroll("Chess Club", "a@x.com").unwrap();

        assert_eq!(roster(&manager).len(), 4);
        assert!(manager.enroll("Chess Club", "").is_err());
    }

    #[test]
    fn seed_validation() {
        let bad = [
            Catalog::new().with("A", Activity::new("", "", 0)),
            Catalog::new().with("A", Activity::new("", "", 1).with_participants(["x", "y"])),
            Catalog::new().with("A", Activity::new("", "", 3).with_participants(["x", "x"])),
            Catalog::new().with("A", Activity::new("", "", 1)).with("A", Activity::new("", "", 2)),
        ];
        for catalog in bad {
            let err = RosterManager::new(catalog).unwrap_err();
            assert_eq!(err.kind(), RosterErrorKind::InvalidSeed);
        }

        let full = Catalog::new().with("A", Activity::new("", "", 1).with_participants(["x"]));
        assert!(RosterManager::new(full).is_ok());
    }

    #[test]
    fn read_helpers_follow_catalog_order() {
        let manager = RosterManager::new(
            Catalog::new().with("B", Activity::new("", "", 1)).with("A", Activity::new("", "", 1)),
        )
        .unwrap();

        assert_eq!(manager.len(), 2);
        assert!(manager.contains("A"));
        assert!(!manager.contains("C"));
        assert_eq!(manager.activity_names().collect::<Vec<_>>(), ["B", "A"]);
        assert_eq!(manager.list_activities().names().collect::<Vec<_>>(), ["B", "A"]);
    }
}

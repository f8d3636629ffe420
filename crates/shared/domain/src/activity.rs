//! Activity and catalog models.
//!
//! The wire form of a [`Catalog`] is a JSON object keyed by activity name whose key order is the
//! catalog order. It is shared by the `GET /activities` body, seed files and snapshots.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single extracurricular activity and its current roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Activity {
    /// Human-readable description.
    pub description: String,
    /// Free-form meeting times, e.g. `Fridays, 3:30 PM - 5:00 PM`.
    pub schedule: String,
    /// Capacity; the roster never grows beyond it.
    pub max_participants: u32,
    /// Enrolled emails in signup order.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(description: impl Into<String>, schedule: impl Into<String>, max: u32) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants: max,
            participants: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.capacity()
    }

    /// Remaining free spots (zero for an over-full roster).
    #[must_use]
    pub fn spots_left(&self) -> usize {
        self.capacity().saturating_sub(self.participants.len())
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        usize::try_from(self.max_participants).unwrap_or(usize::MAX)
    }
}

/// Ordered collection of activities keyed by name.
///
/// Names are not deduplicated here; consumers that need unique names (the roster manager)
/// validate on construction, so a malformed seed can be reported instead of silently merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, Activity)>,
}

impl Catalog {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends an activity at the end of the catalog order.
    pub fn push(&mut self, name: impl Into<String>, activity: Activity) {
        self.entries.push((name.into(), activity));
    }

    /// Builder-style [`Catalog::push`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, activity: Activity) -> Self {
        self.push(name, activity);
        self
    }

    /// First activity with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Activity)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Activity)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl IntoIterator for Catalog {
    type Item = (String, Activity);
    type IntoIter = std::vec::IntoIter<(String, Activity)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Catalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, activity) in &self.entries {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of activity name to activity")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, activity)) = access.next_entry::<String, Activity>()? {
                    entries.push((name, activity));
                }
                Ok(Catalog { entries })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_and_spots_follow_capacity() {
        let mut activity = Activity::new("Chess", "Fridays", 2).with_participants(["a@x"]);
        assert!(!activity.is_full());
        assert_eq!(activity.spots_left(), 1);

        activity.participants.push("b@x".to_owned());
        assert!(activity.is_full());
        assert_eq!(activity.spots_left(), 0);
        assert!(activity.has_participant("b@x"));
        assert!(!activity.has_participant("B@x"));
    }

    #[test]
    fn catalog_keeps_insertion_order() {
        let catalog = Catalog::new()
            .with("Zeta", Activity::new("z", "z", 1))
            .with("Alpha", Activity::new("a", "a", 1));

        assert_eq!(catalog.names().collect::<Vec<_>>(), ["Zeta", "Alpha"]);
        assert!(catalog.get("Alpha").is_some());
        assert!(catalog.get("alpha").is_none());
    }
}

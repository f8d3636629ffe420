//! Catalog sources: the built-in Mergington catalog and JSON seed files.

use crate::error::{RosterError, RosterErrorExt};
use roster_domain::activity::{Activity, Catalog};
use std::path::Path;

/// The built-in Mergington High School catalog.
#[must_use]
pub fn default_catalog() -> Catalog {
    Catalog::new()
        .with(
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
            )
            .with_participants(["michael@mergington.edu", "daniel@mergington.edu"]),
        )
        .with(
            "Programming Class",
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
            )
            .with_participants(["emma@mergington.edu", "sophia@mergington.edu"]),
        )
        .with(
            "Gym Class",
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
            )
            .with_participants(["john@mergington.edu", "olivia@mergington.edu"]),
        )
        .with(
            "Soccer Team",
            Activity::new(
                "Competitive soccer training and inter-school matches",
                "Tuesdays and Thursdays, 4:00 PM - 6:00 PM",
                25,
            )
            .with_participants(["alex@mergington.edu", "sarah@mergington.edu"]),
        )
        .with(
            "Swimming Club",
            Activity::new(
                "Swimming techniques and competitive swimming events",
                "Mondays and Wednesdays, 3:30 PM - 5:00 PM",
                15,
            )
            .with_participants(["james@mergington.edu"]),
        )
        .with(
            "Art Studio",
            Activity::new(
                "Painting, drawing, and mixed media art projects",
                "Fridays, 2:00 PM - 4:00 PM",
                18,
            )
            .with_participants(["lily@mergington.edu", "grace@mergington.edu"]),
        )
        .with(
            "Drama Club",
            Activity::new(
                "Acting, theater production, and performance arts",
                "Wednesdays and Fridays, 3:30 PM - 5:30 PM",
                20,
            )
            .with_participants([
                "noah@mergington.edu",
                "isabella@mergington.edu",
                "ethan@mergington.edu",
            ]),
        )
        .with(
            "Debate Team",
            Activity::new(
                "Develop critical thinking and public speaking through competitive debates",
                "Thursdays, 3:30 PM - 5:00 PM",
                16,
            )
            .with_participants(["ava@mergington.edu", "william@mergington.edu"]),
        )
        .with(
            "Science Olympiad",
            Activity::new(
                "Competitive science events covering biology, chemistry, physics, and engineering",
                "Tuesdays, 3:30 PM - 5:30 PM",
                24,
            )
            .with_participants([
                "mia@mergington.edu",
                "benjamin@mergington.edu",
                "charlotte@mergington.edu",
            ]),
        )
}

/// Parses a catalog from its JSON wire form.
///
/// # Errors
/// [`RosterError::Serde`] for malformed JSON.
pub fn parse_catalog(bytes: &[u8]) -> Result<Catalog, RosterError> {
    serde_json::from_slice::<Catalog>(bytes).context("Parsing catalog JSON")
}

/// Reads a seed catalog from an arbitrary path (outside the storage sandbox).
///
/// # Errors
/// [`RosterError::Internal`] if the file cannot be read, [`RosterError::Serde`] if it is not
/// a valid catalog.
pub async fn load_seed_file(path: &Path) -> Result<Catalog, RosterError> {
    let bytes = tokio::fs::read(path).await.map_err(|err| RosterError::Internal {
        message: err.to_string().into(),
        context: Some(format!("Reading seed file {}", path.display()).into()),
    })?;
    parse_catalog(&bytes).context(format!("Seed file {}", path.display()))
}

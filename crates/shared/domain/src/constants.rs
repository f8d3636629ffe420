//! Shared string constants.

/// OpenAPI tag for the activity roster endpoints.
pub const ACTIVITIES_TAG: &str = "activities";
/// OpenAPI tag for operational endpoints.
pub const SYSTEM_TAG: &str = "system";

/// Where `/` sends browsers.
pub const INDEX_PAGE: &str = "/static/index.html";
/// Mount point of the static frontend.
pub const STATIC_PREFIX: &str = "/static";

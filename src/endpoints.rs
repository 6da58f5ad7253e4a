//! The API endpoints URIs.

/// The route for listing the active courses.
pub const COURSES: &str = "/api/courses";
/// The route for generating the content of a new course.
pub const GENERATE_COURSE: &str = "/api/generate-course";
/// The route for listing the content agents.
pub const AGENTS: &str = "/api/agents";
/// The route for recording a course payment.
pub const PROCESS_PAYMENT: &str = "/api/process-payment";
/// The route for the business dashboard totals.
pub const DASHBOARD_STATS: &str = "/api/dashboard-stats";

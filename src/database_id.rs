//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of a recorded payment transaction.
pub type TransactionId = DatabaseId;

/// The ID of a course in the catalog.
pub type CourseId = DatabaseId;

//! The course catalog: the course model, its table and the endpoint listing active courses.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, database_id::CourseId};

/// Whether a course is offered to students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    /// The course is listed and can be bought.
    Active,
    /// The course is still being written.
    Draft,
    /// The course is no longer offered.
    Archived,
}

impl CourseStatus {
    /// The status as it is stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Active => "active",
            CourseStatus::Draft => "draft",
            CourseStatus::Archived => "archived",
        }
    }
}

impl FromStr for CourseStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CourseStatus::Active),
            "draft" => Ok(CourseStatus::Draft),
            "archived" => Ok(CourseStatus::Archived),
            other => Err(Error::InvalidStoredValue(other.to_owned())),
        }
    }
}

impl ToSql for CourseStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for CourseStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    /// The ID of the course.
    pub id: CourseId,
    /// The course's title.
    pub title: String,
    /// A short summary of what the course teaches.
    pub description: String,
    /// The price of the course.
    pub price: f64,
    /// How long the course takes, e.g. "6 weeks".
    pub duration: String,
    /// Whether the course is offered to students.
    pub status: CourseStatus,
}

/// The data needed to add a course to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse<'a> {
    /// The course's title.
    pub title: &'a str,
    /// A short summary of what the course teaches.
    pub description: &'a str,
    /// The price of the course.
    pub price: f64,
    /// How long the course takes.
    pub duration: &'a str,
    /// Whether the course is offered to students.
    pub status: CourseStatus,
}

/// Create the course table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_course_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS course (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                duration TEXT NOT NULL,
                status TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Add a course to the catalog.
///
/// # Errors
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn create_course(course: NewCourse, connection: &Connection) -> Result<Course, Error> {
    connection
        .prepare(
            "INSERT INTO course (title, description, price, duration, status)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, title, description, price, duration, status",
        )?
        .query_row(
            (
                course.title,
                course.description,
                course.price,
                course.duration,
                course.status,
            ),
            map_course_row,
        )
        .map_err(|error| error.into())
}

/// Get every active course, ordered by ID.
///
/// # Errors
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn list_active_courses(connection: &Connection) -> Result<Vec<Course>, Error> {
    connection
        .prepare(
            "SELECT id, title, description, price, duration, status
             FROM course WHERE status = ?1 ORDER BY id",
        )?
        .query_map((CourseStatus::Active,), map_course_row)?
        .map(|maybe_course| maybe_course.map_err(Error::from))
        .collect()
}

fn map_course_row(row: &Row) -> Result<Course, rusqlite::Error> {
    Ok(Course {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        duration: row.get(4)?,
        status: row.get(5)?,
    })
}

/// The state needed to list courses.
#[derive(Debug, Clone)]
pub struct CourseState {
    /// The database connection for reading the catalog.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CourseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Respond with the active courses as a JSON array.
pub async fn get_courses_endpoint(State(state): State<CourseState>) -> Response {
    let courses = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| list_active_courses(&connection));

    match courses {
        Ok(courses) => Json(courses).into_response(),
        Err(error) => error.into_json_response("Database error"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{endpoints, test_utils::get_test_connection};

    use super::{
        CourseState, CourseStatus, NewCourse, create_course, get_courses_endpoint,
        list_active_courses,
    };

    fn new_course(title: &str, status: CourseStatus) -> NewCourse<'_> {
        NewCourse {
            title,
            description: "A course",
            price: 299.0,
            duration: "6 weeks",
            status,
        }
    }

    fn seed(connection: &Connection) {
        create_course(new_course("Machine Learning Fundamentals", CourseStatus::Active), connection)
            .unwrap();
        create_course(new_course("Unfinished Course", CourseStatus::Draft), connection).unwrap();
        create_course(new_course("Old Course", CourseStatus::Archived), connection).unwrap();
        create_course(new_course("AI-Powered Digital Marketing", CourseStatus::Active), connection)
            .unwrap();
    }

    #[test]
    fn create_course_succeeds() {
        let connection = get_test_connection();

        let course =
            create_course(new_course("Python for AI", CourseStatus::Active), &connection).unwrap();

        assert!(course.id > 0);
        assert_eq!(course.title, "Python for AI");
        assert_eq!(course.status, CourseStatus::Active);
    }

    #[test]
    fn lists_only_active_courses() {
        let connection = get_test_connection();
        seed(&connection);

        let titles: Vec<String> = list_active_courses(&connection)
            .unwrap()
            .into_iter()
            .map(|course| course.title)
            .collect();

        assert_eq!(
            titles,
            vec!["Machine Learning Fundamentals", "AI-Powered Digital Marketing"]
        );
    }

    #[tokio::test]
    async fn endpoint_returns_active_courses_as_json() {
        let connection = get_test_connection();
        seed(&connection);
        let app = Router::new()
            .route(endpoints::COURSES, get(get_courses_endpoint))
            .with_state(CourseState {
                db_connection: Arc::new(Mutex::new(connection)),
            });
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.get(endpoints::COURSES).await;

        response.assert_status_ok();
        let courses = response.json::<serde_json::Value>();
        let courses = courses.as_array().expect("want a JSON array");
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0]["status"], "active");
        assert_eq!(courses[0]["duration"], "6 weeks");
    }
}

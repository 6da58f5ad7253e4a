#![allow(missing_docs)]

pub(crate) mod http;

use rusqlite::Connection;

use crate::db::initialize;

pub(crate) use http::{assert_content_type, assert_status_ok, get_json_body};

/// Open an in-memory database with every table created.
pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use learnhub_rs::{CourseStatus, NewCourse, UserRole, create_course, create_user, initialize_db};

/// A utility for creating a test database for the REST API server of learnhub_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample courses...");

    let courses = [
        (
            "AI-Powered Digital Marketing",
            "Learn how to leverage artificial intelligence for marketing success",
            299.0,
            "6 weeks",
            CourseStatus::Active,
        ),
        (
            "Machine Learning Fundamentals",
            "Complete guide to machine learning algorithms and applications",
            499.0,
            "8 weeks",
            CourseStatus::Active,
        ),
        (
            "Deep Learning Mastery",
            "Advanced neural networks and deep learning techniques",
            799.0,
            "10 weeks",
            CourseStatus::Active,
        ),
        (
            "Prompt Engineering Workshop",
            "Write prompts that get reliable results from language models",
            199.0,
            "2 weeks",
            CourseStatus::Draft,
        ),
    ];

    for (title, description, price, duration, status) in courses {
        create_course(
            NewCourse {
                title,
                description,
                price,
                duration,
                status,
            },
            &conn,
        )?;
    }

    println!("Creating test users...");

    for name in ["Thandi", "Sipho", "Lerato"] {
        create_user(name, UserRole::Student, &conn)?;
    }
    create_user("Robyn", UserRole::Instructor, &conn)?;
    create_user("Admin", UserRole::Admin, &conn)?;

    println!("Success!");

    Ok(())
}

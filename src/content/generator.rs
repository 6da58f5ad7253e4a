//! Template-based course content generation.
//!
//! The content is assembled from fixed templates around the requested topic.

use serde::Serialize;

use crate::Error;

/// The number of modules in every generated course.
const MODULE_COUNT: usize = 6;

/// A generated course ready to be reviewed by an instructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseContent {
    /// The course title.
    pub title: String,
    /// The requested difficulty level, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// The requested course length, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// The high level sections of the course.
    pub outline: Vec<String>,
    /// The course's modules in teaching order.
    pub modules: Vec<CourseModule>,
    /// Quizzes and assignments for the course.
    pub assessments: Assessments,
}

/// One unit of teaching within a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseModule {
    /// The module title.
    pub title: String,
    /// The module's teaching material.
    pub content: String,
    /// How long the module takes.
    pub duration: String,
    /// The kinds of material included in the module.
    pub resources: Vec<String>,
}

/// The assessments for a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessments {
    /// Multiple choice questions.
    pub quizzes: Vec<Quiz>,
    /// Practical projects.
    pub assignments: Vec<Assignment>,
}

/// A multiple choice question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// The question text.
    pub question: String,
    /// The possible answers.
    pub options: Vec<String>,
    /// The index into `options` of the correct answer.
    pub correct_answer: usize,
}

/// A practical project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// The assignment title.
    pub title: String,
    /// What the student has to do.
    pub description: String,
    /// How the assignment is marked.
    pub rubric: String,
}

/// Generate the content for a course about `topic`.
///
/// # Errors
/// Returns [Error::EmptyTopic] if `topic` is empty or only whitespace.
pub fn generate_course_content(
    topic: &str,
    level: Option<String>,
    duration: Option<String>,
) -> Result<CourseContent, Error> {
    let topic = topic.trim();

    if topic.is_empty() {
        return Err(Error::EmptyTopic);
    }

    Ok(CourseContent {
        title: format!("AI-Generated Course: {topic}"),
        level,
        duration,
        outline: generate_outline(topic),
        modules: generate_modules(topic),
        assessments: generate_assessments(topic),
    })
}

fn generate_outline(topic: &str) -> Vec<String> {
    vec![
        format!("Introduction to {topic}"),
        format!("Advanced {topic} Concepts"),
        format!("{topic} Practical Applications"),
    ]
}

fn generate_modules(topic: &str) -> Vec<CourseModule> {
    (1..=MODULE_COUNT)
        .map(|number| CourseModule {
            title: format!("Module {number}: {topic} Fundamentals"),
            content: format!("AI-generated content for {topic} module {number}"),
            duration: "2 hours".to_owned(),
            resources: ["Video lectures", "Interactive exercises", "Reading materials"]
                .map(str::to_owned)
                .to_vec(),
        })
        .collect()
}

fn generate_assessments(topic: &str) -> Assessments {
    Assessments {
        quizzes: vec![Quiz {
            question: format!("What is the fundamental concept of {topic}?"),
            options: ["Option A", "Option B", "Option C", "Option D"]
                .map(str::to_owned)
                .to_vec(),
            correct_answer: 0,
        }],
        assignments: vec![Assignment {
            title: format!("Practical {topic} Project"),
            description: format!("Create a real-world application using {topic} principles"),
            rubric: "AI-generated assessment criteria".to_owned(),
        }],
    }
}

//! Course content generation and the agents that provide it.
//!
//! Content comes from fixed templates rather than a language model.

mod agents;
mod generator;

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

pub use agents::{Agent, AgentRegistry, AgentStatus};
pub use generator::{
    Assessments, Assignment, CourseContent, CourseModule, Quiz, generate_course_content,
};

use crate::{AppState, Error};

/// The key of the agent that writes course content.
const COURSE_CREATOR: &str = "courseCreator";

/// The message sent to the client when content could not be generated.
const GENERATION_FAILED: &str = "AI generation failed";

/// The state needed by the content endpoints.
#[derive(Debug, Clone)]
pub struct ContentState {
    /// The agents known to the platform.
    pub agents: Arc<AgentRegistry>,
}

impl FromRef<AppState> for ContentState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            agents: state.agents.clone(),
        }
    }
}

/// The JSON body for generating a course.
#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateCourseRequest {
    /// What the course is about.
    pub topic: String,
    /// The difficulty level, e.g. "beginner".
    #[serde(default)]
    pub level: Option<String>,
    /// How long the course should take, e.g. "6 weeks".
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateCourseResponse<'a> {
    #[serde(flatten)]
    content: CourseContent,
    generated_by: &'a str,
}

/// A route handler that generates the content for a new course.
pub async fn generate_course_endpoint(
    State(state): State<ContentState>,
    payload: Result<Json<GenerateCourseRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return Error::InvalidRequest(rejection.body_text())
                .into_json_response(GENERATION_FAILED);
        }
    };

    let Some(agent) = state.agents.get(COURSE_CREATOR) else {
        tracing::error!("the {COURSE_CREATOR} agent is not registered");
        return Error::NotFound.into_json_response(GENERATION_FAILED);
    };

    match generate_course_content(&request.topic, request.level, request.duration) {
        Ok(content) => {
            tracing::debug!("{} generated \"{}\"", agent.name, content.title);

            Json(GenerateCourseResponse {
                content,
                generated_by: agent.name,
            })
            .into_response()
        }
        Err(error) => error.into_json_response(GENERATION_FAILED),
    }
}

/// Respond with the registered agents as a JSON array.
pub async fn get_agents_endpoint(State(state): State<ContentState>) -> Response {
    Json(state.agents.agents()).into_response()
}

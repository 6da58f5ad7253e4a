//! The registry of the platform's content agents.

use serde::Serialize;

/// Whether an agent is currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// The agent is accepting work.
    Active,
    /// The agent is switched off.
    Inactive,
}

/// One of the platform's agents and what it can do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    /// The key the agent is registered under, e.g. "courseCreator".
    pub key: &'static str,
    /// The agent's display name.
    pub name: &'static str,
    /// Whether the agent is currently available.
    pub status: AgentStatus,
    /// The kinds of work the agent can do.
    pub capabilities: &'static [&'static str],
}

/// The agents known to the platform, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
}

impl AgentRegistry {
    /// Look up an agent by its key.
    pub fn get(&self, key: &str) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.key == key)
    }

    /// All registered agents.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self {
            agents: vec![
                Agent {
                    key: "courseCreator",
                    name: "CourseCreator AI",
                    status: AgentStatus::Active,
                    capabilities: &[
                        "content_generation",
                        "curriculum_design",
                        "assessment_creation",
                    ],
                },
                Agent {
                    key: "marketingAI",
                    name: "Marketing AI",
                    status: AgentStatus::Active,
                    capabilities: &["social_media", "content_creation", "campaign_management"],
                },
                Agent {
                    key: "chatbot",
                    name: "Robyn AI",
                    status: AgentStatus::Active,
                    capabilities: &[
                        "customer_support",
                        "learning_assistance",
                        "continuous_learning",
                    ],
                },
            ],
        }
    }
}

//! Environment entities and the name-keyed index built from them
//!
//! Entities arrive from a data source in the shape the API serves them:
//! `{ "metadata": { "name": ... }, "status": { "currentState": { "health": ... } } }`.
//! Every field is optional on the wire; an environment without a name can be
//! listed but never indexed or opened.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Operational health reported for an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Health {
    Healthy,
    Unhealthy,
    Progressing,
    Unknown,
}

impl Health {
    pub fn label(&self) -> &'static str {
        match self {
            Health::Healthy => "Healthy",
            Health::Unhealthy => "Unhealthy",
            Health::Progressing => "Progressing",
            Health::Unknown => "Unknown",
        }
    }
}

impl From<String> for Health {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "healthy" => Health::Healthy,
            "unhealthy" | "degraded" => Health::Unhealthy,
            "progressing" => Health::Progressing,
            _ => Health::Unknown,
        }
    }
}

impl From<Health> for String {
    fn from(health: Health) -> Self {
        health.label().to_string()
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<Health>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_state: Option<EnvironmentState>,
}

/// A named deployable unit within a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub status: EnvironmentStatus,
}

impl Environment {
    pub fn named(name: &str) -> Self {
        Self {
            metadata: Metadata {
                name: Some(name.to_string()),
                namespace: None,
            },
            status: EnvironmentStatus::default(),
        }
    }

    pub fn with_health(mut self, health: Health) -> Self {
        self.status.current_state = Some(EnvironmentState {
            health: Some(health),
        });
        self
    }

    /// The environment's name, if it has a usable one.
    ///
    /// An empty string counts as no name.
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn health(&self) -> Option<Health> {
        self.status.current_state.as_ref().and_then(|state| state.health)
    }
}

/// Name-keyed lookup over the latest fetched environments.
///
/// Always rebuilt from scratch; there is no incremental update path. When two
/// environments share a name the later one in the source sequence wins.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentIndex {
    by_name: HashMap<String, Environment>,
}

impl EnvironmentIndex {
    pub fn build(environments: &[Environment]) -> Self {
        let mut by_name = HashMap::with_capacity(environments.len());
        for environment in environments {
            if let Some(name) = environment.name() {
                by_name.insert(name.to_string(), environment.clone());
            }
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&Environment> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_skips_nameless_environments() {
        let environments = vec![
            Environment::named("staging"),
            Environment::default(),
            Environment::named(""),
            Environment::named("prod").with_health(Health::Healthy),
        ];

        let index = EnvironmentIndex::build(&environments);

        assert_eq!(index.len(), 2);
        assert!(index.contains("prod"));
        assert!(index.contains("staging"));
        assert_eq!(
            index.get("prod").and_then(Environment::health),
            Some(Health::Healthy)
        );
    }

    #[test]
    fn test_index_later_duplicate_wins() {
        let environments = vec![
            Environment::named("prod").with_health(Health::Unhealthy),
            Environment::named("staging"),
            Environment::named("prod").with_health(Health::Healthy),
        ];

        let index = EnvironmentIndex::build(&environments);

        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get("prod").and_then(Environment::health),
            Some(Health::Healthy)
        );
    }

    #[test]
    fn test_index_pending_collection_is_empty() {
        let index = EnvironmentIndex::default();
        assert!(index.is_empty());
        assert!(!index.contains("prod"));
    }

    #[test]
    fn test_environment_deserializes_api_shape() {
        let json = r#"[
            {"metadata": {"name": "prod", "namespace": "shop"},
             "status": {"currentState": {"health": "Healthy"}}},
            {"metadata": {"name": "staging"}},
            {"status": {"currentState": {"health": "Progressing"}}},
            {"metadata": {"name": "qa"}, "status": {"currentState": {"health": "Exploded"}}}
        ]"#;

        let environments: Vec<Environment> = serde_json::from_str(json).unwrap();

        assert_eq!(environments.len(), 4);
        assert_eq!(environments[0].name(), Some("prod"));
        assert_eq!(environments[0].health(), Some(Health::Healthy));
        assert_eq!(environments[1].health(), None);
        assert_eq!(environments[2].name(), None);
        assert_eq!(environments[2].health(), Some(Health::Progressing));
        assert_eq!(environments[3].health(), Some(Health::Unknown));
    }

    #[test]
    fn test_health_serializes_as_label() {
        let env = Environment::named("prod").with_health(Health::Unhealthy);
        let json = serde_json::to_string(&env).unwrap();
        assert!(json.contains(r#""health":"Unhealthy""#));
    }
}

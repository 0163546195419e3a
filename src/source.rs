//! Where environment collections come from
//!
//! Sources are synchronous; the runtime calls them from a blocking task and
//! delivers results back to the UI thread as messages. Every fetch carries a
//! [`FetchTicket`] so a result that arrives after the project changed can be
//! recognised and dropped.

use crate::environment::{Environment, Health};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("project {0:?} not found")]
    UnknownProject(String),
}

impl SourceError {
    /// Message for display in toasts
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownProject(project) => {
                format!("Fetch failed: project {} not found", project)
            }
            other => format!("Fetch error: {}", other),
        }
    }
}

/// Supplies the environments of a project
pub trait EnvironmentSource: Send + Sync {
    fn fetch(&self, project: &str) -> Result<Vec<Environment>, SourceError>;

    /// Every project the source knows, sorted
    fn projects(&self) -> Result<Vec<String>, SourceError>;

    /// Short description for the footer
    fn describe(&self) -> String;
}

/// On-disk document: `{ "projects": { "<name>": [ <environment>, ... ] } }`
#[derive(Debug, Default, Deserialize)]
struct SourceDocument {
    #[serde(default)]
    projects: BTreeMap<String, Vec<Environment>>,
}

/// Reads a JSON document from disk on every fetch
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<SourceDocument, SourceError> {
        let content = fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SourceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl EnvironmentSource for FileSource {
    fn fetch(&self, project: &str) -> Result<Vec<Environment>, SourceError> {
        self.load()?
            .projects
            .remove(project)
            .ok_or_else(|| SourceError::UnknownProject(project.to_string()))
    }

    fn projects(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.load()?.projects.into_keys().collect())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fixed in-memory projects
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    projects: HashMap<String, Vec<Environment>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: &str, environments: Vec<Environment>) -> Self {
        self.projects.insert(project.to_string(), environments);
        self
    }

    /// A small built-in dataset for trying the UI without a data file
    pub fn demo() -> Self {
        Self::new()
            .with_project(
                "shop",
                vec![
                    Environment::named("dev").with_health(Health::Healthy),
                    Environment::named("staging").with_health(Health::Progressing),
                    Environment::named("prod").with_health(Health::Healthy),
                    Environment::named("prod-eu").with_health(Health::Unhealthy),
                    Environment::named("sandbox"),
                ],
            )
            .with_project(
                "billing",
                vec![
                    Environment::named("test").with_health(Health::Unknown),
                    Environment::named("live").with_health(Health::Healthy),
                ],
            )
    }
}

impl EnvironmentSource for StaticSource {
    fn fetch(&self, project: &str) -> Result<Vec<Environment>, SourceError> {
        self.projects
            .get(project)
            .cloned()
            .ok_or_else(|| SourceError::UnknownProject(project.to_string()))
    }

    fn projects(&self) -> Result<Vec<String>, SourceError> {
        let mut names: Vec<String> = self.projects.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn describe(&self) -> String {
        "built-in demo data".to_string()
    }
}

/// Identifies one fetch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub project: String,
}

/// Tracks the newest fetch so stale results can be rejected
#[derive(Debug, Clone, Default)]
pub struct FetchTracker {
    generation: u64,
    project: Option<String>,
    in_flight: bool,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for `project`, superseding any in flight.
    pub fn begin(&mut self, project: &str) -> FetchTicket {
        self.generation += 1;
        self.project = Some(project.to_string());
        self.in_flight = true;
        FetchTicket {
            generation: self.generation,
            project: project.to_string(),
        }
    }

    /// Accept a result only if it answers the newest request.
    pub fn accept(&mut self, ticket: &FetchTicket) -> bool {
        let current = ticket.generation == self.generation
            && self.project.as_deref() == Some(ticket.project.as_str());
        if current {
            self.in_flight = false;
        }
        current
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

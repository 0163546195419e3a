//! Navigation addresses and the history that owns them
//!
//! Two address shapes are recognised:
//!
//! ```text
//! /project/{project}                          drawer closed
//! /project/{project}/environment/{name}       drawer open on {name}
//! ```
//!
//! Anything after the path (`?query`, `#fragment`) belongs to other writers and
//! is carried through untouched when the environment segment is rewritten.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PROJECT_SEGMENT: &str = "project";
const ENVIRONMENT_SEGMENT: &str = "environment";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("address is empty")]
    Empty,
    #[error("address {0:?} does not match /project/<name>[/environment/<name>]")]
    Unrecognized(String),
    #[error("project or environment name {0:?} cannot contain '/', '?' or '#', or start or end with whitespace")]
    InvalidSegment(String),
}

impl RouteError {
    /// Message for display in toasts
    pub fn user_message(&self) -> String {
        format!("Navigation failed: {}", self)
    }
}

/// Parsed form of an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAddress {
    project: String,
    environment: Option<String>,
    /// Query and/or fragment, including the leading `?` or `#`
    suffix: String,
}

impl RouteAddress {
    pub fn for_project(project: &str) -> Result<Self, RouteError> {
        validate_segment(project)?;
        Ok(Self {
            project: project.to_string(),
            environment: None,
            suffix: String::new(),
        })
    }

    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(RouteError::Empty);
        }

        let (path, suffix) = match raw.find(['?', '#']) {
            Some(at) => raw.split_at(at),
            None => (raw, ""),
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (project, environment) = match segments.as_slice() {
            [PROJECT_SEGMENT, project] => (*project, None),
            [PROJECT_SEGMENT, project, ENVIRONMENT_SEGMENT, environment] => {
                (*project, Some(environment.to_string()))
            }
            _ => return Err(RouteError::Unrecognized(raw.to_string())),
        };

        Ok(Self {
            project: project.to_string(),
            environment,
            suffix: suffix.to_string(),
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Same address with the environment segment set to `name`.
    pub fn with_environment(&self, name: &str) -> Result<Self, RouteError> {
        validate_segment(name)?;
        Ok(Self {
            environment: Some(name.to_string()),
            ..self.clone()
        })
    }

    /// Same address with the environment segment removed.
    pub fn without_environment(&self) -> Self {
        Self {
            environment: None,
            ..self.clone()
        }
    }

    /// Same address pointed at another project. The environment segment is kept.
    pub fn with_project(&self, project: &str) -> Result<Self, RouteError> {
        validate_segment(project)?;
        Ok(Self {
            project: project.to_string(),
            ..self.clone()
        })
    }
}

impl fmt::Display for RouteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", PROJECT_SEGMENT, self.project)?;
        if let Some(environment) = &self.environment {
            write!(f, "/{}/{}", ENVIRONMENT_SEGMENT, environment)?;
        }
        f.write_str(&self.suffix)
    }
}

impl FromStr for RouteAddress {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn validate_segment(segment: &str) -> Result<(), RouteError> {
    // Typed addresses are trimmed on parse, so edge whitespace would not survive a round trip
    if segment.is_empty() || segment.contains(['/', '?', '#']) || segment.trim() != segment {
        return Err(RouteError::InvalidSegment(segment.to_string()));
    }
    Ok(())
}

/// The process-wide navigation address.
///
/// Implementations decide how addresses are stored; callers only read the
/// current one and push new ones.
pub trait Navigator {
    fn current(&self) -> Option<&str>;
    fn push(&mut self, address: String);
}

/// In-memory browser-style history with back/forward.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    /// Step back one entry. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one entry. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Navigator for History {
    fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Push a new entry, dropping anything forward of the cursor.
    fn push(&mut self, address: String) {
        if self.entries.is_empty() {
            self.entries.push(address);
            self.cursor = 0;
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(address);
        self.cursor = self.entries.len() - 1;
    }
}

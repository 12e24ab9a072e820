//! Position catalogs.
//!
//! Each position maps to a fixed, ordered list of interview topics. Topics
//! are consumed in catalog order; the session tracks which ones are done.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role a candidate is interviewing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Frontend,
    Backend,
    Fullstack,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Frontend, Position::Backend, Position::Fullstack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Frontend => "frontend",
            Position::Backend => "backend",
            Position::Fullstack => "fullstack",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a position string is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown position: '{0}' (expected frontend, backend, or fullstack)")]
pub struct UnknownPosition(pub String);

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frontend" => Ok(Position::Frontend),
            "backend" => Ok(Position::Backend),
            "fullstack" => Ok(Position::Fullstack),
            other => Err(UnknownPosition(other.to_string())),
        }
    }
}

/// Returns the ordered topic catalog for a position.
pub fn topics(position: Position) -> &'static [&'static str] {
    match position {
        Position::Frontend => &[
            "JavaScript and TypeScript fundamentals",
            "React, Vue, and Angular frameworks",
            "HTML, CSS, and web standards",
            "State management and performance optimization",
            "Web security and authentication",
        ],
        Position::Backend => &[
            "Primary programming language",
            "Server architecture design",
            "Database design and optimization",
            "API design and security",
            "Caching and performance optimization",
            "Microservice architecture",
        ],
        Position::Fullstack => &[
            "Frontend frameworks",
            "Backend architecture",
            "Databases and caching",
            "DevOps and deployment",
            "System design",
        ],
    }
}

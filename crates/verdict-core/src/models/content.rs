use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::VerdictError;

/// Kinds of user-generated content that can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Melody,
    Pack,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Melody, ContentType::Pack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Melody => "melody",
            Self::Pack => "pack",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = VerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "melody" => Ok(Self::Melody),
            "pack" => Ok(Self::Pack),
            other => Err(VerdictError::validation(
                "contentType",
                format!("unknown content type `{other}`"),
            )),
        }
    }
}

/// The slice of a content record the engine reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub content_type: ContentType,
    pub id: String,
    /// Producer account that currently owns the item.
    pub owner_id: String,
    pub active: bool,
}

impl ContentItem {
    pub fn new(content_type: ContentType, id: &str, owner_id: &str) -> Self {
        Self {
            content_type,
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            active: true,
        }
    }
}

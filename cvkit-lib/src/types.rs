use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::lenient;

/// A complete résumé document.
///
/// The schema is closed: unknown keys are ignored on input and never
/// produced on output. Every list defaults to empty and every object to
/// its empty value, so a `Profile` built from partial input is always
/// renderable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient::object")]
    pub meta: Meta,
    #[serde(default, deserialize_with = "lenient::object")]
    pub profile: Contact,
    #[serde(default, deserialize_with = "lenient::records")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub portfolio: Vec<PortfolioItem>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub skills: Skills,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub awards: Vec<String>,
}

/// Presentation hints. Unrecognized values fall back to the variant preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub theme_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub layout: Option<String>,
}

/// Identity and contact block, the `profile` key of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub wechat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub portfolio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::string")]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default, deserialize_with = "lenient::strings")]
    pub professional: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub software: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub languages: Vec<String>,
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.professional.is_empty() && self.software.is_empty() && self.languages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.professional.len() + self.software.len() + self.languages.len()
    }
}

/// Entry counts of a profile, used for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileSummary {
    pub education: usize,
    pub experience: usize,
    pub portfolio: usize,
    pub skills: usize,
    pub awards: usize,
}

impl std::fmt::Display for ProfileSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "education={} experience={} portfolio={} skills={} awards={}",
            self.education, self.experience, self.portfolio, self.skills, self.awards
        )
    }
}

#[derive(Debug, Error)]
pub enum CvError {
    #[error("JSON syntax error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown template variant '{0}' (expected one of: advertising, journalism, broadcasting, new_media)")]
    UnknownVariant(String),

    #[error("Invalid student id '{0}': only letters, digits and underscores are allowed")]
    InvalidStudentId(String),

    #[error("Profile too large to archive: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("No version number left for student '{0}'")]
    VersionsExhausted(String),
}

impl CvError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CvError::Io {
            path: path.into(),
            source,
        }
    }
}

use crate::loader::parse_profile;
use crate::types::*;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const MAX_ARCHIVE_BYTES: usize = 100_000;
const MAX_STUDENT_ID_LEN: usize = 50;

/// Keeps letters, digits and underscores, truncated to 50 characters.
pub fn sanitize_student_id(raw: &str) -> Result<String, CvError> {
    let id: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .take(MAX_STUDENT_ID_LEN)
        .collect();
    if id.is_empty() {
        return Err(CvError::InvalidStudentId(raw.to_string()));
    }
    Ok(id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedVersion {
    pub version: u32,
    pub path: PathBuf,
    pub profile: Profile,
}

impl ArchivedVersion {
    pub fn label(&self) -> String {
        format!("v{}", self.version)
    }
}

/// Flat-file store of numbered profile versions: `config_{id}_v{n}.json`.
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
}

impl Archive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Archive { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Saves `profile` as the next version for `student_id` and returns
    /// the version label (`v1`, `v2`, ...).
    pub fn save_version(&self, student_id: &str, profile: &Profile) -> Result<String, CvError> {
        let id = sanitize_student_id(student_id)?;

        let size = serde_json::to_vec(profile)?.len();
        if size > MAX_ARCHIVE_BYTES {
            return Err(CvError::TooLarge {
                size,
                limit: MAX_ARCHIVE_BYTES,
            });
        }

        let next = self
            .versions_of(&id)?
            .into_iter()
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| CvError::VersionsExhausted(id.clone()))?;
        let label = format!("v{}", next);

        let mut value = serde_json::to_value(profile)?;
        if let Value::Object(map) = &mut value {
            map.insert("_version".to_string(), Value::String(label.clone()));
        }
        let body = serde_json::to_string_pretty(&value)?;

        fs::create_dir_all(&self.root).map_err(|e| CvError::io(&self.root, e))?;
        let path = self.root.join(file_name(&id, next));
        fs::write(&path, body).map_err(|e| CvError::io(&path, e))?;

        tracing::info!(student = %id, version = %label, path = %path.display(), "profile archived");
        Ok(label)
    }

    /// All saved versions for `student_id`, oldest first.
    pub fn history(&self, student_id: &str) -> Result<Vec<ArchivedVersion>, CvError> {
        let id = sanitize_student_id(student_id)?;
        let mut versions = self.versions_of(&id)?;
        versions.sort_unstable();

        let mut history = Vec::with_capacity(versions.len());
        for version in versions {
            let path = self.root.join(file_name(&id, version));
            let json_str = fs::read_to_string(&path).map_err(|e| CvError::io(&path, e))?;
            match parse_profile(&json_str) {
                Ok(profile) => history.push(ArchivedVersion { version, path, profile }),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable archive entry"),
            }
        }
        Ok(history)
    }

    /// Ids with at least one saved version, sorted and deduplicated.
    pub fn students(&self) -> Result<Vec<String>, CvError> {
        let mut ids: Vec<String> = self.entries()?.into_iter().map(|(id, _)| id).collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    fn versions_of(&self, id: &str) -> Result<Vec<u32>, CvError> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|(entry_id, _)| entry_id == id)
            .map(|(_, version)| version)
            .collect())
    }

    fn entries(&self) -> Result<Vec<(String, u32)>, CvError> {
        let dir = match fs::read_dir(&self.root) {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CvError::io(&self.root, e)),
        };

        let mut entries = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|e| CvError::io(&self.root, e))?;
            if let Some(parsed) = entry.file_name().to_str().and_then(parse_file_name) {
                entries.push(parsed);
            }
        }
        Ok(entries)
    }
}

fn file_name(id: &str, version: u32) -> String {
    format!("config_{}_v{}.json", id, version)
}

fn parse_file_name(name: &str) -> Option<(String, u32)> {
    let stem = name.strip_prefix("config_")?.strip_suffix(".json")?;
    let (id, version) = stem.rsplit_once("_v")?;
    if id.is_empty() || version.is_empty() || !version.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((id.to_string(), version.parse().ok()?))
}

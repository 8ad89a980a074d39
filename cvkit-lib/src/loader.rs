use crate::lenient::kind_of;
use crate::types::*;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parses a profile document.
///
/// Syntax errors are fatal and carry the offending line and column. Any
/// syntactically valid JSON yields a profile: wrong types are coerced and
/// a non-object root produces an empty profile.
pub fn parse_profile(json_str: &str) -> Result<Profile, CvError> {
    let value: Value = serde_json::from_str(json_str).map_err(|e| CvError::Parse {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })?;

    profile_from_value(value)
}

pub fn profile_from_value(value: Value) -> Result<Profile, CvError> {
    if !value.is_object() {
        tracing::warn!(kind = kind_of(&value), "profile root is not an object, rendering an empty profile");
        return Ok(Profile::default());
    }

    let profile = Profile::deserialize(value)?;
    tracing::debug!(summary = %profile.summary(), "profile parsed");
    Ok(profile)
}

/// Reads and parses a profile from a UTF-8 JSON file.
pub fn load_profile(path: impl AsRef<Path>) -> Result<Profile, CvError> {
    let path = path.as_ref();
    let json_str = fs::read_to_string(path).map_err(|e| CvError::io(path, e))?;
    parse_profile(&json_str)
}

impl Profile {
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            education: self.education.len(),
            experience: self.experience.len(),
            portfolio: self.portfolio.len(),
            skills: self.skills.len(),
            awards: self.awards.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_profile() {
        let json = r#"{
            "meta": {"theme_color": "rose", "font_family": "sans"},
            "profile": {"name": "张三", "title": "新闻记者", "email": "zhangsan@example.com"},
            "education": [{"school": "汕头大学", "degree": "新闻学 本科", "time": "2021-2025", "details": ["GPA 3.8/4.0"]}],
            "experience": [{"company": "南方都市报", "role": "实习记者", "time": "2024.07-2024.09", "details": ["跑了 10 个突发新闻现场"]}],
            "portfolio": [{"title": "校园调查", "role": "主笔", "link": "https://example.com/a", "desc": "深度报道"}],
            "skills": {"professional": ["采访"], "software": ["Premiere"], "languages": ["英语六级"]},
            "awards": ["校级优秀学生记者"]
        }"#;

        let profile = parse_profile(json).unwrap();
        assert_eq!(profile.meta.theme_color.as_deref(), Some("rose"));
        assert_eq!(profile.profile.name.as_deref(), Some("张三"));
        assert_eq!(profile.education[0].details, vec!["GPA 3.8/4.0"]);
        assert_eq!(profile.experience[0].company.as_deref(), Some("南方都市报"));
        assert_eq!(profile.portfolio[0].desc.as_deref(), Some("深度报道"));
        assert_eq!(profile.skills.languages, vec!["英语六级"]);
        assert_eq!(
            profile.summary(),
            ProfileSummary { education: 1, experience: 1, portfolio: 1, skills: 3, awards: 1 }
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let profile = parse_profile("{}").unwrap();
        assert_eq!(profile, Profile::default());
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn test_wrong_types_are_coerced() {
        let json = r#"{
            "profile": {"name": "李四", "phone": 13800138000},
            "education": "none",
            "experience": [{"company": "电视台", "details": "剪辑新闻片"}],
            "skills": ["not", "an", "object"],
            "awards": "新闻写作比赛二等奖",
            "_version": "v3"
        }"#;

        let profile = parse_profile(json).unwrap();
        assert_eq!(profile.profile.phone.as_deref(), Some("13800138000"));
        assert!(profile.education.is_empty());
        assert_eq!(profile.experience[0].details, vec!["剪辑新闻片"]);
        assert!(profile.skills.is_empty());
        assert_eq!(profile.awards, vec!["新闻写作比赛二等奖"]);
    }

    #[test]
    fn test_non_object_root_is_empty_profile() {
        assert_eq!(parse_profile("[1, 2, 3]").unwrap(), Profile::default());
        assert_eq!(parse_profile("\"text\"").unwrap(), Profile::default());
    }

    #[test]
    fn test_syntax_error_reports_location() {
        let err = parse_profile("{\n  \"awards\": [\"a\",],\n}").unwrap_err();
        match err {
            CvError::Parse { line, column, .. } => {
                assert_eq!(line, 2);
                assert!(column > 0);
            }
            other => panic!("expected parse error, got {other:?}"),
        }

        assert!(matches!(parse_profile("{\"profile\": {"), Err(CvError::Parse { .. })));
    }

    #[test]
    fn test_load_profile_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_profile(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CvError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}

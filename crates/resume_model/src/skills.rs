//! Skill list normalisation
//!
//! Skills are edited as one comma-separated string and stored as an ordered
//! list of trimmed, non-empty tokens.

use serde::{Deserialize, Deserializer};

/// Split a comma-separated skills source into trimmed, non-empty tokens.
pub fn parse_skills(source: &str) -> Vec<String> {
    source
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a skill list back into its editable source form.
pub fn join_skills(skills: &[String]) -> String {
    skills.join(", ")
}

/// Accepts either `"a, b"` or `["a", "b"]` and normalises both.
pub(crate) fn deserialize_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SkillsSource {
        Joined(String),
        Listed(Vec<String>),
    }

    Ok(match SkillsSource::deserialize(deserializer)? {
        SkillsSource::Joined(source) => parse_skills(&source),
        SkillsSource::Listed(items) => items.iter().flat_map(|item| parse_skills(item)).collect(),
    })
}

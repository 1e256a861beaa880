// src/modules/content/domain/entities.rs
use serde::{Deserialize, Serialize};

/// Social profile links shown in the hero and footer. This struct is also
/// embedded verbatim in the `/about` document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
}

/// The owner's profile as the UI consumes it. `image` and `logo` hold
/// either a URL or an embedded data URL; `logo` may be absent entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub about_me: String,
    pub about_home: [String; 3],
    pub image: String,
    pub logo: Option<String>,
    pub social: SocialLinks,
    pub tech_stack: Vec<String>,
    pub badges: Vec<String>,
    pub show_project_intro: bool,
}

/// A portfolio project. `id` is assigned by the backend on creation; a
/// locally added project has none until its first save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub image: String,
    pub demo_link: String,
    pub repo_link: String,
    pub tech: Vec<String>,
}

/// One "what I do" card. Client-cached configuration only; the icon name is
/// resolved to a widget by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub icon_name: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
}

/// Display strings for the stats strip ("3+", "14+"); free-form on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceStats {
    #[serde(default)]
    pub projects_completed: String,
    #[serde(default)]
    pub technologies: String,
    #[serde(default)]
    pub years_experience: String,
}

/// Uploaded resume; `file_data` is a data URL, or `None` when no resume has
/// been uploaded yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_data: Option<String>,
}

/// Tag lists (tech stack, badges) never hold empty or padded entries at
/// rest; this is applied at every boundary where one enters the system.
pub fn sanitize_tags(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_drops_empties_and_trims_but_keeps_order_and_duplicates() {
        let raw = vec![
            "  React ".to_string(),
            "".to_string(),
            "Node.js".to_string(),
            "   ".to_string(),
            "React".to_string(),
        ];
        assert_eq!(sanitize_tags(&raw), vec!["React", "Node.js", "React"]);
    }
}

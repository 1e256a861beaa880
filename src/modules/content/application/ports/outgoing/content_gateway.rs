// content_gateway.rs
//
// Outgoing port over the portfolio backend's content endpoints. The store
// and reconciler speak only to this trait; the HTTP adapter (or an
// in-memory double in tests) supplies the implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::content::domain::entities::{ContactInfo, ExperienceStats, Resume, SocialLinks};
use crate::shared::error::GatewayError;
use crate::timeline::domain::entities::{EducationRecord, ExperienceRecord};

/// The `/about` singleton document as the backend returns it. Every field
/// is optional: the document grows as the admin fills sections in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutDocument {
    pub title: Option<String>,
    pub bio: Option<String>,
    pub short_bio: Option<String>,
    pub show_project_intro: Option<bool>,
    pub profile_image: Option<String>,
    pub logo: Option<String>,
    pub about_home1: Option<String>,
    pub about_home2: Option<String>,
    pub about_home3: Option<String>,
    pub social_links: Option<SocialLinks>,
    pub tech_stack: Option<Vec<String>>,
    pub badges: Option<Vec<String>>,
    pub contact: Option<ContactInfo>,
    pub experience_stats: Option<ExperienceStats>,
    pub resume: Option<Resume>,
    pub experience: Option<Vec<ExperienceRecord>>,
    pub education: Option<Vec<EducationRecord>>,
}

/// Partial `/about` update; only present fields are overwritten server-side.
/// `logo` is doubly optional: the outer level decides whether the field is
/// sent at all, the inner one allows clearing it with an explicit null.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_project_intro: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_home1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_home2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_home3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_stats: Option<ExperienceStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<Resume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<ExperienceRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<EducationRecord>>,
}

/// A project as the backend returns it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub live_url: Option<String>,
    pub repo_url: Option<String>,
    pub tech: Vec<String>,
}

/// Create/update payload for a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub live_url: String,
    pub repo_url: String,
    pub tech: Vec<String>,
    pub status: String,
}

/// One entry of the backend's skill taxonomy (grouped by category).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkillRecord {
    pub name: String,
    pub category: Option<String>,
}

pub type SkillGroups = HashMap<String, Vec<SkillRecord>>;

/// A visitor message from the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentGateway: Send + Sync {
    async fn fetch_about(&self) -> Result<Option<AboutDocument>, GatewayError>;
    async fn update_about(&self, patch: AboutPatch) -> Result<(), GatewayError>;

    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, GatewayError>;
    async fn fetch_project(&self, id: &str) -> Result<ProjectRecord, GatewayError>;
    /// Returns the server-assigned id of the new project.
    async fn create_project(&self, payload: ProjectPayload) -> Result<String, GatewayError>;
    async fn update_project(&self, id: &str, payload: ProjectPayload) -> Result<(), GatewayError>;
    async fn delete_project(&self, id: &str) -> Result<(), GatewayError>;

    async fn fetch_skill_groups(&self) -> Result<SkillGroups, GatewayError>;

    async fn submit_contact_message(&self, message: ContactMessage) -> Result<(), GatewayError>;
}

// src/modules/timeline/domain/entities.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKind {
    Experience,
    Education,
}

/// One row of the displayed career timeline. `id` exists only so the UI can
/// reorder rows stably; it is assigned client-side and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub id: Uuid,
    pub kind: TimelineKind,
    pub period: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub order: Option<i64>,
}

impl TimelineEntry {
    pub fn new(
        kind: TimelineKind,
        period: impl Into<String>,
        title: impl Into<String>,
        company: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            period: period.into(),
            title: title.into(),
            company: company.into(),
            description: description.into(),
            order: None,
        }
    }
}

/// Wire shape of one work-experience record inside the `/about` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRecord {
    pub company: String,
    pub position: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Wire shape of one education record inside the `/about` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationRecord {
    pub institution: String,
    pub degree: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

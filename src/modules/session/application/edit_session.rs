// src/modules/session/application/edit_session.rs
//
// Per-mount edit buffers for the admin panel. Each section owns a private
// draft plus an explicit phase tag; the phase and the hydration rules in
// `hydration.rs` decide when data re-fetched from the backend may replace
// what the admin is typing. Buffers die with the session; only `save_*`
// writes anything through.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::content::application::services::content_store::{ContentStore, UpdateError};
use crate::content::domain::entities::{ContactInfo, ExperienceStats, Profile, Project, Resume};
use crate::session::application::free_text;
use crate::session::application::hydration;
use crate::timeline::domain::entities::{TimelineEntry, TimelineKind};

/// Editable content areas of the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Profile,
    Projects,
    Contact,
    Experience,
    Timeline,
}

/// Lifecycle of one section's buffer. Every keystroke re-enters `Editing`;
/// a failed save keeps the message until the admin clears it or saves
/// again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    Hydrated,
    Editing,
    Saving,
    SavedClean,
    SaveFailed {
        message: String,
    },
}

impl Phase {
    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::SaveFailed { message } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct SectionBuffer<T> {
    phase: Phase,
    draft: T,
}

impl<T> SectionBuffer<T> {
    fn new(initial: T) -> Self {
        Self {
            phase: Phase::Uninitialized,
            draft: initial,
        }
    }

    fn hydrate(&mut self, value: T) {
        self.draft = value;
        self.phase = Phase::Hydrated;
    }

    fn edit(&mut self) -> &mut T {
        self.phase = Phase::Editing;
        &mut self.draft
    }
}

/// Profile form state. The raw textarea text is the field of record for
/// the tag lists; the parsed arrays on `profile` are a live preview and
/// only become authoritative on save.
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    pub profile: Profile,
    pub tech_stack_text: String,
    pub badges_text: String,
}

impl ProfileDraft {
    fn from_profile(profile: Profile) -> Self {
        let tech_stack_text = free_text::join_lines(&profile.tech_stack);
        let badges_text = free_text::join_lines(&profile.badges);
        Self {
            profile,
            tech_stack_text,
            badges_text,
        }
    }
}

/// Coarse pre-upload size check; anything past this would bloat the about
/// document on the backend.
pub const MAX_ATTACHMENT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("file is too large: {actual_kib} KiB (limit {limit_kib} KiB), please compress it")]
    TooLarge { actual_kib: usize, limit_kib: usize },
}

fn check_attachment(data_url: &str) -> Result<(), AttachmentError> {
    if data_url.len() > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge {
            actual_kib: data_url.len() / 1024,
            limit_kib: MAX_ATTACHMENT_BYTES / 1024,
        });
    }
    Ok(())
}

pub struct EditSession {
    store: Arc<ContentStore>,
    config: Config,
    active_tab: Section,
    initialized: bool,
    profile: SectionBuffer<ProfileDraft>,
    projects: SectionBuffer<Vec<Project>>,
    contact: SectionBuffer<ContactInfo>,
    experience: SectionBuffer<ExperienceStats>,
    timeline: SectionBuffer<Vec<TimelineEntry>>,
    timeline_grace_until: Option<Instant>,
    success_until: Option<Instant>,
    pending_timeline_delete: Option<usize>,
}

impl EditSession {
    pub fn new(store: Arc<ContentStore>, config: Config) -> Self {
        Self {
            store,
            config,
            active_tab: Section::Profile,
            initialized: false,
            profile: SectionBuffer::new(ProfileDraft::from_profile(
                crate::content::domain::defaults::default_profile(),
            )),
            projects: SectionBuffer::new(Vec::new()),
            contact: SectionBuffer::new(ContactInfo::default()),
            experience: SectionBuffer::new(ExperienceStats::default()),
            timeline: SectionBuffer::new(Vec::new()),
            timeline_grace_until: None,
            success_until: None,
            pending_timeline_delete: None,
        }
    }

    // ---- state inspection ------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn active_tab(&self) -> Section {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: Section) {
        self.active_tab = tab;
    }

    pub fn section_phase(&self, section: Section) -> &Phase {
        match section {
            Section::Profile => &self.profile.phase,
            Section::Projects => &self.projects.phase,
            Section::Contact => &self.contact.phase,
            Section::Experience => &self.experience.phase,
            Section::Timeline => &self.timeline.phase,
        }
    }

    pub fn section_error(&self, section: Section) -> Option<&str> {
        self.section_phase(section).error()
    }

    /// Clears a retained save error, returning the section to `Editing`.
    pub fn clear_error(&mut self, section: Section) {
        let phase = match section {
            Section::Profile => &mut self.profile.phase,
            Section::Projects => &mut self.projects.phase,
            Section::Contact => &mut self.contact.phase,
            Section::Experience => &mut self.experience.phase,
            Section::Timeline => &mut self.timeline.phase,
        };
        if matches!(phase, Phase::SaveFailed { .. }) {
            *phase = Phase::Editing;
        }
    }

    /// The transient "saved" indicator: visible for a few seconds after any
    /// successful save.
    pub fn success_visible(&self) -> bool {
        self.success_until.is_some_and(|until| Instant::now() < until)
    }

    pub fn timeline_grace_active(&self) -> bool {
        self.timeline_grace_until
            .is_some_and(|until| Instant::now() < until)
    }

    pub fn profile_draft(&self) -> &ProfileDraft {
        &self.profile.draft
    }

    pub fn projects_draft(&self) -> &[Project] {
        &self.projects.draft
    }

    pub fn contact_draft(&self) -> &ContactInfo {
        &self.contact.draft
    }

    pub fn experience_draft(&self) -> &ExperienceStats {
        &self.experience.draft
    }

    pub fn timeline_draft(&self) -> &[TimelineEntry] {
        &self.timeline.draft
    }

    // ---- hydration -------------------------------------------------------

    /// Pulls the store's current snapshot into the buffers, under the
    /// policy in `hydration.rs`. The host calls this after every store
    /// change (initial load, poll, post-save refresh); the very first call
    /// seeds every buffer verbatim, exactly once per session.
    pub async fn absorb_store_changes(&mut self) {
        let snapshot = self.store.snapshot().await;

        if !self.initialized {
            self.profile
                .hydrate(ProfileDraft::from_profile(snapshot.profile));
            self.projects.hydrate(snapshot.projects);
            self.contact.hydrate(snapshot.contact);
            self.experience.hydrate(snapshot.experience);
            self.timeline.hydrate(snapshot.timeline);
            self.initialized = true;
            debug!("edit session hydrated");
            return;
        }

        let tab = self.active_tab;
        let loading = snapshot.is_loading;

        if hydration::ambient_rehydration_allowed(Section::Profile, &self.profile.phase, tab, loading)
        {
            self.profile
                .hydrate(ProfileDraft::from_profile(snapshot.profile));
        }
        if hydration::ambient_rehydration_allowed(
            Section::Projects,
            &self.projects.phase,
            tab,
            loading,
        ) {
            self.projects.hydrate(snapshot.projects);
        }
        if hydration::ambient_rehydration_allowed(Section::Contact, &self.contact.phase, tab, loading)
        {
            self.contact.hydrate(snapshot.contact);
        }
        if hydration::ambient_rehydration_allowed(
            Section::Experience,
            &self.experience.phase,
            tab,
            loading,
        ) {
            self.experience.hydrate(snapshot.experience);
        }

        if hydration::timeline_rehydration_allowed(
            &self.timeline.phase,
            self.timeline_grace_active(),
            self.timeline.draft.len(),
            snapshot.timeline.len(),
        ) {
            debug!(
                local = self.timeline.draft.len(),
                cached = snapshot.timeline.len(),
                "syncing timeline buffer from store"
            );
            self.timeline.hydrate(snapshot.timeline);
        }
    }

    // ---- profile ---------------------------------------------------------

    pub fn edit_profile(&mut self, edit: impl FnOnce(&mut Profile)) {
        edit(&mut self.profile.edit().profile);
    }

    /// Raw textarea input; the parsed tags are mirrored for live preview
    /// but a trailing partial line stays in the text until save.
    pub fn set_tech_stack_text(&mut self, raw: &str) {
        let draft = self.profile.edit();
        draft.tech_stack_text = raw.to_string();
        draft.profile.tech_stack = free_text::parse_list(raw);
    }

    pub fn set_badges_text(&mut self, raw: &str) {
        let draft = self.profile.edit();
        draft.badges_text = raw.to_string();
        draft.profile.badges = free_text::parse_list(raw);
    }

    pub fn set_profile_image(&mut self, data_url: String) -> Result<(), AttachmentError> {
        check_attachment(&data_url)?;
        self.profile.edit().profile.image = data_url;
        Ok(())
    }

    pub fn set_logo(&mut self, data_url: Option<String>) -> Result<(), AttachmentError> {
        if let Some(ref data) = data_url {
            check_attachment(data)?;
        }
        self.profile.edit().profile.logo = data_url;
        Ok(())
    }

    /// Finalizes the tag textareas, then races the store write against the
    /// profile save deadline. Losing the race fails the save with a
    /// "taking too long" message, but the request itself keeps running and
    /// may still land server-side.
    pub async fn save_profile(&mut self) -> Result<(), String> {
        let final_tech = free_text::parse_list(&self.profile.draft.tech_stack_text);
        let final_badges = free_text::parse_list(&self.profile.draft.badges_text);
        let mut profile = self.profile.draft.profile.clone();
        profile.tech_stack = final_tech.clone();
        profile.badges = final_badges.clone();

        self.profile.phase = Phase::Saving;
        // the save runs as its own task: losing the race reports a failure
        // but does not cancel the request, which may still land server-side
        let store = Arc::clone(&self.store);
        let to_save = profile.clone();
        let in_flight = tokio::spawn(async move { store.update_profile(to_save).await });
        let outcome = match tokio::time::timeout(self.config.profile_save_timeout, in_flight).await
        {
            Err(_elapsed) => Err(
                "Save is taking too long. Please check your connection and try again.".to_string(),
            ),
            Ok(Err(join_err)) => Err(format!("save task failed: {join_err}")),
            Ok(Ok(Err(err))) => Err(err.user_message()),
            Ok(Ok(Ok(()))) => Ok(()),
        };

        match outcome {
            Ok(()) => {
                // re-seed from the just-saved local value, not the store's
                // refreshed copy
                self.profile.draft = ProfileDraft {
                    profile,
                    tech_stack_text: free_text::join_lines(&final_tech),
                    badges_text: free_text::join_lines(&final_badges),
                };
                self.profile.phase = Phase::SavedClean;
                self.flash_success();
                Ok(())
            }
            Err(message) => {
                warn!("profile save failed: {message}");
                self.profile.phase = Phase::SaveFailed {
                    message: message.clone(),
                };
                Err(message)
            }
        }
    }

    // ---- projects --------------------------------------------------------

    pub fn add_project(&mut self) {
        self.projects.edit().insert(
            0,
            Project {
                id: None,
                title: "New Project".to_string(),
                description: "Description".to_string(),
                image: String::new(),
                demo_link: String::new(),
                repo_link: String::new(),
                tech: vec![],
            },
        );
    }

    /// Local removal only; the backend row (if any) goes away on save.
    pub fn remove_project(&mut self, index: usize) {
        let projects = self.projects.edit();
        if index < projects.len() {
            projects.remove(index);
        }
    }

    pub fn edit_project(&mut self, index: usize, edit: impl FnOnce(&mut Project)) {
        let projects = self.projects.edit();
        if let Some(project) = projects.get_mut(index) {
            edit(project);
        }
    }

    pub fn set_project_image(&mut self, index: usize, data_url: String) -> Result<(), AttachmentError> {
        check_attachment(&data_url)?;
        self.edit_project(index, |project| project.image = data_url);
        Ok(())
    }

    pub async fn save_projects(&mut self) -> Result<(), String> {
        self.projects.phase = Phase::Saving;
        match self.store.update_projects(self.projects.draft.clone()).await {
            Ok(()) => {
                self.projects.phase = Phase::SavedClean;
                self.flash_success();
                Ok(())
            }
            Err(err) => self.fail(Section::Projects, err),
        }
    }

    // ---- contact & experience stats -------------------------------------

    pub fn edit_contact(&mut self, edit: impl FnOnce(&mut ContactInfo)) {
        edit(self.contact.edit());
    }

    pub async fn save_contact(&mut self) -> Result<(), String> {
        self.contact.phase = Phase::Saving;
        match self.store.update_contact(self.contact.draft.clone()).await {
            Ok(()) => {
                self.contact.phase = Phase::SavedClean;
                self.flash_success();
                Ok(())
            }
            Err(err) => self.fail(Section::Contact, err),
        }
    }

    pub fn edit_experience(&mut self, edit: impl FnOnce(&mut ExperienceStats)) {
        edit(self.experience.edit());
    }

    pub async fn save_experience(&mut self) -> Result<(), String> {
        self.experience.phase = Phase::Saving;
        match self
            .store
            .update_experience(self.experience.draft.clone())
            .await
        {
            Ok(()) => {
                self.experience.phase = Phase::SavedClean;
                self.flash_success();
                Ok(())
            }
            Err(err) => self.fail(Section::Experience, err),
        }
    }

    // ---- timeline --------------------------------------------------------

    pub fn edit_timeline_entry(&mut self, index: usize, edit: impl FnOnce(&mut TimelineEntry)) {
        let entries = self.timeline.edit();
        if let Some(entry) = entries.get_mut(index) {
            edit(entry);
        }
    }

    /// Prepends a template entry and saves the whole list immediately:
    /// timeline rows have no identity of their own on the backend until the
    /// collections are written. A failed save keeps the new entry locally
    /// and tells the admin to retry with the explicit save action.
    pub async fn add_timeline_entry(&mut self) -> Result<(), String> {
        let entry = TimelineEntry::new(
            TimelineKind::Experience,
            "Jan 2025 - PRESENT",
            "New Position",
            "Company Name",
            "Description here...",
        );
        self.timeline.edit().insert(0, entry);
        self.save_timeline_list(Some("Entry added but not saved"))
            .await
    }

    /// Deleting is destructive, so it goes through an explicit confirm
    /// step; nothing leaves the buffer until `confirm_timeline_delete`.
    pub fn request_timeline_delete(&mut self, index: usize) -> bool {
        if index >= self.timeline.draft.len() {
            return false;
        }
        self.pending_timeline_delete = Some(index);
        true
    }

    pub fn pending_timeline_delete(&self) -> Option<usize> {
        self.pending_timeline_delete
    }

    pub fn cancel_timeline_delete(&mut self) {
        self.pending_timeline_delete = None;
    }

    /// Removes the confirmed entry and auto-saves. A failed save reverts
    /// the in-memory removal so nothing silently disappears.
    pub async fn confirm_timeline_delete(&mut self) -> Result<(), String> {
        let Some(index) = self.pending_timeline_delete.take() else {
            return Ok(());
        };
        if index >= self.timeline.draft.len() {
            return Ok(());
        }

        let before = self.timeline.draft.clone();
        self.timeline.edit().remove(index);

        match self
            .save_timeline_list(Some("Entry removed but not saved"))
            .await
        {
            Ok(()) => Ok(()),
            Err(message) => {
                self.timeline.draft = before;
                Err(message)
            }
        }
    }

    pub async fn save_timeline(&mut self) -> Result<(), String> {
        self.save_timeline_list(None).await
    }

    async fn save_timeline_list(&mut self, failure_hint: Option<&str>) -> Result<(), String> {
        self.timeline.phase = Phase::Saving;
        // armed before the await: the grace window has to cover the save's
        // own silent refresh as well as the next poll
        self.timeline_grace_until = Some(Instant::now() + self.config.grace_window);

        match self.store.update_timeline(self.timeline.draft.clone()).await {
            Ok(()) => {
                self.timeline.phase = Phase::SavedClean;
                self.flash_success();
                Ok(())
            }
            Err(err) => {
                let message = match failure_hint {
                    Some(hint) => format!("{hint}: {}", err.user_message()),
                    None => err.user_message(),
                };
                warn!("timeline save failed: {message}");
                self.timeline.phase = Phase::SaveFailed {
                    message: message.clone(),
                };
                Err(message)
            }
        }
    }

    // ---- resume ----------------------------------------------------------

    /// Resume upload goes straight through the store; the size guard is the
    /// only validation this tool performs on the file.
    pub async fn save_resume(&mut self, resume: Resume) -> Result<(), String> {
        if let Some(ref data) = resume.file_data {
            check_attachment(data).map_err(|err| err.to_string())?;
        }
        match self.store.update_resume(resume).await {
            Ok(()) => {
                self.flash_success();
                Ok(())
            }
            Err(err) => Err(err.user_message()),
        }
    }

    // ---- helpers ---------------------------------------------------------

    fn flash_success(&mut self) {
        self.success_until = Some(Instant::now() + self.config.success_flash);
    }

    fn fail(&mut self, section: Section, err: UpdateError) -> Result<(), String> {
        let message = err.user_message();
        warn!("save failed for {section:?}: {message}");
        let phase = match section {
            Section::Profile => &mut self.profile.phase,
            Section::Projects => &mut self.projects.phase,
            Section::Contact => &mut self.contact.phase,
            Section::Experience => &mut self.experience.phase,
            Section::Timeline => &mut self.timeline.phase,
        };
        *phase = Phase::SaveFailed {
            message: message.clone(),
        };
        Err(message)
    }
}

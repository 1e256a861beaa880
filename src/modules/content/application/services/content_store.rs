// src/modules/content/application/services/content_store.rs
//
// Process-wide mirror of everything the backend knows about the site.
// Constructed explicitly with an injected gateway; refresh and polling are
// the only writers of the cached slots, update operations write through to
// the backend and then re-pull the authoritative state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::content::application::ports::outgoing::content_gateway::{
    AboutDocument, AboutPatch, ContactMessage, ContentGateway, ProjectRecord,
};
use crate::content::application::services::project_reconciler::{self, ReconcileError};
use crate::content::domain::defaults;
use crate::content::domain::entities::{
    sanitize_tags, ContactInfo, ExperienceStats, Profile, Project, Resume, Service,
};
use crate::shared::error::GatewayError;
use crate::timeline::application::mapping;
use crate::timeline::domain::entities::TimelineEntry;
use crate::timeline::domain::period::PeriodError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// First paint: drives the store-wide loading flag.
    WithLoader,
    /// Background polling and post-save pulls: invisible to the loading UI.
    Silent,
}

/// A consistent read of every cached slot.
#[derive(Debug, Clone)]
pub struct ContentSnapshot {
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub services: Vec<Service>,
    pub contact: ContactInfo,
    pub experience: ExperienceStats,
    pub timeline: Vec<TimelineEntry>,
    pub resume: Resume,
    pub is_loading: bool,
}

/// Per-slot outcome of one refresh; slots whose fetch failed keep their
/// previous value.
#[derive(Debug, Clone, Default)]
pub struct RefreshReport {
    pub about_error: Option<GatewayError>,
    pub projects_error: Option<GatewayError>,
    pub skills_error: Option<GatewayError>,
    pub stale_discarded: bool,
}

impl RefreshReport {
    pub fn fully_ok(&self) -> bool {
        self.about_error.is_none() && self.projects_error.is_none() && self.skills_error.is_none()
    }
}

#[derive(Debug, Clone, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    InvalidPeriod(#[from] PeriodError),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

impl UpdateError {
    pub fn user_message(&self) -> String {
        match self {
            UpdateError::Gateway(err) => err.user_message(),
            UpdateError::InvalidPeriod(err) => err.to_string(),
            UpdateError::Reconcile(err) => err.user_message(),
        }
    }
}

struct Inner {
    content: ContentSnapshot,
    applied_seq: u64,
}

pub struct ContentStore {
    gateway: Arc<dyn ContentGateway>,
    inner: RwLock<Inner>,
    issued_seq: AtomicU64,
    poll_interval: Duration,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl ContentStore {
    pub fn new(gateway: Arc<dyn ContentGateway>, config: &Config) -> Self {
        let content = ContentSnapshot {
            profile: defaults::default_profile(),
            projects: defaults::default_projects(),
            services: defaults::default_services(),
            contact: defaults::default_contact(),
            experience: defaults::default_experience_stats(),
            timeline: defaults::default_timeline(),
            resume: Resume::default(),
            is_loading: false,
        };
        Self {
            gateway,
            inner: RwLock::new(Inner {
                content,
                applied_seq: 0,
            }),
            issued_seq: AtomicU64::new(0),
            poll_interval: config.poll_interval,
            poll_task: Mutex::new(None),
        }
    }

    // ---- reads -----------------------------------------------------------

    pub async fn snapshot(&self) -> ContentSnapshot {
        self.inner.read().await.content.clone()
    }

    pub async fn profile(&self) -> Profile {
        self.inner.read().await.content.profile.clone()
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.inner.read().await.content.projects.clone()
    }

    pub async fn services(&self) -> Vec<Service> {
        self.inner.read().await.content.services.clone()
    }

    pub async fn contact(&self) -> ContactInfo {
        self.inner.read().await.content.contact.clone()
    }

    pub async fn experience(&self) -> ExperienceStats {
        self.inner.read().await.content.experience.clone()
    }

    pub async fn timeline(&self) -> Vec<TimelineEntry> {
        self.inner.read().await.content.timeline.clone()
    }

    pub async fn resume(&self) -> Resume {
        self.inner.read().await.content.resume.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.content.is_loading
    }

    // ---- refresh & polling ----------------------------------------------

    /// Pulls about/projects/skills concurrently and replaces the derived
    /// slots under one write lock. A slot whose fetch failed keeps its
    /// previous value; the store never empties on a transient blip. Each
    /// refresh carries a sequence number, and a response that resolves
    /// after a newer one has already landed is discarded.
    pub async fn refresh(&self, mode: RefreshMode) -> RefreshReport {
        let seq = self.issued_seq.fetch_add(1, Ordering::SeqCst) + 1;
        if mode == RefreshMode::WithLoader {
            self.inner.write().await.content.is_loading = true;
        }

        let (about, projects, skills) = futures::join!(
            self.gateway.fetch_about(),
            self.gateway.fetch_projects(),
            self.gateway.fetch_skill_groups(),
        );

        let mut report = RefreshReport::default();
        let mut inner = self.inner.write().await;

        if seq <= inner.applied_seq {
            debug!(seq, "discarding refresh outrun by a newer one");
            report.stale_discarded = true;
            inner.content.is_loading = false;
            return report;
        }
        inner.applied_seq = seq;

        match about {
            Ok(Some(document)) => apply_about(&mut inner.content, document),
            Ok(None) => debug!("about document not created yet, keeping current slots"),
            Err(err) => {
                warn!("about fetch failed: {err}");
                report.about_error = Some(err);
            }
        }

        match projects {
            Ok(records) => {
                inner.content.projects = records.iter().map(project_from_record).collect();
            }
            Err(err) => {
                warn!("projects fetch failed: {err}");
                report.projects_error = Some(err);
            }
        }

        match skills {
            // The skill taxonomy has no slot of its own: the service cards
            // stay client-side configuration. Fetched for contract parity
            // and connectivity signal only.
            Ok(groups) => debug!(categories = groups.len(), "skills fetched"),
            Err(err) => {
                warn!("skills fetch failed: {err}");
                report.skills_error = Some(err);
            }
        }

        inner.content.is_loading = false;
        report
    }

    /// Starts the 30s background poll. The admin panel never starts this;
    /// while it is mounted the edit session alone decides when remote truth
    /// may overwrite local state.
    pub async fn start_polling(self: &Arc<Self>) {
        let mut task = self.poll_task.lock().await;
        if task.is_some() {
            return;
        }
        let store = Arc::clone(self);
        let interval = self.poll_interval;
        info!(interval_secs = interval.as_secs(), "content polling started");
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // the immediate first tick belongs to the initial load
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let report = store.refresh(RefreshMode::Silent).await;
                if !report.fully_ok() {
                    debug!("background refresh was partial");
                }
            }
        }));
    }

    pub async fn stop_polling(&self) {
        if let Some(task) = self.poll_task.lock().await.take() {
            task.abort();
            info!("content polling stopped");
        }
    }

    // ---- updates ---------------------------------------------------------

    /// Writes the whole profile/about section. Tag lists are sanitized at
    /// this boundary so the backend never stores empty entries.
    pub async fn update_profile(&self, profile: Profile) -> Result<(), UpdateError> {
        let patch = AboutPatch {
            title: Some(profile.name.clone()),
            bio: Some(if profile.about_me.is_empty() {
                profile.bio.clone()
            } else {
                profile.about_me.clone()
            }),
            short_bio: Some(profile.role.clone()),
            show_project_intro: Some(profile.show_project_intro),
            profile_image: Some(profile.image.clone()),
            logo: Some(profile.logo.clone()),
            about_home1: Some(profile.about_home[0].clone()),
            about_home2: Some(profile.about_home[1].clone()),
            about_home3: Some(profile.about_home[2].clone()),
            social_links: Some(profile.social.clone()),
            tech_stack: Some(sanitize_tags(&profile.tech_stack)),
            badges: Some(sanitize_tags(&profile.badges)),
            ..AboutPatch::default()
        };
        self.gateway.update_about(patch).await?;
        info!("profile saved");
        self.refresh(RefreshMode::Silent).await;
        Ok(())
    }

    /// Reconciles the edited project list against the backend: re-reads the
    /// authoritative list, diffs, and applies the minimal create/update/
    /// delete set. A failure partway through is rolled back client-side and
    /// surfaced as one combined error.
    pub async fn update_projects(&self, local: Vec<Project>) -> Result<(), UpdateError> {
        let remote = self.gateway.fetch_projects().await?;
        let plan = project_reconciler::diff(&local, &remote);
        debug!(
            creates = plan.creates.len(),
            updates = plan.updates.len(),
            deletes = plan.deletes.len(),
            "applying project reconcile plan"
        );
        project_reconciler::apply(self.gateway.as_ref(), &remote, plan).await?;
        info!("projects saved");
        self.refresh(RefreshMode::Silent).await;
        Ok(())
    }

    /// Services have no remote persistence contract; they are client-cached
    /// configuration and survive only as long as the process.
    pub async fn update_services(&self, services: Vec<Service>) {
        self.inner.write().await.content.services = services;
    }

    pub async fn update_contact(&self, contact: ContactInfo) -> Result<(), UpdateError> {
        let patch = AboutPatch {
            contact: Some(contact.clone()),
            ..AboutPatch::default()
        };
        self.gateway.update_about(patch).await?;
        self.inner.write().await.content.contact = contact;
        info!("contact info saved");
        self.refresh(RefreshMode::Silent).await;
        Ok(())
    }

    pub async fn update_experience(&self, stats: ExperienceStats) -> Result<(), UpdateError> {
        let patch = AboutPatch {
            experience_stats: Some(stats.clone()),
            ..AboutPatch::default()
        };
        self.gateway.update_about(patch).await?;
        self.inner.write().await.content.experience = stats;
        info!("experience stats saved");
        self.refresh(RefreshMode::Silent).await;
        Ok(())
    }

    /// Splits the merged timeline into the backend's experience/education
    /// collections and writes both in one about patch. A malformed period
    /// fails validation before anything is sent. The just-saved list is
    /// echoed into the cache immediately so the panel reflects it even if
    /// the follow-up refresh races backend consistency.
    pub async fn update_timeline(&self, entries: Vec<TimelineEntry>) -> Result<(), UpdateError> {
        let (experiences, educations) = mapping::split_entries(&entries)?;
        let patch = AboutPatch {
            experience: Some(experiences),
            education: Some(educations),
            ..AboutPatch::default()
        };
        self.gateway.update_about(patch).await?;
        self.inner.write().await.content.timeline = entries;
        info!("timeline saved");
        self.refresh(RefreshMode::Silent).await;
        Ok(())
    }

    pub async fn update_resume(&self, resume: Resume) -> Result<(), UpdateError> {
        let patch = AboutPatch {
            resume: Some(resume.clone()),
            ..AboutPatch::default()
        };
        self.gateway.update_about(patch).await?;
        self.inner.write().await.content.resume = resume;
        info!("resume saved");
        self.refresh(RefreshMode::Silent).await;
        Ok(())
    }

    /// Public contact form passthrough.
    pub async fn send_contact_message(&self, message: ContactMessage) -> Result<(), UpdateError> {
        self.gateway.submit_contact_message(message).await?;
        Ok(())
    }
}

/// Overlays a fetched about document onto the built-in defaults, the same
/// way the site has always rendered a half-filled document.
fn apply_about(content: &mut ContentSnapshot, document: AboutDocument) {
    let base = defaults::default_profile();
    content.profile = Profile {
        name: document.title.unwrap_or(base.name),
        role: document.short_bio.unwrap_or(base.role),
        bio: document.bio.clone().unwrap_or(base.bio),
        about_me: document.bio.unwrap_or(base.about_me),
        about_home: [
            document.about_home1.unwrap_or_else(|| base.about_home[0].clone()),
            document.about_home2.unwrap_or_else(|| base.about_home[1].clone()),
            document.about_home3.unwrap_or_else(|| base.about_home[2].clone()),
        ],
        image: document.profile_image.unwrap_or(base.image),
        logo: document.logo,
        social: document.social_links.unwrap_or(base.social),
        // tech stack is backend-only: an empty backend list stays empty so
        // the UI can show its "add your technologies" placeholder
        tech_stack: sanitize_tags(&document.tech_stack.unwrap_or_default()),
        badges: document
            .badges
            .map(|badges| sanitize_tags(&badges))
            .unwrap_or(base.badges),
        show_project_intro: document.show_project_intro.unwrap_or(true),
    };

    if let Some(contact) = document.contact {
        content.contact = contact;
    }
    if let Some(stats) = document.experience_stats {
        content.experience = stats;
    }
    if let Some(resume) = document.resume {
        content.resume = resume;
    }

    // the timeline slot only moves when the document actually carries the
    // collections; a document without them keeps whatever was displayed
    if document.experience.is_some() || document.education.is_some() {
        content.timeline = mapping::merge_collections(
            &document.experience.unwrap_or_default(),
            &document.education.unwrap_or_default(),
        );
    }
}

fn project_from_record(record: &ProjectRecord) -> Project {
    Project {
        id: Some(record.id.clone()),
        title: record.title.clone(),
        description: record.description.clone(),
        image: record
            .images
            .first()
            .cloned()
            .unwrap_or_else(|| "https://via.placeholder.com/400x300".to_string()),
        demo_link: record.live_url.clone().unwrap_or_default(),
        repo_link: record.repo_url.clone().unwrap_or_default(),
        tech: record.tech.clone(),
    }
}

// src/tests/support/in_memory_gateway.rs
//
// A scriptable stand-in for the REST backend. Holds the same document
// shapes the real server persists, applies patches the way the server
// merges them, and can be told to fail or stall specific operations.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::auth::application::ports::outgoing::AuthGateway;
use crate::auth::domain::entities::Credentials;
use crate::content::application::ports::outgoing::content_gateway::{
    AboutDocument, AboutPatch, ContactMessage, ContentGateway, ProjectPayload, ProjectRecord,
    SkillGroups,
};
use crate::shared::error::GatewayError;

#[derive(Default)]
pub struct BackendState {
    pub about: AboutDocument,
    pub has_about: bool,
    pub projects: Vec<ProjectRecord>,
    pub next_project_id: u32,
    pub calls: Vec<String>,
    pub fail_about_fetch: bool,
    pub fail_about_update: bool,
    pub fail_projects_fetch: bool,
    pub update_about_delay: Option<Duration>,
    pub login: Option<(String, String, String)>,
    pub contact_messages: Vec<ContactMessage>,
}

#[derive(Default)]
pub struct InMemoryGateway {
    pub state: Mutex<BackendState>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_about(document: AboutDocument) -> Self {
        let gateway = Self::default();
        {
            let mut state = gateway.state.lock().unwrap();
            state.about = document;
            state.has_about = true;
        }
        gateway
    }

    pub fn seed_project(&self, title: &str) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_project_id += 1;
        let id = format!("p{}", state.next_project_id);
        state.projects.push(ProjectRecord {
            id: id.clone(),
            title: title.to_string(),
            ..ProjectRecord::default()
        });
        id
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn server_error() -> GatewayError {
        GatewayError::Server {
            status: 500,
            message: "simulated backend failure".to_string(),
        }
    }
}

/// Server-side merge semantics: only the fields a patch carries move.
pub fn apply_patch(document: &mut AboutDocument, patch: AboutPatch) {
    if let Some(title) = patch.title {
        document.title = Some(title);
    }
    if let Some(bio) = patch.bio {
        document.bio = Some(bio);
    }
    if let Some(short_bio) = patch.short_bio {
        document.short_bio = Some(short_bio);
    }
    if let Some(flag) = patch.show_project_intro {
        document.show_project_intro = Some(flag);
    }
    if let Some(image) = patch.profile_image {
        document.profile_image = Some(image);
    }
    if let Some(logo) = patch.logo {
        document.logo = logo;
    }
    if let Some(text) = patch.about_home1 {
        document.about_home1 = Some(text);
    }
    if let Some(text) = patch.about_home2 {
        document.about_home2 = Some(text);
    }
    if let Some(text) = patch.about_home3 {
        document.about_home3 = Some(text);
    }
    if let Some(links) = patch.social_links {
        document.social_links = Some(links);
    }
    if let Some(stack) = patch.tech_stack {
        document.tech_stack = Some(stack);
    }
    if let Some(badges) = patch.badges {
        document.badges = Some(badges);
    }
    if let Some(contact) = patch.contact {
        document.contact = Some(contact);
    }
    if let Some(stats) = patch.experience_stats {
        document.experience_stats = Some(stats);
    }
    if let Some(resume) = patch.resume {
        document.resume = Some(resume);
    }
    if let Some(experience) = patch.experience {
        document.experience = Some(experience);
    }
    if let Some(education) = patch.education {
        document.education = Some(education);
    }
}

fn record_from_payload(id: String, payload: &ProjectPayload) -> ProjectRecord {
    ProjectRecord {
        id,
        title: payload.title.clone(),
        description: payload.description.clone(),
        images: payload.images.clone(),
        live_url: Some(payload.live_url.clone()),
        repo_url: Some(payload.repo_url.clone()),
        tech: payload.tech.clone(),
    }
}

#[async_trait]
impl ContentGateway for InMemoryGateway {
    async fn fetch_about(&self) -> Result<Option<AboutDocument>, GatewayError> {
        let state = self.state.lock().unwrap();
        if state.fail_about_fetch {
            return Err(Self::server_error());
        }
        Ok(state.has_about.then(|| state.about.clone()))
    }

    async fn update_about(&self, patch: AboutPatch) -> Result<(), GatewayError> {
        let delay = self.state.lock().unwrap().update_about_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.state.lock().unwrap();
        state.calls.push("update_about".to_string());
        if state.fail_about_update {
            return Err(Self::server_error());
        }
        apply_patch(&mut state.about, patch);
        state.has_about = true;
        Ok(())
    }

    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, GatewayError> {
        let state = self.state.lock().unwrap();
        if state.fail_projects_fetch {
            return Err(Self::server_error());
        }
        Ok(state.projects.clone())
    }

    async fn fetch_project(&self, id: &str) -> Result<ProjectRecord, GatewayError> {
        self.state
            .lock()
            .unwrap()
            .projects
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::Server {
                status: 404,
                message: format!("project {id} not found"),
            })
    }

    async fn create_project(&self, payload: ProjectPayload) -> Result<String, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.next_project_id += 1;
        let id = format!("p{}", state.next_project_id);
        state.calls.push(format!("create_project {}", payload.title));
        let record = record_from_payload(id.clone(), &payload);
        state.projects.push(record);
        Ok(id)
    }

    async fn update_project(&self, id: &str, payload: ProjectPayload) -> Result<(), GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("update_project {id}"));
        match state.projects.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                *record = record_from_payload(id.to_string(), &payload);
                Ok(())
            }
            None => Err(GatewayError::Server {
                status: 404,
                message: format!("project {id} not found"),
            }),
        }
    }

    async fn delete_project(&self, id: &str) -> Result<(), GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("delete_project {id}"));
        state.projects.retain(|record| record.id != id);
        Ok(())
    }

    async fn fetch_skill_groups(&self) -> Result<SkillGroups, GatewayError> {
        Ok(SkillGroups::new())
    }

    async fn submit_contact_message(&self, message: ContactMessage) -> Result<(), GatewayError> {
        self.state.lock().unwrap().contact_messages.push(message);
        Ok(())
    }
}

#[async_trait]
impl AuthGateway for InMemoryGateway {
    async fn login(&self, credentials: Credentials) -> Result<String, GatewayError> {
        let state = self.state.lock().unwrap();
        match &state.login {
            Some((email, password, token))
                if *email == credentials.email && *password == credentials.password =>
            {
                Ok(token.clone())
            }
            _ => Err(GatewayError::Server {
                status: 401,
                message: "invalid credentials".to_string(),
            }),
        }
    }
}

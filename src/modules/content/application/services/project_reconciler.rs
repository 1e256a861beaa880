// src/modules/content/application/services/project_reconciler.rs
//
// Turns "here is the project list the admin now wants" into the minimal
// set of create/update/delete calls against the backend, matching rows by
// their server-assigned id. Application keeps an undo log so a failure
// partway through can be rolled back client-side instead of leaving the
// remote list half-migrated.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::content::application::ports::outgoing::content_gateway::{
    ContentGateway, ProjectPayload, ProjectRecord,
};
use crate::content::domain::entities::{sanitize_tags, Project};
use crate::shared::error::GatewayError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconcilePlan {
    pub creates: Vec<ProjectPayload>,
    pub updates: Vec<(String, ProjectPayload)>,
    pub deletes: Vec<String>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOutcome {
    NothingToRollBack,
    Complete,
    Partial { remaining: usize },
}

/// One combined error for the whole save transaction: which call failed,
/// why, and how far the client-side rollback got.
#[derive(Debug, Clone, Error)]
#[error("{operation} failed: {source}")]
pub struct ReconcileError {
    pub operation: String,
    #[source]
    pub source: GatewayError,
    pub rollback: RollbackOutcome,
}

impl ReconcileError {
    pub fn user_message(&self) -> String {
        let base = format!("{}: {}", self.operation, self.source.user_message());
        match &self.rollback {
            RollbackOutcome::NothingToRollBack | RollbackOutcome::Complete => base,
            RollbackOutcome::Partial { remaining } => format!(
                "{base} ({remaining} earlier change(s) could not be rolled back)"
            ),
        }
    }
}

pub fn payload_for(project: &Project) -> ProjectPayload {
    ProjectPayload {
        title: project.title.clone(),
        description: project.description.clone(),
        images: vec![project.image.clone()],
        live_url: project.demo_link.clone(),
        repo_url: project.repo_link.clone(),
        tech: sanitize_tags(&project.tech),
        status: "published".to_string(),
    }
}

fn payload_for_record(record: &ProjectRecord) -> ProjectPayload {
    ProjectPayload {
        title: record.title.clone(),
        description: record.description.clone(),
        images: record.images.clone(),
        live_url: record.live_url.clone().unwrap_or_default(),
        repo_url: record.repo_url.clone().unwrap_or_default(),
        tech: record.tech.clone(),
        status: "published".to_string(),
    }
}

/// Computes the plan. A local project whose id the remote set still knows
/// becomes an update; one with no id (or an id the remote no longer knows)
/// is re-created; every remote id missing locally is deleted.
pub fn diff(local: &[Project], remote: &[ProjectRecord]) -> ReconcilePlan {
    let remote_ids: HashSet<&str> = remote.iter().map(|record| record.id.as_str()).collect();

    let mut creates = Vec::new();
    let mut updates = Vec::new();
    for project in local {
        match project.id.as_deref() {
            Some(id) if remote_ids.contains(id) => {
                updates.push((id.to_string(), payload_for(project)));
            }
            _ => creates.push(payload_for(project)),
        }
    }

    let local_ids: HashSet<&str> = local
        .iter()
        .filter_map(|project| project.id.as_deref())
        .collect();
    let deletes = remote
        .iter()
        .filter(|record| !local_ids.contains(record.id.as_str()))
        .map(|record| record.id.clone())
        .collect();

    ReconcilePlan {
        creates,
        updates,
        deletes,
    }
}

enum UndoAction {
    DeleteCreated { id: String },
    RestorePayload { id: String, previous: ProjectPayload },
    RecreateDeleted { previous: ProjectPayload },
}

/// Applies the plan sequentially: creates, then updates, then deletes, so
/// every applied call has a recorded inverse before anything destructive
/// runs. On the first failure the remainder is skipped and the undo log is
/// replayed in reverse, best effort. A rolled-back delete comes back under
/// a new server id; the follow-up refresh resolves it.
pub async fn apply(
    gateway: &dyn ContentGateway,
    remote: &[ProjectRecord],
    plan: ReconcilePlan,
) -> Result<(), ReconcileError> {
    let mut undo: Vec<UndoAction> = Vec::new();

    for payload in plan.creates {
        let title = payload.title.clone();
        match gateway.create_project(payload).await {
            Ok(id) => undo.push(UndoAction::DeleteCreated { id }),
            Err(source) => {
                return Err(abort(gateway, undo, format!("creating \"{title}\""), source).await)
            }
        }
    }

    for (id, payload) in plan.updates {
        let previous = remote
            .iter()
            .find(|record| record.id == id)
            .map(payload_for_record);
        match gateway.update_project(&id, payload).await {
            Ok(()) => {
                if let Some(previous) = previous {
                    undo.push(UndoAction::RestorePayload { id, previous });
                }
            }
            Err(source) => {
                return Err(abort(gateway, undo, format!("updating project {id}"), source).await)
            }
        }
    }

    for id in plan.deletes {
        let previous = remote
            .iter()
            .find(|record| record.id == id)
            .map(payload_for_record);
        match gateway.delete_project(&id).await {
            Ok(()) => {
                if let Some(previous) = previous {
                    undo.push(UndoAction::RecreateDeleted { previous });
                }
            }
            Err(source) => {
                return Err(abort(gateway, undo, format!("deleting project {id}"), source).await)
            }
        }
    }

    Ok(())
}

async fn abort(
    gateway: &dyn ContentGateway,
    undo: Vec<UndoAction>,
    operation: String,
    source: GatewayError,
) -> ReconcileError {
    let total = undo.len();
    let mut failed = 0usize;

    for action in undo.into_iter().rev() {
        let outcome = match action {
            UndoAction::DeleteCreated { id } => gateway.delete_project(&id).await,
            UndoAction::RestorePayload { id, previous } => {
                gateway.update_project(&id, previous).await
            }
            UndoAction::RecreateDeleted { previous } => {
                gateway.create_project(previous).await.map(|_| ())
            }
        };
        if let Err(err) = outcome {
            failed += 1;
            warn!("rollback step failed: {err}");
        }
    }

    if total > 0 {
        debug!(total, failed, "rolled back partial project save");
    }

    let rollback = if total == 0 {
        RollbackOutcome::NothingToRollBack
    } else if failed == 0 {
        RollbackOutcome::Complete
    } else {
        RollbackOutcome::Partial { remaining: failed }
    };

    ReconcileError {
        operation,
        source,
        rollback,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::content::application::ports::outgoing::content_gateway::{
        AboutDocument, AboutPatch, ContactMessage, SkillGroups,
    };

    fn local(id: Option<&str>, title: &str) -> Project {
        Project {
            id: id.map(str::to_string),
            title: title.to_string(),
            description: "desc".to_string(),
            image: "img".to_string(),
            demo_link: String::new(),
            repo_link: String::new(),
            tech: vec![],
        }
    }

    fn remote(id: &str, title: &str) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            title: title.to_string(),
            ..ProjectRecord::default()
        }
    }

    #[test]
    fn plan_has_exactly_one_call_per_difference() {
        let local_list = vec![
            local(Some("a"), "kept"),
            local(None, "brand new"),
            local(None, "also new"),
            local(Some("gone-upstream"), "stale id"),
        ];
        let remote_list = vec![remote("a", "kept"), remote("b", "removed locally")];

        let plan = diff(&local_list, &remote_list);
        assert_eq!(plan.creates.len(), 3); // two new + one stale id re-created
        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.updates[0].0, "a");
        assert_eq!(plan.deletes, vec!["b".to_string()]);
    }

    #[test]
    fn removing_a_never_persisted_project_issues_no_delete() {
        let remote_list = vec![remote("a", "kept")];
        // the admin added a project, changed their mind, and removed it
        let local_list = vec![local(Some("a"), "kept")];

        let plan = diff(&local_list, &remote_list);
        assert!(plan.creates.is_empty());
        assert!(plan.deletes.is_empty());
        assert_eq!(plan.updates.len(), 1);
    }

    #[test]
    fn identical_lists_produce_an_update_only_plan() {
        let remote_list = vec![remote("a", "one"), remote("b", "two")];
        let local_list = vec![local(Some("a"), "one"), local(Some("b"), "two")];

        let plan = diff(&local_list, &remote_list);
        assert_eq!(plan.creates.len(), 0);
        assert_eq!(plan.updates.len(), 2);
        assert_eq!(plan.deletes.len(), 0);
    }

    /// Scripted gateway: records calls and fails the nth operation.
    struct ScriptedGateway {
        calls: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
        fail_rollback_too: bool,
        next_id: Mutex<u32>,
    }

    impl ScriptedGateway {
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on,
                fail_rollback_too: false,
                next_id: Mutex::new(100),
            }
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn server_error(&self) -> GatewayError {
            GatewayError::Server {
                status: 500,
                message: "boom".to_string(),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentGateway for ScriptedGateway {
        async fn fetch_about(&self) -> Result<Option<AboutDocument>, GatewayError> {
            Ok(None)
        }
        async fn update_about(&self, _patch: AboutPatch) -> Result<(), GatewayError> {
            Ok(())
        }
        async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, GatewayError> {
            Ok(vec![])
        }
        async fn fetch_project(&self, _id: &str) -> Result<ProjectRecord, GatewayError> {
            Err(self.server_error())
        }
        async fn create_project(&self, payload: ProjectPayload) -> Result<String, GatewayError> {
            self.record(format!("create {}", payload.title));
            if self.fail_on == Some("create") {
                return Err(self.server_error());
            }
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            Ok(format!("p{next}"))
        }
        async fn update_project(
            &self,
            id: &str,
            _payload: ProjectPayload,
        ) -> Result<(), GatewayError> {
            self.record(format!("update {id}"));
            if self.fail_on == Some("update") {
                return Err(self.server_error());
            }
            Ok(())
        }
        async fn delete_project(&self, id: &str) -> Result<(), GatewayError> {
            self.record(format!("delete {id}"));
            if self.fail_on == Some("delete") && !id.starts_with('p') {
                return Err(self.server_error());
            }
            if self.fail_rollback_too {
                return Err(self.server_error());
            }
            Ok(())
        }
        async fn fetch_skill_groups(&self) -> Result<SkillGroups, GatewayError> {
            Ok(SkillGroups::new())
        }
        async fn submit_contact_message(
            &self,
            _message: ContactMessage,
        ) -> Result<(), GatewayError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn apply_walks_creates_updates_then_deletes() {
        let gateway = ScriptedGateway::new(None);
        let remote_list = vec![remote("a", "kept"), remote("b", "dropped")];
        let plan = diff(
            &[local(Some("a"), "kept"), local(None, "fresh")],
            &remote_list,
        );

        apply(&gateway, &remote_list, plan).await.unwrap();
        assert_eq!(
            gateway.calls(),
            vec!["create fresh", "update a", "delete b"]
        );
    }

    #[tokio::test]
    async fn update_failure_rolls_back_the_earlier_create() {
        let gateway = ScriptedGateway::new(Some("update"));
        let remote_list = vec![remote("a", "kept")];
        let plan = diff(
            &[local(None, "fresh"), local(Some("a"), "kept")],
            &remote_list,
        );

        let err = apply(&gateway, &remote_list, plan).await.unwrap_err();
        assert_eq!(err.rollback, RollbackOutcome::Complete);
        // the freshly created p101 must have been deleted again
        let calls = gateway.calls();
        assert_eq!(calls.last().unwrap(), "delete p101");
    }

    #[tokio::test]
    async fn delete_failure_restores_prior_updates() {
        let gateway = ScriptedGateway::new(Some("delete"));
        let remote_list = vec![remote("a", "kept"), remote("b", "dropped")];
        let plan = diff(&[local(Some("a"), "kept")], &remote_list);

        let err = apply(&gateway, &remote_list, plan).await.unwrap_err();
        assert!(err.operation.contains("deleting project b"));
        assert_eq!(err.rollback, RollbackOutcome::Complete);
        let calls = gateway.calls();
        // rollback re-applies a's previous payload after the failed delete
        assert_eq!(calls, vec!["update a", "delete b", "update a"]);
    }

    #[tokio::test]
    async fn failure_with_nothing_applied_reports_nothing_to_roll_back() {
        let gateway = ScriptedGateway::new(Some("create"));
        let plan = diff(&[local(None, "fresh")], &[]);

        let err = apply(&gateway, &[], plan).await.unwrap_err();
        assert_eq!(err.rollback, RollbackOutcome::NothingToRollBack);
        assert!(err.user_message().contains("creating \"fresh\""));
    }
}

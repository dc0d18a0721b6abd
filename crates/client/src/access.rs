//! Workspace access control: the per-visit verification state machine, the
//! create/join flows, and the advisory ownership check.
//!
//! Verification outcome per visit: a stored identity for the requested
//! workspace authorizes directly; otherwise a share-link credential (the
//! workspace password carried as a link parameter) is checked against the
//! workspace record and, when valid, the visitor is prompted for a display
//! name before a participant is issued. Everything else is denied and the
//! caller redirects to the entry screen.

use std::sync::Arc;

use validator::Validate;

use retroboard_core::error::{CoreError, CoreResult};
use retroboard_core::types::DbId;
use retroboard_db::models::participant::{CreateParticipant, Participant};
use retroboard_db::models::session::{CreateSession, Session};

use crate::gateway::RemoteGateway;
use crate::identity::{Identity, IdentityStore};

// ---------------------------------------------------------------------------
// States and inputs
// ---------------------------------------------------------------------------

/// Outcome of verifying a workspace visit.
#[derive(Debug)]
pub enum AccessState {
    /// The visit may proceed with this identity. Terminal for the visit.
    Authorized { identity: Identity },
    /// Share credential verified; prompt for a display name.
    AwaitingJoin,
    /// Terminal: redirect to the entry screen and surface the reason.
    Denied { reason: String },
}

/// Result of completing a join from the **AwaitingJoin** state.
#[derive(Debug)]
pub struct JoinOutcome {
    pub participant: Participant,
    /// The one-time share credential must now be stripped from the visible
    /// address.
    pub credential_consumed: bool,
}

/// A workspace plus the participant acting in it.
#[derive(Debug)]
pub struct WorkspaceHandle {
    pub session: Session,
    pub participant: Participant,
}

/// Input for the create-workspace form. All fields are required.
#[derive(Debug, Validate)]
pub struct CreateWorkspaceInput {
    #[validate(length(min = 1, message = "workspace name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "your name is required"))]
    pub display_name: String,
}

/// Input for the manual join form. All fields are required.
#[derive(Debug, Validate)]
pub struct JoinWorkspaceInput {
    #[validate(length(min = 1, message = "workspace name is required"))]
    pub workspace_name: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "your name is required"))]
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// AccessController
// ---------------------------------------------------------------------------

/// Decides whether the current client identity may act in a workspace, and
/// performs the join handshake when it may not.
pub struct AccessController {
    gateway: RemoteGateway,
    identity: Arc<IdentityStore>,
}

impl AccessController {
    pub fn new(gateway: RemoteGateway, identity: Arc<IdentityStore>) -> Self {
        Self { gateway, identity }
    }

    pub fn identity_store(&self) -> &Arc<IdentityStore> {
        &self.identity
    }

    /// Run the per-visit verification state machine.
    ///
    /// The workspace password is compared as plaintext equality — the
    /// established weak-auth model, preserved deliberately.
    pub async fn verify_access(
        &self,
        workspace_id: DbId,
        share_password: Option<&str>,
    ) -> AccessState {
        if let Some(identity) = self.identity.current() {
            if identity.session_id == workspace_id {
                return AccessState::Authorized { identity };
            }
        }

        if let Some(password) = share_password {
            return match self.gateway.find_workspace(workspace_id).await {
                Ok(Some(workspace)) if workspace.password == password => AccessState::AwaitingJoin,
                Ok(_) => AccessState::Denied {
                    reason: "The sharing link is invalid or has expired.".into(),
                },
                Err(err) => AccessState::Denied {
                    reason: err.to_string(),
                },
            };
        }

        AccessState::Denied {
            reason: "You need to join the workspace first.".into(),
        }
    }

    /// Complete a share-link join from **AwaitingJoin**: issue a participant
    /// in the workspace and persist the identity.
    pub async fn complete_join(
        &self,
        workspace_id: DbId,
        display_name: &str,
    ) -> CoreResult<JoinOutcome> {
        let name = display_name.trim();
        if name.is_empty() {
            return Err(CoreError::Precondition("Please enter your name.".into()));
        }

        let participant = self
            .gateway
            .create_participant(&CreateParticipant {
                session_id: workspace_id,
                name: name.to_string(),
            })
            .await?;

        self.identity.set(participant.id, workspace_id);
        tracing::info!(participant_id = %participant.id, session_id = %workspace_id, "Joined workspace via share link");

        Ok(JoinOutcome {
            participant,
            credential_consumed: true,
        })
    }

    /// Create a workspace and its first participant, and persist the
    /// identity.
    pub async fn create_workspace(
        &self,
        input: &CreateWorkspaceInput,
    ) -> CoreResult<WorkspaceHandle> {
        input
            .validate()
            .map_err(|err| CoreError::Precondition(err.to_string()))?;

        let session = self
            .gateway
            .create_session(&CreateSession {
                name: input.name.clone(),
                password: input.password.clone(),
            })
            .await?;

        let participant = self
            .gateway
            .create_participant(&CreateParticipant {
                session_id: session.id,
                name: input.display_name.clone(),
            })
            .await?;

        self.identity.set(participant.id, session.id);
        tracing::info!(session_id = %session.id, "Created workspace");

        Ok(WorkspaceHandle {
            session,
            participant,
        })
    }

    /// The manual join form: look the workspace up by name and compare the
    /// password. On any mismatch no participant row is created.
    pub async fn join_workspace(&self, input: &JoinWorkspaceInput) -> CoreResult<WorkspaceHandle> {
        input
            .validate()
            .map_err(|err| CoreError::Precondition(err.to_string()))?;

        let session = self
            .gateway
            .find_workspace_by_name(&input.workspace_name)
            .await?
            .ok_or_else(|| {
                CoreError::AccessDenied("Workspace not found or wrong credentials.".into())
            })?;

        if session.password != input.password {
            return Err(CoreError::AccessDenied("Incorrect password.".into()));
        }

        let participant = self
            .gateway
            .create_participant(&CreateParticipant {
                session_id: session.id,
                name: input.display_name.clone(),
            })
            .await?;

        self.identity.set(participant.id, session.id);
        tracing::info!(session_id = %session.id, "Joined workspace");

        Ok(WorkspaceHandle {
            session,
            participant,
        })
    }

    /// Explicit logout: forget the persisted identity.
    pub fn logout(&self) {
        self.identity.clear();
    }

    /// Advisory ownership check: an item is owned by the current client iff
    /// its author id equals the stored participant id. Client-side only;
    /// the store does not enforce it.
    pub fn is_owner(&self, item_participant_id: Option<DbId>) -> bool {
        match (self.identity.current(), item_participant_id) {
            (Some(identity), Some(author)) => identity.participant_id == author,
            _ => false,
        }
    }

    /// The shareable link: workspace URL plus the plaintext password as a
    /// query parameter, used for one-time join verification.
    pub fn share_link(base_url: &str, session: &Session) -> String {
        format!(
            "{}/workspace/{}?password={}",
            base_url.trim_end_matches('/'),
            session.id,
            session.password
        )
    }
}

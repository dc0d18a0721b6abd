//! Collaborative synchronization client for the shared retrospective board.
//!
//! The five pieces a view wires together:
//!
//! - [`IdentityStore`] — durable `(participant, workspace)` identity.
//! - [`AccessController`] — join handshake, share-link verification, and
//!   the advisory ownership check.
//! - [`RemoteGateway`] — typed reads/writes against the shared store; every
//!   successful write publishes a change notification.
//! - [`MutationEngine`] — create/update/delete/vote with precondition
//!   checks and cache invalidation.
//! - [`RetroSubscription`] / [`WorkspaceSubscription`] — standing
//!   subscriptions that refetch affected collections on remote changes.
//!
//! The local [`BoardCache`] is only ever written by fetch responses and
//! invalidation marks; the client never applies an optimistic local edit, so
//! local and remote state cannot diverge past one refetch.

pub mod access;
pub mod cache;
pub mod config;
pub mod gateway;
pub mod identity;
pub mod mutations;
pub mod realtime;
pub mod snapshot;

pub use access::{AccessController, AccessState, CreateWorkspaceInput, JoinWorkspaceInput};
pub use cache::BoardCache;
pub use config::ClientConfig;
pub use gateway::RemoteGateway;
pub use identity::{Identity, IdentityStore};
pub use mutations::{MutationEngine, VoteDirection};
pub use realtime::{RetroSubscription, WorkspaceSubscription};
pub use snapshot::{build_snapshot, import_retro};

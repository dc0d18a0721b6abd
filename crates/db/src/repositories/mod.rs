//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument. Ids and timestamps are
//! generated in code so that creation order is sub-second precise.

pub mod action_item_repo;
pub mod participant_repo;
pub mod retro_item_repo;
pub mod retro_repo;
pub mod session_repo;

pub use action_item_repo::ActionItemRepo;
pub use participant_repo::ParticipantRepo;
pub use retro_item_repo::RetroItemRepo;
pub use retro_repo::RetroRepo;
pub use session_repo::SessionRepo;

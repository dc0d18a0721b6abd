//! Change-notification infrastructure for the shared retrospective store.
//!
//! - [`ChangeBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ChangeEvent`] — a row-level "this table changed" notification scoped
//!   by workspace or retro id. Subscribers never see row payloads; an event
//!   is only a trigger to refetch the affected collection.

pub mod bus;

pub use bus::{ChangeBus, ChangeEvent, ChangeScope, ChangeTable};

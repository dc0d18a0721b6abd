//! Row models and create/update DTOs, one module per table group.

pub mod item;
pub mod participant;
pub mod retro;
pub mod session;

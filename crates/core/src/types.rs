/// All database primary keys are UUIDv4, stored as TEXT.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Which item table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    RetroItem,
    ActionItem,
}

impl ItemKind {
    /// The backing table name, used for logging and event routing.
    pub fn table_name(self) -> &'static str {
        match self {
            ItemKind::RetroItem => "retro_items",
            ItemKind::ActionItem => "action_items",
        }
    }
}

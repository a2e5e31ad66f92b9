use crate::domain::{SourceSlots, WorkspaceDatabase};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    // Workspace client behind the port, so tests can swap in a fake.
    pub database: Arc<dyn WorkspaceDatabase>,
    // Read once at startup and never mutated.
    pub slots: SourceSlots,
}

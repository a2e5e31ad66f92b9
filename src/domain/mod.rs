mod entry;
mod source;

// Re-export the domain boundary types and ports.
pub use entry::{
    EntriesPayload, Entry, Property, PropertyError, RichText, SourceEntries, find_title,
};
pub use source::{
    DatabaseId, QueryPage, Slot, SourceError, SourcePage, SourceSlots, WorkspaceDatabase,
};

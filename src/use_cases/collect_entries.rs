use std::sync::Arc;

use crate::domain::{EntriesPayload, Slot, SourceSlots, WorkspaceDatabase};
use crate::use_cases::FetchEntriesUseCase;

// Builds the full response from the configured slots.
pub struct CollectEntriesUseCase<D: ?Sized> {
    pub database: Arc<D>,
    pub slots: SourceSlots,
}

impl<D> CollectEntriesUseCase<D>
where
    D: WorkspaceDatabase + ?Sized,
{
    pub async fn execute(&self) -> EntriesPayload {
        let fetcher = FetchEntriesUseCase {
            database: Arc::clone(&self.database),
        };
        let mut payload = EntriesPayload::default();

        // Sources are queried one after another, never concurrently.
        for slot in Slot::ALL {
            let Some(database_id) = &self.slots[slot.index()] else {
                tracing::debug!(slot = slot.key(), "slot unconfigured");
                continue;
            };

            let entries = fetcher.execute(database_id).await;
            payload.set(slot, entries);
        }

        payload
    }
}

use std::sync::Arc;

use crate::domain::{DatabaseId, Entry, SourceEntries, SourceError, WorkspaceDatabase};

// Records requested per source; later pages are never fetched.
pub const PAGE_SIZE: u32 = 100;

// Queries one database and reshapes its records into entries.
pub struct FetchEntriesUseCase<D: ?Sized> {
    pub database: Arc<D>,
}

impl<D> FetchEntriesUseCase<D>
where
    D: WorkspaceDatabase + ?Sized,
{
    /// Never fails: any error replaces the whole list with its description.
    pub async fn execute(&self, database_id: &DatabaseId) -> SourceEntries {
        match self.fetch(database_id).await {
            Ok(entries) => SourceEntries::Fetched(entries),
            Err(err) => {
                tracing::warn!(%database_id, error = %err, "source query failed");
                SourceEntries::Failed(err.to_string())
            }
        }
    }

    async fn fetch(&self, database_id: &DatabaseId) -> Result<Vec<Entry>, SourceError> {
        let page = self.database.query(database_id, PAGE_SIZE).await?;

        if page.has_more {
            tracing::debug!(%database_id, "source has more records than one page");
        }

        page.results
            .into_iter()
            .map(|record| {
                let page_id = record.id.clone();
                Entry::from_page(record)
                    .map_err(|source| SourceError::InvalidRecord { page_id, source })
            })
            .collect()
    }
}

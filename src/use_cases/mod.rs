pub mod collect_entries;
pub mod fetch_entries;

pub use collect_entries::CollectEntriesUseCase;
pub use fetch_entries::{FetchEntriesUseCase, PAGE_SIZE};

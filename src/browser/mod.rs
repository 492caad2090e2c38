pub mod history;
pub mod storage;

pub use self::history::{History, HistoryEntry, HistoryState, PopStateEvent};
pub use self::storage::{JsonFileStateStore, MemoryStateStore, StateStore, LAST_PAGE_KEY};

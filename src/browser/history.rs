use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// State object carried by every pushed history entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub state: Option<HistoryState>,
    pub url: Url,
}

/// What a back/forward traversal hands to the popstate handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopStateEvent {
    pub state: Option<HistoryState>,
}

/// Session history of the headless page: a list of entries and a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    index: usize,
    pushes: usize,
    pops: usize,
}

impl History {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![HistoryEntry {
                state: None,
                url: initial,
            }],
            index: 0,
            pushes: 0,
            pops: 0,
        }
    }

    pub fn location(&self) -> &Url {
        &self.entries[self.index].url
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn push_count(&self) -> usize {
        self.pushes
    }

    pub fn pop_count(&self) -> usize {
        self.pops
    }

    /// Adds an entry after the current one, dropping any forward entries.
    /// `url` is resolved against the current location; nothing is loaded.
    pub fn push_state(&mut self, state: HistoryState, url: &str) -> Result<()> {
        let resolved = self
            .location()
            .join(url)
            .with_context(|| format!("Cannot push unparsable url {}", url))?;

        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            state: Some(state),
            url: resolved,
        });
        self.index += 1;
        self.pushes += 1;
        Ok(())
    }

    pub fn back(&mut self) -> Option<PopStateEvent> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.popped())
    }

    pub fn forward(&mut self) -> Option<PopStateEvent> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.popped())
    }

    fn popped(&mut self) -> PopStateEvent {
        self.pops += 1;
        PopStateEvent {
            state: self.entries[self.index].state.clone(),
        }
    }
}

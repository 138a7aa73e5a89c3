use std::sync::Arc;

use crate::model::FetchError;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Fetching,
    Loaded,
    Errored,
}

impl FetchState {
    pub fn is_finished(self) -> bool {
        matches!(self, FetchState::Loaded | FetchState::Errored)
    }
}

/// One remotely fetched collection and where its single request for this mount stands.
///
/// The items are only ever replaced wholesale by a successful answer. A failed answer
/// leaves whatever was there before (empty on first load). Once an answer is in,
/// later ones are ignored, a new mount starts over with a new collection.
#[derive(Debug, Clone)]
pub struct RemoteCollection<T> {
    state: FetchState,
    items: Arc<Vec<T>>,
}

impl<T> Default for RemoteCollection<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            items: Arc::new(Vec::new()),
        }
    }
}

impl<T> RemoteCollection<T> {
    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn items(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Marks the request as sent. Returns false if this collection already asked.
    pub fn start(&mut self) -> bool {
        if self.state != FetchState::Idle {
            return false;
        }
        self.state = FetchState::Fetching;
        true
    }

    /// Applies the answer to the request. Errors are handed back so the caller can
    /// turn them into a notice. Answers to a request that was never sent, or
    /// that already got one, change nothing.
    pub fn resolve(&mut self, result: Result<Vec<T>, FetchError>) -> Result<(), FetchError> {
        if self.state != FetchState::Fetching {
            log::warn!(
                "Ignoring an answer for a collection in state {:?}",
                self.state
            );
            return Ok(());
        }
        match result {
            Ok(items) => {
                self.items = Arc::new(items);
                self.state = FetchState::Loaded;
                Ok(())
            }
            Err(err) => {
                self.state = FetchState::Errored;
                Err(err)
            }
        }
    }
}

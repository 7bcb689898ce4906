//! List controller: owns the view state, the search query and the last
//! successfully fetched dataset, and drives reloads through a [`UserFetcher`].

use std::sync::{Arc, Weak};

use shared::{domain::User, error::FetchError};
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::{fetcher::UserFetcher, filter::apply_filter, view_state::ViewState};

pub struct ListController {
    fetcher: Arc<dyn UserFetcher>,
    inner: Mutex<ControllerState>,
    view_state: watch::Sender<ViewState>,
    search_query: watch::Sender<String>,
}

struct ControllerState {
    full_dataset: Vec<User>,
    search_query: String,
    /// Bumped by every reload; completions carrying an older value are dropped.
    generation: u64,
    inflight: Option<JoinHandle<()>>,
}

impl ListController {
    /// Creates the controller and starts the initial load.
    pub async fn new(fetcher: Arc<dyn UserFetcher>) -> Arc<Self> {
        let (view_state, _) = watch::channel(ViewState::Loading);
        let (search_query, _) = watch::channel(String::new());
        let controller = Arc::new(Self {
            fetcher,
            inner: Mutex::new(ControllerState {
                full_dataset: Vec::new(),
                search_query: String::new(),
                generation: 0,
                inflight: None,
            }),
            view_state,
            search_query,
        });
        controller.reload().await;
        controller
    }

    /// Switches to `Loading` and fetches in the background.
    ///
    /// Returns as soon as the fetch is spawned. A reload issued while another
    /// is in flight aborts the older one, and only the latest result is ever
    /// published.
    pub async fn reload(self: &Arc<Self>) {
        let mut guard = self.inner.lock().await;
        guard.generation += 1;
        let generation = guard.generation;
        if let Some(previous) = guard.inflight.take() {
            debug!(generation, "aborting superseded users fetch");
            previous.abort();
        }

        self.view_state.send_replace(ViewState::Loading);
        info!(generation, "loading users");

        let fetcher = Arc::clone(&self.fetcher);
        let controller = Arc::downgrade(self);
        guard.inflight = Some(tokio::spawn(async move {
            let result = fetcher.fetch_users().await;
            complete_reload(controller, generation, result).await;
        }));
    }

    /// Records `text` as the query and, if users are on screen, re-filters them.
    ///
    /// While loading or showing an error the query is only stored; it takes
    /// effect with the next successful reload.
    pub async fn set_search_query(&self, text: impl Into<String>) {
        let text = text.into();
        let mut guard = self.inner.lock().await;
        guard.search_query.clone_from(&text);
        self.search_query.send_replace(text);

        let showing_users = self.view_state.borrow().is_success();
        if !showing_users {
            debug!("search query stored until users are loaded");
            return;
        }

        let visible = apply_filter(&guard.full_dataset, &guard.search_query);
        debug!(
            total = guard.full_dataset.len(),
            visible = visible.len(),
            "search query applied"
        );
        self.view_state.send_replace(ViewState::Success(visible));
    }

    pub fn view_state(&self) -> ViewState {
        self.view_state.borrow().clone()
    }

    pub fn subscribe_view_state(&self) -> watch::Receiver<ViewState> {
        self.view_state.subscribe()
    }

    /// Yields the current state first, then every later change.
    pub fn view_state_stream(&self) -> WatchStream<ViewState> {
        WatchStream::new(self.view_state.subscribe())
    }

    pub fn search_query(&self) -> String {
        self.search_query.borrow().clone()
    }

    pub fn subscribe_search_query(&self) -> watch::Receiver<String> {
        self.search_query.subscribe()
    }

    async fn apply_fetch_result(&self, generation: u64, result: Result<Vec<User>, FetchError>) {
        let mut guard = self.inner.lock().await;
        if guard.generation != generation {
            debug!(
                generation,
                current = guard.generation,
                "dropping superseded users fetch result"
            );
            return;
        }
        guard.inflight = None;

        match result {
            Ok(users) => {
                guard.full_dataset = users;
                let visible = apply_filter(&guard.full_dataset, &guard.search_query);
                info!(
                    generation,
                    total = guard.full_dataset.len(),
                    visible = visible.len(),
                    "users loaded"
                );
                self.view_state.send_replace(ViewState::Success(visible));
            }
            Err(err) => {
                warn!(generation, error = %err, "failed to load users");
                self.view_state
                    .send_replace(ViewState::Error(err.display_message()));
            }
        }
    }
}

async fn complete_reload(
    controller: Weak<ListController>,
    generation: u64,
    result: Result<Vec<User>, FetchError>,
) {
    let Some(controller) = controller.upgrade() else {
        debug!(generation, "controller dropped before users fetch finished");
        return;
    };
    controller.apply_fetch_result(generation, result).await;
}

impl Drop for ListController {
    fn drop(&mut self) {
        if let Some(inflight) = self.inner.get_mut().inflight.take() {
            inflight.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

//! Turns user intents and search results into actions.
//!
//! The action creator is the only place that talks to the outside world. It
//! calls the [`SearchApi`] and the [`FavoriteCache`], then reports what
//! happened to the stores by dispatching [`Action`]s. It never touches store
//! state directly.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::action::Action;
use crate::config::{SearchConfig, SearchRequest};
use crate::dispatcher::Dispatcher;
use crate::error::SearchError;
use crate::model::{Repository, SearchPage};
use crate::stores::SearchRepositoryStore;

/// Repository search backend.
///
/// Implementations own their I/O and block until the page is available.
pub trait SearchApi: Send + Sync {
    fn search_repositories(&self, request: &SearchRequest) -> Result<SearchPage, SearchError>;
}

/// Where favorite repositories are kept between sessions.
pub trait FavoriteCache: Send + Sync {
    fn load(&self) -> Vec<Repository>;
    fn save(&self, repositories: &[Repository]);
}

/// A [`FavoriteCache`] that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryFavoriteCache {
    repositories: Mutex<Vec<Repository>>,
}

impl InMemoryFavoriteCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoriteCache for InMemoryFavoriteCache {
    fn load(&self) -> Vec<Repository> {
        self.repositories.lock().clone()
    }

    fn save(&self, repositories: &[Repository]) {
        *self.repositories.lock() = repositories.to_vec();
    }
}

/// Builds and dispatches actions on behalf of views.
#[derive(Clone)]
pub struct ActionCreator {
    dispatcher: Dispatcher,
    api: Arc<dyn SearchApi>,
    favorites: Arc<dyn FavoriteCache>,
    config: SearchConfig,
    // Held across the check-then-fetch in `fetch_more_repositories`. Shared
    // by clones so every thread driving this creator sees it.
    fetch_more: Arc<Mutex<()>>,
}

impl ActionCreator {
    pub fn new(
        dispatcher: &Dispatcher,
        api: Arc<dyn SearchApi>,
        favorites: Arc<dyn FavoriteCache>,
        config: SearchConfig,
    ) -> Self {
        Self {
            dispatcher: dispatcher.clone(),
            api,
            favorites,
            config,
            fetch_more: Arc::new(Mutex::new(())),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for `query` and report the outcome.
    ///
    /// Dispatches, in order: the query, `IsRepositoriesFetching(true)`, then
    /// either the results followed by their pagination or an error, and
    /// finally `IsRepositoriesFetching(false)`.
    pub fn search_repositories(&self, query: &str, page: u32) {
        let query = query.trim();
        if query.is_empty() {
            self.dispatcher.dispatch(Action::Error(SearchError::EmptyQuery));
            return;
        }

        let request = SearchRequest::new(query, page, &self.config);
        tracing::debug!(query, page, per_page = request.per_page, "searching repositories");

        self.dispatcher
            .dispatch(Action::SearchQuery(Some(query.to_string())));
        self.dispatcher.dispatch(Action::IsRepositoriesFetching(true));

        match self.api.search_repositories(&request) {
            Ok(SearchPage {
                repositories,
                pagination,
            }) => {
                tracing::debug!(query, page, count = repositories.len(), "search succeeded");
                self.dispatcher
                    .dispatch(Action::SearchRepositories(repositories));
                self.dispatcher.dispatch(Action::SearchPagination(pagination));
            }
            Err(err) => {
                tracing::warn!(query, page, error = %err, "search failed");
                self.dispatcher.dispatch(Action::Error(err));
            }
        }

        self.dispatcher.dispatch(Action::IsRepositoriesFetching(false));
    }

    /// Fetch the next page of the current search.
    ///
    /// Returns `false` without dispatching anything when there is no query,
    /// no next page, or a fetch is already running. Safe to call from several
    /// threads at once: only one of them fetches a given page.
    pub fn fetch_more_repositories(&self, store: &SearchRepositoryStore) -> bool {
        let Some(_in_flight) = self.fetch_more.try_lock() else {
            return false;
        };
        if store.is_fetching() {
            return false;
        }
        let (Some(query), Some(next)) = (store.query(), store.next_page()) else {
            return false;
        };
        self.search_repositories(&query, next);
        true
    }

    pub fn clear_repositories(&self) {
        self.dispatcher.dispatch(Action::ClearSearchRepositories);
    }

    pub fn set_is_search_field_editing(&self, is_editing: bool) {
        self.dispatcher
            .dispatch(Action::IsSearchFieldEditing(is_editing));
    }

    pub fn set_selected_repository(&self, repository: Option<Repository>) {
        self.dispatcher
            .dispatch(Action::SelectedRepository(repository));
    }

    /// Publish the cached favorites.
    pub fn load_favorite_repositories(&self) {
        let repositories = self.favorites.load();
        self.dispatcher
            .dispatch(Action::SetFavoriteRepositories(repositories));
    }

    pub fn add_favorite_repository(&self, repository: Repository) {
        let mut repositories = self.favorites.load();
        if !repositories.iter().any(|repo| repo.id == repository.id) {
            repositories.push(repository);
        }
        self.favorites.save(&repositories);
        self.dispatcher
            .dispatch(Action::SetFavoriteRepositories(repositories));
    }

    pub fn remove_favorite_repository(&self, repository: &Repository) {
        let mut repositories = self.favorites.load();
        repositories.retain(|repo| repo.id != repository.id);
        self.favorites.save(&repositories);
        self.dispatcher
            .dispatch(Action::SetFavoriteRepositories(repositories));
    }
}

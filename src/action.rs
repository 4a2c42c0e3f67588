//! The closed set of intents that flow through the dispatcher.

use crate::error::SearchError;
use crate::model::{Pagination, Repository};

/// An intent to change application state.
///
/// Actions are built by callers (usually an
/// [`ActionCreator`](crate::ActionCreator)), handed to
/// [`Dispatcher::dispatch`](crate::Dispatcher::dispatch), and discarded once
/// every registered store has seen them. Each store matches exhaustively on
/// this enum, so adding a variant is a compile error until every store has
/// decided whether it cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A fetched page of results, appended to the current list.
    SearchRepositories(Vec<Repository>),

    /// Drop every search result.
    ClearSearchRepositories,

    /// Cursor for the page after the last one fetched.
    SearchPagination(Option<Pagination>),

    IsRepositoriesFetching(bool),

    IsSearchFieldEditing(bool),

    /// A search failed.
    Error(SearchError),

    SearchQuery(Option<String>),

    /// The repository the user opened, or `None` when it is closed.
    SelectedRepository(Option<Repository>),

    /// The full list of favorite repositories.
    SetFavoriteRepositories(Vec<Repository>),
}

impl Action {
    /// Short static tag for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SearchRepositories(_) => "search_repositories",
            Action::ClearSearchRepositories => "clear_search_repositories",
            Action::SearchPagination(_) => "search_pagination",
            Action::IsRepositoriesFetching(_) => "is_repositories_fetching",
            Action::IsSearchFieldEditing(_) => "is_search_field_editing",
            Action::Error(_) => "error",
            Action::SearchQuery(_) => "search_query",
            Action::SelectedRepository(_) => "selected_repository",
            Action::SetFavoriteRepositories(_) => "set_favorite_repositories",
        }
    }
}

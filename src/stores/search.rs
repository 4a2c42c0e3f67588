use crate::action::Action;
use crate::error::SearchError;
use crate::model::{Pagination, Repository};
use crate::store::{Store, StoreState, Transition};

/// Search results and everything about the search in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRepositoryState {
    query: Option<String>,
    pagination: Option<Pagination>,
    is_search_field_editing: bool,
    is_fetching: bool,
    error: Option<SearchError>,
    repositories: Vec<Repository>,
}

impl SearchRepositoryState {
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    pub fn is_search_field_editing(&self) -> bool {
        self.is_search_field_editing
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }
}

impl StoreState for SearchRepositoryState {
    fn on_dispatch(&mut self, action: &Action) -> Transition {
        match action {
            Action::SearchRepositories(repositories) => {
                self.repositories.extend(repositories.iter().cloned());
            }
            Action::ClearSearchRepositories => self.repositories.clear(),
            Action::SearchPagination(pagination) => self.pagination = *pagination,
            Action::IsRepositoriesFetching(is_fetching) => self.is_fetching = *is_fetching,
            Action::IsSearchFieldEditing(is_editing) => self.is_search_field_editing = *is_editing,
            Action::Error(error) => self.error = Some(error.clone()),
            Action::SearchQuery(query) => self.query = query.clone(),
            Action::SelectedRepository(_) | Action::SetFavoriteRepositories(_) => {
                return Transition::Ignored
            }
        }
        Transition::Changed
    }
}

/// Store backing the search screen.
pub type SearchRepositoryStore = Store<SearchRepositoryState>;

impl Store<SearchRepositoryState> {
    pub fn query(&self) -> Option<String> {
        self.read(|state| state.query.clone())
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.read(|state| state.pagination)
    }

    /// Page to request for more results, if the last response advertised one.
    pub fn next_page(&self) -> Option<u32> {
        self.read(|state| state.pagination.and_then(|p| p.next))
    }

    pub fn is_search_field_editing(&self) -> bool {
        self.read(|state| state.is_search_field_editing)
    }

    pub fn is_fetching(&self) -> bool {
        self.read(|state| state.is_fetching)
    }

    pub fn error(&self) -> Option<SearchError> {
        self.read(|state| state.error.clone())
    }

    pub fn repositories(&self) -> Vec<Repository> {
        self.read(|state| state.repositories.clone())
    }

    pub fn repository_count(&self) -> usize {
        self.read(|state| state.repositories.len())
    }
}

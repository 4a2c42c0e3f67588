use crate::action::Action;
use crate::model::Repository;
use crate::store::{Store, StoreState, Transition};

/// The repository currently opened in the detail view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedRepositoryState {
    repository: Option<Repository>,
}

impl SelectedRepositoryState {
    pub fn repository(&self) -> Option<&Repository> {
        self.repository.as_ref()
    }
}

impl StoreState for SelectedRepositoryState {
    fn on_dispatch(&mut self, action: &Action) -> Transition {
        match action {
            Action::SelectedRepository(repository) => {
                self.repository = repository.clone();
                Transition::Changed
            }
            Action::SearchRepositories(_)
            | Action::ClearSearchRepositories
            | Action::SearchPagination(_)
            | Action::IsRepositoriesFetching(_)
            | Action::IsSearchFieldEditing(_)
            | Action::Error(_)
            | Action::SearchQuery(_)
            | Action::SetFavoriteRepositories(_) => Transition::Ignored,
        }
    }
}

pub type SelectedRepositoryStore = Store<SelectedRepositoryState>;

impl Store<SelectedRepositoryState> {
    pub fn repository(&self) -> Option<Repository> {
        self.read(|state| state.repository.clone())
    }
}

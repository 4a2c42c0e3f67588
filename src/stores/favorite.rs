use crate::action::Action;
use crate::model::Repository;
use crate::store::{Store, StoreState, Transition};

/// Repositories the user starred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoriteRepositoryState {
    repositories: Vec<Repository>,
}

impl FavoriteRepositoryState {
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn contains(&self, id: u64) -> bool {
        self.repositories.iter().any(|repo| repo.id == id)
    }
}

impl StoreState for FavoriteRepositoryState {
    fn on_dispatch(&mut self, action: &Action) -> Transition {
        match action {
            Action::SetFavoriteRepositories(repositories) => {
                self.repositories = repositories.clone();
                Transition::Changed
            }
            Action::SearchRepositories(_)
            | Action::ClearSearchRepositories
            | Action::SearchPagination(_)
            | Action::IsRepositoriesFetching(_)
            | Action::IsSearchFieldEditing(_)
            | Action::Error(_)
            | Action::SearchQuery(_)
            | Action::SelectedRepository(_) => Transition::Ignored,
        }
    }
}

pub type FavoriteRepositoryStore = Store<FavoriteRepositoryState>;

impl Store<FavoriteRepositoryState> {
    pub fn repositories(&self) -> Vec<Repository> {
        self.read(|state| state.repositories.clone())
    }

    /// Whether the repository with `id` is a favorite.
    pub fn contains(&self, id: u64) -> bool {
        self.read(|state| state.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use crate::model::fixtures::repository;

    #[test]
    fn favorites_are_replaced_wholesale() {
        let dispatcher = Dispatcher::new();
        let store = FavoriteRepositoryStore::with_default(&dispatcher);

        dispatcher.dispatch(Action::SetFavoriteRepositories(vec![
            repository(1, "a/one"),
            repository(2, "a/two"),
        ]));
        assert!(store.contains(1));
        assert!(store.contains(2));

        dispatcher.dispatch(Action::SetFavoriteRepositories(vec![repository(2, "a/two")]));
        assert!(!store.contains(1));
        assert_eq!(store.repositories().len(), 1);
    }

    #[test]
    fn search_results_do_not_touch_favorites() {
        let dispatcher = Dispatcher::new();
        let store = FavoriteRepositoryStore::with_default(&dispatcher);

        dispatcher.dispatch(Action::SearchRepositories(vec![repository(1, "a/one")]));

        assert!(store.repositories().is_empty());
    }
}

//! Walk through a repository search the way a UI would drive it.
//!
//! A canned `SearchApi` stands in for the network. Listeners play the part of
//! views: they are told *that* something changed and read the stores to find
//! out *what*.

use std::sync::Arc;

use fluxion::{
    logging, ActionCreator, Dispatcher, FavoriteRepositoryStore, InMemoryFavoriteCache,
    SearchApi, SearchConfig, SearchError, SearchPage, SearchRepositoryStore, SearchRequest,
    SelectedRepositoryStore,
};

const PAGE_ONE: &str = r#"{
    "total_count": 3,
    "items": [
        { "id": 23096959, "name": "go", "full_name": "golang/go",
          "owner": { "id": 4314092, "login": "golang" },
          "html_url": "https://github.com/golang/go",
          "description": "The Go programming language", "language": "Go",
          "stargazers_count": 120000 },
        { "id": 36895, "name": "tools", "full_name": "golang/tools",
          "owner": { "id": 4314092, "login": "golang" },
          "html_url": "https://github.com/golang/tools",
          "description": "Go Tools", "language": "Go",
          "stargazers_count": 7000 }
    ]
}"#;

const PAGE_TWO: &str = r#"{
    "total_count": 3,
    "items": [
        { "id": 33014811, "name": "net", "full_name": "golang/net",
          "owner": { "id": 4314092, "login": "golang" },
          "html_url": "https://github.com/golang/net",
          "description": "Go supplementary network libraries", "language": "Go",
          "stargazers_count": 2600 }
    ]
}"#;

struct CannedApi;

impl SearchApi for CannedApi {
    fn search_repositories(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        match request.page {
            1 => SearchPage::from_json(
                PAGE_ONE,
                Some("<https://api.github.com/search/repositories?q=golang&page=2>; rel=\"next\""),
            ),
            2 => SearchPage::from_json(PAGE_TWO, None),
            page => Err(SearchError::Network(format!("page {page} not found"))),
        }
    }
}

fn main() {
    logging::init("fluxion=debug");

    println!("=== Flux Example: Repository Search ===\n");

    let dispatcher = Dispatcher::new();
    let search = Arc::new(SearchRepositoryStore::with_default(&dispatcher));
    let selected = Arc::new(SelectedRepositoryStore::with_default(&dispatcher));
    let favorites = Arc::new(FavoriteRepositoryStore::with_default(&dispatcher));

    let config = SearchConfig::from_toml_str("per_page = 2\nsort = \"stars\"")
        .unwrap_or_default();
    let creator = ActionCreator::new(
        &dispatcher,
        Arc::new(CannedApi),
        Arc::new(InMemoryFavoriteCache::new()),
        config,
    );

    println!("1. Setting up views");
    let list_view = {
        let search = Arc::downgrade(&search);
        move || {
            let Some(search) = search.upgrade() else {
                return;
            };
            search.read(|state| {
                println!(
                    "   [List] query={:?} fetching={} editing={} results={}",
                    state.query(),
                    state.is_fetching(),
                    state.is_search_field_editing(),
                    state.repositories().len()
                );
                if let Some(error) = state.error() {
                    println!("   [List] error: {error}");
                }
            });
        }
    };
    let list_subscription = search.add_listener(list_view);

    let detail_view = {
        let selected = Arc::downgrade(&selected);
        let favorites = Arc::downgrade(&favorites);
        move || {
            let (Some(selected), Some(favorites)) = (selected.upgrade(), favorites.upgrade())
            else {
                return;
            };
            match selected.repository() {
                Some(repo) => {
                    let star = if favorites.contains(repo.id) { "★" } else { "☆" };
                    println!("   [Detail] {star} {} ({})", repo.full_name, repo.html_url);
                }
                None => println!("   [Detail] closed"),
            }
        }
    };
    selected.add_listener(detail_view.clone());
    favorites.add_listener(detail_view);

    println!("\n2. Typing a query");
    creator.set_is_search_field_editing(true);

    println!("\n3. Submitting the search");
    creator.clear_repositories();
    creator.search_repositories("golang", 1);
    creator.set_is_search_field_editing(false);

    println!("\n4. Scrolling to the bottom");
    while creator.fetch_more_repositories(&search) {}

    println!("\n5. Opening and starring a repository");
    let first = search.read(|state| state.repositories().first().cloned());
    if let Some(repo) = first {
        creator.set_selected_repository(Some(repo.clone()));
        creator.add_favorite_repository(repo);
    }

    println!("\n6. Closing the detail view");
    creator.set_selected_repository(None);

    println!("\n7. Searching with an empty query");
    creator.search_repositories("  ", 1);

    search.remove_listener(list_subscription);

    println!("\nFinal results:");
    for repo in search.repositories() {
        println!("   {} ★{}", repo.full_name, repo.stargazers_count);
    }
}

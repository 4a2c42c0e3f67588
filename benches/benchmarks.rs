use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use fluxion::{
    Action, Dispatcher, Repository, SearchRepositoryStore, SelectedRepositoryStore, User,
};

fn repository(id: u64) -> Repository {
    Repository {
        id,
        name: format!("repo-{id}"),
        full_name: format!("owner/repo-{id}"),
        owner: User {
            id: 1,
            login: "owner".to_string(),
        },
        html_url: format!("https://github.com/owner/repo-{id}"),
        description: None,
        language: None,
        stargazers_count: id,
    }
}

fn register_unregister_benchmark(c: &mut Criterion) {
    let dispatcher = Dispatcher::new();

    c.bench_function("register_unregister", |b| {
        b.iter(|| {
            let token = dispatcher.register(|action| {
                black_box(action);
            });
            dispatcher.unregister(black_box(token));
        });
    });
}

fn dispatch_ignored_benchmark(c: &mut Criterion) {
    let dispatcher = Dispatcher::new();
    let _selected = SelectedRepositoryStore::with_default(&dispatcher);

    c.bench_function("dispatch_ignored", |b| {
        b.iter(|| {
            dispatcher.dispatch(black_box(Action::IsRepositoriesFetching(true)));
        });
    });
}

fn dispatch_applied_benchmark(c: &mut Criterion) {
    let dispatcher = Dispatcher::new();
    let _search = SearchRepositoryStore::with_default(&dispatcher);

    c.bench_function("dispatch_applied", |b| {
        let mut fetching = false;
        b.iter(|| {
            fetching = !fetching;
            dispatcher.dispatch(black_box(Action::IsRepositoriesFetching(fetching)));
        });
    });
}

fn dispatch_fan_out_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_fan_out");

    for store_count in [1, 10, 100].iter() {
        let dispatcher = Dispatcher::new();
        let _stores: Vec<_> = (0..*store_count)
            .map(|_| SearchRepositoryStore::with_default(&dispatcher))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(store_count),
            store_count,
            |b, _| {
                b.iter(|| {
                    dispatcher.dispatch(black_box(Action::SearchQuery(Some("rust".into()))));
                });
            },
        );
    }
    group.finish();
}

fn emit_change_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit_change");

    for listener_count in [1, 10, 100].iter() {
        let dispatcher = Dispatcher::new();
        let search = SearchRepositoryStore::with_default(&dispatcher);

        for _ in 0..*listener_count {
            search.add_listener(|| {
                // Empty listener
            });
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(listener_count),
            listener_count,
            |b, _| {
                b.iter(|| {
                    dispatcher.dispatch(black_box(Action::SearchPagination(None)));
                });
            },
        );
    }
    group.finish();
}

fn append_page_benchmark(c: &mut Criterion) {
    let page: Vec<Repository> = (0..30).map(repository).collect();

    c.bench_function("append_page", |b| {
        let dispatcher = Dispatcher::new();
        let search = SearchRepositoryStore::with_default(&dispatcher);
        b.iter(|| {
            dispatcher.dispatch(Action::SearchRepositories(black_box(page.clone())));
            if search.repository_count() > 3_000 {
                dispatcher.dispatch(Action::ClearSearchRepositories);
            }
        });
    });
}

criterion_group!(
    benches,
    register_unregister_benchmark,
    dispatch_ignored_benchmark,
    dispatch_applied_benchmark,
    dispatch_fan_out_benchmark,
    emit_change_benchmark,
    append_page_benchmark,
);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use speicherbaum::db;
use speicherbaum::tree::{NodeType, TreeStore};
use speicherbaum::types::{ImportRequest, NodeInput};
use sqlx::sqlite::SqlitePoolOptions;
use std::hint::black_box;
use tokio::runtime::Runtime;

const DATE: &str = "2022-05-28T12:00:00Z";

/// `fanout` folders per level down to `depth`, each holding `files_per_dir` files.
fn build_tree(depth: usize, fanout: usize, files_per_dir: usize) -> Vec<NodeInput> {
    fn level(items: &mut Vec<NodeInput>, parent: &str, depth: usize, fanout: usize, files_per_dir: usize) {
        for i in 0..files_per_dir {
            items.push(NodeInput {
                id: format!("{}_f{}", parent, i),
                parent_id: Some(parent.to_string()),
                url: Some(format!("/{}/file_{}", parent, i)),
                size: Some(1024),
                node_type: NodeType::File,
            });
        }
        if depth == 0 {
            return;
        }
        for i in 0..fanout {
            let id = format!("{}_d{}", parent, i);
            items.push(NodeInput {
                id: id.clone(),
                parent_id: Some(parent.to_string()),
                url: None,
                size: None,
                node_type: NodeType::Folder,
            });
            level(items, &id, depth - 1, fanout, files_per_dir);
        }
    }

    let mut items = vec![NodeInput {
        id: "root".to_string(),
        parent_id: None,
        url: None,
        size: None,
        node_type: NodeType::Folder,
    }];
    level(&mut items, "root", depth, fanout, files_per_dir);
    items
}

async fn seeded_store(items: Vec<NodeInput>) -> TreeStore {
    // The in-memory database lives exactly as long as its single connection
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init_db(&pool).await.unwrap();
    let tree = TreeStore::new(pool);
    tree.import(&ImportRequest { items, update_date: DATE.to_string() }).await.unwrap();
    tree
}

fn benchmark_import(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let items = build_tree(3, 3, 5);

    c.bench_function("import_fresh_tree", |b| {
        b.iter(|| {
            rt.block_on(async {
                let pool = SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await.unwrap();
                db::init_db(&pool).await.unwrap();
                let tree = TreeStore::new(pool);
                let req = ImportRequest { items: items.clone(), update_date: DATE.to_string() };
                black_box(tree.import(&req).await.unwrap())
            })
        })
    });
}

fn benchmark_get_node(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("get_node");

    for depth in [2usize, 3, 4] {
        let tree = rt.block_on(seeded_store(build_tree(depth, 3, 5)));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| rt.block_on(async { black_box(tree.get_node("root").await.unwrap()) }))
        });
    }
    group.finish();
}

fn benchmark_updates(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let tree = rt.block_on(seeded_store(build_tree(4, 3, 5)));

    c.bench_function("updates_window", |b| {
        b.iter(|| rt.block_on(async { black_box(tree.updates("2022-05-28T18:00:00Z").await.unwrap()) }))
    });
}

criterion_group!(benches, benchmark_import, benchmark_get_node, benchmark_updates);
criterion_main!(benches);

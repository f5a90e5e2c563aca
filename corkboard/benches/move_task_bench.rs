//! Benchmark for the hot move path: same-list reorders and cross-list moves
//! on a populated board.

use corkboard::board::CreateBoard;
use corkboard::broadcast::NoopBroadcaster;
use corkboard::list::CreateList;
use corkboard::task::{CreateTask, MoveTask};
use corkboard::{BoardContext, BoardId, Execute, ListId, Store, TaskId, UserProfile};
use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

struct Fixture {
    ctx: BoardContext,
    list_a: ListId,
    list_b: ListId,
    task: TaskId,
}

async fn setup(tasks_per_list: usize) -> Fixture {
    let store = Arc::new(Store::new());
    store.upsert_user(UserProfile::new("alice", "Alice")).await;
    let ctx = BoardContext::new(store, Arc::new(NoopBroadcaster));

    let board = CreateBoard::new("Bench", "alice").execute(&ctx).await.unwrap();
    let board_id = BoardId::from(board["id"].as_str().unwrap());
    let list_a = CreateList::new(board_id.clone(), "A", "alice")
        .execute(&ctx)
        .await
        .unwrap();
    let list_a = ListId::from(list_a["id"].as_str().unwrap());
    let list_b = CreateList::new(board_id, "B", "alice")
        .execute(&ctx)
        .await
        .unwrap();
    let list_b = ListId::from(list_b["id"].as_str().unwrap());

    let mut task = None;
    for list in [&list_a, &list_b] {
        for i in 0..tasks_per_list {
            let created = CreateTask::new(list.clone(), format!("t{i}"), "alice")
                .execute(&ctx)
                .await
                .unwrap();
            if task.is_none() {
                task = Some(TaskId::from(created["id"].as_str().unwrap()));
            }
        }
    }

    Fixture {
        ctx,
        list_a,
        list_b,
        task: task.expect("at least one task"),
    }
}

fn bench_move_task(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let fixture = rt.block_on(setup(50));

    c.bench_function("same_list_reorder_50", |b| {
        b.iter(|| {
            rt.block_on(async {
                MoveTask::new(fixture.task.clone(), fixture.list_a.clone(), 49, "alice")
                    .execute(&fixture.ctx)
                    .await
                    .unwrap();
                MoveTask::new(fixture.task.clone(), fixture.list_a.clone(), 0, "alice")
                    .execute(&fixture.ctx)
                    .await
                    .unwrap();
            })
        })
    });

    c.bench_function("cross_list_move_50", |b| {
        b.iter(|| {
            rt.block_on(async {
                MoveTask::new(fixture.task.clone(), fixture.list_b.clone(), 0, "alice")
                    .execute(&fixture.ctx)
                    .await
                    .unwrap();
                MoveTask::new(fixture.task.clone(), fixture.list_a.clone(), 0, "alice")
                    .execute(&fixture.ctx)
                    .await
                    .unwrap();
            })
        })
    });
}

criterion_group!(benches, bench_move_task);
criterion_main!(benches);

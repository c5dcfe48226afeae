//! In-memory integration tests for the overdue sweep.

use super::helpers::{Harness, harness, start_time};
use chrono::TimeDelta;
use rstest::rstest;
use todo_lifecycle::todo::{
    domain::{RequestedStatus, TodoItem, TodoStatus},
    ports::{OverdueSweepReport, TodoRepository},
    services::{CreateTodoItemRequest, UpdateTodoItemRequest},
};

async fn seed(harness: &Harness, due_in_minutes: &[i64]) -> Vec<TodoItem> {
    let mut items = Vec::with_capacity(due_in_minutes.len());
    for minutes in due_in_minutes {
        let created = harness
            .service
            .create(CreateTodoItemRequest::new(
                format!("due in {minutes} minutes"),
                start_time() + TimeDelta::minutes(*minutes),
            ))
            .await
            .expect("creation should succeed");
        items.push(created);
    }
    items
}

async fn stored_statuses(harness: &Harness) -> Vec<TodoStatus> {
    harness
        .repository
        .find_all()
        .await
        .expect("list items")
        .iter()
        .map(TodoItem::status)
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_promotes_everything_due_by_now(harness: Harness) {
    seed(&harness, &[10, 20, 30, 40]).await;
    harness.clock.advance(TimeDelta::minutes(30));

    let report = harness
        .service
        .run_overdue_sweep()
        .await
        .expect("sweep should succeed");

    assert_eq!(report, OverdueSweepReport { promoted: 3, failed: 0 });
    assert_eq!(
        stored_statuses(&harness).await,
        vec![
            TodoStatus::PastDue,
            TodoStatus::PastDue,
            TodoStatus::PastDue,
            TodoStatus::NotDone,
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_leaves_done_items_alone(harness: Harness) {
    let items = seed(&harness, &[5]).await;
    let id = items
        .first()
        .and_then(TodoItem::id)
        .expect("seeded item has an id");
    harness
        .service
        .update(UpdateTodoItemRequest::new(id).with_status(RequestedStatus::Done))
        .await
        .expect("update should succeed");
    harness.clock.advance(TimeDelta::hours(1));

    let report = harness
        .service
        .run_overdue_sweep()
        .await
        .expect("sweep should succeed");

    assert_eq!(report.promoted, 0);
    assert_eq!(stored_statuses(&harness).await, vec![TodoStatus::Done]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lazy_and_eager_corrections_commute(harness: Harness) {
    let items = seed(&harness, &[1, 2]).await;
    let first_id = items
        .first()
        .and_then(TodoItem::id)
        .expect("seeded item has an id");
    harness.clock.advance(TimeDelta::minutes(5));

    harness
        .service
        .get_by_id(first_id)
        .await
        .expect("lookup should succeed");
    let report = harness
        .service
        .run_overdue_sweep()
        .await
        .expect("sweep should succeed");
    assert_eq!(report.promoted, 1, "only the unread item is left to promote");

    let writes_before = harness.repository.saves();
    let all = harness
        .service
        .list_all()
        .await
        .expect("listing should succeed");
    assert!(all.iter().all(|item| item.status() == TodoStatus::PastDue));
    assert_eq!(harness.repository.saves(), writes_before);
}

//! When steps for todo lifecycle BDD scenarios.

use super::world::{TodoWorld, parse_timestamp, run_async};
use chrono::TimeDelta;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use todo_lifecycle::todo::{
    domain::RequestedStatus,
    services::{CreateTodoItemRequest, UpdateTodoItemRequest},
};

#[when(r#"an item "{description}" is created due at "{due_at}""#)]
fn item_is_created(
    world: &mut TodoWorld,
    description: String,
    due_at: String,
) -> Result<(), eyre::Report> {
    let due = parse_timestamp(&due_at)?;
    let created = run_async(
        world
            .service
            .create(CreateTodoItemRequest::new(description, due)),
    )
    .wrap_err("create todo item")?;
    world.last_item = Some(created);
    Ok(())
}

#[when("the clock advances by {minutes:i64} minutes")]
fn clock_advances(world: &mut TodoWorld, minutes: i64) {
    world.clock.advance(TimeDelta::minutes(minutes));
}

#[when("the item is fetched")]
fn item_is_fetched(world: &mut TodoWorld) -> Result<(), eyre::Report> {
    let id = world
        .last_item
        .as_ref()
        .and_then(|item| item.id())
        .ok_or_else(|| eyre::eyre!("missing created item in scenario world"))?;

    let fresh = run_async(world.service.fetch_with_fresh_status(id)).wrap_err("fetch todo item")?;
    world.last_item = Some(fresh.item.clone());
    world.last_fetch = Some(fresh);
    Ok(())
}

#[when(r#"the item is marked "{status}""#)]
fn item_is_marked(world: &mut TodoWorld, status: String) -> Result<(), eyre::Report> {
    let requested = match status.as_str() {
        "done" => RequestedStatus::Done,
        "not_done" => RequestedStatus::NotDone,
        other => return Err(eyre::eyre!("unsupported requested status '{other}'")),
    };
    let id = world
        .last_item
        .as_ref()
        .and_then(|item| item.id())
        .ok_or_else(|| eyre::eyre!("missing created item in scenario world"))?;

    let result = run_async(
        world
            .service
            .update(UpdateTodoItemRequest::new(id).with_status(requested)),
    );
    if let Ok(ref updated) = result {
        world.last_item = Some(updated.clone());
    }
    world.last_update = Some(result);
    Ok(())
}

#[when("the overdue sweep runs")]
fn overdue_sweep_runs(world: &mut TodoWorld) -> Result<(), eyre::Report> {
    let report = run_async(world.service.run_overdue_sweep()).wrap_err("run overdue sweep")?;
    world.last_report = Some(report);
    Ok(())
}

//! Given steps for todo lifecycle BDD scenarios.

use super::world::{TodoWorld, parse_timestamp, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use todo_lifecycle::todo::services::CreateTodoItemRequest;

#[given(r#"the clock reads "{timestamp}""#)]
fn clock_reads(world: &mut TodoWorld, timestamp: String) -> Result<(), eyre::Report> {
    world.clock.set(parse_timestamp(&timestamp)?);
    Ok(())
}

#[given(r#"an item "{description}" due at "{due_at}" exists"#)]
fn item_exists(
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
    .wrap_err("create todo item in scenario setup")?;
    world.last_item = Some(created);
    Ok(())
}

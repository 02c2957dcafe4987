//! When steps for task board BDD scenarios.

use super::world::{BoardWorld, run_async};
use promanage::board::domain::MoveDirection;
use rstest_bdd_macros::when;

#[when(r#"task "{title}" is moved "{direction}""#)]
fn task_moved(
    world: &mut BoardWorld,
    title: String,
    direction: String,
) -> Result<(), eyre::Report> {
    let step = MoveDirection::try_from(direction.as_str())
        .map_err(|err| eyre::eyre!("invalid direction in scenario: {err}"))?;
    let id = world.task_id(&title)?;
    let result = run_async(world.view()?.move_task(&id, step));
    world.last_error = result.err();
    Ok(())
}

#[when(r#"a task titled "{title}" is created"#)]
fn task_created(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let result = run_async(world.view()?.create_task(&title, None));
    world.last_error = result.err();
    Ok(())
}

#[when("a task with a blank title is created")]
fn blank_task_created(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let result = run_async(world.view()?.create_task("   ", None));
    world.last_error = result.err();
    Ok(())
}

#[when("the project status is toggled")]
fn project_status_toggled(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let result = run_async(world.view()?.toggle_project_status());
    world.last_error = result.err();
    Ok(())
}

#[when(r#"the comment "{content}" is added"#)]
fn comment_added(world: &mut BoardWorld, content: String) -> Result<(), eyre::Report> {
    let result = run_async(world.view()?.add_comment(&content));
    world.last_error = result.err();
    Ok(())
}

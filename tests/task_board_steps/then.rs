//! Then steps for task board BDD scenarios.

use super::world::BoardWorld;
use promanage::board::{
    domain::{BoardDomainError, ProjectStatus},
    ports::GatewayOperation,
    services::BoardViewError,
};
use rstest_bdd_macros::then;

#[then(r#"task "{title}" is in column "{column}""#)]
fn task_in_column(world: &BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let task = world.task_named(&title)?;
    let shown = task.status().column_title();
    if shown != column {
        return Err(eyre::eyre!("expected {title:?} in {column:?}, found {shown:?}"));
    }
    Ok(())
}

#[then(r#"the "{column}" column holds {count:usize} tasks"#)]
fn column_holds(world: &BoardWorld, column: String, count: usize) -> Result<(), eyre::Report> {
    let project = world.snapshot()?;
    let held = project
        .columns()
        .iter()
        .find(|candidate| candidate.title() == column)
        .map(|candidate| candidate.count())
        .ok_or_else(|| eyre::eyre!("no column titled {column:?}"))?;
    if held != count {
        return Err(eyre::eyre!("expected {count} tasks in {column:?}, found {held}"));
    }
    Ok(())
}

#[then(r#"task "{title}" has {count:usize} comment"#)]
fn task_has_comments(world: &BoardWorld, title: String, count: usize) -> Result<(), eyre::Report> {
    let task = world.task_named(&title)?;
    if task.comment_count() != count {
        return Err(eyre::eyre!(
            "expected {count} comments on {title:?}, found {}",
            task.comment_count()
        ));
    }
    Ok(())
}

#[then(r#"the latest comment on task "{title}" reads "{content}""#)]
fn latest_comment_reads(
    world: &BoardWorld,
    title: String,
    content: String,
) -> Result<(), eyre::Report> {
    let task = world.task_named(&title)?;
    let latest = task
        .comments()
        .last()
        .ok_or_else(|| eyre::eyre!("{title:?} has no comments"))?;
    if latest.content() != content {
        return Err(eyre::eyre!(
            "expected latest comment {content:?}, found {:?}",
            latest.content()
        ));
    }
    Ok(())
}

#[then("the move is reported as unavailable")]
fn move_unavailable(world: &BoardWorld) -> Result<(), eyre::Report> {
    if !matches!(
        world.last_error,
        Some(BoardViewError::TransitionUnavailable { .. })
    ) {
        return Err(eyre::eyre!(
            "expected an unavailable move, got {:?}",
            world.last_error
        ));
    }
    Ok(())
}

#[then("the new task form is closed")]
fn new_task_form_closed(world: &BoardWorld) -> Result<(), eyre::Report> {
    if world.view()?.is_new_task_form_open() {
        return Err(eyre::eyre!("new task form is still open"));
    }
    Ok(())
}

#[then("the new task form is still open")]
fn new_task_form_still_open(world: &BoardWorld) -> Result<(), eyre::Report> {
    if !world.view()?.is_new_task_form_open() {
        return Err(eyre::eyre!("new task form was closed"));
    }
    Ok(())
}

#[then("the task is rejected for its blank title")]
fn task_rejected_for_blank_title(world: &BoardWorld) -> Result<(), eyre::Report> {
    if !matches!(
        world.last_error,
        Some(BoardViewError::Domain(BoardDomainError::EmptyTaskTitle))
    ) {
        return Err(eyre::eyre!(
            "expected an empty title rejection, got {:?}",
            world.last_error
        ));
    }
    Ok(())
}

#[then("no task creation request was sent")]
fn no_task_creation_sent(world: &BoardWorld) -> Result<(), eyre::Report> {
    let sent = world
        .gateway
        .request_count(GatewayOperation::CreateTask)
        .map_err(|err| eyre::eyre!("request log unavailable: {err}"))?;
    if sent != 0 {
        return Err(eyre::eyre!("expected no create requests, found {sent}"));
    }
    Ok(())
}

#[then(r#"the project status is "{status}""#)]
fn project_status_is(world: &BoardWorld, status: String) -> Result<(), eyre::Report> {
    let expected = ProjectStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid project status in scenario: {err}"))?;
    let shown = world.snapshot()?.status();
    if shown != expected {
        return Err(eyre::eyre!("expected project {expected}, found {shown}"));
    }
    Ok(())
}

//! Given steps for task board BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use promanage::board::domain::{OrgSlug, ProjectStatus, TaskStatus};
use rstest_bdd_macros::given;

const AUTHOR: &str = "me@demo.com";

#[given("the launch board is loaded")]
fn launch_board_loaded(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let org = OrgSlug::new("acme").wrap_err("organization slug")?;
    let project = world
        .gateway
        .seed_project(&org, "Acme Launch", "Spring product launch", ProjectStatus::Active)
        .wrap_err("seed project")?;
    world
        .gateway
        .seed_task(&project, "A", TaskStatus::Todo, AUTHOR)
        .wrap_err("seed task A")?;
    let task_b = world
        .gateway
        .seed_task(&project, "B", TaskStatus::InProgress, AUTHOR)
        .wrap_err("seed task B")?;
    world
        .gateway
        .seed_comment(&task_b, "Halfway there", AUTHOR)
        .wrap_err("seed comment on B")?;

    world.open_board(project);
    run_async(world.view()?.load()).wrap_err("load the launch board")?;
    Ok(())
}

#[given("the new task form is open")]
fn new_task_form_open(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.view()?.open_new_task_form();
    Ok(())
}

#[given(r#"task "{title}" is selected"#)]
fn task_selected(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    world.view()?.select_task(&id).wrap_err("select task")?;
    Ok(())
}

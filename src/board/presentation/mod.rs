//! Plain-text rendering of the dashboard, board, and task detail.
//!
//! Views hand their snapshots to [`Renderer`], which flattens them into
//! template contexts and renders them with `minijinja`.

mod templates;

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

use crate::board::{
    domain::{Column, Project, ProjectSummary, Task},
    services::Notice,
};

/// Errors raised while rendering a screen.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PresentationError {
    /// A template failed to compile or render.
    #[error("template '{template}' failed: {reason}")]
    Template {
        /// Template name.
        template: &'static str,
        /// Engine message.
        reason: String,
    },
}

/// Text renderer for board screens.
#[derive(Debug)]
pub struct Renderer {
    environment: Environment<'static>,
}

#[derive(Serialize)]
struct SummaryContext<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    status: &'static str,
    progress: String,
}

#[derive(Serialize)]
struct CardContext<'a> {
    id: &'a str,
    title: &'a str,
    assignee: &'a str,
    comment_count: usize,
}

#[derive(Serialize)]
struct ColumnContext<'a> {
    title: &'static str,
    count: usize,
    moves: &'static str,
    tasks: Vec<CardContext<'a>>,
}

#[derive(Serialize)]
struct CommentContext<'a> {
    author: &'a str,
    created_at: String,
    content: &'a str,
}

#[derive(Serialize)]
struct NoticeContext<'a> {
    section: &'static str,
    message: &'a str,
}

const NO_DESCRIPTION: &str = "No description.";

fn describe(description: &str) -> &str {
    if description.trim().is_empty() {
        NO_DESCRIPTION
    } else {
        description
    }
}

const fn moves_label(column: &Column<'_>) -> &'static str {
    match (column.can_move_back(), column.can_move_forward()) {
        (true, true) => "back, forward",
        (true, false) => "back",
        (false, true) => "forward",
        (false, false) => "",
    }
}

fn card(task: &Task) -> CardContext<'_> {
    CardContext {
        id: task.id().as_str(),
        title: task.title(),
        assignee: task.assignee_email(),
        comment_count: task.comment_count(),
    }
}

impl Renderer {
    /// Compiles the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError::Template`] when a template fails to
    /// compile.
    pub fn new() -> Result<Self, PresentationError> {
        let mut environment = Environment::new();
        environment.set_trim_blocks(true);
        environment.set_lstrip_blocks(true);
        for (name, source) in templates::ALL {
            environment
                .add_template(name, source)
                .map_err(|err| PresentationError::Template {
                    template: name,
                    reason: err.to_string(),
                })?;
        }
        Ok(Self { environment })
    }

    /// Renders the project list.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError::Template`] when rendering fails.
    pub fn render_dashboard(
        &self,
        org: &str,
        projects: &[ProjectSummary],
    ) -> Result<String, PresentationError> {
        let summaries: Vec<SummaryContext<'_>> = projects
            .iter()
            .map(|project| SummaryContext {
                id: project.id.as_str(),
                name: &project.name,
                description: describe(&project.description),
                status: project.status.as_str(),
                progress: format!(
                    "{}/{} Done",
                    project.completed_task_count, project.task_count
                ),
            })
            .collect();
        self.render(
            templates::DASHBOARD,
            minijinja::context! { org => org, projects => summaries },
        )
    }

    /// Renders the three board columns of a project.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError::Template`] when rendering fails.
    pub fn render_board(&self, project: &Project) -> Result<String, PresentationError> {
        let columns: Vec<ColumnContext<'_>> = project
            .columns()
            .iter()
            .map(|column| ColumnContext {
                title: column.title(),
                count: column.count(),
                moves: moves_label(column),
                tasks: column.tasks().iter().copied().map(card).collect(),
            })
            .collect();
        self.render(
            templates::BOARD,
            minijinja::context! {
                id => project.id().as_str(),
                name => project.name(),
                description => describe(project.description()),
                status => project.status().as_str(),
                due_date => project.due_date().map(|date| date.to_string()),
                progress => format!(
                    "{}/{} Done",
                    project.completed_task_count(),
                    project.task_count()
                ),
                columns => columns,
            },
        )
    }

    /// Renders a task with its comments.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError::Template`] when rendering fails.
    pub fn render_task_detail(&self, task: &Task) -> Result<String, PresentationError> {
        let comments: Vec<CommentContext<'_>> = task
            .comments()
            .iter()
            .map(|comment| CommentContext {
                author: comment.author_email(),
                created_at: comment.created_at().format("%Y-%m-%d %H:%M").to_string(),
                content: comment.content(),
            })
            .collect();
        self.render(
            templates::TASK_DETAIL,
            minijinja::context! {
                id => task.id().as_str(),
                title => task.title(),
                description => task.description(),
                status => task.status().column_title(),
                assignee => task.assignee_email(),
                due_date => task.due_date().map(|due| due.format("%Y-%m-%d %H:%M").to_string()),
                comments => comments,
            },
        )
    }

    /// Renders failure notices, one per line.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError::Template`] when rendering fails.
    pub fn render_notices(&self, notices: &[Notice]) -> Result<String, PresentationError> {
        let items: Vec<NoticeContext<'_>> = notices
            .iter()
            .map(|notice| NoticeContext {
                section: notice.section.label(),
                message: &notice.message,
            })
            .collect();
        self.render(templates::NOTICES, minijinja::context! { notices => items })
    }

    fn render(
        &self,
        name: &'static str,
        context: minijinja::Value,
    ) -> Result<String, PresentationError> {
        let fail = |err: minijinja::Error| PresentationError::Template {
            template: name,
            reason: err.to_string(),
        };
        self.environment
            .get_template(name)
            .map_err(fail)?
            .render(context)
            .map_err(fail)
    }
}

//! Command-line client for the project board service.
//!
//! Each command runs one view operation against the configured GraphQL
//! endpoint and prints the refreshed screen. Failures go to stderr with a
//! non-zero exit status.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use promanage::board::{
    adapters::{cache::CachingBoardGateway, graphql::GraphQlBoardGateway},
    domain::{BoardDomainError, MoveDirection, ParseMoveDirectionError, ProjectId, TaskId},
    ports::BoardGatewayError,
    presentation::{PresentationError, Renderer},
    services::{
        BoardViewError, Notice, ProjectEdit, ProjectListView, TaskBoardView, TaskEdit,
        ViewSettings,
    },
};
use promanage::config::{ClientConfig, ConfigError};
use promanage::telemetry;
use thiserror::Error;
use tracing::debug;

type Gateway = CachingBoardGateway<GraphQlBoardGateway>;

#[derive(Debug, Parser)]
#[command(name = "promanage", version, about = "Project dashboard and Kanban board client")]
struct Cli {
    /// GraphQL endpoint URL.
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Organization slug whose projects are listed.
    #[arg(long, global = true)]
    org: Option<String>,
    /// Author email for comments and default assignee for new tasks.
    #[arg(long, global = true)]
    author: Option<String>,
    /// Request timeout in milliseconds.
    #[arg(long = "timeout-ms", global = true)]
    timeout_ms: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the organization's projects.
    Projects,
    /// Create a project.
    NewProject {
        /// Project name.
        name: String,
        /// Optional description.
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Show a project's board.
    Board {
        /// Project identifier.
        project: String,
    },
    /// Add a task to the "To Do" column.
    NewTask {
        /// Project identifier.
        project: String,
        /// Task title.
        title: String,
        /// Assignee email; defaults to the author.
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Move a task one column forward or back.
    Move {
        /// Project identifier.
        project: String,
        /// Task identifier.
        task: String,
        /// `forward` or `back`.
        #[arg(value_parser = parse_direction)]
        direction: MoveDirection,
    },
    /// Switch a project between active and on hold.
    ToggleStatus {
        /// Project identifier.
        project: String,
    },
    /// Show a task with its comments.
    Task {
        /// Project identifier.
        project: String,
        /// Task identifier.
        task: String,
    },
    /// Comment on a task.
    Comment {
        /// Project identifier.
        project: String,
        /// Task identifier.
        task: String,
        /// Comment text.
        text: String,
    },
    /// Edit a task's title, description, or assignee.
    EditTask {
        /// Project identifier.
        project: String,
        /// Task identifier.
        task: String,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New assignee email.
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Edit a project's name or description.
    EditProject {
        /// Project identifier.
        project: String,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    #[error(transparent)]
    Gateway(#[from] BoardGatewayError),
    #[error(transparent)]
    View(#[from] BoardViewError),
    #[error(transparent)]
    Presentation(#[from] PresentationError),
}

fn parse_direction(raw: &str) -> Result<MoveDirection, ParseMoveDirectionError> {
    MoveDirection::try_from(raw)
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint)?;
    }
    if let Some(org) = &cli.org {
        config = config.with_org(org)?;
    }
    if let Some(author) = &cli.author {
        config = config.with_author_email(author)?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms)?;
    }
    Ok(config)
}

struct App {
    gateway: Arc<Gateway>,
    config: ClientConfig,
    renderer: Renderer,
}

impl App {
    fn new(config: ClientConfig) -> Result<Self, CliError> {
        let gateway = Arc::new(CachingBoardGateway::new(GraphQlBoardGateway::new(&config)?));
        Ok(Self {
            gateway,
            config,
            renderer: Renderer::new()?,
        })
    }

    fn settings(&self) -> ViewSettings {
        ViewSettings::from_config(&self.config)
    }

    fn dashboard(&self) -> ProjectListView<Gateway> {
        ProjectListView::new(
            Arc::clone(&self.gateway),
            self.config.org().clone(),
            self.settings(),
        )
    }

    async fn board(&self, project: &str) -> Result<TaskBoardView<Gateway>, CliError> {
        let view = TaskBoardView::new(
            Arc::clone(&self.gateway),
            ProjectId::new(project)?,
            self.settings(),
        );
        view.load().await?;
        Ok(view)
    }

    async fn run(&self, command: Command) -> Result<String, CliError> {
        match command {
            Command::Projects => {
                let view = self.dashboard();
                view.load().await?;
                self.show_dashboard(&view)
            }
            Command::NewProject { name, description } => {
                let view = self.dashboard();
                view.open_create_form();
                view.create_project(&name, &description).await?;
                self.show_dashboard(&view)
            }
            Command::Board { project } => {
                let view = self.board(&project).await?;
                self.show_board(&view)
            }
            Command::NewTask {
                project,
                title,
                assignee,
            } => {
                let view = self.board(&project).await?;
                view.open_new_task_form();
                view.create_task(&title, assignee.as_deref()).await?;
                self.show_board(&view)
            }
            Command::Move {
                project,
                task,
                direction,
            } => {
                let view = self.board(&project).await?;
                view.move_task(&TaskId::new(task)?, direction).await?;
                self.show_board(&view)
            }
            Command::ToggleStatus { project } => {
                let view = self.board(&project).await?;
                view.toggle_project_status().await?;
                self.show_board(&view)
            }
            Command::Task { project, task } => {
                let view = self.board(&project).await?;
                view.select_task(&TaskId::new(task)?)?;
                self.show_selected(&view)
            }
            Command::Comment {
                project,
                task,
                text,
            } => {
                let view = self.board(&project).await?;
                view.select_task(&TaskId::new(task)?)?;
                view.add_comment(&text).await?;
                self.show_selected(&view)
            }
            Command::EditTask {
                project,
                task,
                title,
                description,
                assignee,
            } => {
                let view = self.board(&project).await?;
                let task_id = TaskId::new(task)?;
                let mut edit = TaskEdit::new();
                if let Some(value) = title {
                    edit = edit.with_title(value);
                }
                if let Some(value) = description {
                    edit = edit.with_description(value);
                }
                if let Some(value) = assignee {
                    edit = edit.with_assignee(value);
                }
                view.update_task_details(&task_id, edit).await?;
                view.select_task(&task_id)?;
                self.show_selected(&view)
            }
            Command::EditProject {
                project,
                name,
                description,
            } => {
                let view = self.board(&project).await?;
                let mut edit = ProjectEdit::new();
                if let Some(value) = name {
                    edit = edit.with_name(value);
                }
                if let Some(value) = description {
                    edit = edit.with_description(value);
                }
                view.update_project_details(edit).await?;
                self.show_board(&view)
            }
        }
    }

    fn show_dashboard(&self, view: &ProjectListView<Gateway>) -> Result<String, CliError> {
        let projects = view.projects().ok_or(BoardViewError::NotLoaded)?;
        let screen = self
            .renderer
            .render_dashboard(view.org().as_str(), &projects)?;
        self.with_notices(screen, &view.take_notices())
    }

    fn show_board(&self, view: &TaskBoardView<Gateway>) -> Result<String, CliError> {
        let project = view.snapshot().ok_or(BoardViewError::NotLoaded)?;
        let screen = self.renderer.render_board(&project)?;
        self.with_notices(screen, &view.take_notices())
    }

    fn show_selected(&self, view: &TaskBoardView<Gateway>) -> Result<String, CliError> {
        let task = view.selected_task().ok_or(BoardViewError::NoTaskSelected)?;
        let screen = self.renderer.render_task_detail(&task)?;
        self.with_notices(screen, &view.take_notices())
    }

    fn with_notices(&self, mut screen: String, notices: &[Notice]) -> Result<String, CliError> {
        if !notices.is_empty() {
            screen.push('\n');
            screen.push_str(&self.renderer.render_notices(notices)?);
        }
        Ok(screen)
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let config = resolve_config(&cli)?;
    debug!(endpoint = %config.endpoint(), org = %config.org(), "configuration resolved");
    App::new(config)?.run(cli.command).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let installed = telemetry::init_tracing("warn");
    debug!(installed, "tracing initialized");

    match run(cli).await {
        Ok(screen) => {
            let mut stdout = std::io::stdout().lock();
            if writeln!(stdout, "{screen}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let mut stderr = std::io::stderr().lock();
            drop(writeln!(stderr, "error: {err}"));
            ExitCode::FAILURE
        }
    }
}

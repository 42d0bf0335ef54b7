//! Subcommand definitions and their implementations

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use task_core::{
    NewTask, ReqwestTransport, Task, TaskApi, TaskClient, TaskId, TaskPatch, TaskStatus,
};
use tracing::debug;

const TABLE_COL_ID: usize = 6;
const TABLE_COL_STATUS: usize = 12;
const TABLE_COL_TITLE: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "tasks", about = "Manage tasks on a task API backend")]
pub struct Cli {
    /// API base URL; when omitted, TASK_API_URL is read on every request (default /api)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Origin prepended to relative base URLs
    #[arg(
        long,
        global = true,
        env = "TASK_API_ORIGIN",
        default_value = "http://localhost:3000"
    )]
    pub origin: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all tasks
    List(ListArgs),
    /// Create a task
    Create(CreateArgs),
    /// Update fields of a task
    Update(UpdateArgs),
    /// Delete a task
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, default_value = "todo")]
    pub status: TaskStatus,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: TaskId,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub status: Option<TaskStatus>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: TaskId,
}

impl CreateArgs {
    fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
        }
    }
}

impl UpdateArgs {
    fn to_patch(&self) -> TaskPatch {
        TaskPatch {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
        }
    }
}

fn build_api(cli: &Cli) -> Result<TaskApi<ReqwestTransport>> {
    let client = match &cli.base_url {
        Some(url) => TaskClient::new(url),
        None => TaskClient::from_env(),
    };
    let transport =
        ReqwestTransport::with_origin(&cli.origin).context("Failed to build HTTP client")?;
    debug!(base_url = ?client.base_url(), origin = %cli.origin, "configured client");
    Ok(TaskApi::new(client, transport))
}

pub async fn run(cli: Cli) -> Result<()> {
    let api = build_api(&cli)?;

    match cli.command {
        Commands::List(args) => {
            let tasks = api.get_tasks().await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                print_table(&tasks);
            }
        }
        Commands::Create(args) => {
            let task = api.create_task(&args.to_new_task()).await?;
            println!("Created task {}: {}", task.id, task.title);
        }
        Commands::Update(args) => {
            let patch = args.to_patch();
            if patch.is_empty() {
                bail!("Nothing to update: pass --title, --description or --status");
            }
            let task = api.update_task(args.id, &patch).await?;
            println!("Updated task {}: {} [{}]", task.id, task.title, task.status);
        }
        Commands::Delete(args) => {
            api.delete_task(args.id).await?;
            println!("Deleted task {}", args.id);
        }
    }
    Ok(())
}

fn print_table(tasks: &[Task]) {
    println!(
        "{:<width_id$} {:<width_status$} TITLE",
        "ID",
        "STATUS",
        width_id = TABLE_COL_ID,
        width_status = TABLE_COL_STATUS
    );
    println!(
        "{}",
        "-".repeat(TABLE_COL_ID + TABLE_COL_STATUS + TABLE_COL_TITLE + 2)
    );
    for task in tasks {
        println!(
            "{:<width_id$} {:<width_status$} {}",
            task.id,
            task.status.as_str(),
            truncate(&task.title, TABLE_COL_TITLE),
            width_id = TABLE_COL_ID,
            width_status = TABLE_COL_STATUS
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max <= 3 {
        s.chars().take(max).collect()
    } else {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tasks").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn create_defaults_status_to_todo() {
        let cli = parse(&["create", "Buy milk"]);
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(
            args.to_new_task(),
            NewTask {
                title: "Buy milk".to_string(),
                description: None,
                status: TaskStatus::Todo,
            }
        );
    }

    #[test]
    fn update_builds_partial_patch() {
        let cli = parse(&["update", "3", "--status", "in_progress"]);
        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };
        assert_eq!(args.id, 3);
        let patch = args.to_patch();
        assert_eq!(patch.status, Some(TaskStatus::InProgress));
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn update_without_fields_is_an_empty_patch() {
        let cli = parse(&["update", "3"]);
        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };
        assert!(args.to_patch().is_empty());
    }

    #[test]
    fn global_base_url_after_subcommand() {
        let cli = parse(&["delete", "7", "--base-url", "http://example.test/api"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://example.test/api"));
        assert!(matches!(cli.command, Commands::Delete(DeleteArgs { id: 7 })));
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(Cli::try_parse_from(["tasks", "delete", "abc"]).is_err());
    }

    async fn start_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(mock_server::run(listener));
        format!("http://{addr}/api")
    }

    fn with_base(base_url: &str, args: &[&str]) -> Cli {
        let mut full = args.to_vec();
        full.extend(["--base-url", base_url]);
        parse(&full)
    }

    #[tokio::test]
    async fn run_drives_every_command_against_a_live_server() {
        let base_url = start_server().await;
        let api = TaskApi::new(TaskClient::new(&base_url), ReqwestTransport::new().unwrap());

        run(with_base(&base_url, &["create", "Walk dog", "--description", "twice"]))
            .await
            .unwrap();
        let tasks = api.get_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 1);
        assert_eq!(tasks[0].title, "Walk dog");
        assert_eq!(tasks[0].description.as_deref(), Some("twice"));
        assert_eq!(tasks[0].status, TaskStatus::Todo);

        run(with_base(&base_url, &["list"])).await.unwrap();
        run(with_base(&base_url, &["list", "--json"])).await.unwrap();

        run(with_base(&base_url, &["update", "1", "--status", "done"]))
            .await
            .unwrap();
        let tasks = api.get_tasks().await.unwrap();
        assert_eq!(tasks[0].title, "Walk dog");
        assert_eq!(tasks[0].status, TaskStatus::Done);

        run(with_base(&base_url, &["delete", "1"])).await.unwrap();
        assert!(api.get_tasks().await.unwrap().is_empty());

        let err = run(with_base(&base_url, &["delete", "1"])).await.unwrap_err();
        assert_eq!(err.to_string(), "API error: 404 Not Found");
    }

    #[tokio::test]
    async fn run_update_of_unknown_task_fails() {
        let base_url = start_server().await;

        let err = run(with_base(&base_url, &["update", "9", "--title", "x"]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API error: 404 Not Found");
    }

    #[tokio::test]
    async fn run_refuses_an_empty_update() {
        let base_url = start_server().await;
        run(with_base(&base_url, &["create", "Keep me"])).await.unwrap();

        let err = run(with_base(&base_url, &["update", "1"])).await.unwrap_err();

        assert!(err.to_string().starts_with("Nothing to update"));
        let api = TaskApi::new(TaskClient::new(&base_url), ReqwestTransport::new().unwrap());
        assert_eq!(api.get_tasks().await.unwrap()[0].title, "Keep me");
    }

    #[test]
    fn truncate_keeps_short_titles() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }
}

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use qa_widgets::config::{VoteTarget, WidgetConfig};
use qa_widgets::cookie::CookieJar;
use qa_widgets::error::ConfigError;
use qa_widgets::page::PageManifest;
use qa_widgets::presenter::{self, PageView};
use qa_widgets::transport::ReqwestTransport;
use qa_widgets::{AnswerMarkWidget, SubmitError, VoteWidget, WidgetController, WidgetId};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("failed to read manifest {path}: {source}")]
    ReadManifest { path: PathBuf, source: std::io::Error },
    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("manifest has no free widget id")]
    NoFreeWidgetId,
    #[error("submission failed: {0}")]
    Submit(#[from] SubmitError),
}

#[derive(Parser, Debug)]
#[command(name = "qa-widgets", about = "Vote on and accept answers through the Q&A site's AJAX endpoints")]
struct Cli {
    /// Site root; overrides `QA_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Cookie string as the browser would send it, e.g. `csrftoken=...; sessionid=...`.
    #[arg(long, env = "QA_COOKIE", default_value = "")]
    cookie: String,

    /// JSON page manifest with the widgets currently rendered.
    #[arg(long)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Vote on a question or an answer.
    Vote {
        #[arg(value_enum)]
        target: TargetArg,
        target_id: i64,
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Toggle acceptance of an answer.
    Mark { answer_id: i64 },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TargetArg {
    Question,
    Answer,
}

impl From<TargetArg> for VoteTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Question => Self::Question,
            TargetArg::Answer => Self::Answer,
        }
    }
}

enum Action {
    Vote(WidgetId, i32),
    Mark(WidgetId),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Submit(err)) => {
            eprintln!("{}", presenter::modal_message(&err));
            tracing::debug!(error = %err, "submission failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = WidgetConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }

    let mut page = match &cli.manifest {
        Some(path) => load_manifest(path)?,
        None => PageManifest::default(),
    };
    let action = match cli.command {
        Command::Vote { target, target_id, value } => {
            let url = config.endpoints().vote(target.into());
            Action::Vote(find_or_add_vote(&mut page, target_id, url)?, value)
        }
        Command::Mark { answer_id } => {
            let url = config.endpoints().answer_mark(answer_id);
            Action::Mark(find_or_add_answer_mark(&mut page, url)?)
        }
    };

    let mut view = PageView::new();
    view.seed(&page.votes, &page.answer_marks);

    let transport = ReqwestTransport::new(config.timeouts)?;
    let controller = WidgetController::for_page(page, transport, CookieJar::new(cli.cookie), config.csrf);
    let mut events = controller.subscribe();

    let result = match action {
        Action::Vote(id, value) => controller.submit_vote(id, value).await.map(|_| ()),
        Action::Mark(id) => controller.submit_answer_mark(id).await.map(|_| ()),
    };

    while let Ok(event) = events.try_recv() {
        view.apply(&event);
    }
    for line in view.render_lines() {
        println!("{line}");
    }
    Ok(result?)
}

fn load_manifest(path: &Path) -> Result<PageManifest, CliError> {
    let raw =
        std::fs::read_to_string(path).map_err(|source| CliError::ReadManifest { path: path.to_path_buf(), source })?;
    Ok(PageManifest::from_json(&raw)?)
}

/// Reuse the manifest's widget for this endpoint and target, or add one.
fn find_or_add_vote(page: &mut PageManifest, target_id: i64, url: String) -> Result<WidgetId, CliError> {
    if let Some(widget) = page.votes.iter().find(|w| w.target_id == target_id && w.endpoint_url == url) {
        return Ok(widget.id);
    }
    let id = page.next_id().ok_or(CliError::NoFreeWidgetId)?;
    page.votes.push(VoteWidget::new(id, target_id, url));
    Ok(id)
}

fn find_or_add_answer_mark(page: &mut PageManifest, url: String) -> Result<WidgetId, CliError> {
    if let Some(widget) = page.answer_marks.iter().find(|w| w.endpoint_url == url) {
        return Ok(widget.id);
    }
    let id = page.next_id().ok_or(CliError::NoFreeWidgetId)?;
    page.answer_marks.push(AnswerMarkWidget::new(id, url));
    Ok(id)
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use coresnap::dot::{DotOptions, RankDir};
use coresnap::error::ErrorCode;
use coresnap::llm::{LlmClient, LlmError, RetryPolicy};
use coresnap::outline::{OutlineError, OutlineFormat};
use coresnap::pipeline::{self, ConvertReport, PipelineError};
use coresnap::render::{DEFAULT_DOT_PROGRAM, RenderError, RenderRequest};
use tracing::{error, info};

/// Image format named in the render hint when `--render` is absent.
const HINT_FORMAT: &str = "png";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Outline(#[from] OutlineError),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Pipeline(e) => e.error_code(),
            Self::Outline(e) => e.error_code(),
            Self::Llm(e) => e.error_code(),
            Self::Render(e) => e.error_code(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "coresnap", version, about = "Turn outlines into Graphviz mind maps")]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an indented-text or Markdown outline into a DOT file.
    Convert {
        input: PathBuf,

        /// DOT output path (default: input with a `.dot` extension).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// auto, text or markdown. `auto` picks Markdown for `.md`/`.markdown`.
        #[arg(long, default_value = "auto")]
        format: String,

        #[command(flatten)]
        graph: GraphArgs,
    },
    /// Draft an outline for a topic with the configured LLM, then convert it.
    Generate {
        title: String,

        /// text or markdown.
        #[arg(long, default_value = "text")]
        format: String,

        /// Output file stem (default: the sanitized title).
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        graph: GraphArgs,
    },
}

#[derive(Args, Debug)]
struct GraphArgs {
    /// Layout direction: lr or tb.
    #[arg(long, default_value = "lr")]
    direction: RankDir,

    /// Run Graphviz to produce an image in this format (png, svg, pdf...).
    #[arg(long, value_name = "FORMAT")]
    render: Option<String>,

    /// Graphviz binary used by `--render`.
    #[arg(long, env = "CORESNAP_DOT", default_value = DEFAULT_DOT_PROGRAM)]
    dot_program: String,
}

impl GraphArgs {
    fn options(&self) -> DotOptions {
        DotOptions { rank_dir: self.direction }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let result = match cli.command {
        Command::Convert { input, output, format, graph } => run_convert(&input, output, &format, &graph).await,
        Command::Generate { title, format, output, graph } => run_generate(&title, output, &format, &graph).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.error_code(), error = %e, "coresnap failed");
            ExitCode::FAILURE
        }
    }
}

async fn run_convert(input: &Path, output: Option<PathBuf>, format: &str, graph: &GraphArgs) -> Result<(), CliError> {
    let output = output.unwrap_or_else(|| pipeline::default_dot_path(input));
    let report = pipeline::convert_file(input, &output, format, &graph.options())?;
    finish(input, &report, graph).await
}

async fn run_generate(title: &str, output: Option<PathBuf>, format: &str, graph: &GraphArgs) -> Result<(), CliError> {
    let format: OutlineFormat = format.parse()?;
    let stem = output.unwrap_or_else(|| PathBuf::from(pipeline::default_stem(title)));

    let client = LlmClient::from_env()?;
    info!(model = client.model(), %title, %format, "generate: requesting outline");
    let outline_path = pipeline::generate_file(
        &client,
        title,
        format,
        &stem,
        client.max_tokens(),
        &RetryPolicy::default(),
    )
    .await?;
    println!("Outline saved as '{}'.", outline_path.display());

    let dot_path = pipeline::default_dot_path(&outline_path);
    let report = pipeline::convert_file(&outline_path, &dot_path, &format.to_string(), &graph.options())?;
    finish(&outline_path, &report, graph).await
}

/// Either render the DOT file or tell the user how to.
async fn finish(input: &Path, report: &ConvertReport, graph: &GraphArgs) -> Result<(), CliError> {
    let image_format = graph.render.as_deref().unwrap_or(HINT_FORMAT);
    let request = RenderRequest::new(
        report.dot_path.clone(),
        pipeline::image_path(input, image_format),
        image_format,
    )?;

    if graph.render.is_some() {
        request.run(&graph.dot_program).await?;
        println!("Image saved as '{}'.", request.output_path.display());
    } else {
        println!("DOT file saved as '{}'. Use this to render:", report.dot_path.display());
        println!("{}", request.command_line(&graph.dot_program));
    }
    Ok(())
}

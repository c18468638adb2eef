#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use issuepad_core::config;
use issuepad_core::error::ErrorCode;
use output::{CliError, OutputMode, fail};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "issuepad: append-only issue journal",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Journal file to use instead of the configured location.
    #[arg(long, global = true, value_name = "PATH")]
    journal: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (same as `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Add a new issue",
        long_about = "Add a new issue and append an `add` event.",
        after_help = "EXAMPLES:\n    # Add an issue\n    issuepad add --title \"Invoice totals wrong\" --app Billing\n\n    # Emit machine-readable output\n    issuepad add --title \"Invoice totals wrong\" --json"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Change fields of an issue",
        long_about = "Append an `update` event carrying only the fields passed on the command line.",
        after_help = "EXAMPLES:\n    # Retitle an issue\n    issuepad update 20240101120000000 --title \"Invoice rounding\"\n\n    # Clear the notes\n    issuepad update 20240101120000000 --notes \"\""
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Mark an issue as done",
        after_help = "EXAMPLES:\n    issuepad resolve 20240101120000000"
    )]
    Resolve(cmd::resolve::ResolveArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Mark an issue as open again",
        after_help = "EXAMPLES:\n    issuepad reopen 20240101120000000"
    )]
    Reopen(cmd::reopen::ReopenArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Resolve an open issue or reopen a done one",
        after_help = "EXAMPLES:\n    issuepad toggle 20240101120000000"
    )]
    Toggle(cmd::toggle::ToggleArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Delete an issue",
        long_about = "Append a `delete` event. Earlier events stay in the journal.",
        after_help = "EXAMPLES:\n    issuepad delete 20240101120000000"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Read",
        about = "List issues",
        long_about = "List issues with optional filters, sorted by application and title.",
        after_help = "EXAMPLES:\n    # Open issues of one application\n    issuepad list --app billing --open\n\n    # State as of the first 20 journal lines\n    issuepad list --upto 20\n\n    # Emit machine-readable output\n    issuepad list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one issue",
        after_help = "EXAMPLES:\n    issuepad show 20240101120000000"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "List journal events",
        long_about = "List every decodable journal event with its line number.",
        after_help = "EXAMPLES:\n    # Full history\n    issuepad log\n\n    # History of one issue\n    issuepad log --id 20240101120000000"
    )]
    Log(cmd::log::LogArgs),

    #[command(next_help_heading = "Read", about = "Print the journal location")]
    Path,

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    issuepad completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("ISSUEPAD_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "issuepad=debug,info"
        } else {
            "issuepad=info,warn"
        })
    });

    let format = env::var("ISSUEPAD_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    // Used only until the config has been read.
    let early = cli.format.unwrap_or(if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    });

    let user = config::load_user_config().map_err(|err| {
        fail(
            early,
            &CliError::coded(ErrorCode::ConfigParseError, format!("{err:#}")),
        )
    })?;
    let effective = config::resolve_config(&user, cli.journal.as_deref(), cli.json).map_err(|err| {
        fail(
            early,
            &CliError::coded(ErrorCode::JournalPathUnavailable, format!("{err:#}")),
        )
    })?;

    let output = output::resolve_output_mode(cli.format, &effective.resolved_output);
    let journal = effective.journal();
    debug!(
        path = %journal.path().display(),
        durable = effective.durable,
        ?output,
        "resolved journal"
    );

    match &cli.command {
        Commands::Add(args) => cmd::add::run_add(args, output, &journal),
        Commands::Update(args) => cmd::update::run_update(args, output, &journal),
        Commands::Resolve(args) => cmd::resolve::run_resolve(args, output, &journal),
        Commands::Reopen(args) => cmd::reopen::run_reopen(args, output, &journal),
        Commands::Toggle(args) => cmd::toggle::run_toggle(args, output, &journal),
        Commands::Delete(args) => cmd::delete::run_delete(args, output, &journal),
        Commands::List(args) => cmd::list::run_list(args, output, &journal),
        Commands::Show(args) => cmd::show::run_show(args, output, &journal),
        Commands::Log(args) => cmd::log::run_log(args, output, &journal),
        Commands::Path => cmd::path::run_path(output, &journal),
        Commands::Completions(_) => Ok(()),
    }
}

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use jira_ui::config::{CliOverrides, Options, default_config_dir};
use jira_ui::tracker::{JiraClient, Tracker};
use jira_ui::tui::{StartPage, TuiRunOptions};

#[derive(Parser)]
#[command(name = "jira-ui")]
#[command(about = "Interactive terminal browser for Jira tickets", long_about = None)]
#[command(version)]
struct Cli {
    /// Ticket to open directly (same as `view ISSUE`)
    issue: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Jira base URL
    #[arg(short = 'e', long, global = true)]
    endpoint: Option<String>,

    /// User name for authentication
    #[arg(short = 'u', long, global = true)]
    user: Option<String>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Skip the login check at startup
    #[arg(long, global = true)]
    skip_login: bool,

    /// Template file used to render tickets
    #[arg(short = 't', long, global = true)]
    template: Option<String>,

    /// Maximum word-wrap width for ticket text (0 disables the limit)
    #[arg(short = 'm', long = "max-wrap", global = true)]
    max_wrap: Option<u64>,

    /// JQL expression for `list`
    #[arg(short = 'q', long, global = true)]
    query: Option<String>,

    /// Comma separated fields shown in ticket lists
    #[arg(short = 'f', long, global = true)]
    queryfields: Option<String>,

    /// Open tickets in the block view
    #[arg(long, global = true)]
    boxed: bool,

    /// Log file (defaults to jira-ui.log in the config directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tickets matching --query
    #[command(visible_alias = "ls")]
    List,

    /// Enter and store the password or API token
    #[command(visible_alias = "passwd")]
    Password,

    /// Open one ticket
    View { issue: String },
}

struct Fatal {
    code: i32,
    err: anyhow::Error,
}

impl From<anyhow::Error> for Fatal {
    fn from(err: anyhow::Error) -> Self {
        Self { code: 1, err }
    }
}

fn main() {
    if let Err(fatal) = run(Cli::parse()) {
        eprintln!("{:#}", fatal.err);
        std::process::exit(fatal.code);
    }
}

fn run(cli: Cli) -> std::result::Result<(), Fatal> {
    let start = start_page(&cli)?;
    let opts = Options::load(
        default_config_dir(),
        CliOverrides {
            endpoint: cli.endpoint,
            user: cli.user,
            template: cli.template,
            max_wrap: cli.max_wrap,
            query: cli.query,
            queryfields: cli.queryfields,
            skip_login: cli.skip_login,
            boxed: cli.boxed,
        },
    )?;

    let log_path = cli.log_file.unwrap_or_else(|| opts.log_path());
    jira_ui::logging::init(cli.verbose, &log_path)?;

    if opts.endpoint.is_none() {
        return Err(anyhow::anyhow!(
            "no endpoint configured (use --endpoint or set \"endpoint\" in {})",
            opts.config_dir.join("config.json").display()
        )
        .into());
    }

    let check_login = !opts.skip_login && start != StartPage::Password;
    let client = JiraClient::new(opts)?;
    if check_login && let Err(err) = client.check_login() {
        tracing::error!("login check failed: {:#}", err);
        return Err(Fatal {
            code: 2,
            err: err.context("login check failed (run `jira-ui password` to store credentials)"),
        });
    }

    tracing::info!("starting on {:?}", start);
    jira_ui::tui::run_with_options(Box::new(client), TuiRunOptions { start })?;
    Ok(())
}

fn start_page(cli: &Cli) -> Result<StartPage> {
    Ok(match (&cli.command, &cli.issue) {
        (Some(Commands::List), _) => match &cli.query {
            Some(query) if !query.trim().is_empty() => StartPage::List {
                query: query.clone(),
            },
            _ => bail!("`list` requires --query"),
        },
        (Some(Commands::Password), _) => StartPage::Password,
        (Some(Commands::View { issue }), _) => StartPage::View { id: issue.clone() },
        (None, Some(issue)) => StartPage::View { id: issue.clone() },
        (None, None) => StartPage::Query,
    })
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::Arc;

use crate::application::frame::{Collaborators, Verb, VerbContext, VerbFrame};
use crate::application::use_cases::{
    check_enlistment::CheckEnlistmentVerb, reconcile_config::ReconcileConfigVerb,
};
use crate::common::error::ExitCode;
use crate::domain::entities::tool_settings::ToolSettings;
use crate::infrastructure::{
    CommandRunner, DefenderExclusionProvider, GitProcess, GvfsConfigClient, PathToolingLocator,
    ProcessPrivilegeProbe, SettingsStore, SystemServiceController,
};
use crate::presentation::ui::ConsoleSink;

const VERSION_INFO: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_DATE"),
    " for ",
    env!("BUILD_TARGET"),
    ")"
);

/// gvfs - preflight checks for virtualized git enlistments
#[derive(Parser, Debug)]
#[command(name = "gvfs")]
#[command(about = "Preflight checks and git config repair for GVFS enlistments")]
#[command(version = VERSION_INFO)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Settings file (YAML)
    #[arg(long, global = true, env = "GVFS_SETTINGS", value_name = "FILE")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every preflight check against an enlistment
    Check {
        /// Enlistment root or any directory inside it (defaults to current directory)
        enlistment: Option<PathBuf>,
    },

    /// Bring the enlistment's local git config to the required settings
    Config {
        /// Enlistment root or any directory inside it (defaults to current directory)
        enlistment: Option<PathBuf>,
    },
}

impl Commands {
    fn enlistment(&self) -> &Path {
        let path = match self {
            Commands::Check { enlistment } | Commands::Config { enlistment } => enlistment,
        };
        path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    fn verb(&self) -> Box<dyn Verb> {
        match self {
            Commands::Check { .. } => Box::new(CheckEnlistmentVerb::new()),
            Commands::Config { .. } => Box::new(ReconcileConfigVerb::new()),
        }
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse the process arguments; usage errors exit with `ParsingError`.
    pub fn parse_or_exit() -> Self {
        match Cli::try_parse() {
            Ok(cli) => Self::from_cli(cli),
            Err(e) => {
                let _ = e.print();
                let code = if e.use_stderr() {
                    ExitCode::ParsingError
                } else {
                    ExitCode::Success
                };
                exit(code.as_i32());
            }
        }
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    pub async fn run(self) -> anyhow::Result<ExitCode> {
        if self.cli.no_color {
            colored::control::set_override(false);
        }

        let settings = SettingsStore::new()
            .load(self.cli.settings.as_deref())
            .await
            .context("Failed to load settings")?;
        let collaborators = Self::collaborators(&settings)?;
        let ctx = VerbContext::new(settings, collaborators, Arc::new(ConsoleSink::new()))?;

        let verb = self.cli.command.verb();
        let exit_code = VerbFrame::new(&ctx)
            .execute(verb.as_ref(), self.cli.command.enlistment())
            .await;
        Ok(exit_code)
    }

    fn collaborators(settings: &ToolSettings) -> anyhow::Result<Collaborators> {
        let runner = CommandRunner::new();
        let git = Arc::new(GitProcess::new(runner.clone()));
        let remote = GvfsConfigClient::new(settings.remote_timeout_seconds)
            .context("Failed to create HTTP client")?;

        Ok(Collaborators {
            git_config: git.clone(),
            git_version: git,
            tooling: Arc::new(PathToolingLocator::from_environment()),
            remote_config: Arc::new(remote),
            services: Arc::new(SystemServiceController::new(runner.clone())),
            exclusions: Arc::new(DefenderExclusionProvider::new(runner.clone())),
            privileges: Arc::new(ProcessPrivilegeProbe::new(runner)),
        })
    }
}

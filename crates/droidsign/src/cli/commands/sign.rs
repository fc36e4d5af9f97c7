//! Sign command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use droidsign_core::config::{self, Config, KEYSTORE_PASSWORD_ENV, KEY_PASSWORD_ENV};
use droidsign_core::{
    discovery, BatchOrchestrator, BuildToolset, ProcessInvoker, SigningCredentials, SigningError,
    SigningPipeline, SigningReport,
};

use crate::cli::{output, Cli, OutputFormat};

/// Discover and sign release artifacts
#[derive(Debug, Args)]
pub struct SignCommand {
    /// Glob pattern for release files (overrides config)
    #[arg(short, long, env = "DROIDSIGN_FILES")]
    pub files: Option<String>,

    /// Keystore path (overrides config)
    #[arg(long, env = "DROIDSIGN_KEYSTORE")]
    pub keystore: Option<PathBuf>,

    /// Key alias (overrides config)
    #[arg(long, env = "DROIDSIGN_KEY_ALIAS")]
    pub key_alias: Option<String>,

    /// Remove the per-file -temp intermediate artifacts after signing
    #[arg(long)]
    pub clean_intermediates: bool,
}

impl SignCommand {
    /// Execute the sign command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        // Create tokio runtime for async operations
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run(cli))
    }

    async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let (config, config_path) = config::load_config_or_default(&cwd);
        if let Some(path) = &config_path {
            info!(config = %path.display(), "using config file");
        }

        let pattern = self
            .files
            .as_ref()
            .or(config.files.as_ref())
            .ok_or_else(|| {
                SigningError::config("No file pattern given (use --files or set `files` in config)")
            })?;
        let files = discovery::find_release_files(pattern)?;

        let toolset = BuildToolset::discover(&config.tools)?;
        let credentials = resolve_credentials(self, &config)?;

        let keep_intermediates =
            !self.clean_intermediates && config.signing.keep_intermediates.unwrap_or(true);

        let invoker = ProcessInvoker;
        let pipeline = SigningPipeline::new(&toolset, &credentials, &invoker);
        let orchestrator = BatchOrchestrator::new(pipeline, keep_intermediates);

        let quiet = cli.quiet || cli.format == OutputFormat::Json;
        let report = orchestrator
            .sign_all_with_progress(&files, |p| {
                if !quiet {
                    println!(
                        "{} [{}/{}] {}",
                        style("Signing").cyan(),
                        p.index,
                        p.total,
                        style(p.file.display()).bold()
                    );
                }
            })
            .await?;

        print_report(cli, &report)?;
        Ok(())
    }
}

/// Resolve credentials from flags, config, and environment. Passwords come
/// only from the environment; the config file merely names the variables.
fn resolve_credentials(cmd: &SignCommand, config: &Config) -> anyhow::Result<SigningCredentials> {
    let keystore = cmd
        .keystore
        .clone()
        .or_else(|| config.signing.keystore.clone())
        .ok_or_else(|| {
            SigningError::config("No keystore given (use --keystore or set `signing.keystore`)")
        })?;

    let key_alias = cmd
        .key_alias
        .clone()
        .or_else(|| config.signing.key_alias.clone())
        .ok_or_else(|| {
            SigningError::config("No key alias given (use --key-alias or set `signing.key_alias`)")
        })?;

    let ks_pass_env = config
        .signing
        .keystore_password_env
        .as_deref()
        .unwrap_or(KEYSTORE_PASSWORD_ENV);
    let keystore_password = std::env::var(ks_pass_env).map_err(|_| {
        SigningError::config(format!(
            "Keystore password not set (expected in ${})",
            ks_pass_env
        ))
    })?;

    let key_pass_env = config
        .signing
        .key_password_env
        .as_deref()
        .unwrap_or(KEY_PASSWORD_ENV);
    let key_password = std::env::var(key_pass_env).ok().filter(|v| !v.is_empty());

    Ok(SigningCredentials::new(
        keystore,
        key_alias,
        keystore_password,
        key_password,
    )?)
}

fn print_report(cli: &Cli, report: &SigningReport) -> anyhow::Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "count": report.count(),
                "signed_file": report.single_path(),
                "signed_paths": report.joined_paths(),
                "results": report.results(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                output::success(&format!("Signed {} file(s)", report.count()));
                for result in report.results() {
                    println!(
                        "  {} {} {}",
                        style(result.source.display()).dim(),
                        style("->").dim(),
                        style(result.signed.display()).green()
                    );
                }
                println!("{}", output::key_value("Signed paths", &report.joined_paths()));
            }
        }
    }
    Ok(())
}

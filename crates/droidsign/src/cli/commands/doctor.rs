//! Doctor command

use clap::Args;
use console::style;

use droidsign_core::config;
use droidsign_core::BuildToolset;

use crate::cli::{output, Cli, OutputFormat};

/// Show the resolved toolchain and configuration
#[derive(Debug, Args)]
pub struct DoctorCommand {}

impl DoctorCommand {
    /// Execute the doctor command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let (config, config_path) = config::load_config_or_default(&cwd);

        let toolset = BuildToolset::discover(&config.tools);

        match cli.format {
            OutputFormat::Json => {
                let tools = match &toolset {
                    Ok(t) => serde_json::json!({
                        "zipalign": t.zipalign,
                        "apksigner": t.apksigner,
                        "jarsigner": t.jarsigner,
                    }),
                    Err(e) => serde_json::json!({ "error": e.to_string() }),
                };
                let out = serde_json::json!({
                    "config": config_path,
                    "files": config.files,
                    "keystore": config.signing.keystore,
                    "key_alias": config.signing.key_alias,
                    "tools": tools,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                println!("{}", style("droidsign environment").bold());
                println!();

                match &config_path {
                    Some(path) => {
                        println!("{}", output::key_value("Config", &path.display().to_string()))
                    }
                    None => println!("{}", output::key_value("Config", "none (defaults)")),
                }
                if let Some(files) = &config.files {
                    println!("{}", output::key_value("Files", files));
                }
                if let Some(keystore) = &config.signing.keystore {
                    let status = if keystore.exists() {
                        style("found").green().to_string()
                    } else {
                        style("missing").red().to_string()
                    };
                    println!(
                        "{}",
                        output::key_value(
                            "Keystore",
                            &format!("{} ({})", keystore.display(), status)
                        )
                    );
                }
                println!();

                match &toolset {
                    Ok(t) => {
                        output::success("Signing toolchain resolved");
                        println!(
                            "{}",
                            output::key_value("zipalign", &t.zipalign.display().to_string())
                        );
                        println!(
                            "{}",
                            output::key_value("apksigner", &t.apksigner.display().to_string())
                        );
                        println!(
                            "{}",
                            output::key_value("jarsigner", &t.jarsigner.display().to_string())
                        );
                    }
                    Err(_) => {}
                }
            }
        }

        // An unresolved toolchain is the one finding that must fail the
        // command; everything else is informational.
        toolset.map(|_| ()).map_err(Into::into)
    }
}

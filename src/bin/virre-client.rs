use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use virre_client::config::loader;
use virre_client::models::{Attachment, Register};
use virre_client::utils::logging::{self, LogLevel};
use virre_client::VirreClient;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "virre-client.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the financial periods of a company or foundation
    Periods {
        business_id: String,
        /// krek (companies) or srek (foundations)
        #[arg(value_parser = parse_register)]
        register: Register,
    },
    /// Print statement metadata and save the attachments
    Statements {
        business_id: String,
        #[arg(value_parser = parse_register)]
        register: Register,
        /// YYYY-MM-DD
        period_start_date: String,
        /// YYYY-MM-DD
        period_end_date: String,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn parse_register(value: &str) -> Result<Register, String> {
    value.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config, init logging
    // -------------------------------

    let args = Args::parse();
    let service_config = loader::file_to_config(Path::new(&args.config)).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Create client
    // -------------------------------

    let client = VirreClient::new(service_config.credentials.clone(), service_config.client.clone())?;

    // -------------------------------
    // 3. Run command
    // -------------------------------

    match args.command {
        Command::Periods { business_id, register } => {
            let periods = client.get_financial_periods(&business_id, register).await?;
            println!("{}", serde_json::to_string_pretty(&periods)?);
        }
        Command::Statements { business_id, register, period_start_date, period_end_date, out_dir } => {
            let statements = client
                .get_financial_statements(&business_id, register, &period_start_date, &period_end_date)
                .await?;

            tokio::fs::create_dir_all(&out_dir)
                .await
                .with_context(|| format!("failed to create '{}'", out_dir.display()))?;
            for attachment in &statements.attachments {
                let Some(name) = file_name(attachment) else {
                    warn!(
                        filename = %attachment.filename,
                        name = %attachment.name,
                        "attachment has no usable file name, skipped"
                    );
                    continue;
                };
                let path = out_dir.join(name);
                tokio::fs::write(&path, &attachment.data)
                    .await
                    .with_context(|| format!("failed to write '{}'", path.display()))?;
                info!(path = %path.display(), bytes = attachment.data.len(), "attachment saved");
            }
            println!("{}", serde_json::to_string_pretty(&statements)?);
        }
    }

    Ok(())
}

/// Last path component of the attachment filename, or of its part name when
/// the filename has none. The result never escapes `out_dir`.
fn file_name(attachment: &Attachment) -> Option<PathBuf> {
    [&attachment.filename, &attachment.name]
        .into_iter()
        .find_map(|candidate| Path::new(candidate).file_name())
        .map(PathBuf::from)
}

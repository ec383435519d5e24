use anyhow::Result;
use clap::{Parser, Subcommand};
use console::{Term, style};
use serde::Serialize;
use std::path::PathBuf;

use localca_lib::consts::{LEAF_CERT_FILE, LEAF_KEY_FILE, ROOT_CERT_FILE, ROOT_KEY_FILE};
use localca_lib::resolve::resolve_tool;
use localca_lib::{BootstrapOptions, BootstrapOutcome, CertStore};
use localca_platform::{EnvironmentContext, LocalcaPaths};
use tracing_subscriber::EnvFilter;

/// localca - locally-trusted development certificates
#[derive(Parser)]
#[command(name = "localca")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision the local CA and loopback leaf certificates
    Setup {
        /// Certificate store directory (default: ~/.localca)
        #[arg(long)]
        store_dir: Option<PathBuf>,

        /// Directory holding the bundled certificate tool binaries
        #[arg(long)]
        bin_dir: Option<PathBuf>,
    },

    /// Show platform and certificate store status
    Status {
        /// Certificate store directory (default: ~/.localca)
        #[arg(long)]
        store_dir: Option<PathBuf>,

        /// Directory holding the bundled certificate tool binaries
        #[arg(long)]
        bin_dir: Option<PathBuf>,

        /// Emit the report as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; --verbose turns on our debug events
    let filter = if cli.verbose {
        EnvFilter::new("localca=debug,localca_lib=debug,localca_platform=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .init();

    match cli.command {
        Commands::Setup { store_dir, bin_dir } => cmd_setup(store_dir, bin_dir),
        Commands::Status {
            store_dir,
            bin_dir,
            json,
        } => cmd_status(store_dir, bin_dir, json),
    }
}

fn cmd_setup(store_dir: Option<PathBuf>, bin_dir: Option<PathBuf>) -> Result<()> {
    let term = Term::stderr();
    let ctx = EnvironmentContext::detect()?;

    term.write_line(&format!(
        "{} Checking certificate store",
        style("::").cyan().bold()
    ))?;

    let options = BootstrapOptions { store_dir, bin_dir };

    match localca_lib::run(&ctx, &options) {
        Ok(BootstrapOutcome::AlreadyComplete) => {
            term.write_line(&format!(
                "{} Certificate store already complete, nothing to do",
                style("::").green().bold()
            ))?;
            Ok(())
        }
        Ok(BootstrapOutcome::Provisioned) => {
            term.write_line(&format!(
                "{} Root CA installed and loopback certificates issued",
                style("::").green().bold()
            ))?;
            Ok(())
        }
        Err(e) => {
            term.write_line(&format!("{} {}", style("error:").red().bold(), e))?;
            std::process::exit(1);
        }
    }
}

#[derive(Serialize)]
struct ArtifactStatus {
    name: &'static str,
    path: PathBuf,
    present: bool,
}

#[derive(Serialize)]
struct StatusReport {
    os: String,
    arch: String,
    username: String,
    hostname: String,
    store_dir: PathBuf,
    tool_binary: Option<PathBuf>,
    artifacts: Vec<ArtifactStatus>,
    complete: bool,
}

fn cmd_status(store_dir: Option<PathBuf>, bin_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let term = Term::stderr();
    let ctx = EnvironmentContext::detect()?;

    let store_dir = store_dir.unwrap_or_else(|| LocalcaPaths::store_path(&ctx));
    let bin_dir = bin_dir.unwrap_or_else(|| LocalcaPaths::bin_path(&ctx));
    let store = CertStore::new(&store_dir);
    let tool = resolve_tool(&ctx, &bin_dir);

    let names = [ROOT_CERT_FILE, ROOT_KEY_FILE, LEAF_CERT_FILE, LEAF_KEY_FILE];
    let artifacts: Vec<ArtifactStatus> = names
        .into_iter()
        .zip(store.artifacts())
        .map(|(name, path)| ArtifactStatus {
            name,
            present: path.exists(),
            path,
        })
        .collect();

    let report = StatusReport {
        os: ctx.os.clone(),
        arch: ctx.arch.clone(),
        username: ctx.username.clone(),
        hostname: ctx.hostname.clone(),
        store_dir,
        tool_binary: tool.as_ref().ok().map(|t| t.path.clone()),
        artifacts,
        complete: store.is_complete(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    term.write_line(&format!(
        "{} localca v{}",
        style("::").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    ))?;
    term.write_line("")?;
    term.write_line(&format!("  OS:       {}", report.os))?;
    term.write_line(&format!("  Arch:     {}", report.arch))?;
    term.write_line(&format!("  User:     {}", report.username))?;
    term.write_line(&format!("  Hostname: {}", report.hostname))?;
    term.write_line(&format!("  Store:    {}", report.store_dir.display()))?;
    match &tool {
        Ok(tool) => term.write_line(&format!("  Tool:     {}", tool.path.display()))?,
        Err(e) => term.write_line(&format!("  Tool:     {}", style(e).yellow()))?,
    }
    term.write_line("")?;

    for artifact in &report.artifacts {
        let mark = if artifact.present {
            style("present").green()
        } else {
            style("missing").red()
        };
        term.write_line(&format!("  {:<18} {}", artifact.name, mark))?;
    }
    term.write_line("")?;

    if report.complete {
        term.write_line(&format!(
            "{} Certificate store complete",
            style("::").green().bold()
        ))?;
    } else {
        term.write_line(&format!(
            "{} Certificate store incomplete; run `localca setup`",
            style("::").yellow().bold()
        ))?;
    }

    Ok(())
}

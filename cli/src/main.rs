use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use flycat_content::{
    check_relay_url, init_sanitizer, linkify, max_strings, share_content_url, short_public_key,
    ContentNormalizer, NormalizerConfig,
};

#[derive(Debug, Parser)]
#[command(name = "flycat", version, about = "Inspect how flycat renders note content")]
struct Cli {
    /// TOML file with extension lists and relay policy.
    #[arg(long, global = true, env = "FLYCAT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Split note text into media URLs and sanitized markup (JSON).
    Classify { text: Option<String> },
    /// Turn bare URLs into links and sanitize the result.
    Linkify { text: Option<String> },
    /// Print the last URL in the text.
    ShareUrl { text: Option<String> },
    /// Validate a relay websocket URL.
    CheckRelay { url: String },
    /// Shorten a public key for display.
    ShortKey { key: Option<String> },
    /// Truncate text the way feed previews do.
    Preview {
        #[arg(long)]
        max_len: Option<usize>,
        text: Option<String>,
    },
}

/// Use the positional argument, or all of stdin when it is missing.
fn read_text(arg: Option<String>) -> anyhow::Result<String> {
    match arg {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read note text from stdin")?;
            Ok(buf)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<NormalizerConfig> {
    match path {
        Some(path) => NormalizerConfig::load(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(NormalizerConfig::default()),
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(cli.config.as_ref())?;

    match cli.cmd {
        Cmd::Classify { text } => {
            let text = read_text(text)?;
            let content = ContentNormalizer::new(&config).classify(&text);
            println!("{}", serde_json::to_string_pretty(&content)?);
        }
        Cmd::Linkify { text } => {
            let text = read_text(text)?;
            println!("{}", init_sanitizer().clean(&linkify(&text)));
        }
        Cmd::ShareUrl { text } => {
            let text = read_text(text)?;
            match share_content_url(&text) {
                Some(url) => println!("{url}"),
                None => {
                    tracing::warn!("no url found in share text");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Cmd::CheckRelay { url } => match check_relay_url(&url, &config.relay) {
            Ok(()) => println!("ok"),
            Err(err) => {
                eprintln!("{url}: {err}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Cmd::ShortKey { key } => println!("{}", short_public_key(key.as_deref())),
        Cmd::Preview { max_len, text } => {
            let text = read_text(text)?;
            let max_len = max_len.unwrap_or(config.preview_max_len);
            if let Some(preview) = max_strings(Some(text.as_str()), max_len) {
                println!("{preview}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

//! Command-line client for a running docsum server.
//!
//! Uploads a local PDF or image to `POST /process`, prints the extracted text and the summary,
//! and optionally saves the summary as a plain-text file.
use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

#[derive(Parser)]
#[command(
    name = "docsum-upload",
    about = "Upload a document to a docsum server and print its summary"
)]
struct Cli {
    /// PDF, PNG or JPEG file to summarize.
    file: PathBuf,
    /// Requested summary length.
    #[arg(long, value_enum, default_value_t = Length::Medium)]
    length: Length,
    /// Base URL of the server.
    #[arg(long, env = "DOCSUM_URL", default_value = "http://127.0.0.1:5000")]
    server: String,
    /// Write the summary to this file as well.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print only the summary.
    #[arg(long)]
    summary_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Length {
    Short,
    Medium,
    Long,
}

impl Length {
    fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProcessReply {
    Success {
        extracted_text: String,
        summary: String,
        model_used: String,
    },
    Failure {
        error: String,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let cli = Cli::parse();
    let reply = upload(&cli).await?;

    match reply {
        ProcessReply::Success {
            extracted_text,
            summary,
            model_used,
        } => {
            if !cli.summary_only {
                println!("== Extracted text ==\n{extracted_text}\n");
                println!("== Summary ({model_used}) ==");
            }
            println!("{summary}");
            if let Some(output) = &cli.output {
                write_summary(output, &summary)?;
                eprintln!("Summary written to {}", output.display());
            }
            Ok(())
        }
        ProcessReply::Failure { error } => Err(anyhow!("server rejected the document: {error}")),
    }
}

async fn upload(cli: &Cli) -> Result<ProcessReply> {
    let bytes = fs::read(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let form = Form::new()
        .part("file", Part::bytes(bytes).file_name(file_name))
        .text("length", cli.length.as_str());

    let url = format!("{}/process", cli.server.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&url)
        .multipart(form)
        .send()
        .await
        .with_context(|| format!("failed to reach {url}"))?;

    let status = response.status();
    response
        .json::<ProcessReply>()
        .await
        .with_context(|| format!("unexpected response from server (status {status})"))
}

fn write_summary(path: &Path, summary: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, format!("{summary}\n"))
        .with_context(|| format!("failed to write {}", path.display()))
}

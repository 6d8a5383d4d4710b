//! Interactive terminal client for the legal document explainer API

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use explainer_cli::{render, ApiClient, Command, Session};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the explainer client
#[derive(Parser, Debug)]
#[command(name = "explainer")]
#[command(about = "Upload legal documents and ask questions about them")]
struct Args {
    /// Base URL of the explainer API
    #[arg(long, env = "EXPLAINER_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// PDF to upload on startup
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Request timeout in seconds; analysis of long documents can be slow
    #[arg(long, default_value = "120")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Logs would interleave with the REPL, so they are opt-in via RUST_LOG
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let client = ApiClient::new(&args.api_url, Duration::from_secs(args.timeout_secs))?;
    let mut session = Session::new();

    println!("--- Legal Document Explainer ---");
    println!("Server: {}", client.base_url());
    println!("{}", render::help());
    println!("--------------------------------");

    if let Some(path) = &args.file {
        upload(&client, &mut session, path).await;
    } else {
        println!("{}", render::status(&session));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => println!("{}", render::help()),
            Command::Upload(path) => upload(&client, &mut session, &path).await,
            Command::Tab(tab) => match session.select_tab(tab) {
                Ok(()) => {
                    if let Some(view) = render::analysis_view(&session) {
                        println!("{view}");
                    }
                }
                Err(e) => println!("{e}"),
            },
            Command::Info => match session.document() {
                Some(document) => match client.document_info(&document.document_id).await {
                    Ok(info) => println!("{}", render::document_info(&info)),
                    Err(e) => println!("[error] {e}"),
                },
                None => println!("{}", render::status(&session)),
            },
            Command::History => println!("{}", render::transcript(&session)),
            Command::Health => match client.health().await {
                Ok(health) => println!("{}", render::health(&health)),
                Err(e) => println!("[error] {e}"),
            },
            Command::Chat(message) => {
                let request = match session.begin_chat(&message) {
                    Ok(request) => request,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                println!("Thinking...");
                let outcome = client.chat(&request).await.map_err(|e| e.to_string());
                session.finish_chat(outcome);
                println!("{}", render::chat_outcome(&session));
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}

async fn upload(client: &ApiClient, session: &mut Session, path: &Path) {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if let Err(e) = session.begin_upload(filename) {
        println!("{e}");
        return;
    }
    println!("{}", render::status(session));

    let outcome = client.upload(path).await.map_err(|e| e.to_string());
    session.finish_upload(outcome);

    println!("{}", render::status(session));
    if let Some(view) = render::analysis_view(session) {
        println!("{view}");
    }
}

/*
 * Responsibility
 * - tracing 初期化 → Config 読み込み → 引数の request を分類して JSON で出力
 * - 設定 (OIDC_*) の確認用の診断ツール。server は起動しない
 */
use anyhow::{Context, Result};
use axum::http::Uri;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oidc_agent::{
    AgentConfig, Classification, HttpRequestView, QueryResponseAdapter, RequestResolver,
    RequestView, classify,
};

#[derive(Debug, Parser)]
#[command(
    name = "oidc-agent",
    about = "Classify a request target against the OIDC agent configuration"
)]
struct Cli {
    /// Request target, e.g. `/app/callback?code=...&state=...`
    uri: String,

    /// Mount prefix of the application
    #[arg(long, default_value = "")]
    context_path: String,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    request_uri: &'a str,
    context_path: &'a str,
    classification: Classification,
    index_page: String,
}

fn init_tracing() {
    // RUST_LOG=debug oidc-agent '/callback?code=...'
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout is reserved for the JSON report
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = AgentConfig::from_env()?;

    let uri: Uri = cli
        .uri
        .parse()
        .with_context(|| format!("invalid request target: {}", cli.uri))?;
    let request = HttpRequestView::from_uri(&uri, cli.context_path);
    let adapter = QueryResponseAdapter::new();
    let resolver = RequestResolver::new(&request, &config, &adapter);

    let classification = classify(&resolver)?;
    tracing::debug!(
        uri = request.request_uri(),
        classification = classification.as_str(),
        "classified request"
    );

    let report = Report {
        request_uri: request.request_uri(),
        context_path: request.context_path(),
        classification,
        index_page: resolver.index_page(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

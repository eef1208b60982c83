// ABOUTME: Command line front end for the extraction API client.
// ABOUTME: Calls one endpoint for a URL and prints the decoded result as JSON.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use diffbot_client::{Client, RequestOptions, DEFAULT_SERVER};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Extract structured data from a web page and print it as JSON.
#[derive(Parser, Debug)]
#[command(name = "diffbot")]
#[command(about = "Call a Diffbot extraction API and print the result", long_about = None)]
struct Args {
    /// Developer token.
    #[arg(long, env = "DIFFBOT_TOKEN")]
    token: String,

    /// API root.
    #[arg(long, env = "DIFFBOT_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    /// Endpoint: article, product, image, frontpage or analyze.
    #[arg(short, long, default_value = "article")]
    method: String,

    /// Response fields selector, e.g. "meta,querystring,images(*)".
    #[arg(long)]
    fields: Option<String>,

    /// Server-side timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Frontpage only: include non-core items.
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Page to process.
    url: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.downcast_ref::<diffbot_client::Error>().and_then(|e| e.api_error()) {
                Some(api) => eprintln!("error {}: {}", api.code, api.message),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let client = Client::builder()
        .server(&args.server)
        .token(&args.token)
        .build()?;
    let opts = request_options(args);
    tracing::info!(method = %args.method, url = %args.url, "calling endpoint");

    match args.method.as_str() {
        "article" => render(&client.article(&args.url, Some(&opts))?, args.compact),
        "product" => render(&client.product(&args.url, Some(&opts))?, args.compact),
        "image" => render(&client.image(&args.url, Some(&opts))?, args.compact),
        "frontpage" => render(&client.frontpage(&args.url, Some(&opts))?, args.compact),
        "analyze" | "classify" => render(&client.classify(&args.url, Some(&opts))?, args.compact),
        other => bail!("unknown method: {}", other),
    }
}

fn request_options(args: &Args) -> RequestOptions {
    let mut opts = RequestOptions::new();
    if let Some(fields) = &args.fields {
        opts = opts.with_fields(fields);
    }
    if let Some(ms) = args.timeout_ms {
        opts = opts.with_timeout(Duration::from_millis(ms));
    }
    if args.all {
        opts = opts.with_frontpage_all("*");
    }
    opts
}

fn render<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(out)
}

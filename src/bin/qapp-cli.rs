use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use qradar_appkit::{create_log, ClientConfig, InboundContext, LogLevel, QRadarApp, RestOptions};

#[derive(Parser)]
#[command(name = "qapp-cli")]
#[command(
    about = "Troubleshooting CLI for apps running in the QRadar app framework",
    long_about = None
)]
struct Cli {
    /// DEBUG, INFO, WARNING, ERROR or CRITICAL; defaults to the configured level
    #[arg(short, long)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call the console REST API
    Rest {
        /// GET, PUT, POST or DELETE
        method: String,
        /// Path below https://<console>/, e.g. api/help/versions
        path: String,
        /// Extra header as NAME=VALUE (repeatable)
        #[arg(long = "header", value_parser = parse_pair)]
        headers: Vec<(String, String)>,
        /// Query parameter as NAME=VALUE (repeatable)
        #[arg(long = "param", value_parser = parse_pair)]
        params: Vec<(String, String)>,
        /// JSON request body
        #[arg(long)]
        json: Option<String>,
        /// Raw request body
        #[arg(long)]
        data: Option<String>,
        /// API version header
        #[arg(long)]
        api_version: Option<String>,
        /// Seconds; defaults to the configured request timeout
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Print the app proxy base URL
    BaseUrl {
        /// Simulate an inbound X-Console-Host header
        #[arg(long)]
        console_host: Option<String>,
    },
    /// Print the console address settings
    Console,
    /// Print the manifest, or one field of it
    Manifest { key: Option<String> },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;

    let level = match cli.log_level {
        Some(level) => level,
        None => config.observability.log_level.parse()?,
    };
    create_log(level)?;

    let app = QRadarApp::from_config(config)?;

    match cli.command {
        Commands::Rest {
            method,
            path,
            headers,
            params,
            json,
            data,
            api_version,
            timeout,
        } => {
            let mut header_map = HeaderMap::new();
            for (name, value) in headers {
                header_map.insert(
                    HeaderName::from_bytes(name.as_bytes())?,
                    HeaderValue::from_str(&value)?,
                );
            }
            let json_body = json.as_deref().map(serde_json::from_str::<Value>).transpose()?;

            let options = RestOptions {
                headers: Some(header_map),
                body: data.map(String::into_bytes),
                params,
                json_body,
                version: api_version,
                timeout: timeout.map(Duration::from_secs),
                ..RestOptions::default()
            };

            let res = app.rest(&method, &path, options, None).await?;
            print_response(res).await?;
        }
        Commands::BaseUrl { console_host } => {
            let inbound = console_host
                .map(|host| InboundContext::new().with_header("X-Console-Host", &host));
            println!("{}", app.app_base_url(inbound.as_ref()));
        }
        Commands::Console => {
            println!("address: {}", app.console_address().unwrap_or("<unset>"));
            println!("fqdn:    {}", app.console_fqdn().unwrap_or("<unset>"));
            println!("sdk:     {}", app.is_sdk());
        }
        Commands::Manifest { key } => {
            let value = match key {
                Some(key) => app.manifest_field_value(&key, None)?,
                None => app.manifest_json().clone(),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: console returned status {}", status);
    } else {
        println!("Status: {}", status);
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}

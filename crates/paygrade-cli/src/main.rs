//! Paygrade CLI
//!
//! # Commands
//!
//! - `serve`: run the HTTP prediction API
//! - `spec`: print the feature layout the model was trained on
//! - `encode`: encode requests from a JSON file and print the feature rows
//! - `predict`: run one prediction from a JSON file

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use paygrade_ai::Predictor;
use paygrade_core::{PredictionRequest, SALARY_SPEC};
use paygrade_server::AppState;
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt};

mod display;

/// Salary prediction from job attributes.
#[derive(Parser)]
#[command(name = "paygrade")]
#[command(version)]
#[command(about = "Salary prediction service and feature encoding tools")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, env = "PAYGRADE_BIND", default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
        /// Model artifact (.onnx or .json)
        #[arg(long, env = "PAYGRADE_MODEL", default_value = "models/salary.onnx")]
        model: PathBuf,
    },
    /// Print the feature layout
    Spec,
    /// Encode one request or an array of requests from a JSON file
    Encode {
        /// JSON file with a request object or an array of them
        input: PathBuf,
    },
    /// Predict a salary for one request
    Predict {
        /// JSON file with a request object
        input: PathBuf,
        /// Model artifact (.onnx or .json)
        #[arg(long, env = "PAYGRADE_MODEL", default_value = "models/salary.onnx")]
        model: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("paygrade v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { bind, model } => {
            let state = AppState::load(&SALARY_SPEC, &model);
            paygrade_server::serve(bind, state).await?;
        }
        Commands::Spec => {
            print!("{}", display::render_spec(&SALARY_SPEC));
        }
        Commands::Encode { input } => {
            let requests = read_requests(&input)?;
            if let [request] = requests.as_slice() {
                let vector = paygrade_ai::encode(request, &SALARY_SPEC)?;
                print!("{}", display::render_vector(&SALARY_SPEC, &vector));
            } else {
                let batch = paygrade_ai::encode_batch(&requests, &SALARY_SPEC)?;
                println!("{}", arrow::util::pretty::pretty_format_batches(&[batch])?);
            }
        }
        Commands::Predict { input, model } => {
            let requests = read_requests(&input)?;
            let [request] = requests.as_slice() else {
                anyhow::bail!("predict expects exactly one request, got {}", requests.len());
            };
            let predictor = Predictor::load(&SALARY_SPEC, &model)?;
            let response = tokio::task::spawn_blocking({
                let request = request.clone();
                move || predictor.predict(&request)
            })
            .await??;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequestFile {
    One(PredictionRequest),
    Many(Vec<PredictionRequest>),
}

/// Read a request object or an array of requests.
fn read_requests(path: &Path) -> anyhow::Result<Vec<PredictionRequest>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let parsed: RequestFile = serde_json::from_str(&content)
        .with_context(|| format!("parsing requests from {}", path.display()))?;
    Ok(match parsed {
        RequestFile::One(request) => vec![request],
        RequestFile::Many(requests) => requests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const REQUEST: &str = r#"{
        "jobTitle": "Data Scientist",
        "experienceLevel": "SE",
        "yearsExperience": "3-5",
        "employmentType": "FT",
        "remoteWork": "50",
        "companySize": "M",
        "country": "United States",
        "industry": "Technology",
        "education": "Master"
    }"#;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["paygrade", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { bind, model } => {
                assert_eq!(bind, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
                assert_eq!(model, PathBuf::from("models/salary.onnx"));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn reads_single_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.json");
        std::fs::write(&path, REQUEST).unwrap();
        let requests = read_requests(&path).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].company_size, "M");
    }

    #[test]
    fn reads_request_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("many.json");
        std::fs::write(&path, format!("[{REQUEST}, {REQUEST}]")).unwrap();
        assert_eq!(read_requests(&path).unwrap().len(), 2);
    }

    #[test]
    fn rejects_malformed_request_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"jobTitle": "Data Scientist"}"#).unwrap();
        let err = read_requests(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing requests"), "{err:#}");
    }
}

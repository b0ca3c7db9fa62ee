//! Start-up configuration: defaults, then an optional TOML file, then CLI flags.

use std::fs::read_to_string;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::Parser;
use medi_predict::{DatasetPaths, TrainingOptions};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Default, Parser)]
#[command(
    name = "medi-predict-server",
    version,
    about = "Serve the Medi diabetes and heart-disease risk models over HTTP",
    long_about = "medi-predict-server fits both risk models from the bundled CSV data at start-up\n\
        and serves them on POST /predict/diabetes and POST /predict/heart.\n\n\
        Log verbosity follows RUST_LOG (default: info)."
)]
pub struct Cli {
    /// TOML file with [server], [data] and [training] sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Diabetes training table (CSV with an `Outcome` column)
    #[arg(long)]
    pub diabetes_csv: Option<PathBuf>,

    /// Heart-disease training table (CSV with a `target` column)
    #[arg(long)]
    pub heart_csv: Option<PathBuf>,

    /// Seed for the stratified hold-out split
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fraction of rows held out for the accuracy report
    #[arg(long)]
    pub test_size: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid host `{0}`")]
    InvalidHost(String),
    #[error("test_size must be in (0, 1), got {0}")]
    InvalidTestSize(f64),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub data: DataSection,
    #[serde(default)]
    pub training: TrainingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSection {
    pub diabetes_csv: Option<PathBuf>,
    pub heart_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingSection {
    pub seed: Option<u64>,
    pub test_size: Option<f64>,
}

impl FileConfig {
    /// Load a TOML file; relative dataset paths are taken from the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg: FileConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            for p in [&mut cfg.data.diabetes_csv, &mut cfg.data.heart_csv]
                .into_iter()
                .flatten()
            {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        }
        Ok(cfg)
    }
}

/// Fully resolved settings for one server process.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub datasets: DatasetPaths,
    pub training: TrainingOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            datasets: DatasetPaths::default(),
            training: TrainingOptions::default(),
        }
    }
}

impl ServerConfig {
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(file, cli)
    }

    /// Layer the file over the defaults, then the CLI over both.
    pub fn merge(file: FileConfig, cli: &Cli) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let cfg = Self {
            host: cli
                .host
                .clone()
                .or(file.server.host)
                .unwrap_or(defaults.host),
            port: cli.port.or(file.server.port).unwrap_or(defaults.port),
            datasets: DatasetPaths {
                diabetes: cli
                    .diabetes_csv
                    .clone()
                    .or(file.data.diabetes_csv)
                    .unwrap_or(defaults.datasets.diabetes),
                heart: cli
                    .heart_csv
                    .clone()
                    .or(file.data.heart_csv)
                    .unwrap_or(defaults.datasets.heart),
            },
            training: TrainingOptions {
                test_size: cli
                    .test_size
                    .or(file.training.test_size)
                    .unwrap_or(defaults.training.test_size),
                seed: cli
                    .seed
                    .or(file.training.seed)
                    .unwrap_or(defaults.training.seed),
            },
        };

        let ts = cfg.training.test_size;
        if !(ts > 0.0 && ts < 1.0) {
            return Err(ConfigError::InvalidTestSize(ts));
        }
        cfg.socket_addr()?;
        Ok(cfg)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = match self.host.as_str() {
            "localhost" => IpAddr::from([127, 0, 0, 1]),
            other => other
                .parse()
                .map_err(|_| ConfigError::InvalidHost(other.to_string()))?,
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

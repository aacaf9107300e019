use crate::cli::Cli;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub scan_directory: String,
    pub output_name: String,
    pub recursive: bool,
    pub extension: String,
    pub format: ReportFormat,
    pub exposure_decimal: bool,
    pub log_level: String,
}

impl AppConfig {
    pub fn new(cli: &Cli) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load(
            cli,
            Path::new("config"),
            &run_mode,
            Environment::with_prefix("METASCAN"),
        )
    }

    fn load(
        cli: &Cli,
        config_dir: &Path,
        run_mode: &str,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let file_in = |name: &str| {
            File::with_name(&config_dir.join(name).to_string_lossy()).required(false)
        };

        let mut builder = Config::builder()
            .set_default("scan_directory", ".")?
            .set_default("output_name", "file_metadata_report")?
            .set_default("recursive", false)?
            .set_default("extension", "")?
            .set_default("format", ReportFormat::default().as_str())?
            .set_default("exposure_decimal", false)?
            .set_default("log_level", "info")?
            .add_source(file_in("default"))
            .add_source(file_in(run_mode))
            .add_source(file_in("local"));

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::from(path.as_path()));
        }

        let s = builder
            .add_source(environment)
            .set_override_option("scan_directory", cli.dir.clone())?
            .set_override_option("output_name", cli.output.clone())?
            .set_override_option("recursive", cli.recursive.then_some(true))?
            .set_override_option("extension", cli.ext.clone())?
            .set_override_option("format", cli.format.map(|f| f.as_str()))?
            .set_override_option("exposure_decimal", cli.exposure_decimal.then_some(true))?
            .set_override_option("log_level", cli.log_level.clone())?
            .build()?;

        s.try_deserialize()
    }

    /// Report path: `<output_name>.<format>`.
    pub fn report_path(&self) -> String {
        format!("{}.{}", self.output_name, self.format.as_str())
    }

    pub fn manifest_path(&self) -> String {
        format!("{}-manifest.{}", self.output_name, self.format.as_str())
    }
}

use crate::config::ReportFormat;
use clap::Parser;
use std::path::PathBuf;

/// Scan a directory and report file attributes, content hashes and EXIF metadata.
#[derive(Parser, Debug, Default)]
#[command(name = "metascan", version, about)]
pub struct Cli {
    /// Directory to scan
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Base name of the report file, without extension
    #[arg(short, long)]
    pub output: Option<String>,

    /// Descend into sub-directories
    #[arg(short, long)]
    pub recursive: bool,

    /// Only process files whose path ends with this extension (e.g. .jpg)
    #[arg(short, long)]
    pub ext: Option<String>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Render exposure time as a decimal instead of a fraction
    #[arg(long)]
    pub exposure_decimal: bool,

    #[arg(long)]
    pub log_level: Option<String>,

    /// Extra configuration file, layered over config/
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["metascan", "-d", "photos", "-r", "--ext", ".JPG", "-f", "json"]);
        assert_eq!(cli.dir.as_deref(), Some("photos"));
        assert!(cli.recursive);
        assert_eq!(cli.ext.as_deref(), Some(".JPG"));
        assert_eq!(cli.format, Some(ReportFormat::Json));
        assert!(cli.output.is_none());
    }
}

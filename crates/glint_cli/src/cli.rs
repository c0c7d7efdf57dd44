use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments. Every render option overrides the config file.
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(version, about = "Monte Carlo path tracer rendering the random spheres demo scene")]
pub struct Args {
    /// JSON render file with `render` and `camera` sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output path: .ppm or .png, or "-" for PPM on stdout
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Aspect ratio as "W:H" or a decimal, e.g. 16:9 or 1.7778
    #[arg(long, value_parser = parse_aspect)]
    pub aspect: Option<f32>,

    /// Samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum ray bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Worker threads (defaults to available parallelism)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Seed for the scene layout and the render; omit for a time-based seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the loop-based radiance estimator instead of the recursive one
    #[arg(long)]
    pub iterative: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Parse `"16:9"` or `"1.7778"` into a positive, finite ratio.
pub fn parse_aspect(s: &str) -> Result<f32, String> {
    let ratio = match s.split_once(':') {
        Some((w, h)) => {
            let w: f32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
            let h: f32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
            w / h
        }
        None => s
            .trim()
            .parse()
            .map_err(|e| format!("bad aspect ratio '{s}': {e}"))?,
    };

    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(format!("aspect ratio must be positive and finite, got '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_aspect() {
        assert!((parse_aspect("16:9").unwrap() - 16.0 / 9.0).abs() < 1e-6);
        assert!((parse_aspect(" 4 : 3 ").unwrap() - 4.0 / 3.0).abs() < 1e-6);
        assert_eq!(parse_aspect("2").unwrap(), 2.0);
        assert!(parse_aspect("16:0").is_err());
        assert!(parse_aspect("-1.5").is_err());
        assert!(parse_aspect("wide").is_err());
        assert!(parse_aspect("nan").is_err());
    }

    #[test]
    fn test_defaults_leave_overrides_unset() {
        let args = Args::parse_from(["glint"]);
        assert_eq!(args.output, "-");
        assert!(args.width.is_none());
        assert!(args.seed.is_none());
        assert!(!args.iterative);
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn test_flags_parse() {
        let args = Args::parse_from([
            "glint",
            "--width",
            "400",
            "--aspect",
            "3:2",
            "-s",
            "8",
            "--max-depth",
            "4",
            "-j",
            "2",
            "--seed",
            "17",
            "--iterative",
            "--log-level",
            "debug",
            "-o",
            "out.png",
        ]);
        assert_eq!(args.width, Some(400));
        assert_eq!(args.aspect, Some(1.5));
        assert_eq!(args.samples, Some(8));
        assert_eq!(args.max_depth, Some(4));
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.seed, Some(17));
        assert!(args.iterative);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
        assert_eq!(args.output, "out.png");
    }
}

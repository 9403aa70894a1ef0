use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Directive, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    EnvFilter, Layer,
};

const DEFAULT_LOG_FILE: &str = "/tmp/dbx-api.log";
const QUIET_CRATES: [&str; 2] = ["hyper=warn", "tokio=warn"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Human,
        }
    }
}

impl LogOutput {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => LogOutput::File,
            "both" => LogOutput::Both,
            _ => LogOutput::Console,
        }
    }

    fn console(self) -> bool {
        matches!(self, LogOutput::Console | LogOutput::Both)
    }

    fn file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

/// Logging knobs, read from `LOG_FORMAT`, `LOG_OUTPUT` and `LOG_FILE_PATH`
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
    pub file_path: PathBuf,
}

impl LogSettings {
    pub fn from_env(level: &str) -> Self {
        Self {
            level: level.to_ascii_lowercase(),
            format: LogFormat::parse(&env::var("LOG_FORMAT").unwrap_or_default()),
            output: LogOutput::parse(&env::var("LOG_OUTPUT").unwrap_or_default()),
            file_path: env::var("LOG_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

/// `RUST_LOG` wins when set, otherwise the configured level
fn build_filter(level: &str) -> EnvFilter {
    let mut filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    for quiet in QUIET_CRATES {
        if let Ok(directive) = quiet.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

fn format_layer<S, W>(format: LogFormat, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer);
    match format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Human => layer.boxed(),
    }
}

/// Installs the global tracing subscriber
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process when file output is enabled.
pub fn init_subscriber(settings: &LogSettings) -> Option<WorkerGuard> {
    let mut layers = Vec::new();
    let mut guard = None;

    if settings.output.console() {
        layers.push(format_layer(settings.format, std::io::stdout));
    }

    if settings.output.file() {
        let log_dir = settings
            .file_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("/tmp"));
        let log_filename = settings
            .file_path
            .file_name()
            .unwrap_or("dbx-api.log".as_ref());

        let appender = tracing_appender::rolling::daily(log_dir, log_filename);
        let (non_blocking, file_guard) = tracing_appender::non_blocking(appender);
        guard = Some(file_guard);
        layers.push(format_layer(settings.format, non_blocking));
    }

    if let Err(e) = tracing_subscriber::registry()
        .with(layers)
        .with(build_filter(&settings.level))
        .try_init()
    {
        eprintln!("Logging already initialized: {e}");
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("human"), LogFormat::Human);
        assert_eq!(LogFormat::parse(""), LogFormat::Human);
    }

    #[test]
    fn test_output_parse() {
        assert_eq!(LogOutput::parse("file"), LogOutput::File);
        assert_eq!(LogOutput::parse("both"), LogOutput::Both);
        assert_eq!(LogOutput::parse("console"), LogOutput::Console);
        assert_eq!(LogOutput::parse("nonsense"), LogOutput::Console);

        assert!(LogOutput::Both.console() && LogOutput::Both.file());
        assert!(!LogOutput::File.console());
    }

    #[test]
    fn test_level_is_lowercased() {
        let settings = LogSettings::from_env("DEBUG");
        assert_eq!(settings.level, "debug");
    }

    #[test]
    fn test_invalid_level_falls_back() {
        // Must not panic on garbage levels
        let _ = build_filter("definitely[not-a-filter");
    }
}

//! Tracing setup
//!
//! Library code only emits `tracing` events. Binaries and tests call
//! [`init_logging`] once to install a subscriber: a `tracing-subscriber`
//! registry writing to stderr on native targets, the browser console
//! through `tracing-wasm` on `wasm32`.
//!
//! ```rust,no_run
//! // info level, compact lines
//! codeflow::core::logging::init_logging(None, None).unwrap();
//! ```
//!
//! Settings come from the arguments first, then the environment:
//!
//! - `CODEFLOW_LOG_LEVEL`, or `RUST_LOG` when that is unset. Either may hold a
//!   full filter directive such as `info,codeflow::completion=debug`.
//! - `CODEFLOW_LOG_FORMAT`: `compact`, `pretty` or `json`.

use std::fmt;
use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV: &str = "CODEFLOW_LOG_LEVEL";

/// Environment variable holding the log format
pub const LOG_FORMAT_ENV: &str = "CODEFLOW_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

/// How events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event, no targets
    #[default]
    Compact,
    /// Multi-line with source locations and span activity
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Names accepted by [`LogFormat::from_str`]
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        [LogFormat::Compact, LogFormat::Pretty, LogFormat::Json]
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| format!("Unknown log format: {}", s))
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter directive from the argument, `CODEFLOW_LOG_LEVEL`, `RUST_LOG`, or `info`
pub fn resolve_level(level: Option<&str>) -> String {
    level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Format from the argument or `CODEFLOW_LOG_FORMAT`, compact otherwise
pub fn resolve_format(format: Option<&str>) -> Result<LogFormat, String> {
    format
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
        .map_or(Ok(LogFormat::default()), |name| name.parse())
}

#[cfg(not(target_arch = "wasm32"))]
type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// The stderr formatting layer for a format
#[cfg(not(target_arch = "wasm32"))]
fn stderr_layer(format: LogFormat) -> BoxedLayer {
    let base = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    match format {
        LogFormat::Compact => base
            .compact()
            .with_target(false)
            .with_span_events(FmtSpan::NONE)
            .boxed(),
        LogFormat::Pretty => base
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::ACTIVE)
            .boxed(),
        LogFormat::Json => base
            .json()
            .with_current_span(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
    }
}

/// Install the global subscriber
///
/// Fails on an unknown format or when a subscriber is already set. A level
/// directive that does not parse falls back to `info`.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = resolve_format(format).map_err(|e| format!("Invalid log format: {}", e))?;

    #[cfg(target_arch = "wasm32")]
    {
        let _ = (level, format);
        tracing_wasm::set_as_global_default();
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let directive = resolve_level(level);
        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(stderr_layer(format))
            .with(filter)
            .try_init()?;
        Ok(())
    }
}

/// [`init_logging`] with nothing but the environment
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}

mod log_style;
mod utils;

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

pub use log_style::{LogStyle, LogStyleParseError, TextColoring, get_log_style_from_env};

pub const LOG_STYLE_ENV_VAR: &str = "FRIGATE_DEPLOY_LOG_STYLE";
const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global tracing subscriber. Logs go to stderr so that stdout stays free
/// for rendered artifacts. Calling this more than once is harmless.
pub fn init_logging() {
    let style = match get_log_style_from_env(LOG_STYLE_ENV_VAR) {
        Ok(style) => style.unwrap_or_default(),
        Err(e) => {
            eprintln!("Ignoring {LOG_STYLE_ENV_VAR}: {e}");
            LogStyle::default()
        }
    };

    init_logging_with_style(style);
}

pub fn init_logging_with_style(style: LogStyle) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match style {
        LogStyle::Json => builder.json().try_init(),
        LogStyle::Compact => builder.compact().with_ansi(false).try_init(),
        LogStyle::Text(coloring) => {
            let ansi = match coloring {
                TextColoring::On => true,
                TextColoring::Off => false,
                TextColoring::Auto => std::io::stderr().is_terminal(),
            };
            builder.with_ansi(ansi).try_init()
        }
    };

    if let Err(e) = result {
        tracing::debug!("Logging already initialized: {e}");
    }
}

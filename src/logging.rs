//! Diagnostics setup.
//!
//! stdout is reserved for the hook payload, so every diagnostic goes to
//! stderr behind a fixed tag, with an optional plain-text copy in a log file.

use autocontext_core::config::Settings;
use std::fmt;
use std::path::Path;
use tracing::{Event, Level, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Prefix on every stderr diagnostic line.
pub const LOG_TAG: &str = "[AutoContext]";

/// `[AutoContext] message`, with the level spelled out when it isn't INFO.
struct Tagged;

impl<S, N> FormatEvent<S, N> for Tagged
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{LOG_TAG} ")?;
        let level = *event.metadata().level();
        if level != Level::INFO {
            write!(writer, "{level}: ")?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `settings.log_level`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(settings: &Settings, project_dir: &Path) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .event_format(Tagged);

    let file_layer = settings
        .log_file
        .as_deref()
        .and_then(|file| file_appender(&project_dir.join(file)))
        .map(|appender| {
            tracing_subscriber::fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
        });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}

fn file_appender(path: &Path) -> Option<RollingFileAppender> {
    let dir = path.parent()?;
    let name = path.file_name()?.to_string_lossy().into_owned();
    match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
    {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!("{LOG_TAG} failed to open log file {}: {e}", path.display());
            None
        }
    }
}

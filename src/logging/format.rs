//! Line format for log events

use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// `timestamp - LEVEL - message` with local time
#[derive(Debug, Clone)]
pub struct LineFormat {
    timestamp_format: String,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self::new("%Y-%m-%d %H:%M:%S")
    }
}

impl LineFormat {
    /// Create a format with a custom `chrono` timestamp pattern
    pub fn new(timestamp_format: impl Into<String>) -> Self {
        Self {
            timestamp_format: timestamp_format.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
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
        let now = chrono::Local::now();
        write!(
            writer,
            "{} - {} - ",
            now.format(&self.timestamp_format),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

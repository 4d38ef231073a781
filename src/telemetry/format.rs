//! Single-line text layout for log events.
//!
//! ```text
//! 2024-03-05 07:08:09 [INFO] - message || key={value}, other={value},
//! ```

use std::fmt::{self, Write as _};

use chrono::{DateTime, Local};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const MESSAGE_SEPARATOR: &str = " - ";
const FIELDS_SEPARATOR: &str = " || ";

/// One event as seen by the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub time: DateTime<Local>,
    pub level: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

/// Event format plugged into the `fmt` layer.
///
/// The only state is the strftime pattern used for the timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    timestamp_format: String,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_owned(),
        }
    }
}

impl LineFormat {
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Renders `record` as a newline-terminated line.
    ///
    /// # Errors
    ///
    /// Fails only if the timestamp pattern is not valid strftime.
    pub fn render(&self, record: &LogRecord) -> Result<String, fmt::Error> {
        let mut line = String::with_capacity(64 + record.message.len());
        self.write_line(&mut line, record)?;
        Ok(line)
    }

    fn write_line<W: fmt::Write + ?Sized>(&self, w: &mut W, record: &LogRecord) -> fmt::Result {
        write!(
            w,
            "{} [{}]",
            record.time.format(&self.timestamp_format),
            record.level.to_uppercase()
        )?;

        if !record.message.is_empty() {
            w.write_str(MESSAGE_SEPARATOR)?;
            w.write_str(&record.message)?;
        }

        if !record.fields.is_empty() {
            w.write_str(FIELDS_SEPARATOR)?;
        }
        // Every pair carries a trailing ", ", the last one included.
        for (key, value) in &record.fields {
            write!(w, "{key}={{{value}}}, ")?;
        }

        w.write_char('\n')
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        let record = LogRecord {
            time: Local::now(),
            level: event.metadata().level().to_string(),
            message: collector.message,
            fields: collector.fields,
        };
        self.write_line(&mut writer, &record)
    }
}

/// Splits an event's fields into the message and everything else.
#[derive(Debug, Default)]
struct FieldCollector {
    message: String,
    fields: Vec<(String, String)>,
}

impl FieldCollector {
    fn push(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            // metadata injected by the `log` bridge
            name if name.starts_with("log.") => {}
            name => self.fields.push((name.to_owned(), value)),
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::layer::SubscriberExt;

    #[fixture]
    fn time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 5, 7, 8, 9)
            .earliest()
            .expect("valid local time")
    }

    fn record(time: DateTime<Local>, level: &str, message: &str, fields: &[(&str, &str)]) -> LogRecord {
        LogRecord {
            time,
            level: level.to_owned(),
            message: message.to_owned(),
            fields: fields
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }

    fn render(record: &LogRecord) -> String {
        LineFormat::default().render(record).expect("render line")
    }

    fn is_timestamp(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == 19
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                10 => *b == b' ',
                13 | 16 => *b == b':',
                _ => b.is_ascii_digit(),
            })
    }

    #[rstest]
    fn message_only(time: DateTime<Local>) {
        let line = render(&record(time, "info", "Host: box", &[]));
        assert_eq!(line, "2024-03-05 07:08:09 [INFO] - Host: box\n");
    }

    #[rstest]
    #[case("")]
    #[case("plain")]
    #[case("Cmdline: [--verbose]")]
    fn no_fields_means_no_field_separator(time: DateTime<Local>, #[case] message: &str) {
        let line = render(&record(time, "info", message, &[]));
        let rest = line.strip_prefix("2024-03-05 07:08:09 [INFO]").expect("prefix");
        let expected_tail = if message.is_empty() {
            "\n".to_owned()
        } else {
            format!(" - {message}\n")
        };
        assert_eq!(rest, expected_tail);
    }

    #[rstest]
    fn empty_message_with_fields(time: DateTime<Local>) {
        let line = render(&record(time, "warn", "", &[("path", "/tmp/x")]));
        assert_eq!(line, "2024-03-05 07:08:09 [WARN] || path={/tmp/x}, \n");
        assert!(!line.contains(" - "));
    }

    #[rstest]
    fn every_field_is_bracketed_with_trailing_separator(time: DateTime<Local>) {
        let fields = [("a", "1"), ("b", "two"), ("c", "")];
        let line = render(&record(time, "debug", "done", &fields));
        let (head, tail) = line.split_once(" || ").expect("field separator");
        assert_eq!(head, "2024-03-05 07:08:09 [DEBUG] - done");
        for (k, v) in fields {
            assert!(tail.contains(&format!("{k}={{{v}}}, ")), "missing {k} in {tail:?}");
        }
        assert!(tail.ends_with(", \n"));
    }

    #[rstest]
    #[case("info", "INFO")]
    #[case("Warn", "WARN")]
    #[case("error", "ERROR")]
    #[case("DeBuG", "DEBUG")]
    fn level_is_upper_cased(time: DateTime<Local>, #[case] level: &str, #[case] expected: &str) {
        let line = render(&record(time, level, "m", &[]));
        assert!(line.contains(&format!("[{expected}]")), "{line:?}");
    }

    #[rstest]
    fn timestamp_has_fixed_layout() {
        let line = render(&record(Local::now(), "info", "now", &[]));
        assert!(is_timestamp(&line[..19]), "{line:?}");
        assert_eq!(&line[19..27], " [INFO] ");
    }

    #[rstest]
    fn custom_timestamp_format(time: DateTime<Local>) {
        let format = LineFormat::default().with_timestamp_format("%H:%M");
        assert_eq!(format.timestamp_format(), "%H:%M");
        let line = format.render(&record(time, "info", "m", &[])).expect("render line");
        assert_eq!(line, "07:08 [INFO] - m\n");
    }

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(|e| panic!("buffer lock: {e}"));
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(|e| panic!("buffer lock: {e}"))
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(emit: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .event_format(LineFormat::default())
            .with_writer(buffer.clone());
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, emit);
        buffer.contents()
    }

    #[rstest]
    fn formats_tracing_events() {
        let out = capture(|| tracing::info!(user = "ann", count = 3, "Tool: {} {}", "cmdh", "0.1.0"));
        assert!(is_timestamp(&out[..19]), "{out:?}");
        assert_eq!(&out[19..], " [INFO] - Tool: cmdh 0.1.0 || user={ann}, count={3}, \n");
    }

    #[rstest]
    fn event_without_message() {
        let out = capture(|| tracing::warn!(path = "/etc/app.toml"));
        assert_eq!(&out[19..], " [WARN] || path={/etc/app.toml}, \n");
    }

    #[rstest]
    fn error_fields_use_display_text() {
        let err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let out = capture(|| tracing::error!(err = &err as &(dyn std::error::Error + 'static), "open failed"));
        assert_eq!(&out[19..], " [ERROR] - open failed || err={no such file}, \n");
    }
}

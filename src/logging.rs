//! Unified JSON logging.
//!
//! Log format:
//! ```json
//! {"ts":"2024-12-28T15:04:05.123Z","level":"debug","type":"app","msg":"body is not JSON, using ambient data","ctx":{"service":"http_envelope"},"data":{"body_len":9}}
//! ```

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig, DEFAULT_FILTER};

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|e| {
        eprintln!(
            "Warning: Invalid log filter '{}' ({}), using '{}'",
            config.filter, e, DEFAULT_FILTER
        );
        EnvFilter::new(DEFAULT_FILTER)
    });

    let (json, text) = match config.format {
        LogFormat::Json => (
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(JsonFormatter::new(config.service_name.clone())),
            ),
            None,
        ),
        LogFormat::Text => (None, Some(tracing_subscriber::fmt::layer())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .try_init()
}

// ============================================================================
// Log entry
// ============================================================================

/// Log entry with unified structure.
#[derive(Serialize)]
struct LogEntry<'a> {
    /// ISO 8601 timestamp with milliseconds, UTC
    ts: &'a str,
    level: &'a str,
    /// Log type: app or error
    #[serde(rename = "type")]
    log_type: &'a str,
    msg: &'a str,
    ctx: LogContext<'a>,
    data: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct LogContext<'a> {
    service: &'a str,
}

/// Formats each event as one JSON line.
pub struct JsonFormatter {
    service_name: String,
}

impl JsonFormatter {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
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
        let level = *event.metadata().level();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let ts = Iso8601Timestamp::now().to_string();
        let entry = LogEntry {
            ts: &ts,
            level: level_name(level),
            log_type: if level == Level::ERROR { "error" } else { "app" },
            msg: visitor.message.as_deref().unwrap_or_default(),
            ctx: LogContext {
                service: &self.service_name,
            },
            data: &visitor.fields,
        };

        let line = serde_json::to_string(&entry).map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::TRACE | Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Collects event fields in recording order.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(text);
        } else {
            self.insert(field, Value::String(text));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.insert(field, Value::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }
}

// ============================================================================
// ISO 8601 timestamps
// ============================================================================

/// UTC timestamp rendered as `2024-01-15T10:30:00.123Z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Iso8601Timestamp {
    year: i64,
    month: u8,
    day: u8,
    hours: u8,
    minutes: u8,
    seconds: u8,
    millis: u16,
}

impl Iso8601Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::from_duration(now)
    }

    /// Time `duration` after the UNIX epoch.
    pub fn from_duration(duration: Duration) -> Self {
        let secs = duration.as_secs();
        let day_secs = secs % 86_400;
        let (year, month, day) = civil_from_days((secs / 86_400) as i64);

        Self {
            year,
            month,
            day,
            hours: (day_secs / 3600) as u8,
            minutes: ((day_secs % 3600) / 60) as u8,
            seconds: (day_secs % 60) as u8,
            millis: duration.subsec_millis() as u16,
        }
    }
}

impl fmt::Display for Iso8601Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            self.year, self.month, self.day, self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

/// Convert days since 1970-01-01 to a proleptic Gregorian (year, month, day).
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

use std::fmt;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::terminal::spinner::SpinnerWriter;

const LOG_ENV: &str = "GOKUBE_LOG";

/// Installs the global subscriber.
///
/// `GOKUBE_LOG` takes precedence; otherwise `--verbose` shows every
/// `VBoxManage` invocation and the default is `info`.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(GokubeFormatter)
                .with_writer(|| SpinnerWriter),
        )
        .init();
}

pub struct GokubeFormatter;

impl<S, N> FormatEvent<S, N> for GokubeFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = EventFields::default();
        event.record(&mut fields);

        if let Some(raw) = fields.raw_msg {
            return writeln!(writer, "{raw}");
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
            match (fields.status.as_deref(), *event.metadata().level()) {
                (Some("success"), _) => ("[+]", |s| s.green().bold()),
                (Some("warn"), _) | (_, Level::WARN) => ("[!]", |s| s.yellow().bold()),
                (_, Level::ERROR) => ("[-]", |s| s.red().bold()),
                (Some("info"), _) | (_, Level::INFO) => ("[*]", |s| s.cyan().bold()),
                (_, Level::DEBUG) => ("[?]", |s| s.blue()),
                (_, Level::TRACE) => ("[ ]", |s| s.dimmed()),
            };

        write!(writer, "{} {}", color_func(symbol.into()), fields.message)?;
        for (name, value) in &fields.extra {
            write!(writer, " {}={}", name.dimmed(), value)?;
        }
        writeln!(writer)
    }
}

/// The fields the formatter cares about, pulled out of an event.
#[derive(Default)]
struct EventFields {
    status: Option<String>,
    raw_msg: Option<String>,
    message: String,
    extra: Vec<(&'static str, String)>,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "status" => self.status = Some(value.to_string()),
            "raw_msg" => self.raw_msg = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            name => self.extra.push((name, value.to_string())),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            name => self.extra.push((name, format!("{value:?}"))),
        }
    }
}

//! Logging integration that renders `log` records as chat text.
//!
//! [`ChatLogger`] turns each record into a [`Node`] (timestamp, colored level
//! tag, optional target, message) and hands it to a sink, which can forward
//! it to players as JSON or legacy text.
//!
//! Optional tracing integration is available via `ChatTracingLayer` when the
//! `tracing` feature is enabled.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use chat_text::logging::ChatLogger;
//! use log::{Level, Log, Record};
//!
//! let lines = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&lines);
//! let logger = ChatLogger::new(move |node| {
//!     sink.lock().unwrap().push(node.to_legacy_string(None));
//! })
//! .show_time(false);
//!
//! logger.log(&Record::builder().level(Level::Warn).args(format_args!("low tps")).build());
//! assert_eq!(lines.lock().unwrap()[0], "\u{a7}eWARN  low tps");
//! ```

use std::sync::Arc;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::color::Color;
use crate::formatting::{CombinedFormatting, Formatting};
use crate::node::{GroupNode, Node, StringNode};

/// Receives every rendered log line.
pub type LogSink = Arc<dyn Fn(&Node) + Send + Sync>;

/// Chat-text logger for the `log` crate.
///
/// # Thread Safety
///
/// `ChatLogger` holds no mutable state. The sink is called from whichever
/// thread logs, so it must do its own synchronization.
pub struct ChatLogger {
    sink: LogSink,
    level: LevelFilter,
    show_time: bool,
    show_level: bool,
    show_target: bool,
    time_format: OwnedFormatItem,
}

impl ChatLogger {
    /// Create a new `ChatLogger` with default settings.
    #[must_use]
    pub fn new(sink: impl Fn(&Node) + Send + Sync + 'static) -> Self {
        let time_format = time::format_description::parse_owned::<2>("[hour]:[minute]:[second]")
            .unwrap_or_else(|_| OwnedFormatItem::Literal(Vec::<u8>::new().into_boxed_slice()));
        Self {
            sink: Arc::new(sink),
            level: LevelFilter::Info,
            show_time: true,
            show_level: true,
            show_target: false,
            time_format,
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Enable or disable log levels.
    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Enable or disable the record target.
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Override time format. Invalid formats are ignored.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Install as the global logger.
    ///
    /// # Errors
    ///
    /// Returns an error if a global logger is already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    fn level_color(level: Level) -> Color {
        match level {
            Level::Trace => Color::DARK_GRAY,
            Level::Debug => Color::BLUE,
            Level::Info => Color::GREEN,
            Level::Warn => Color::YELLOW,
            Level::Error => Color::RED,
        }
    }

    fn level_style(level: Level) -> Option<CombinedFormatting> {
        match level {
            Level::Error => Some(Formatting::Bold.into()),
            _ => None,
        }
    }

    /// Render a record as a chat line.
    #[must_use]
    pub fn format_record(&self, record: &Record<'_>) -> Node {
        self.format_line(
            record.level(),
            record.target(),
            vec![Node::from(record.args().to_string())],
        )
    }

    /// Prefix `body` with the enabled timestamp, level and target parts.
    fn format_line(&self, level: Level, target: &str, body: Vec<Node>) -> Node {
        let mut parts: Vec<Node> = Vec::with_capacity(4 + body.len());

        if self.show_time {
            parts.push(
                StringNode::new(format!("[{}] ", self.format_time()))
                    .with_color(Color::GRAY)
                    .into(),
            );
        }

        if self.show_level {
            let mut tag = StringNode::new(format!("{level:<5}")).with_color(Self::level_color(level));
            if let Some(style) = Self::level_style(level) {
                tag = tag.with_style(style);
            }
            parts.push(tag.into());
            parts.push(Node::from(" "));
        }

        if self.show_target && !target.is_empty() {
            parts.push(
                StringNode::new(format!("{target}: "))
                    .with_color(Color::DARK_GRAY)
                    .into(),
            );
        }

        parts.extend(body);
        GroupNode::new(parts).into()
    }
}

impl Log for ChatLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_record(record);
        (self.sink)(&line);
    }

    fn flush(&self) {}
}

#[cfg(feature = "tracing")]
mod tracing_integration {
    use super::ChatLogger;
    use crate::color::Color;
    use crate::formatting::Formatting;
    use crate::node::{Node, StringNode};
    use log::Level;
    use std::fmt::Debug;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level as TracingLevel, Subscriber};
    use tracing_subscriber::{Layer, layer::Context};

    /// Tracing layer that renders events as chat lines.
    ///
    /// The message becomes plain text. Every other field is appended as a
    /// dark aqua `key=` followed by its value.
    pub struct ChatTracingLayer {
        logger: ChatLogger,
    }

    impl ChatTracingLayer {
        #[must_use]
        pub fn new(sink: impl Fn(&Node) + Send + Sync + 'static) -> Self {
            Self {
                logger: ChatLogger::new(sink),
            }
        }

        /// Use an existing logger's level, toggles and time format.
        #[must_use]
        pub fn with_logger(logger: ChatLogger) -> Self {
            Self { logger }
        }

        /// Render an event's fields as chat nodes.
        fn event_body(event: &Event<'_>) -> Vec<Node> {
            let mut fields = FieldNodes::default();
            event.record(&mut fields);

            let mut body = Vec::with_capacity(1 + fields.fields.len() * 3);
            if let Some(message) = fields.message {
                body.push(Node::from(message));
            }
            for (name, value) in fields.fields {
                if !body.is_empty() {
                    body.push(Node::from(" "));
                }
                body.push(
                    StringNode::new(format!("{name}="))
                        .with_color(Color::DARK_AQUA)
                        .into(),
                );
                body.push(value);
            }
            body
        }
    }

    #[derive(Default)]
    struct FieldNodes {
        message: Option<String>,
        fields: Vec<(&'static str, Node)>,
    }

    impl FieldNodes {
        fn push(&mut self, field: &Field, value: Node) {
            self.fields.push((field.name(), value));
        }
    }

    impl Visit for FieldNodes {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.message = Some(value.to_string());
            } else {
                self.push(field, Node::from(value));
            }
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            let color = if value { Color::GREEN } else { Color::RED };
            self.push(field, StringNode::new(value.to_string()).with_color(color).into());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.push(
                field,
                StringNode::new(value.to_string())
                    .with_color(Color::RED)
                    .with_style(Formatting::Italic)
                    .into(),
            );
        }

        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            if field.name() == "message" {
                self.message = Some(format!("{value:?}"));
            } else {
                self.push(field, Node::from(format!("{value:?}")));
            }
        }
    }

    impl<S> Layer<S> for ChatTracingLayer
    where
        S: Subscriber,
    {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            let level = match *metadata.level() {
                TracingLevel::TRACE => Level::Trace,
                TracingLevel::DEBUG => Level::Debug,
                TracingLevel::INFO => Level::Info,
                TracingLevel::WARN => Level::Warn,
                TracingLevel::ERROR => Level::Error,
            };
            if level > self.logger.level {
                return;
            }

            let line = self
                .logger
                .format_line(level, metadata.target(), Self::event_body(event));
            (self.logger.sink)(&line);
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::client::Client;
        use serde_json::json;
        use std::sync::{Arc, Mutex};
        use tracing_subscriber::prelude::*;

        fn capture(emit: impl FnOnce()) -> Vec<Node> {
            let lines = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&lines);
            let logger = ChatLogger::new(move |node: &Node| sink.lock().unwrap().push(node.clone()))
                .show_time(false);
            let subscriber = tracing_subscriber::registry().with(ChatTracingLayer::with_logger(logger));

            tracing::subscriber::with_default(subscriber, emit);

            let lines = lines.lock().unwrap();
            lines.clone()
        }

        #[test]
        fn test_layer_renders_message_and_fields() {
            let lines = capture(|| {
                tracing::info!(world = "nether", "portal lit");
                tracing::debug!("filtered");
            });

            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].to_plain_string(None), "INFO  portal lit world=nether");
            assert_eq!(
                lines[0].to_legacy_string(None),
                "\u{a7}aINFO  portal lit \u{a7}3world=nether"
            );
        }

        #[test]
        fn test_layer_field_json() {
            let lines = capture(|| {
                tracing::warn!(online = false, players = 3, "tick lag");
            });

            assert_eq!(
                lines[0].to_json(Some(&Client::latest()), None),
                json!({"extra": [
                    {"text": "WARN ", "color": "yellow"},
                    " ",
                    "tick lag",
                    " ",
                    {"text": "online=", "color": "dark_aqua"},
                    {"text": "false", "color": "red"},
                    " ",
                    {"text": "players=", "color": "dark_aqua"},
                    "3",
                ]})
            );
        }

        #[test]
        fn test_layer_fields_without_message() {
            let lines = capture(|| {
                tracing::error!(code = 7);
            });

            assert_eq!(lines[0].to_plain_string(None), "ERROR code=7");
        }
    }
}

#[cfg(feature = "tracing")]
pub use tracing_integration::ChatTracingLayer;

//! Tracing output routed to the browser console

use std::io;

use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use wasm_bindgen::JsValue;

/// Receives one formatted event with its level
pub type Sink = fn(Level, &str);

/// Hands out one writer per event, tagged with the event's level
#[derive(Clone, Copy)]
pub struct ConsoleMakeWriter {
    sink: Sink,
}

impl ConsoleMakeWriter {
    pub fn new(sink: Sink) -> Self {
        Self { sink }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO, self.sink)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level(), self.sink)
    }
}

/// Buffers one event and passes it to the sink when dropped
pub struct ConsoleWriter {
    level: Level,
    sink: Sink,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level, sink: Sink) -> Self {
        Self {
            level,
            sink,
            buf: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            (self.sink)(self.level, line);
        }
    }
}

/// `console.error` for errors, `console.warn` for warnings
pub fn browser_console(level: Level, line: &str) {
    let line = JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        Level::INFO => web_sys::console::info_1(&line),
        _ => web_sys::console::debug_1(&line),
    }
}

/// Plain-text fmt layer writing to `sink`. No timestamps: wasm32 has no
/// system clock for the default timer.
pub fn layer<S>(sink: Sink) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_writer(ConsoleMakeWriter::new(sink))
}

/// Install the console subscriber. Calling this twice keeps the first one.
pub fn init() {
    let result = tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(layer(browser_console))
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

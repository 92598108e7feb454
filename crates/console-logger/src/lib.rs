//! Console Logger
//!
//! `tracing` subscriber whose formatted lines go to `console.*` in the browser
//! (stderr on native targets), one console call per event at the event's level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Buffers one formatted event and emits it on flush or drop
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self { level, buf: Vec::new() }
    }

    fn emit(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        write_line(self.level, line.trim_end());
        self.buf.clear();
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        self.emit();
    }
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let message = JsValue::from_str(line);
    match level {
        Level::ERROR => console::error_1(&message),
        Level::WARN => console::warn_1(&message),
        Level::INFO => console::info_1(&message),
        _ => console::debug_1(&message),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: Level, line: &str) {
    eprintln!("{line}");
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Parse a level name, defaulting to `INFO`
pub fn parse_level(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::INFO)
}

/// Install the global subscriber. Returns `false` if one was already set.
pub fn init(max_level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(MakeConsoleWriter)
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_writer_buffers_until_flush() {
        let mut writer = ConsoleWriter::new(Level::WARN);
        writer.write_all(b"INFO shop_ui: ").unwrap();
        writer.write_all(b"bound 3 controls\n").unwrap();
        assert_eq!(writer.buf, b"INFO shop_ui: bound 3 controls\n");

        writer.flush().unwrap();
        assert!(writer.buf.is_empty());
    }

    #[test]
    fn test_writer_takes_event_level() {
        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            let warn = tracing::warn_span!("settle");
            let error = tracing::error_span!("send");
            let meta = warn.metadata().expect("registry enables every span");
            assert_eq!(MakeConsoleWriter.make_writer_for(meta).level, Level::WARN);
            let meta = error.metadata().expect("registry enables every span");
            assert_eq!(MakeConsoleWriter.make_writer_for(meta).level, Level::ERROR);
        });
    }

    #[test]
    fn test_make_writer_defaults_to_info() {
        let writer = MakeConsoleWriter.make_writer();
        assert_eq!(writer.level, Level::INFO);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level(" WARN "), Level::WARN);
        assert_eq!(parse_level("loud"), Level::INFO);
    }

    #[test]
    fn test_second_init_is_refused() {
        init(Level::DEBUG);
        assert!(!init(Level::DEBUG));
    }
}

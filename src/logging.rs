use std::io;
use std::sync::Once;

use tracing::{level_filters::LevelFilter, Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

static INIT: Once = Once::new();

/// Routes `tracing` output to the browser console. Only the first call
/// installs the subscriber; later tables share it.
pub fn init(max_level: LevelFilter) {
    INIT.call_once(|| {
        let installed = tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter)
            .with_max_level(max_level)
            .without_time()
            .with_ansi(false)
            .with_target(false)
            .try_init();
        if let Err(err) = installed {
            web_sys::console::warn_1(&JsValue::from_str(&format!("Logging not installed: {err}")));
        }
    });
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

fn console_method(level: &Level) -> ConsoleMethod {
    match *level {
        Level::ERROR => ConsoleMethod::Error,
        Level::WARN => ConsoleMethod::Warn,
        Level::INFO => ConsoleMethod::Info,
        _ => ConsoleMethod::Debug,
    }
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(ConsoleMethod::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(console_method(meta.level()))
    }
}

/// Buffers one formatted event and hands it to the console when dropped.
struct ConsoleWriter {
    method: ConsoleMethod,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(method: ConsoleMethod) -> Self {
        ConsoleWriter {
            method,
            buf: Vec::new(),
        }
    }

    fn line(&self) -> Option<String> {
        let text = String::from_utf8_lossy(&self.buf);
        let text = text.trim_end();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(line) = self.line() else {
            return;
        };
        let message = JsValue::from_str(&line);
        match self.method {
            ConsoleMethod::Error => web_sys::console::error_1(&message),
            ConsoleMethod::Warn => web_sys::console::warn_1(&message),
            ConsoleMethod::Info => web_sys::console::info_1(&message),
            ConsoleMethod::Debug => web_sys::console::debug_1(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn levels_pick_console_method() {
        assert_eq!(console_method(&Level::ERROR), ConsoleMethod::Error);
        assert_eq!(console_method(&Level::WARN), ConsoleMethod::Warn);
        assert_eq!(console_method(&Level::INFO), ConsoleMethod::Info);
        assert_eq!(console_method(&Level::DEBUG), ConsoleMethod::Debug);
        assert_eq!(console_method(&Level::TRACE), ConsoleMethod::Debug);
    }

    #[test]
    fn writer_collects_one_trimmed_line() {
        let mut writer = ConsoleWriter::new(ConsoleMethod::Info);
        write!(writer, " INFO round started").unwrap();
        writer.write_all(b" cards=52\n").unwrap();
        assert_eq!(writer.line().as_deref(), Some(" INFO round started cards=52"));
        // Dropping would call into the browser console.
        writer.buf.clear();
    }

    #[test]
    fn blank_output_is_skipped() {
        let mut writer = ConsoleWriter::new(ConsoleMethod::Debug);
        writer.write_all(b"\n").unwrap();
        assert_eq!(writer.line(), None);
        writer.buf.clear();
    }
}

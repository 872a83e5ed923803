//! Diagnostic logging.
//!
//! The engine emits `tracing` events; this module installs a fmt subscriber
//! that routes them to the browser console on wasm32 and to stderr elsewhere.

use tracing::Level;

/// Install the global subscriber. Later calls are no-ops.
pub fn init(max_level: Level) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(false)
        .with_ansi(false)
        .without_time();

    #[cfg(target_arch = "wasm32")]
    let result = builder.with_writer(console::MakeConsoleWriter).try_init();

    #[cfg(not(target_arch = "wasm32"))]
    let result = builder.with_writer(std::io::stderr).try_init();

    // A subscriber installed by the host application takes precedence.
    let _ = result;
}

/// Parse a level name (`"trace"`, `"debug"`, ...), falling back to `INFO`.
pub fn parse_level(name: &str) -> Level {
    name.parse().unwrap_or(Level::INFO)
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use wasm_bindgen::JsValue;
    use tracing_subscriber::fmt::MakeWriter;

    /// Creates one [`ConsoleWriter`] per event.
    pub(super) struct MakeConsoleWriter;

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter(Vec::with_capacity(128))
        }
    }

    /// Buffers one formatted event and logs it to the console on drop.
    pub(super) struct ConsoleWriter(Vec<u8>);

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.0);
            let line = line.trim_end();
            if !line.is_empty() {
                web_sys::console::log_1(&JsValue::from_str(line));
            }
        }
    }
}

//! Console appender implementation

use crate::core::LogLevel;
use colored::{Color, Colorize};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

type Target = Box<dyn Write + Send>;

/// Writes colored lines to standard output, and the logger's own
/// diagnostics to standard output or standard error.
///
/// Console output is best-effort: write errors are swallowed and never
/// stop later writes.
pub struct ConsoleAppender {
    out: Target,
    err: Target,
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            use_colors: true,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Send both streams to one writer, e.g. a [`CaptureBuffer`].
    ///
    /// # Example
    ///
    /// ```
    /// use leveled_logger::appenders::{CaptureBuffer, ConsoleAppender};
    /// use leveled_logger::LogLevel;
    ///
    /// let buffer = CaptureBuffer::new();
    /// let mut console = ConsoleAppender::with_writer(buffer.clone()).colors(false);
    /// console.append(LogLevel::Info, "hello");
    /// assert_eq!(buffer.contents(), "hello\n");
    /// ```
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        let shared = SharedTarget(Arc::new(Mutex::new(Box::new(writer) as Target)));
        Self {
            out: Box::new(shared.clone()),
            err: Box::new(shared),
            use_colors: true,
        }
    }

    /// Separate writers for regular output and error notices
    pub fn with_writers<O, E>(out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            out: Box::new(out),
            err: Box::new(err),
            use_colors: true,
        }
    }

    #[must_use]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn set_colors(&mut self, use_colors: bool) {
        self.use_colors = use_colors;
    }

    /// Write a formatted record line in its level's color.
    pub fn append(&mut self, level: LogLevel, line: &str) {
        let output = self.paint(line, level.color_code());
        let _ = writeln!(self.out, "{}", output);
        let _ = self.out.flush();
    }

    /// An informational notice from the logger itself, on the output stream.
    pub fn notice(&mut self, message: &str) {
        let output = self.paint(message, Color::Yellow);
        let _ = writeln!(self.out, "{}", output);
        let _ = self.out.flush();
    }

    /// A failure notice from the logger itself, on the error stream.
    pub fn error_notice(&mut self, message: &str) {
        let output = self.paint(message, Color::Red);
        let _ = writeln!(self.err, "{}", output);
        let _ = self.err.flush();
    }

    pub fn flush(&mut self) {
        let _ = self.out.flush();
        let _ = self.err.flush();
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
struct SharedTarget(Arc<Mutex<Target>>);

impl Write for SharedTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().flush()
    }
}

/// An in-memory console target whose clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

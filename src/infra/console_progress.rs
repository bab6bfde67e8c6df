use std::io::{self, Write};
use std::sync::Mutex;

use crate::app::ports::ProgressPort;

type Sink = Mutex<Box<dyn Write + Send>>;

/// Prints progress lines for whoever is watching the run. Errors go to stderr.
pub struct ConsoleProgress {
    out: Sink,
    err: Sink,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_writers(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    fn write_line(sink: &Sink, message: &str) {
        if let Ok(mut writer) = sink.lock() {
            let _ = writeln!(writer, "{}", message);
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressPort for ConsoleProgress {
    fn info(&self, message: &str) {
        Self::write_line(&self.out, message);
    }

    fn error(&self, message: &str) {
        Self::write_line(&self.err, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_errors_and_info_use_separate_streams() {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let progress = ConsoleProgress::with_writers(Box::new(out.clone()), Box::new(err.clone()));

        progress.info("📺 Expanding: Bluey");
        progress.error("❌ No results found on IMDb.");

        assert_eq!(out.contents(), "📺 Expanding: Bluey\n");
        assert_eq!(err.contents(), "❌ No results found on IMDb.\n");
    }
}

use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use backtrace::Backtrace;
use serde::Serialize;
use slog::{Drain, Logger, error, o};

const MAX_FRAMES: usize = 16;

#[derive(Serialize, Debug)]
pub struct StackFrame {
    func: String,
    source: String,
    line: u32,
}

/// Captures the current call stack, keeping the last two path components of
/// each source file.
fn marshal_stack() -> Vec<StackFrame> {
    let bt = Backtrace::new();
    let mut frames = Vec::new();

    for frame in bt.frames() {
        for symbol in frame.symbols() {
            let func = symbol
                .name()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unknown".to_owned());
            let source = symbol
                .filename()
                .map(short_path)
                .unwrap_or_else(|| "unknown".to_owned());
            let line = symbol.lineno().unwrap_or(0);

            frames.push(StackFrame { func, source, line });
            if frames.len() == MAX_FRAMES {
                return frames;
            }
        }
    }
    frames
}

fn short_path(path: &Path) -> String {
    match (path.parent().and_then(|p| p.file_name()), path.file_name()) {
        (Some(parent), Some(file)) => {
            format!("{}/{}", parent.to_string_lossy(), file.to_string_lossy())
        }
        _ => path.to_string_lossy().into_owned(),
    }
}

/// Renders an error message and a stack capture for a log record.
pub fn fmt_err(err: &dyn Error) -> (String, String) {
    let stack = serde_json::to_string(&marshal_stack()).unwrap_or_default();
    (err.to_string(), stack)
}

/// JSON logger writing to stderr. Stdout carries command output only.
pub fn get_logger() -> Logger {
    logger_to(io::stderr())
}

/// JSON logger writing to an arbitrary sink.
pub fn logger_to<W: Write + Send + 'static>(writer: W) -> Logger {
    let drain = slog_json::Json::default(writer).fuse();
    let drain = Mutex::new(drain).fuse();
    Logger::root(drain, o!("app" => "wavefft"))
}

/// Logs `err` at error level with its message and stack trace attached.
pub fn error_context(logger: &Logger, context: &str, err: &dyn Error) {
    let (message, stack) = fmt_err(err);
    error!(logger, "{}", context; "error" => message, "stack_trace" => stack);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FftError;
    use std::sync::Arc;

    #[test]
    fn test_fmt_err_carries_message() {
        let err = FftError::InvalidInput { len: 6 };
        let (message, stack) = fmt_err(&err);
        assert_eq!(message, "length must be a power of two (got 6)");
        assert!(stack.starts_with('['));
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_logger_to_writes_json_records() {
        let buf = SharedBuf::default();
        let logger = logger_to(buf.clone());
        slog::info!(logger, "loaded audio"; "samples" => 8usize);

        let written = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let record: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
        assert_eq!(record["msg"], "loaded audio");
        assert_eq!(record["samples"], 8);
        assert_eq!(record["app"], "wavefft");
    }

    #[test]
    fn test_short_path() {
        assert_eq!(short_path(Path::new("/a/b/src/fft.rs")), "src/fft.rs");
        assert_eq!(short_path(Path::new("fft.rs")), "fft.rs");
    }
}

//! Rotating file appender with size-based rotation
//!
//! The appender owns one open log file at a time. Before each line it checks
//! the running byte count of that file against the size limit and, when the
//! limit has been reached, rotates to `<stem>_part<N>.txt` in the same
//! directory. Any open, write or rotation failure moves it to
//! [`FileState::Failed`], after which it refuses all writes until
//! [`RotatingFileAppender::reinitialize`] is called.
//!
//! The appender does no locking of its own; the owning logger serializes
//! access to it.

use crate::core::config::{APPEND_FILE_NAME, LOG_FILE_EXTENSION, SESSION_FILE_PREFIX};
use crate::core::error::{LoggerError, Result};
use crate::core::timestamp::{Clock, FILE_STAMP_PATTERN};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Lifecycle of the file destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// No file opened yet
    Uninitialized,
    /// A file is open and accepting lines
    Open,
    /// A failure disabled file output until the next reinitialization
    Failed,
    /// Closed by the owner
    Closed,
}

/// Result of a successful [`RotatingFileAppender::write_line`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Path of the file rotated to before this line was written
    pub rotated_to: Option<PathBuf>,
}

/// Size-rotating log file
///
/// # Examples
///
/// ```no_run
/// use leveled_logger::appenders::RotatingFileAppender;
/// use leveled_logger::SystemClock;
/// use std::sync::Arc;
///
/// let mut appender = RotatingFileAppender::new("logs", true, 64 * 1024, Arc::new(SystemClock));
/// appender.open().unwrap();
/// appender.write_line("first line").unwrap();
/// appender.close().unwrap();
/// ```
pub struct RotatingFileAppender {
    log_dir: PathBuf,
    append: bool,
    max_bytes: u64,
    clock: Arc<dyn Clock>,
    /// File name without extension of part 0 of the current session
    stem: String,
    path: Option<PathBuf>,
    writer: Option<BufWriter<File>>,
    current_size: u64,
    part_index: u32,
    state: FileState,
}

impl RotatingFileAppender {
    /// Create an appender; no file is touched until [`open`](Self::open)
    /// or the first write.
    pub fn new(
        log_dir: impl Into<PathBuf>,
        append: bool,
        max_bytes: u64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            log_dir: log_dir.into(),
            append,
            max_bytes: max_bytes.max(1),
            clock,
            stem: String::new(),
            path: None,
            writer: None,
            current_size: 0,
            part_index: 0,
            state: FileState::Uninitialized,
        }
    }

    /// Open part 0 of a new session.
    ///
    /// Append mode reuses `log.txt`; otherwise a fresh `log_YYYYMMDD_HHMMSS.txt`
    /// is truncated and used.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::FileOpen`] if the directory or file cannot be
    /// created; the appender is then [`FileState::Failed`].
    pub fn open(&mut self) -> Result<()> {
        self.stem = if self.append {
            Path::new(APPEND_FILE_NAME)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| APPEND_FILE_NAME.to_string())
        } else {
            format!(
                "{}{}",
                SESSION_FILE_PREFIX,
                self.clock.format_now(FILE_STAMP_PATTERN)
            )
        };
        self.part_index = 0;
        let path = self.part_path(0);

        if let Err(e) = fs::create_dir_all(&self.log_dir) {
            self.state = FileState::Failed;
            return Err(LoggerError::file_open(&self.log_dir, e));
        }

        match Self::open_file(&path, self.append) {
            Ok((file, size)) => {
                self.writer = Some(BufWriter::new(file));
                self.current_size = size;
                self.path = Some(path);
                self.state = FileState::Open;
                Ok(())
            }
            Err(e) => {
                self.state = FileState::Failed;
                Err(LoggerError::file_open(&path, e))
            }
        }
    }

    /// Write one line plus terminator and flush it, rotating first if the
    /// current file has reached the size limit.
    ///
    /// A closed or failed appender ignores the line.
    ///
    /// # Errors
    ///
    /// Any open, rotation or write error; the appender is then
    /// [`FileState::Failed`].
    pub fn write_line(&mut self, line: &str) -> Result<WriteOutcome> {
        let mut outcome = WriteOutcome::default();
        match self.state {
            FileState::Failed | FileState::Closed => return Ok(outcome),
            FileState::Uninitialized => self.open()?,
            FileState::Open => {}
        }

        if self.current_size >= self.max_bytes {
            match self.rotate() {
                Ok(new_path) => outcome.rotated_to = Some(new_path),
                Err(e) => {
                    self.fail();
                    return Err(e);
                }
            }
        }

        let path = self.path.clone().unwrap_or_default();
        let Some(writer) = self.writer.as_mut() else {
            self.fail();
            return Err(LoggerError::file_write(
                &path,
                std::io::Error::other("writer not initialized"),
            ));
        };

        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        let written = writer.write_all(&bytes).and_then(|()| writer.flush());

        match written {
            Ok(()) => {
                self.current_size += bytes.len() as u64;
                Ok(outcome)
            }
            Err(e) => {
                self.fail();
                Err(LoggerError::file_write(&path, e))
            }
        }
    }

    /// Close the current file and continue in the next part.
    fn rotate(&mut self) -> Result<PathBuf> {
        let old_path = self.path.clone().unwrap_or_default();
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .map_err(|e| LoggerError::file_rotation(&old_path, e))?;
        }

        self.part_index += 1;
        let new_path = self.part_path(self.part_index);
        let (file, size) = Self::open_file(&new_path, self.append)
            .map_err(|e| LoggerError::file_rotation(&new_path, e))?;

        self.writer = Some(BufWriter::new(file));
        self.current_size = size;
        self.path = Some(new_path.clone());
        Ok(new_path)
    }

    /// Drop the current file, clear any failure and start a new session at
    /// part 0 in the given mode.
    ///
    /// With `open_now` false the file is opened lazily by the next write.
    pub fn reinitialize(&mut self, append: bool, open_now: bool) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
        self.append = append;
        self.part_index = 0;
        self.current_size = 0;
        self.path = None;
        self.state = FileState::Uninitialized;
        if open_now {
            self.open()?;
        }
        Ok(())
    }

    /// Flush and release the current file. Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the flush error; the file is released regardless.
    pub fn close(&mut self) -> Result<()> {
        if self.state != FileState::Failed {
            self.state = FileState::Closed;
        }
        match self.writer.take() {
            Some(mut writer) => writer.flush().map_err(|e| {
                LoggerError::io_operation(
                    "closing log file",
                    self.path
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                    e,
                )
            }),
            None => Ok(()),
        }
    }

    fn fail(&mut self) {
        self.writer = None;
        self.state = FileState::Failed;
    }

    fn part_path(&self, index: u32) -> PathBuf {
        let name = if index == 0 {
            format!("{}.{}", self.stem, LOG_FILE_EXTENSION)
        } else {
            format!("{}_part{}.{}", self.stem, index, LOG_FILE_EXTENSION)
        };
        self.log_dir.join(name)
    }

    /// Open for appending or truncating and report the starting size.
    fn open_file(path: &Path, append: bool) -> std::io::Result<(File, u64)> {
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        let file = options.open(path)?;
        let size = if append { file.metadata()?.len() } else { 0 };
        Ok((file, size))
    }

    pub fn state(&self) -> FileState {
        self.state
    }

    /// Path of the file currently written to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn part_index(&self) -> u32 {
        self.part_index
    }

    /// Bytes in the current file, counted exactly as lines are written
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Takes effect at the next write; zero is raised to one byte.
    pub fn set_max_bytes(&mut self, max_bytes: u64) {
        self.max_bytes = max_bytes.max(1);
    }

    pub fn is_append(&self) -> bool {
        self.append
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

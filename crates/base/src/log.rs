use {
    anyhow::{Context, Result, bail},
    std::{
        fmt,
        fs::{File, OpenOptions, create_dir_all},
        io::Write,
        path::Path,
        str::FromStr,
        sync::{
            Arc, Mutex,
            atomic::{AtomicU8, Ordering},
        },
        time::{SystemTime, UNIX_EPOCH},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Warn => write!(f, "WARN"),
            Level::Error => write!(f, "ERROR"),
            Level::Fatal => write!(f, "FATAL"),
        }
    }
}

impl FromStr for Level {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            other => bail!("unknown log level: {other}"),
        }
    }
}

pub trait Logger: Send + Sync {
    fn log(&self, level: Level, file: &str, line: usize, message: &str);
}

pub static LOGGER: Mutex<Option<Box<dyn Logger>>> = Mutex::new(None);

static MAX_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

pub fn set_max_level(level: Level) {
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn enabled(level: Level) -> bool {
    level as u8 >= MAX_LEVEL.load(Ordering::Relaxed)
}

/// Route one record to the installed logger. Used by the `log_*!` macros.
pub fn emit(level: Level, file: &str, line: usize, args: fmt::Arguments<'_>) {
    if !enabled(level) {
        return;
    }
    let guard = LOGGER.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(logger) = guard.as_ref() {
        logger.log(level, file, line, &args.to_string());
    }
}

pub fn format_timestamp() -> String {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = elapsed.as_secs();
    let (year, month, day) = civil_from_days((secs / 86400) as i64);
    let time_of_day = secs % 86400;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60,
        elapsed.subsec_millis()
    )
}

fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

fn format_line(level: Level, file: &str, line: usize, message: &str) -> String {
    format!(
        "[{}:{} - {}:{}] {}",
        level,
        format_timestamp(),
        file,
        line,
        message
    )
}

/// Writes to stderr so stdout stays free for machine-readable output.
pub struct StderrLogger;

impl Logger for StderrLogger {
    fn log(&self, level: Level, file: &str, line: usize, message: &str) {
        eprintln!("{}", format_line(level, file, line, message));
    }
}

pub struct FileLogger {
    file: Mutex<File>,
}

impl FileLogger {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        Ok(FileLogger {
            file: Mutex::new(file),
        })
    }
}

impl Logger for FileLogger {
    fn log(&self, level: Level, file: &str, line: usize, message: &str) {
        let log_line = format_line(level, file, line, message);
        let mut handle = self.file.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(error) = writeln!(handle, "{}", log_line) {
            eprintln!("Failed to write to log file: {}", error);
            eprintln!("{}", log_line);
        }
    }
}

/// Keeps every formatted record in memory; handy for asserting on log output.
#[derive(Clone, Default)]
pub struct MemoryLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, _file: &str, _line: usize, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(format!("{} {}", level, message));
    }
}

pub fn install_logger(logger: Box<dyn Logger>, level: Level) {
    LOGGER.lock().unwrap_or_else(|e| e.into_inner()).replace(logger);
    set_max_level(level);
}

pub fn init_stderr_logger(level: Level) {
    install_logger(Box::new(StderrLogger), level);
}

pub fn init_file_logger(path: impl AsRef<Path>, level: Level) -> Result<()> {
    install_logger(Box::new(FileLogger::new(path)?), level);
    Ok(())
}

/// Read the level from environment variable `var`, falling back to Info
/// when it is unset. An unparsable value is an error.
pub fn level_from_env(var: &str) -> Result<Level> {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("invalid value for {var}")),
        Err(_) => Ok(Level::Info),
    }
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{ $crate::log::emit($crate::log::Level::Debug, file!(), line!() as usize, format_args!($($arg)*)); }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{ $crate::log::emit($crate::log::Level::Info, file!(), line!() as usize, format_args!($($arg)*)); }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{ $crate::log::emit($crate::log::Level::Warn, file!(), line!() as usize, format_args!($($arg)*)); }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{ $crate::log::emit($crate::log::Level::Error, file!(), line!() as usize, format_args!($($arg)*)); }};
}

#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {{ let message = format_args!($($arg)*).to_string(); $crate::log::emit($crate::log::Level::Fatal, file!(), line!() as usize, format_args!("{}", message)); eprintln!("FATAL ERROR: {}", message); std::process::exit(1); }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_civil_from_days_epoch() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn test_civil_from_days_leap_year() {
        assert_eq!(civil_from_days(11016), (2000, 2, 29));
    }

    #[test]
    fn test_format_timestamp_structure() {
        let ts = format_timestamp();
        // YYYY-MM-DDTHH:MM:SS.mmmZ
        assert_eq!(ts.len(), 24);
        assert_eq!(&ts[10..11], "T");
        assert_eq!(&ts[19..20], ".");
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Error < Level::Fatal);
    }
}

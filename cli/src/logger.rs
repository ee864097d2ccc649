use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use mousebind_core::paths;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Colors used for module targets, cycled in order of first appearance
const TARGET_COLORS: &[Color] = &[
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

pub struct MousebindLogger {
    level: LevelFilter,
    log_file: Mutex<Option<File>>,
    target_colors: Mutex<HashMap<String, Color>>,
}

impl MousebindLogger {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let level = if quiet {
            LevelFilter::Info
        } else if verbose {
            LevelFilter::Trace
        } else {
            LevelFilter::Debug
        };

        let log_file = paths::log_file_path().and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .map_err(|e| eprintln!("Warning: Failed to open log file at {:?}: {}", path, e))
                .ok()
        });

        Self {
            level,
            log_file: Mutex::new(log_file),
            target_colors: Mutex::new(HashMap::new()),
        }
    }

    fn color_for_target(&self, target: &str) -> Color {
        let mut colors = self
            .target_colors
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let next = colors.len() % TARGET_COLORS.len();
        *colors
            .entry(target.to_string())
            .or_insert(TARGET_COLORS[next])
    }

    fn format(&self, record: &Record, colored: bool) -> String {
        let level = level_tag(record.level());
        let target = short_target(record.target());

        if !colored {
            return match target {
                Some(target) => format!("{} [{}] {}", level, target, record.args()),
                None => format!("{} {}", level, record.args()),
            };
        }

        let target = target
            .map(|t| format!(" [{}]", t.color(self.color_for_target(t)).dimmed()))
            .unwrap_or_default();
        match record.level() {
            Level::Error => format!("{}{} {}", level, target, record.args())
                .red()
                .bold()
                .to_string(),
            Level::Warn => format!("{}{} {}", level, target, record.args())
                .yellow()
                .bold()
                .to_string(),
            Level::Info => format!("{}{} {}", level.green().bold(), target, record.args()),
            Level::Debug => format!("{}{} {}", level.blue().bold(), target, record.args()),
            Level::Trace => format!("{}{} {}", level.white().bold(), target, record.args()),
        }
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "[E]",
        Level::Warn => "[W]",
        Level::Info => "[I]",
        Level::Debug => "[D]",
        Level::Trace => "[T]",
    }
}

fn short_target(target: &str) -> Option<&str> {
    if target.is_empty() {
        return None;
    }
    target.rsplit("::").next()
}

impl Log for MousebindLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        println!("{}", self.format(record, true));

        let mut file = self.log_file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = file.as_mut() {
            let _ = writeln!(file, "{}", self.format(record, false));
            let _ = file.flush();
        }
    }

    fn flush(&self) {}
}

pub fn init_logger(quiet: bool, verbose: bool) -> Result<(), log::SetLoggerError> {
    let logger = MousebindLogger::new(quiet, verbose);
    log::set_max_level(logger.level);
    log::set_boxed_logger(Box::new(logger))
}

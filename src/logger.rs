// src/logger.rs
//! `log` クレートのマクロ (`info!` など) の出力先。
//!
//! wasm32 ではブラウザのコンソールへ、それ以外 (テストやネイティブ) では標準エラーへ書くよ。

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// コンソールに書き出すだけのロガー。
pub struct ConsoleLogger {
    max_level: LevelFilter,
}

impl ConsoleLogger {
    pub const fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    fn format(record: &Record) -> String {
        match record.module_path() {
            Some(module) => format!("[{}] [{}] {}", record.level(), module, record.args()),
            None => format!("[{}] {}", record.level(), record.args()),
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        write_line(record.level(), &Self::format(record));
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: Level, line: &str) {
    let message = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&message),
        Level::Warn => web_sys::console::warn_1(&message),
        Level::Info => web_sys::console::info_1(&message),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: Level, line: &str) {
    eprintln!("{}", line);
}

#[cfg(debug_assertions)]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(not(debug_assertions))]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

static LOGGER: ConsoleLogger = ConsoleLogger::new(DEFAULT_LEVEL);

/// グローバルロガーを登録する。2 回目以降は `Err` が返るだけ。
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(DEFAULT_LEVEL);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::MetadataBuilder;

    #[test]
    fn respects_max_level() {
        let logger = ConsoleLogger::new(LevelFilter::Info);
        let info = MetadataBuilder::new().level(Level::Info).build();
        let debug = MetadataBuilder::new().level(Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn formats_level_and_module() {
        let record = Record::builder()
            .args(format_args!("dealt 52 cards"))
            .level(Level::Warn)
            .module_path(Some("ecs_klondike::systems"))
            .build();
        assert_eq!(ConsoleLogger::format(&record), "[WARN] [ecs_klondike::systems] dealt 52 cards");
    }

    #[test]
    fn init_twice_is_an_error_not_a_panic() {
        let _ = init();
        assert!(init().is_err());
    }
}

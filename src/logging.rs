//! `log` 파사드용 표준 오류 출력 로거.

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) || should_filter(record.target(), record.level()) {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        eprintln!(
            "[{timestamp}] {} - {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

// 외부 크레이트(egui, winit 등)는 경고 이상만 통과시킨다.
fn should_filter(target: &str, level: Level) -> bool {
    !target.starts_with(CRATE_TARGET) && level > Level::Warn
}

/// 전역 로거를 설치한다. 두 번째 호출은 오류를 돌려준다.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// 설정 문자열을 로그 레벨로 바꾼다. 알 수 없는 값은 `Warn`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Warn)
}

use std::sync::atomic::{AtomicU8, Ordering};

// ログの出力レベル 指定したレベル以上の重要度のメッセージのみ出力
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Off = 4,
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Warn as u8);

pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

#[inline]
pub fn is_enabled(level: LogLevel) -> bool {
    level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_with_level {
    ($level: expr, $tag: expr, $($arg:tt)*) => {
        if $crate::util::log::is_enabled($level) {
            eprintln!(
                "[{}]({}:{}) {}",
                $tag,
                file!(),
                line!(),
                format_args!($($arg)*)
            )
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log_with_level!($crate::util::log::LogLevel::Error, "ERROR", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log_with_level!($crate::util::log::LogLevel::Warn, "WARN", $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log_with_level!($crate::util::log::LogLevel::Info, "INFO", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log_with_level!($crate::util::log::LogLevel::Debug, "DEBUG", $($arg)*)
    };
}

#[test]
fn test_log_level_filter() {
    set_log_level(LogLevel::Error);
    assert!(is_enabled(LogLevel::Error));
    assert!(!is_enabled(LogLevel::Warn));
    set_log_level(LogLevel::Off);
    assert!(!is_enabled(LogLevel::Error));
    set_log_level(LogLevel::Warn);
    assert!(is_enabled(LogLevel::Warn));
    assert!(!is_enabled(LogLevel::Debug));
}

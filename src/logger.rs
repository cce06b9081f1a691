use std::sync::LazyLock;

static EVENTS_ENABLED: LazyLock<bool> = LazyLock::new(|| std::env::var("LOG_AUTOPILOT_EVENTS").is_ok());

/// Whether `event!` lines are printed, read once from `LOG_AUTOPILOT_EVENTS`.
pub fn events_enabled() -> bool { *EVENTS_ENABLED }

/// One colored, timestamped line. `$style` is an ANSI SGR code, `$tag` a five character label.
#[doc(hidden)]
#[macro_export]
macro_rules! log_line {
    ($style:literal, $tag:literal, $($arg:tt)*) => {
        println!(
            concat!("\x1b[", $style, "m[", $tag, "][{}]\x1b[0m {}"),
            chrono::Utc::now().format("%H:%M:%S"),
            format!($($arg)*)
        )
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::log_line!("32", "INFO ", $($arg)*) };
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => { $crate::log_line!("33", "LOG  ", $($arg)*) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::log_line!("35", "WARN ", $($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::log_line!("31", "ERROR", $($arg)*) };
}

/// Phase transitions of the flight plan, one line per transition.
#[macro_export]
macro_rules! phase {
    ($($arg:tt)*) => { $crate::log_line!("1;34", "PHASE", $($arg)*) };
}

/// Per-tick trace, only printed when `LOG_AUTOPILOT_EVENTS` is set.
#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if $crate::logger::events_enabled() {
            $crate::log_line!("36", "EVENT", $($arg)*)
        }
    };
}

/// Unrecoverable startup failures.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        panic!("\x1b[1;31m[FATAL][{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_every_level_formats_inline_arguments() {
        let phase = "GroundRoll";
        crate::info!("info {phase}");
        crate::log!("log {phase}");
        crate::warn!("warn {phase}");
        crate::error!("error {phase}");
        crate::phase!("phase {phase}");
        crate::event!("event {phase}");
        assert_eq!(super::events_enabled(), std::env::var("LOG_AUTOPILOT_EVENTS").is_ok());
    }

    #[test]
    #[should_panic(expected = "home runway missing: KSEA")]
    fn test_fatal_panics_with_message() { crate::fatal!("home runway missing: {}", "KSEA"); }
}

// logger.rs
//
// `log` facade backend.
// - bare metal + `log-serial`: lines go to COM1 as `[LEVEL target] message`
// - everything else (host tests, demo): records are formatted nowhere
//
// The VGA screen belongs to the game, so nothing is ever logged there.

use core::fmt::{self, Write};

use cfg_if::cfg_if;
use log::{Level, LevelFilter, Log, Metadata, Record};

const CRATE_PREFIX: &str = "snake_kernel_lib::";

pub struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

cfg_if! {
    if #[cfg(all(feature = "log-serial", target_os = "none", any(target_arch = "x86", target_arch = "x86_64")))] {
        use crate::arch::x86::serial;

        fn backend_init() {
            serial::init();
        }

        fn emit(args: fmt::Arguments) {
            serial::_print(args);
        }

        fn emit_critical(args: fmt::Arguments) {
            serial::_print_critical(args);
        }
    } else {
        fn backend_init() {}

        fn emit(_args: fmt::Arguments) {}

        fn emit_critical(_args: fmt::Arguments) {}
    }
}

/// Installs the logger once; later calls do nothing.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        backend_init();
        log::set_max_level(level);
    }
}

/// Formats one log line. Module paths lose the crate prefix.
pub fn write_record(
    out: &mut impl Write,
    level: Level,
    target: &str,
    args: fmt::Arguments,
) -> fmt::Result {
    let target = target.strip_prefix(CRATE_PREFIX).unwrap_or(target);
    writeln!(out, "[{:<5} {}] {}", level, target, args)
}

struct Emitter(fn(fmt::Arguments));

impl Write for Emitter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        (self.0)(format_args!("{}", s));
        Ok(())
    }
}

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = write_record(&mut Emitter(emit), record.level(), record.target(), *record.args());
    }

    fn flush(&self) {}
}

/// Panic path: bypasses the `log` machinery and any held port lock.
pub fn log_panic(args: fmt::Arguments) {
    let _ = write_record(&mut Emitter(emit_critical), Level::Error, "panic", args);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_line_format() {
        let mut out = String::new();
        write_record(
            &mut out,
            Level::Info,
            "snake_kernel_lib::game::runner",
            format_args!("game over: score {}", 3),
        )
        .unwrap();
        assert_eq!(out, "[INFO  game::runner] game over: score 3\n");
    }

    #[test]
    fn foreign_targets_are_kept() {
        let mut out = String::new();
        write_record(&mut out, Level::Warn, "panic", format_args!("x")).unwrap();
        assert_eq!(out, "[WARN  panic] x\n");
    }
}

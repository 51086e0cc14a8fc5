// Copyright (c) 2022 Huawei Technologies Co.,Ltd. All rights reserved.
//
// sysMaster is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan
// PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//         http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY
// KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO
// NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

//! Logging sink shared by the generator tools.
//!
//! The macros are the ones of the `log` facade, so callers write
//! `log::warn!(...)` no matter which targets were initialized.
pub mod logger;

/// reexport log::Log
pub use log::max_level;
pub use log::set_max_level;
pub use log::Log;
pub use log::{debug, error, info, log, trace, warn};
pub use log::{Level, LevelFilter};
pub use log::{Metadata, Record};

pub use logger::init_log;
pub use logger::parse_level;

/// Environment variable overriding the generator log level.
pub const LOG_LEVEL_ENV: &str = "SYSMASTER_LOG_LEVEL";

/// Initialize console logger.
pub fn init_log_to_console(name: &str, level: Level) {
    init_log(name, level, vec!["console"]);
}

/// Initialize kmsg logger.
pub fn init_log_to_kmsg(name: &str, level: Level) {
    init_log(name, level, vec!["kmsg"]);
}

/// Initialize kmsg and console logger.
pub fn init_log_to_kmsg_console(name: &str, level: Level) {
    init_log(name, level, vec!["kmsg", "console"]);
}

/// Set up logging for a generator.
///
/// Generators run before any logging daemon is available, so messages go to
/// the kernel log buffer and the console only. The level is taken from
/// `SYSMASTER_LOG_LEVEL`, falling back to `Info`.
pub fn log_setup_generator(name: &str) {
    init_log_to_kmsg_console(name, generator_log_level());
}

/// The level requested by `SYSMASTER_LOG_LEVEL`, `Info` if unset or invalid.
pub fn generator_log_level() -> Level {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(Level::Info)
}

#[cfg(test)]
mod tests {
    use crate::{generator_log_level, init_log, Level, LOG_LEVEL_ENV};

    #[test]
    fn test_init_log_to_console() {
        init_log("test", Level::Debug, vec!["console"]);
        crate::error!("hello, error!");
        crate::set_max_level(Level::Info.to_level_filter());
        crate::info!("hello, info!");
        crate::debug!("hello debug!"); /* Won't print */
        init_log("test", Level::Debug, vec!["unknown"]);
        crate::info!("hello again!");
    }

    #[test]
    fn test_generator_log_level() {
        std::env::set_var(LOG_LEVEL_ENV, "debug");
        assert_eq!(generator_log_level(), Level::Debug);
        std::env::set_var(LOG_LEVEL_ENV, "warning");
        assert_eq!(generator_log_level(), Level::Warn);
        std::env::set_var(LOG_LEVEL_ENV, "loud");
        assert_eq!(generator_log_level(), Level::Info);
        std::env::remove_var(LOG_LEVEL_ENV);
        assert_eq!(generator_log_level(), Level::Info);
    }
}

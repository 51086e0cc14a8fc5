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

//!
use log::{Level, Log};
use std::{
    fs::{File, OpenOptions},
    io::Write,
    str::FromStr,
    sync::Mutex,
};

const KMSG_PATH: &str = "/dev/kmsg";

fn write_msg_common(writer: &mut impl Write, module: &str, msg: String) {
    let time: libc::time_t = unsafe { libc::time(std::ptr::null_mut()) };
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    unsafe { libc::localtime_r(&time, &mut tm) };
    let line = format!(
        "{:0>4}-{:0>2}-{:0>2} {:0>2}:{:0>2}:{:0>2} {} {}\n",
        tm.tm_year + 1900, /* tm_year is years since 1900 */
        tm.tm_mon + 1,     /* tm_mon is months since Jan: [0, 11] */
        tm.tm_mday,
        tm.tm_hour,
        tm.tm_min,
        tm.tm_sec,
        module,
        msg
    );

    /* one write per line */
    if let Err(e) = writer.write_all(line.as_bytes()) {
        eprintln!("Failed to log message: {}", e);
    }
}

/// Syslog priority of a log level, as understood by /dev/kmsg.
fn syslog_priority(level: Level) -> u8 {
    match level {
        Level::Error => 3,
        Level::Warn => 4,
        Level::Info => 6,
        Level::Debug | Level::Trace => 7,
    }
}

/// Parse a level name like "debug" or "warning".
pub fn parse_level(s: &str) -> Option<Level> {
    match s.trim() {
        "warning" => Some(Level::Warn),
        "err" => Some(Level::Error),
        v => Level::from_str(v).ok(),
    }
}

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let mut stderr = std::io::stderr();
        let module_path = match record.module_path() {
            None => "unknown",
            Some(v) => v,
        };
        write_msg_common(&mut stderr, module_path, record.args().to_string());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/* Writes "<prio>name[pid]: msg" records into the kernel ring buffer. */
struct KmsgLogger {
    name: String,
    kmsg: Mutex<File>,
}

impl KmsgLogger {
    fn new(name: &str) -> Result<Self, std::io::Error> {
        let kmsg = OpenOptions::new().write(true).open(KMSG_PATH)?;
        Ok(Self {
            name: name.to_string(),
            kmsg: Mutex::new(kmsg),
        })
    }
}

impl Log for KmsgLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let msg = format!(
            "<{}>{}[{}]: {}\n",
            syslog_priority(record.level()),
            self.name,
            std::process::id(),
            record.args()
        );

        let mut kmsg = match self.kmsg.lock() {
            Err(_) => return,
            Ok(v) => v,
        };
        if let Err(e) = kmsg.write_all(msg.as_bytes()) {
            eprintln!("Failed to write message to {}: {}", KMSG_PATH, e);
        }
    }

    fn flush(&self) {}
}

/// Collect different kinds of loggers together.
///
/// Include: ConsoleLogger, KmsgLogger
struct CombinedLogger {
    level: Level,
    loggers: Vec<Box<dyn Log>>,
}

impl Log for CombinedLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        for logger in &self.loggers {
            logger.log(record);
        }
    }

    fn flush(&self) {
        for logger in &self.loggers {
            logger.flush();
        }
    }
}

impl CombinedLogger {
    fn new(level: Level) -> Self {
        Self {
            level,
            loggers: Vec::new(),
        }
    }

    fn push(&mut self, logger: Box<dyn Log>) {
        self.loggers.push(logger)
    }

    fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

/// Initialize the global static logger instance.
/// Available log `targets` include `console` and `kmsg`.
///
/// Repeated targets take effect only once. The global logger can only be
/// installed once per process, later calls only adjust the max level.
///
/// # Arguments
///
/// * `name` - The application name that initializes the logger, used as the kmsg identifier.
/// * `level` - Log message level.
/// * `targets` - A set of log targets.
pub fn init_log(name: &str, level: Level, targets: Vec<&str>) {
    let mut combined_loggers = CombinedLogger::new(level);
    let mut seen: Vec<&str> = Vec::new();

    for target in targets {
        if seen.contains(&target) {
            continue;
        }
        seen.push(target);

        let logger = match target {
            "console" => Box::new(ConsoleLogger) as Box<dyn Log>,
            "kmsg" => match KmsgLogger::new(name) {
                Ok(logger) => Box::new(logger) as Box<dyn Log>,
                Err(e) => {
                    eprintln!("{} failed to open {}: {}", name, KMSG_PATH, e);
                    continue;
                }
            },
            _ => {
                eprintln!("{}: log target '{}' is strange, ignoring.", name, target);
                continue;
            }
        };

        combined_loggers.push(logger);
    }

    if combined_loggers.is_empty() {
        eprintln!("{}: no available log targets.", name);
    }

    log::set_max_level(level.to_level_filter());
    if let Err(e) = log::set_boxed_logger(Box::new(combined_loggers)) {
        eprintln!("{}: failed to set global logger: {}", name, e);
    }
}

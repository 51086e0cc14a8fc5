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

//! Support library of the unit generators.
//!
//! A generator translates configuration like /etc/fstab into units, drop-ins
//! and dependency symlinks in an output directory before the service manager
//! loads its units. This crate provides the pieces all generators share:
//! exclusive unit file creation, drop-ins, dependency edges and the rules for
//! file system checks, device timeouts and mkfs/mkswap/growfs hooks.
//!
//! ```no_run
//! use generator::{Generator, GeneratorArgs};
//!
//! let args: Vec<String> = std::env::args().collect();
//! let args = GeneratorArgs::parse(&args)?;
//! log::log_setup_generator(&args.program);
//!
//! let g = Generator::new(&args.normal, &args.program);
//! let mut unit = g.open_unit_file(Some("/etc/fstab"), "data.mount")?;
//! unit.write_str("[Unit]\n")?;
//! g.write_fsck_deps(&mut unit, "/dev/sdb1", "/data", Some("ext4"))?;
//! unit.write_str("\n[Mount]\nWhat=/dev/sdb1\nWhere=/data\n")?;
//! unit.commit()?;
//! # Ok::<(), generator::Error>(())
//! ```
pub mod context;
pub mod dropin;
pub mod error;
pub mod escape;
pub mod rules;
pub mod symlink;
pub mod unit_file;

pub use context::{program_name, BootEnvironment, Generator, GeneratorArgs, HelperPaths};
pub use dropin::{write_drop_in, DEFAULT_DROP_IN_PRIORITY};
pub use error::*;
pub use escape::{cescape, cunescape, escape, specifier_escape, EscapedPath};
pub use rules::CheckTarget;
pub use symlink::{add_symlink, Relation};
pub use unit_file::UnitFile;

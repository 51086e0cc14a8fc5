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

//! initrd utils

use nix::sys::statfs::{self, FsType};
use std::path::Path;

#[cfg(target_env = "musl")]
type FsTypeT = libc::c_ulong;

#[cfg(not(target_env = "musl"))]
type FsTypeT = libc::c_long;

/* not exported by libc */
const RAMFS_MAGIC: FsTypeT = 0x858458f6_u32 as FsTypeT;

/// Environment variable forcing the initrd detection result
pub const IN_INITRD_ENV: &str = "SYSMASTER_IN_INITRD";

const INITRD_RELEASE: &str = "/etc/initrd-release";

/// parse a boolean the way unit files and the kernel command line spell it
pub fn parse_boolean(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "y" | "true" | "t" | "on" => Some(true),
        "0" | "no" | "n" | "false" | "f" | "off" => Some(false),
        _ => None,
    }
}

fn root_is_ramfs(path: &str) -> bool {
    statfs::statfs(path).map_or(false, |s| {
        s.filesystem_type() == FsType(libc::TMPFS_MAGIC as FsTypeT)
            || s.filesystem_type() == FsType(RAMFS_MAGIC)
    })
}

/// Whether in initrd
///
/// `SYSMASTER_IN_INITRD` takes precedence if it holds a valid boolean.
/// Otherwise the root (or `path`) must be a tmpfs/ramfs and
/// /etc/initrd-release must exist.
pub fn in_initrd(path: Option<&str>) -> bool {
    if let Ok(v) = std::env::var(IN_INITRD_ENV) {
        match parse_boolean(&v) {
            Some(b) => return b,
            None => log::debug!("Failed to parse ${}='{}', ignoring.", IN_INITRD_ENV, v),
        }
    }

    let path = path.unwrap_or("/");
    root_is_ramfs(path) && Path::new(INITRD_RELEASE).exists()
}

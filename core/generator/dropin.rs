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

//! Drop-in fragments, "<unit>.d/<priority>-<label>.conf".

use crate::error::*;
use crate::unit_file::create_exclusive;
use snafu::ResultExt;
use std::{
    fs::DirBuilder,
    io::Write,
    os::unix::fs::DirBuilderExt,
    path::{Path, PathBuf},
};

/// mode of the directories created in the output directory
pub(crate) const DIR_MODE: u32 = 0o755;

/// priority used by all the rules of this crate
pub const DEFAULT_DROP_IN_PRIORITY: u32 = 50;

/// create `dir` and its parents
pub(crate) fn mkdir_parents(dir: &Path) -> Result<()> {
    DirBuilder::new()
        .recursive(true)
        .mode(DIR_MODE)
        .create(dir)
        .context(IoSnafu {
            action: "create directory",
            path: dir,
        })
}

fn check_component(kind: &str, s: &str) -> Result<()> {
    if s.is_empty() || s.contains('/') {
        return Err(Error::Invalid {
            what: format!("invalid drop-in {} '{}'", kind, s),
        });
    }
    Ok(())
}

/// Path of the drop-in of `unit` with the given priority and label.
pub fn drop_in_path(dest: &Path, unit: &str, priority: u32, label: &str) -> PathBuf {
    dest.join(format!("{}.d", unit))
        .join(format!("{}-{}.conf", priority, label))
}

/// Write a new drop-in for `unit`. The body gets a trailing newline if it
/// has none.
pub fn write_drop_in(
    dest: &Path,
    unit: &str,
    priority: u32,
    label: &str,
    body: &str,
    program: &str,
) -> Result<PathBuf> {
    check_component("unit", unit)?;
    check_component("label", label)?;

    let path = drop_in_path(dest, unit, priority, label);
    if let Some(dir) = path.parent() {
        mkdir_parents(dir)?;
    }

    let mut writer = create_exclusive(&path, None, program)?;
    writer.write_all(body.as_bytes()).context(IoSnafu {
        action: "write",
        path: &path,
    })?;
    if !body.ends_with('\n') {
        writer.write_all(b"\n").context(IoSnafu {
            action: "write",
            path: &path,
        })?;
    }
    writer.flush().context(IoSnafu {
        action: "write",
        path: &path,
    })?;

    log::debug!("Written drop-in {}", path.display());
    Ok(path)
}

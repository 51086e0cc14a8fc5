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

//! Lookup of helper executables

use crate::error::*;
use std::{
    fs,
    io,
    os::unix::prelude::PermissionsExt,
    path::{Path, PathBuf},
};

/// search path used when $PATH is unset
pub const DEFAULT_PATH: &str = "/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin";

const B_EXEC: u32 = 0o111;

/// check whether the file exists, is a regular file and has an executable bit
pub fn check_executable(file: &Path) -> io::Result<bool> {
    match fs::metadata(file) {
        Err(err) => {
            if err.kind() == io::ErrorKind::NotFound {
                return Ok(false);
            }
            Err(err)
        }
        Ok(md) => Ok(md.is_file() && md.permissions().mode() & B_EXEC != 0),
    }
}

/// Find an executable by name in the colon separated `search_path`.
/// Names containing a slash are checked as they are.
pub fn find_executable(name: &str, search_path: &str) -> Result<Option<PathBuf>> {
    if name.is_empty() {
        return Err(Error::Invalid {
            what: "empty executable name".to_string(),
        });
    }

    if name.contains('/') {
        let p = PathBuf::from(name);
        return Ok(check_executable(&p).context(IoSnafu)?.then_some(p));
    }

    let mut last_err = None;
    for dir in search_path.split(':').filter(|d| !d.is_empty()) {
        let p = Path::new(dir).join(name);
        match check_executable(&p) {
            Ok(true) => return Ok(Some(p)),
            Ok(false) => continue,
            Err(e) => {
                log::debug!("Failed to check {}: {}", p.display(), e);
                last_err = Some(e);
            }
        }
    }

    /* Not found anywhere, but report why a candidate couldn't be checked. */
    match last_err {
        Some(e) => Err(Error::Io { source: e }),
        None => Ok(None),
    }
}

/// Check whether a file system checker "fsck.<fstype>" is installed, searching
/// `search_path` or $PATH if none is given.
pub fn fsck_exists(fstype: &str, search_path: Option<&str>) -> Result<bool> {
    if fstype.is_empty() || fstype.contains('/') {
        return Err(Error::Invalid {
            what: format!("invalid file system type '{}'", fstype),
        });
    }

    let env_path = std::env::var("PATH").ok();
    let search_path = search_path
        .or(env_path.as_deref())
        .unwrap_or(DEFAULT_PATH);

    let checker = format!("fsck.{}", fstype);
    Ok(find_executable(&checker, search_path)?.is_some())
}

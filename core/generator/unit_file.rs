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

//! Exclusive creation of generated unit files.
//!
//! A generator must never replace what an earlier generator or an earlier
//! record wrote, so every file is created with O_EXCL. The provenance header
//! is written right after the open.

use crate::error::*;
use snafu::ResultExt;
use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    os::unix::fs::OpenOptionsExt,
    path::{Path, PathBuf},
};

const UNIT_FILE_MODE: u32 = 0o644;

/// the first line of every generated file, followed by an empty line
pub fn provenance_header(program: &str) -> String {
    format!("# Automatically generated by {}\n\n", program)
}

/// Create `path` exclusively and write the provenance header.
pub(crate) fn create_exclusive(
    path: &Path,
    origin: Option<&str>,
    program: &str,
) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(UNIT_FILE_MODE)
        .custom_flags(libc::O_CLOEXEC | libc::O_NOFOLLOW)
        .open(path)
        .map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                Error::Conflict {
                    path: path.to_path_buf(),
                    origin: origin.map(str::to_string),
                }
            } else {
                Error::Io {
                    action: "create",
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(provenance_header(program).as_bytes())
        .context(IoSnafu {
            action: "write",
            path,
        })?;
    Ok(writer)
}

/// An open, buffered, newly created unit file.
///
/// Nothing is guaranteed to be on disk until [`UnitFile::commit`] returns
/// successfully.
#[derive(Debug)]
pub struct UnitFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl UnitFile {
    /// Create `dest/name`. `origin` names the source of the record, it is
    /// only used in the conflict message.
    pub fn create(dest: &Path, origin: Option<&str>, name: &str, program: &str) -> Result<Self> {
        if name.is_empty() || name.contains('/') {
            return Err(Error::Invalid {
                what: format!("invalid unit file name '{}'", name),
            });
        }

        let path = dest.join(name);
        let writer = create_exclusive(&path, origin, program)?;
        log::debug!("Creating unit file {}", path.display());
        Ok(UnitFile { path, writer })
    }

    /// path of the unit file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// name of the unit, i.e. the file name
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// append text to the unit body
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.writer.write_all(s.as_bytes()).context(IoSnafu {
            action: "write",
            path: &self.path,
        })
    }

    /// Flush everything written so far and report deferred write errors.
    pub fn commit(mut self) -> Result<PathBuf> {
        self.writer.flush().context(IoSnafu {
            action: "write",
            path: &self.path,
        })?;
        Ok(self.path)
    }
}

impl Write for UnitFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

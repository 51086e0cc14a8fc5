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

//! Dependency edges expressed as symlinks in "<target>.<relation>/".

use crate::dropin::mkdir_parents;
use crate::error::*;
use basic::path_util::basename;
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// kind of a dependency edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    /// weak dependency, "<target>.wants/"
    Wants,
    /// hard dependency, "<target>.requires/"
    Requires,
    /// any other directory suffix, e.g. "upholds"
    Custom(String),
}

impl Relation {
    /// the directory suffix of this relation
    pub fn as_str(&self) -> &str {
        match self {
            Relation::Wants => "wants",
            Relation::Requires => "requires",
            Relation::Custom(s) => s,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link `source` into `dest/<target>.<relation>/`.
///
/// An absolute `source` is linked as is, a relative one is taken relative
/// to `dest`. An existing link with the same destination is fine, an
/// existing link pointing elsewhere or a non-link in the way is reported as
/// `Error::Conflict` rather than ignored.
pub fn add_symlink(dest: &Path, target: &str, relation: &Relation, source: &str) -> Result<PathBuf> {
    let name = basename(source);
    if target.is_empty()
        || target.contains('/')
        || name.is_empty()
        || name == "/"
        || relation.as_str().is_empty()
    {
        return Err(Error::Invalid {
            what: format!(
                "invalid dependency {} {} {}",
                target,
                relation.as_str(),
                source
            ),
        });
    }

    let from = if source.starts_with('/') {
        PathBuf::from(source)
    } else {
        Path::new("..").join(source)
    };

    let dir = dest.join(format!("{}.{}", target, relation));
    mkdir_parents(&dir)?;
    let to = dir.join(name);

    match std::os::unix::fs::symlink(&from, &to) {
        Ok(_) => {
            log::debug!("Created symlink {} -> {}", to.display(), from.display());
            Ok(to)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => match fs::read_link(&to) {
            Ok(existing) if existing == from => {
                log::debug!("Symlink {} already exists", to.display());
                Ok(to)
            }
            _ => Err(Error::Conflict {
                path: to,
                origin: None,
            }),
        },
        Err(e) => Err(Error::Io {
            action: "create symlink",
            path: to,
            source: e,
        }),
    }
}

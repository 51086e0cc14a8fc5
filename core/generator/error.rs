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

//! Error definition of the generator library
//!
use nix::errno::Errno;
use snafu::prelude::*;
use std::path::PathBuf;

/// generator error
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum Error {
    /// the artifact already exists, or an edge points somewhere else
    #[snafu(display(
        "Failed to create {}, as it already exists.{}",
        path.display(),
        origin
            .as_deref()
            .map(|o| format!(" Duplicate entry in {}?", o))
            .unwrap_or_default()
    ))]
    Conflict {
        /// the path which is in the way
        path: PathBuf,
        /// where the record being processed was declared, e.g. /etc/fstab
        origin: Option<String>,
    },

    /// a filesystem call failed
    #[snafu(display("Failed to {} {}: {}", action, path.display(), source))]
    Io {
        /// what we tried to do
        action: &'static str,
        /// the path operated on
        path: PathBuf,
        /// the underlying error
        source: std::io::Error,
    },

    /// the request can not be fulfilled as asked
    #[snafu(display("Invalid: {}", what))]
    Invalid {
        /// description
        what: String,
    },

    /// the unit name codec rejected the input
    #[snafu(display("Failed to generate unit name from '{}': {}", what, source))]
    UnitName {
        /// the input of the codec
        what: String,
        /// the codec error
        source: basic::Error,
    },
}

impl Error {
    /// Translate the generator error to error number.
    pub fn get_errno(&self) -> i32 {
        match self {
            Error::Conflict { .. } => Errno::EEXIST as i32,
            Error::Io { source, .. } => source.raw_os_error().unwrap_or(Errno::EIO as i32),
            Error::Invalid { .. } => Errno::EINVAL as i32,
            Error::UnitName { source, .. } => source.get_errno(),
        }
    }
}

/// generator result
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_display() {
        let e = Error::Conflict {
            path: PathBuf::from("/run/x/data.mount"),
            origin: Some("/etc/fstab".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "Failed to create /run/x/data.mount, as it already exists. Duplicate entry in /etc/fstab?"
        );

        let e = Error::Conflict {
            path: PathBuf::from("/run/x/data.mount"),
            origin: None,
        };
        assert_eq!(
            e.to_string(),
            "Failed to create /run/x/data.mount, as it already exists."
        );
    }

    #[test]
    fn test_get_errno() {
        let e = Error::Conflict {
            path: PathBuf::new(),
            origin: None,
        };
        assert_eq!(e.get_errno(), libc::EEXIST);

        let e = Error::Io {
            action: "open",
            path: PathBuf::new(),
            source: std::io::Error::from_raw_os_error(libc::EROFS),
        };
        assert_eq!(e.get_errno(), libc::EROFS);

        let e = Error::Invalid {
            what: "mkfs".to_string(),
        };
        assert_eq!(e.get_errno(), libc::EINVAL);

        let e = Error::UnitName {
            what: "data".to_string(),
            source: basic::Error::Invalid {
                what: "not absolute".to_string(),
            },
        };
        assert_eq!(e.get_errno(), libc::EINVAL);
    }
}

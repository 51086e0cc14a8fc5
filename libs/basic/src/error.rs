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

//! error definitions
use nix::errno::Errno;
use snafu::prelude::*;
#[allow(unused_imports)]
pub use snafu::ResultExt;

#[allow(missing_docs)]
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Io: {}", source))]
    Io { source: std::io::Error },

    #[snafu(display("Errno: {}", source))]
    Nix { source: nix::Error },

    #[snafu(display("Error parsing from string: {}", source))]
    Parse {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[snafu(display("Time value is out of range: '{}'.", what))]
    OutOfRange { what: String },

    #[snafu(display("Invalid: '{}'.", what))]
    Invalid { what: String },
}

impl Error {
    /// Translate the basic error to error number.
    pub fn get_errno(&self) -> i32 {
        match self {
            Error::Io { source } => source.raw_os_error().unwrap_or(Errno::EIO as i32),
            Error::Nix { source } => *source as i32,
            Error::Parse { source: _ } => Errno::EINVAL as i32,
            Error::OutOfRange { what: _ } => Errno::ERANGE as i32,
            Error::Invalid { what: _ } => Errno::EINVAL as i32,
        }
    }
}

#[allow(unused_macros)]
macro_rules! errfrom {
    ($($st:ty),* => $variant:ident) => (
        $(
            impl From<$st> for Error {
                fn from(e: $st) -> Error {
                    Error::$variant { source: e.into() }
                }
            }
        )*
    )
}

errfrom!(std::num::ParseIntError, std::string::FromUtf8Error => Parse);

///
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_errno() {
        let e = Error::Invalid {
            what: "x".to_string(),
        };
        assert_eq!(e.get_errno(), Errno::EINVAL as i32);

        let e = Error::Nix {
            source: Errno::EEXIST,
        };
        assert_eq!(e.get_errno(), Errno::EEXIST as i32);

        let e = Error::Io {
            source: std::io::Error::from_raw_os_error(libc::ENOSPC),
        };
        assert_eq!(e.get_errno(), libc::ENOSPC);

        let e: Error = "x".parse::<u32>().unwrap_err().into();
        assert_eq!(e.get_errno(), Errno::EINVAL as i32);
    }
}

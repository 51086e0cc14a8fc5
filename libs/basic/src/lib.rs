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
pub mod error;
pub use error::*;
#[cfg(feature = "exec")]
pub mod exec_util;
#[cfg(feature = "fstab")]
pub mod fstab_util;
#[cfg(feature = "initrd")]
pub mod initrd_util;
#[cfg(feature = "path")]
pub mod path_util;
#[cfg(feature = "special")]
pub mod special;
#[cfg(feature = "time")]
pub mod time_util;
#[cfg(feature = "unit_name")]
pub mod unit_name;

/// unit lookup path of the units shipped with the distribution
pub const SYSTEM_DATA_UNIT_PATH: &str = "/usr/lib/systemd/system";

/// directory of the helper binaries invoked by generated units
pub const SYSTEMD_LIBEXEC_PATH: &str = "/usr/lib/systemd";

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

//! Rules turning mount and swap records into units, drop-ins and edges.
//!
//! Every rule is a method of [`Generator`](crate::Generator) and handles one
//! record. Conditions a generator can live with are logged and reported as
//! success, only I/O failures, conflicts and impossible requests are errors.

mod device;
mod fsck;
mod hooks;
mod remount;

pub use device::{DEVICE_TIMEOUT_OPTIONS, NETDEV_OPTION};
pub use fsck::CheckTarget;

use crate::error::*;
use basic::unit_name;

pub(crate) fn unit_name_from_path(path: &str, suffix: &str) -> Result<String> {
    unit_name::unit_name_from_path(path, suffix).map_err(|e| Error::UnitName {
        what: path.to_string(),
        source: e,
    })
}

pub(crate) fn unit_name_from_path_instance(prefix: &str, path: &str, suffix: &str) -> Result<String> {
    unit_name::unit_name_from_path_instance(prefix, path, suffix).map_err(|e| Error::UnitName {
        what: path.to_string(),
        source: e,
    })
}

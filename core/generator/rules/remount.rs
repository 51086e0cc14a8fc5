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

//! Remounting the root file system with the options of its record.

use crate::context::Generator;
use crate::error::*;
use crate::symlink::Relation;
use basic::special::{LOCAL_FS_TARGET, REMOUNT_FS_SERVICE};

impl Generator {
    /// Pull in the service applying the root mount options, for a root file
    /// system that was mounted before the records were read.
    pub fn enable_remount_fs_service(&self) -> Result<()> {
        self.add_symlink(
            LOCAL_FS_TARGET,
            Relation::Wants,
            &self.system_unit(REMOUNT_FS_SERVICE),
        )?;
        Ok(())
    }
}

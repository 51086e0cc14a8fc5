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

//! File system check dependencies.

use super::{unit_name_from_path, unit_name_from_path_instance};
use crate::context::{BootEnvironment, Generator};
use crate::error::*;
use crate::escape::escape;
use crate::symlink::Relation;
use crate::unit_file::UnitFile;
use basic::exec_util::fsck_exists;
use basic::path_util::{is_device_path, path_equal};
use basic::special::{
    FSCK_ROOT_SERVICE, INITRD_ROOT_DEVICE_TARGET, INITRD_SYSROOT, LOCAL_FS_PRE_TARGET,
    LOCAL_FS_TARGET, SHUTDOWN_TARGET,
};
use std::path::PathBuf;

/// Which unit checks a file system before it is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckTarget {
    /// no check, the record is not device backed or there is no checker
    Skip,
    /// the root file system, checked by the unit shipped for it
    WellKnownRoot,
    /// the future root in the initrd, a root check unit is generated
    Synthesized,
    /// an instance of the template check unit
    Instance(String),
}

impl Generator {
    /// Decide how the file system on `what` mounted at `mount_point` gets
    /// checked.
    pub fn check_target(
        &self,
        what: &str,
        mount_point: &str,
        fstype: Option<&str>,
    ) -> Result<CheckTarget> {
        if !is_device_path(what) {
            log::warn!(
                "Checking was requested for \"{}\", but it is not a device.",
                what
            );
            return Ok(CheckTarget::Skip);
        }

        if let Some(fstype) = fstype.filter(|t| !t.is_empty() && *t != "auto") {
            match fsck_exists(fstype, self.paths().fsck_search_path.as_deref()) {
                Ok(true) => {}
                Ok(false) => {
                    log::debug!(
                        "Checking was requested for {}, but fsck.{} does not exist.",
                        what,
                        fstype
                    );
                    return Ok(CheckTarget::Skip);
                }
                Err(e) => log::warn!(
                    "Checking was requested for {}, but couldn't detect if fsck.{} may be used, proceeding: {}",
                    what,
                    fstype,
                    e
                ),
            }
        }

        if path_equal(mount_point, "/") {
            return Ok(CheckTarget::WellKnownRoot);
        }

        if self.boot() == BootEnvironment::Initrd && path_equal(mount_point, INITRD_SYSROOT) {
            return Ok(CheckTarget::Synthesized);
        }

        Ok(CheckTarget::Instance(unit_name_from_path_instance(
            "systemd-fsck",
            what,
            ".service",
        )?))
    }

    /// Make the unit being written in `unit` depend on the check of its
    /// file system. Returns what was decided.
    pub fn write_fsck_deps(
        &self,
        unit: &mut UnitFile,
        what: &str,
        mount_point: &str,
        fstype: Option<&str>,
    ) -> Result<CheckTarget> {
        let target = self.check_target(what, mount_point, fstype)?;

        let fsck = match &target {
            CheckTarget::Skip => None,
            CheckTarget::WellKnownRoot => {
                /* The root is mounted already, it is checked before the remount. */
                self.add_symlink(
                    LOCAL_FS_TARGET,
                    Relation::Wants,
                    &self.system_unit(FSCK_ROOT_SERVICE),
                )?;
                None
            }
            CheckTarget::Synthesized => {
                self.write_fsck_sysroot_service(what)?;
                Some(FSCK_ROOT_SERVICE)
            }
            CheckTarget::Instance(name) => Some(name.as_str()),
        };

        if let Some(fsck) = fsck {
            unit.write_str(&format!("Requires={}\nAfter={}\n", fsck, fsck))?;
        }
        Ok(target)
    }

    /// Write the unit checking the file system of the future root in the
    /// initrd.
    pub fn write_fsck_sysroot_service(&self, what: &str) -> Result<PathBuf> {
        let device = unit_name_from_path(what, ".device")?;
        let escaped = escape(what);

        let mut unit = self.open_unit_file(None, FSCK_ROOT_SERVICE)?;
        unit.write_str(&format!(
            "[Unit]\n\
             Description=File System Check on {escaped}\n\
             Documentation=man:{name}(8)\n\
             DefaultDependencies=no\n\
             BindsTo={device}\n\
             Conflicts={shutdown}\n\
             After={root_device} {pre} {device}\n\
             Before={shutdown}\n\
             \n\
             [Service]\n\
             Type=oneshot\n\
             RemainAfterExit=yes\n\
             ExecStart={fsck} {command}\n\
             TimeoutSec=0\n",
            escaped = escaped.specifier,
            name = FSCK_ROOT_SERVICE,
            device = device,
            shutdown = SHUTDOWN_TARGET,
            root_device = INITRD_ROOT_DEVICE_TARGET,
            pre = LOCAL_FS_PRE_TARGET,
            fsck = self.paths().fsck,
            command = escaped.command,
        ))?;
        unit.commit()
    }
}

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

//! Units creating and growing file systems on demand.
//!
//! mkswap and mkfs units are required by the swap or mount unit, the growfs
//! unit is only wanted by the mount unit.

use super::{unit_name_from_path, unit_name_from_path_instance};
use crate::context::Generator;
use crate::error::*;
use crate::escape::escape;
use crate::symlink::Relation;
use basic::fstab_util::fstab_node_to_udev_node;
use basic::path_util::is_device_path;
use basic::special::SHUTDOWN_TARGET;

impl Generator {
    fn device_node(&self, what: &str) -> Result<String> {
        let node = fstab_node_to_udev_node(what);
        if !is_device_path(&node) {
            return Err(Error::Invalid {
                what: format!("Cannot format something that is not a device node: {}", node),
            });
        }
        Ok(node)
    }

    /// Format the swap device `what` before it is used.
    pub fn hook_up_mkswap(&self, what: &str) -> Result<()> {
        let node = self.device_node(what)?;
        let unit = unit_name_from_path_instance("systemd-mkswap", &node, ".service")?;
        let swap = unit_name_from_path(&node, ".swap")?;
        let escaped = escape(&node);

        let mut f = self.open_unit_file(None, &unit)?;
        f.write_str(&format!(
            "[Unit]\n\
             Description=Make Swap on %f\n\
             Documentation=man:systemd-mkswap@.service(8)\n\
             DefaultDependencies=no\n\
             BindsTo=%i.device\n\
             Conflicts={shutdown}\n\
             After=%i.device\n\
             Before={shutdown} {swap}\n\
             \n\
             [Service]\n\
             Type=oneshot\n\
             RemainAfterExit=yes\n\
             ExecStart={makefs} swap {node}\n\
             TimeoutSec=0\n",
            swap = swap,
            shutdown = SHUTDOWN_TARGET,
            makefs = self.paths().makefs,
            node = escaped.command,
        ))?;
        f.commit()?;

        self.add_symlink(&swap, Relation::Requires, &unit)?;
        Ok(())
    }

    /// Create a `fstype` file system on `what` before it is mounted on
    /// `mount_point`.
    pub fn hook_up_mkfs(&self, what: &str, mount_point: &str, fstype: Option<&str>) -> Result<()> {
        let node = self.device_node(what)?;
        let fstype = match fstype {
            Some(t) if !t.is_empty() && t != "auto" => t,
            _ => {
                return Err(Error::Invalid {
                    what: format!(
                        "Cannot format partition {}, filesystem type is not specified",
                        node
                    ),
                })
            }
        };

        let unit = unit_name_from_path_instance("systemd-makefs", &node, ".service")?;
        let mount = unit_name_from_path(mount_point, ".mount")?;
        let escaped = escape(&node);

        let mut f = self.open_unit_file(None, &unit)?;
        f.write_str(&format!(
            "[Unit]\n\
             Description=Make File System on %f\n\
             Documentation=man:systemd-makefs@.service(8)\n\
             DefaultDependencies=no\n\
             BindsTo=%i.device\n\
             Conflicts={shutdown}\n\
             After=%i.device\n\
             Before={shutdown} systemd-fsck@%i.service {mount}\n\
             \n\
             [Service]\n\
             Type=oneshot\n\
             RemainAfterExit=yes\n\
             ExecStart={makefs} {fstype} {node}\n\
             TimeoutSec=0\n",
            mount = mount,
            shutdown = SHUTDOWN_TARGET,
            makefs = self.paths().makefs,
            fstype = escape(fstype).command,
            node = escaped.command,
        ))?;
        f.commit()?;

        self.add_symlink(&mount, Relation::Requires, &unit)?;
        Ok(())
    }

    /// Grow the file system mounted on `mount_point` to fill its device,
    /// before `target` is reached.
    pub fn hook_up_growfs(&self, mount_point: &str, target: &str) -> Result<()> {
        let unit = unit_name_from_path_instance("systemd-growfs", mount_point, ".service")?;
        let mount = unit_name_from_path(mount_point, ".mount")?;
        let escaped = escape(mount_point);

        let mut f = self.open_unit_file(None, &unit)?;
        f.write_str(&format!(
            "[Unit]\n\
             Description=Grow File System on %f\n\
             Documentation=man:systemd-growfs@.service(8)\n\
             DefaultDependencies=no\n\
             BindsTo=%i.mount\n\
             Conflicts={shutdown}\n\
             After=%i.mount\n\
             Before={shutdown} {target}\n\
             \n\
             [Service]\n\
             Type=oneshot\n\
             RemainAfterExit=yes\n\
             ExecStart={growfs} {where_}\n\
             TimeoutSec=0\n",
            target = target,
            shutdown = SHUTDOWN_TARGET,
            growfs = self.paths().growfs,
            where_ = escaped.command,
        ))?;
        f.commit()?;

        self.add_symlink(&mount, Relation::Wants, &unit)?;
        Ok(())
    }
}

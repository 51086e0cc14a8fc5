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

//! Drop-ins on device units and on the initrd root device target.

use super::unit_name_from_path;
use crate::context::Generator;
use crate::error::*;
use basic::fstab_util::{fstab_filter_options, fstab_node_to_udev_node, fstab_test_option};
use basic::path_util::is_device_path;
use basic::special::{INITRD_ROOT_DEVICE_TARGET, NETWORK_ONLINE_TARGET, NETWORK_TARGET};
use basic::time_util::parse_sec_fix_0;

/// mount options setting how long to wait for the device
pub const DEVICE_TIMEOUT_OPTIONS: &[&str] =
    &["comment=systemd.device-timeout", "x-systemd.device-timeout"];

/// mount option marking a file system that needs the network
pub const NETDEV_OPTION: &str = "_netdev";

impl Generator {
    /// Apply "x-systemd.device-timeout=" to the device unit of `what`.
    ///
    /// Returns `opts` without the timeout options, ready to be passed on to
    /// the mount. A timeout that can't be used is logged and ignored.
    pub fn write_timeouts(&self, what: &str, mount_point: &str, opts: &str) -> Result<String> {
        let r = fstab_filter_options(opts, DEVICE_TIMEOUT_OPTIONS);
        if !r.found() {
            return Ok(r.filtered);
        }

        let timeout = match r.value.as_deref() {
            Some(t) if parse_sec_fix_0(t).is_ok() => t,
            t => {
                log::warn!(
                    "Failed to parse timeout for {}, ignoring: {}",
                    mount_point,
                    t.unwrap_or_default()
                );
                return Ok(r.filtered);
            }
        };

        let node = fstab_node_to_udev_node(what);
        if !is_device_path(&node) {
            log::warn!("x-systemd.device-timeout ignored for {}", what);
            return Ok(r.filtered);
        }

        let unit = unit_name_from_path(&node, ".device")?;
        self.write_drop_in(
            &unit,
            "device-timeout",
            &format!("[Unit]\nJobRunningTimeoutSec={}\n", timeout),
        )?;

        Ok(r.filtered)
    }

    /// Order the device of a "_netdev" file system after the network.
    pub fn write_device_deps(&self, what: &str, mount_point: &str, opts: &str) -> Result<()> {
        if !fstab_test_option(opts, &[NETDEV_OPTION]) {
            return Ok(());
        }

        let node = fstab_node_to_udev_node(what);
        if !is_device_path(&node) {
            return Ok(());
        }

        log::debug!(
            "Ordering the device of {} after the network, as it is a network device",
            mount_point
        );
        let unit = unit_name_from_path(&node, ".device")?;
        self.write_drop_in(
            &unit,
            "netdev-dependencies",
            &format!(
                "[Unit]\nAfter={} {}\nWants={}\n",
                NETWORK_ONLINE_TARGET, NETWORK_TARGET, NETWORK_ONLINE_TARGET
            ),
        )?;
        Ok(())
    }

    /// Make the initrd wait for the device of the future root.
    pub fn write_initrd_root_device_deps(&self, what: &str) -> Result<()> {
        let node = fstab_node_to_udev_node(what);
        let unit = unit_name_from_path(&node, ".device")?;

        self.write_drop_in(
            INITRD_ROOT_DEVICE_TARGET,
            "root-device",
            &format!("[Unit]\nRequires={}\nAfter={}\n", unit, unit),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BootEnvironment;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const HEADER: &str = "# Automatically generated by test-generator\n\n";

    fn generator(dir: &Path) -> Generator {
        Generator::new(dir, "test-generator").with_boot(BootEnvironment::Host)
    }

    fn read(dir: &Path, name: &str) -> String {
        fs::read_to_string(dir.join(name)).unwrap()
    }

    #[test]
    fn test_write_timeouts() {
        let dir = TempDir::new().unwrap();
        let g = generator(dir.path());

        let filtered = g
            .write_timeouts("/dev/sdb1", "/data", "rw,x-systemd.device-timeout=30,noatime")
            .unwrap();
        assert_eq!(filtered, "rw,noatime");
        assert_eq!(
            read(dir.path(), "dev-sdb1.device.d/50-device-timeout.conf"),
            format!("{}[Unit]\nJobRunningTimeoutSec=30\n", HEADER)
        );
    }

    #[test]
    fn test_write_timeouts_raw_value() {
        let dir = TempDir::new().unwrap();
        let g = generator(dir.path());

        g.write_timeouts("LABEL=data", "/data", "comment=systemd.device-timeout=1min 30s")
            .unwrap();
        assert_eq!(
            read(
                dir.path(),
                "dev-disk-by\\x2dlabel-data.device.d/50-device-timeout.conf"
            ),
            format!("{}[Unit]\nJobRunningTimeoutSec=1min 30s\n", HEADER)
        );
    }

    #[test]
    fn test_write_timeouts_ignored() {
        let dir = TempDir::new().unwrap();
        let g = generator(dir.path());

        assert_eq!(
            g.write_timeouts("/dev/sdb1", "/data", "x-systemd.device-timeout=abc,ro")
                .unwrap(),
            "ro"
        );
        assert_eq!(
            g.write_timeouts("/dev/sdb1", "/data", "x-systemd.device-timeout")
                .unwrap(),
            ""
        );
        assert_eq!(
            g.write_timeouts("server:/export", "/data", "x-systemd.device-timeout=5")
                .unwrap(),
            ""
        );
        assert_eq!(
            g.write_timeouts("/dev/sdb1", "/data", "defaults").unwrap(),
            "defaults"
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_device_deps() {
        let dir = TempDir::new().unwrap();
        let g = generator(dir.path());

        g.write_device_deps("/dev/sdc1", "/srv", "rw,_netdev").unwrap();
        assert_eq!(
            read(dir.path(), "dev-sdc1.device.d/50-netdev-dependencies.conf"),
            format!(
                "{}[Unit]\nAfter=network-online.target network.target\nWants=network-online.target\n",
                HEADER
            )
        );

        g.write_device_deps("/dev/sdc2", "/srv2", "rw").unwrap();
        g.write_device_deps("server:/export", "/srv3", "_netdev").unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_initrd_root_device_deps() {
        let dir = TempDir::new().unwrap();
        let g = generator(dir.path());

        g.write_initrd_root_device_deps("/dev/vda2").unwrap();
        assert_eq!(
            read(dir.path(), "initrd-root-device.target.d/50-root-device.conf"),
            format!(
                "{}[Unit]\nRequires=dev-vda2.device\nAfter=dev-vda2.device\n",
                HEADER
            )
        );

        assert!(matches!(
            g.write_initrd_root_device_deps("/dev/vda3"),
            Err(Error::Conflict { .. })
        ));
        assert!(matches!(
            g.write_initrd_root_device_deps("vda3"),
            Err(Error::UnitName { .. })
        ));
    }
}

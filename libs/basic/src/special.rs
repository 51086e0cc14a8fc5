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

//! the special name of the system unit

/// the shutdown target
pub const SHUTDOWN_TARGET: &str = "shutdown.target";

/// local file systems are mounted
pub const LOCAL_FS_TARGET: &str = "local-fs.target";
/// ordered before any local file system is mounted
pub const LOCAL_FS_PRE_TARGET: &str = "local-fs-pre.target";

/// network is configured
pub const NETWORK_TARGET: &str = "network.target";
/// network is configured and online
pub const NETWORK_ONLINE_TARGET: &str = "network-online.target";

/// the device backing the new root showed up in the initrd
pub const INITRD_ROOT_DEVICE_TARGET: &str = "initrd-root-device.target";

/// checks the root file system, shipped with the distribution
pub const FSCK_ROOT_SERVICE: &str = "systemd-fsck-root.service";
/// remounts the root and kernel file systems with the configured options
pub const REMOUNT_FS_SERVICE: &str = "systemd-remount-fs.service";

/// mount point of the new root file system in the initrd
pub const INITRD_SYSROOT: &str = "/sysroot";

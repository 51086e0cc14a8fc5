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

use basic::fstab_util::{fstab_filter_options, fstab_test_option};
use generator::{Generator, Relation, Result};
use std::{fs, os::unix::fs::PermissionsExt, path::Path};
use walkdir::WalkDir;

/// one line of an fstab
pub struct Record {
    pub what: &'static str,
    pub mount_point: &'static str,
    pub fstype: &'static str,
    pub opts: &'static str,
    pub passno: u32,
}

/// A minimal fstab generator, enough to drive every rule.
pub fn process_record(g: &Generator, r: Record) -> Result<()> {
    let makefs = fstab_test_option(r.opts, &["x-systemd.makefs"]);

    if r.fstype == "swap" {
        if makefs {
            g.hook_up_mkswap(r.what)?;
        }
        return Ok(());
    }

    let opts = g.write_timeouts(r.what, r.mount_point, r.opts)?;
    g.write_device_deps(r.what, r.mount_point, &opts)?;
    let opts = fstab_filter_options(&opts, &["x-systemd.makefs", "x-systemd.growfs"]).filtered;

    let name = basic::unit_name::unit_name_from_path(r.mount_point, ".mount").map_err(|e| {
        generator::Error::UnitName {
            what: r.mount_point.to_string(),
            source: e,
        }
    })?;

    let mut unit = g.open_unit_file(Some("/etc/fstab"), &name)?;
    unit.write_str("[Unit]\nSourcePath=/etc/fstab\n")?;
    if r.passno > 0 {
        g.write_fsck_deps(&mut unit, r.what, r.mount_point, Some(r.fstype))?;
    }
    unit.write_str(&format!(
        "\n[Mount]\nWhat={}\nWhere={}\nType={}\n",
        r.what, r.mount_point, r.fstype
    ))?;
    if !opts.is_empty() {
        unit.write_str(&format!("Options={}\n", opts))?;
    }
    unit.commit()?;

    if makefs {
        g.hook_up_mkfs(r.what, r.mount_point, Some(r.fstype))?;
    }
    if fstab_test_option(r.opts, &["x-systemd.growfs"]) {
        g.hook_up_growfs(r.mount_point, "local-fs.target")?;
    }

    g.add_symlink("local-fs.target", Relation::Requires, &name)?;
    Ok(())
}

/// put an executable "fsck.<fstype>" into `dir`
pub fn install_fsck(dir: &Path, fstype: &str) {
    let p = dir.join(format!("fsck.{}", fstype));
    fs::write(&p, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&p, fs::Permissions::from_mode(0o755)).unwrap();
}

/// all entries below `dir`, relative and sorted, symlinks are not followed
pub fn tree(dir: &Path) -> Vec<String> {
    let mut ret: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|e| {
            e.unwrap()
                .path()
                .strip_prefix(dir)
                .unwrap()
                .display()
                .to_string()
        })
        .collect();
    ret.sort();
    ret
}

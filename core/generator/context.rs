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

//! The state shared by all the rules of one generator run.

use crate::dropin::{write_drop_in, DEFAULT_DROP_IN_PRIORITY};
use crate::error::*;
use crate::symlink::{add_symlink, Relation};
use crate::unit_file::UnitFile;
use basic::initrd_util::in_initrd;
use basic::path_util::basename;
use basic::{SYSTEMD_LIBEXEC_PATH, SYSTEM_DATA_UNIT_PATH};
use std::path::{Path, PathBuf};

/// where the generator runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootEnvironment {
    /// the real root file system
    Host,
    /// the initial ram disk, the real root is mounted on /sysroot
    Initrd,
}

impl BootEnvironment {
    /// detect the boot environment of the running system
    pub fn detect() -> Self {
        if in_initrd(None) {
            BootEnvironment::Initrd
        } else {
            BootEnvironment::Host
        }
    }
}

/// Helper binaries referenced by generated units and the directory of the
/// units shipped with the distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperPaths {
    /// file system checker wrapper
    pub fsck: String,
    /// mkfs and mkswap wrapper
    pub makefs: String,
    /// file system growing helper
    pub growfs: String,
    /// directory of the well-known units
    pub system_unit_dir: String,
    /// where "fsck.<type>" is looked up, $PATH if None
    pub fsck_search_path: Option<String>,
}

impl Default for HelperPaths {
    fn default() -> Self {
        HelperPaths {
            fsck: format!("{}/systemd-fsck", SYSTEMD_LIBEXEC_PATH),
            makefs: format!("{}/systemd-makefs", SYSTEMD_LIBEXEC_PATH),
            growfs: format!("{}/systemd-growfs", SYSTEMD_LIBEXEC_PATH),
            system_unit_dir: SYSTEM_DATA_UNIT_PATH.to_string(),
            fsck_search_path: None,
        }
    }
}

/// Output directories a generator is invoked with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorArgs {
    /// name the program was invoked as
    pub program: String,
    /// normal priority output directory
    pub normal: PathBuf,
    /// early output directory, overrides everything
    pub early: PathBuf,
    /// late output directory, overridden by everything
    pub late: PathBuf,
}

impl GeneratorArgs {
    /// Parse the command line, program name included. Without any argument
    /// all output goes to /tmp.
    pub fn parse(args: &[String]) -> Result<Self> {
        let program = program_name(args.first().map(String::as_str).unwrap_or_default());

        match args.len() {
            0 | 1 => Ok(GeneratorArgs {
                program,
                normal: PathBuf::from("/tmp"),
                early: PathBuf::from("/tmp"),
                late: PathBuf::from("/tmp"),
            }),
            4 => Ok(GeneratorArgs {
                program,
                normal: PathBuf::from(&args[1]),
                early: PathBuf::from(&args[2]),
                late: PathBuf::from(&args[3]),
            }),
            _ => Err(Error::Invalid {
                what: "This program takes zero or three arguments.".to_string(),
            }),
        }
    }
}

/// the short name of the program from argv[0]
pub fn program_name(argv0: &str) -> String {
    match basename(argv0) {
        "" | "/" => "generator".to_string(),
        name => name.to_string(),
    }
}

/// Output directory, program name, boot environment and helper paths of a
/// generator run.
#[derive(Debug, Clone)]
pub struct Generator {
    dest: PathBuf,
    program: String,
    boot: BootEnvironment,
    paths: HelperPaths,
}

impl Generator {
    /// Create the context writing to `dest`, the boot environment is
    /// detected from the running system.
    pub fn new<P: Into<PathBuf>>(dest: P, program: &str) -> Self {
        Generator {
            dest: dest.into(),
            program: program.to_string(),
            boot: BootEnvironment::detect(),
            paths: HelperPaths::default(),
        }
    }

    /// override the boot environment
    pub fn with_boot(mut self, boot: BootEnvironment) -> Self {
        self.boot = boot;
        self
    }

    /// override the helper paths
    pub fn with_paths(mut self, paths: HelperPaths) -> Self {
        self.paths = paths;
        self
    }

    /// the output directory
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// the program name written into the provenance header
    pub fn program(&self) -> &str {
        &self.program
    }

    /// the boot environment
    pub fn boot(&self) -> BootEnvironment {
        self.boot
    }

    /// the helper paths
    pub fn paths(&self) -> &HelperPaths {
        &self.paths
    }

    /// Create a new unit file in the output directory.
    pub fn open_unit_file(&self, origin: Option<&str>, name: &str) -> Result<UnitFile> {
        UnitFile::create(&self.dest, origin, name, &self.program)
    }

    /// Write a drop-in with the default priority.
    pub fn write_drop_in(&self, unit: &str, label: &str, body: &str) -> Result<PathBuf> {
        write_drop_in(
            &self.dest,
            unit,
            DEFAULT_DROP_IN_PRIORITY,
            label,
            body,
            &self.program,
        )
    }

    /// Add the dependency edge `target` -> `source`.
    pub fn add_symlink(&self, target: &str, relation: Relation, source: &str) -> Result<PathBuf> {
        add_symlink(&self.dest, target, &relation, source)
    }

    /// Path of a well-known unit shipped with the distribution.
    pub fn system_unit(&self, name: &str) -> String {
        format!("{}/{}", self.paths.system_unit_dir, name)
    }

    /// Run `f` on every record. A failed record is logged and does not stop
    /// the others, the first error is returned at the end.
    pub fn gather<T, I, F>(&self, records: I, mut f: F) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&Generator, T) -> Result<()>,
    {
        let mut ret = Ok(());
        for record in records {
            if let Err(e) = f(self, record) {
                log::error!("{}", e);
                if ret.is_ok() {
                    ret = Err(e);
                }
            }
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_generator_args() {
        let a = GeneratorArgs::parse(&args(&["/usr/lib/systemd/fstab-generator"])).unwrap();
        assert_eq!(a.program, "fstab-generator");
        assert_eq!(a.normal, PathBuf::from("/tmp"));
        assert_eq!(a.late, PathBuf::from("/tmp"));

        let a = GeneratorArgs::parse(&args(&["gen", "/run/n", "/run/e", "/run/l"])).unwrap();
        assert_eq!(a.normal, PathBuf::from("/run/n"));
        assert_eq!(a.early, PathBuf::from("/run/e"));
        assert_eq!(a.late, PathBuf::from("/run/l"));

        assert!(GeneratorArgs::parse(&args(&["gen", "/run/n"])).is_err());
        assert!(GeneratorArgs::parse(&[]).is_ok());
    }

    #[test]
    fn test_program_name() {
        assert_eq!(program_name("/usr/lib/systemd/fstab-generator"), "fstab-generator");
        assert_eq!(program_name("gen"), "gen");
        assert_eq!(program_name(""), "generator");
    }

    #[test]
    fn test_helper_paths_default() {
        let p = HelperPaths::default();
        assert_eq!(p.fsck, "/usr/lib/systemd/systemd-fsck");
        assert_eq!(p.makefs, "/usr/lib/systemd/systemd-makefs");
        assert_eq!(p.growfs, "/usr/lib/systemd/systemd-growfs");
        assert_eq!(p.system_unit_dir, "/usr/lib/systemd/system");
    }

    #[test]
    fn test_generator() {
        let dir = TempDir::new().unwrap();
        let g = Generator::new(dir.path(), "test-generator").with_boot(BootEnvironment::Initrd);
        assert_eq!(g.boot(), BootEnvironment::Initrd);
        assert_eq!(g.dest(), dir.path());
        assert_eq!(
            g.system_unit("local-fs.target"),
            "/usr/lib/systemd/system/local-fs.target"
        );

        let unit = g.open_unit_file(None, "a.service").unwrap();
        unit.commit().unwrap();
        assert!(g.open_unit_file(Some("/etc/fstab"), "a.service").is_err());
    }

    #[test]
    fn test_boot_environment_env() {
        let dir = TempDir::new().unwrap();
        let env = basic::initrd_util::IN_INITRD_ENV;

        std::env::set_var(env, "yes");
        assert_eq!(Generator::new(dir.path(), "t").boot(), BootEnvironment::Initrd);
        std::env::set_var(env, "0");
        assert_eq!(Generator::new(dir.path(), "t").boot(), BootEnvironment::Host);

        std::env::remove_var(env);
        let detected = BootEnvironment::detect();
        std::env::set_var(env, "garbage");
        assert_eq!(Generator::new(dir.path(), "t").boot(), detected);
        std::env::remove_var(env);
    }

    #[test]
    fn test_gather() {
        let dir = TempDir::new().unwrap();
        let g = Generator::new(dir.path(), "test");
        let mut seen = Vec::new();
        let r = g.gather(["a", "", "b", ""], |g, name| {
            seen.push(name);
            g.open_unit_file(None, &format!("{}.service", name))?.commit()?;
            Ok(())
        });

        assert_eq!(seen, vec!["a", "", "b", ""]);
        assert!(dir.path().join("a.service").exists());
        assert!(dir.path().join("b.service").exists());
        /* the second ".service" is the only failure */
        assert!(matches!(r, Err(Error::Conflict { .. })));
    }
}

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

//! the utils of the path operation
//!
use std::path::Path;

/// The maximum length of a linux path
pub const PATH_LENGTH_MAX: usize = 4096;

/// return true if the path of a and b equaled.
pub fn path_equal(a: &str, b: &str) -> bool {
    let p_a = Path::new(a);
    let p_b = Path::new(b);
    p_a == p_b
}

/// check if the given path is an absolute path
pub fn path_is_absolute(s: &str) -> bool {
    s.starts_with('/')
}

/// check if the given path refers to a device node, either in /dev or in /sys
pub fn is_device_path(s: &str) -> bool {
    s.starts_with("/dev/") || s.starts_with("/sys/")
}

/// Remove redundant inner and trailing slashes and unnecessary dots to simplify path.
/// e.g., //foo//.//bar/ becomes /foo/bar
/// .//foo//.//bar/ becomes foo/bar
pub fn path_simplify(s: &str) -> String {
    let mut ret = String::new();

    let mut pre = "";

    for com in s.split('/') {
        match com {
            "" => {
                if ret.is_empty() && pre.is_empty() {
                    ret.push('/');
                }
            }
            "." => {
                if pre.is_empty() {
                    pre = ".";
                }
            }
            _ => {
                ret.push_str(com);
                ret.push('/');
                pre = com;
            }
        }
    }
    /* drop the trailing slash, but keep a bare root */
    if ret.len() > 1 && ret.ends_with('/') {
        let _ = ret.pop();
    }

    ret
}

/// return true if the path contains no "." or ".." component and no
/// duplicated slashes, i.e. simplifying it won't change anything except a
/// trailing slash.
pub fn path_is_normalized(s: &str) -> bool {
    if s.is_empty() || s.len() > PATH_LENGTH_MAX {
        return false;
    }

    if s.contains("//") {
        return false;
    }

    !s.split('/').any(|com| com == "." || com == "..")
}

/// return the last component of the path, the whole string if there is no slash.
pub fn basename(s: &str) -> &str {
    let trimmed = s.trim_end_matches('/');
    if trimmed.is_empty() {
        return if s.is_empty() { "" } else { "/" };
    }
    match trimmed.rfind('/') {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_equal() {
        assert!(path_equal("/etc", "/etc"));
        assert!(path_equal("//etc", "/etc"));
        assert!(path_equal("/etc//", "/etc"));
        assert!(!path_equal("/etc", "./etc"));
        assert!(path_equal("/x/./y", "/x/y"));
        assert!(!path_equal("/etc", "/var"));
        assert!(path_equal("/", "//"));
        assert!(!path_equal("/sysroot", "/"));
    }

    #[test]
    fn test_path_simplify() {
        assert_eq!(path_simplify("//foo//.//bar/"), "/foo/bar");
        assert_eq!(path_simplify(".//foo//.//bar/"), "foo/bar");
        assert_eq!(path_simplify("foo//.//bar/"), "foo/bar");
        assert_eq!(path_simplify("///"), "/");
    }

    #[test]
    fn test_is_device_path() {
        assert!(is_device_path("/dev/sda1"));
        assert!(is_device_path("/dev/disk/by-label/root"));
        assert!(is_device_path("/sys/devices/virtual/block/loop0"));
        assert!(!is_device_path("/devices/sda"));
        assert!(!is_device_path("server:/export"));
        assert!(!is_device_path("LABEL=root"));
        assert!(!is_device_path("tmpfs"));
    }

    #[test]
    fn test_path_is_normalized() {
        assert!(path_is_normalized("/data"));
        assert!(path_is_normalized("/data/"));
        assert!(!path_is_normalized("/data/../etc"));
        assert!(!path_is_normalized("/data/./x"));
        assert!(!path_is_normalized("//data"));
        assert!(!path_is_normalized(""));
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/usr/lib/systemd/system/foo.service"), "foo.service");
        assert_eq!(basename("foo.service"), "foo.service");
        assert_eq!(basename("/a/b/"), "b");
        assert_eq!(basename("/"), "/");
        assert_eq!(basename(""), "");
    }
}

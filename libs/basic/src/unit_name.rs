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

//! Interfaces related to the unit name.
//!
//! A path is turned into a unit name by replacing '/' with '-' and escaping
//! everything else that is not allowed in a unit name as "\xNN", e.g.
//! "/dev/disk/by-label/root" becomes "dev-disk-by\x2dlabel-root".

use crate::error::*;
use crate::path_util::{path_is_absolute, path_is_normalized, path_simplify};

/// The maximum length of a unit name, including the suffix
pub const UNIT_NAME_MAX: usize = 256;

fn is_valid_unit_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b':' || c == b'_' || c == b'.'
}

fn escape_char(c: u8, ret: &mut String) {
    ret.push_str(&format!("\\x{:02x}", c));
}

fn unhexchar(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn unit_name_escape(s: &str) -> String {
    let mut ret = String::with_capacity(s.len() * 2);

    for (i, c) in s.bytes().enumerate() {
        if c == b'/' {
            ret.push('-');
        } else if (i == 0 && c == b'.') || !is_valid_unit_char(c) {
            /* A leading dot would make a hidden file, escape it too. */
            escape_char(c, &mut ret);
        } else {
            ret.push(c as char);
        }
    }

    ret
}

/// Restore the unit name which is escaped
pub fn unit_name_unescape(s: &str) -> Result<String> {
    let mut vec = Vec::with_capacity(s.len());

    let mut bytes = s.bytes();
    while let Some(c) = bytes.next() {
        if c == b'-' {
            vec.push(b'/');
        } else if c == b'\\' {
            if bytes.next() != Some(b'x') {
                return Err(Error::Invalid {
                    what: format!("bad escape sequence in unit name '{}'", s),
                });
            }

            let a = bytes.next().and_then(unhexchar);
            let b = bytes.next().and_then(unhexchar);
            match (a, b) {
                (Some(a), Some(b)) => vec.push((a << 4) | b),
                _ => {
                    return Err(Error::Invalid {
                        what: format!("bad hex escape in unit name '{}'", s),
                    })
                }
            }
        } else {
            vec.push(c);
        }
    }

    Ok(String::from_utf8(vec)?)
}

/// Escape a path to the string used as unit name prefix or instance.
/// The root directory is escaped as "-".
pub fn unit_name_path_escape(path: &str) -> Result<String> {
    let p = path_simplify(path);
    if p.is_empty() || p == "/" {
        return Ok("-".to_string());
    }

    if !path_is_normalized(&p) {
        return Err(Error::Invalid {
            what: format!("path '{}' is not normalized", path),
        });
    }

    Ok(unit_name_escape(p.trim_matches('/')))
}

/// Restore the path escaped by `unit_name_path_escape`.
pub fn unit_name_path_unescape(s: &str) -> Result<String> {
    if s.is_empty() {
        return Err(Error::Invalid {
            what: "empty unit name path".to_string(),
        });
    }

    if s == "-" {
        return Ok("/".to_string());
    }

    let unescaped = unit_name_unescape(s)?;
    Ok(format!("/{}", unescaped))
}

fn check_unit_name_length(name: String) -> Result<String> {
    if name.len() >= UNIT_NAME_MAX {
        return Err(Error::Invalid {
            what: format!("unit name '{}' is too long", name),
        });
    }
    Ok(name)
}

/// Build a unit name like "data.mount" from an absolute path and a suffix.
pub fn unit_name_from_path(path: &str, suffix: &str) -> Result<String> {
    if !suffix.starts_with('.') {
        return Err(Error::Invalid {
            what: format!("invalid unit suffix '{}'", suffix),
        });
    }

    if !path_is_absolute(path) {
        return Err(Error::Invalid {
            what: format!("path '{}' is not absolute", path),
        });
    }

    let prefix = unit_name_path_escape(path)?;
    check_unit_name_length(format!("{}{}", prefix, suffix))
}

/// Build an instance unit name like "systemd-fsck@dev-sda1.service".
pub fn unit_name_from_path_instance(prefix: &str, path: &str, suffix: &str) -> Result<String> {
    if prefix.is_empty()
        || !prefix
            .bytes()
            .all(|c| is_valid_unit_char(c) || c == b'-')
    {
        return Err(Error::Invalid {
            what: format!("invalid unit prefix '{}'", prefix),
        });
    }

    if !suffix.starts_with('.') {
        return Err(Error::Invalid {
            what: format!("invalid unit suffix '{}'", suffix),
        });
    }

    if !path_is_absolute(path) {
        return Err(Error::Invalid {
            what: format!("path '{}' is not absolute", path),
        });
    }

    let instance = unit_name_path_escape(path)?;
    check_unit_name_length(format!("{}@{}{}", prefix, instance, suffix))
}

/// Get the content between the first '@' and the last '.' from unit name.
pub fn unit_name_to_instance(unit_name: &str) -> Option<&str> {
    let p = unit_name.find('@')? + 1;
    let d = unit_name[p..].rfind('.')? + p;
    Some(&unit_name[p..d])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_name_path_escape() {
        assert_eq!(unit_name_path_escape("/").unwrap(), "-");
        assert_eq!(unit_name_path_escape("//").unwrap(), "-");
        assert_eq!(unit_name_path_escape("/data").unwrap(), "data");
        assert_eq!(unit_name_path_escape("/data/").unwrap(), "data");
        assert_eq!(unit_name_path_escape("/dev/sda1").unwrap(), "dev-sda1");
        assert_eq!(
            unit_name_path_escape("/dev/disk/by-label/my disk").unwrap(),
            "dev-disk-by\\x2dlabel-my\\x20disk"
        );
        assert_eq!(unit_name_path_escape("/.hidden").unwrap(), "\\x2ehidden");
        assert_eq!(unit_name_path_escape("/a/.b").unwrap(), "a-.b");
        assert!(unit_name_path_escape("/a/../b").is_err());
    }

    #[test]
    fn test_unit_name_path_unescape() {
        assert_eq!(unit_name_path_unescape("-").unwrap(), "/");
        assert_eq!(unit_name_path_unescape("dev-sda1").unwrap(), "/dev/sda1");
        assert_eq!(
            unit_name_path_unescape("dev-disk-by\\x2dlabel-my\\x20disk").unwrap(),
            "/dev/disk/by-label/my disk"
        );
        assert!(unit_name_path_unescape("dev\\y20").is_err());
        assert!(unit_name_path_unescape("dev\\x2").is_err());
        assert!(unit_name_path_unescape("").is_err());
    }

    #[test]
    fn test_unit_name_from_path() {
        assert_eq!(unit_name_from_path("/", ".mount").unwrap(), "-.mount");
        assert_eq!(unit_name_from_path("/data", ".mount").unwrap(), "data.mount");
        assert_eq!(
            unit_name_from_path("/dev/mapper/swap", ".swap").unwrap(),
            "dev-mapper-swap.swap"
        );
        assert!(unit_name_from_path("data", ".mount").is_err());
        assert!(unit_name_from_path("/data", "mount").is_err());

        let long = "/".to_string() + &"a".repeat(300);
        assert!(unit_name_from_path(&long, ".mount").is_err());
    }

    #[test]
    fn test_unit_name_from_path_instance() {
        assert_eq!(
            unit_name_from_path_instance("systemd-fsck", "/dev/sda1", ".service").unwrap(),
            "systemd-fsck@dev-sda1.service"
        );
        assert_eq!(
            unit_name_from_path_instance("systemd-growfs", "/", ".service").unwrap(),
            "systemd-growfs@-.service"
        );
        assert!(unit_name_from_path_instance("a@b", "/x", ".service").is_err());
        assert!(unit_name_from_path_instance("", "/x", ".service").is_err());
    }

    #[test]
    fn test_unit_name_to_instance() {
        assert_eq!(
            unit_name_to_instance("systemd-fsck@dev-sda1.service"),
            Some("dev-sda1")
        );
        assert_eq!(unit_name_to_instance("getty@.service"), Some(""));
        assert_eq!(unit_name_to_instance("local-fs.target"), None);
    }
}

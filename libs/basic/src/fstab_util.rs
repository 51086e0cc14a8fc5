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

//! Helpers for the fourth fstab field and the first one.
//!
//! Options are a comma separated list, a backslash escapes the next
//! character so that "a\,b" is one option.

/// Result of filtering an option string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    /// the name of the last matched option
    pub name: Option<String>,
    /// the value of the last matched option, if it had one
    pub value: Option<String>,
    /// the option string without any of the matched options
    pub filtered: String,
}

impl FilterResult {
    /// whether any of the names matched
    pub fn found(&self) -> bool {
        self.name.is_some()
    }
}

/// Split an option string on unescaped commas. Empty options are dropped.
pub fn split_options(opts: &str) -> Vec<String> {
    let mut ret = Vec::new();
    let mut cur = String::new();
    let mut escaped = false;

    for c in opts.chars() {
        if escaped {
            cur.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                cur.push(c);
                escaped = true;
            }
            ',' => {
                if !cur.is_empty() {
                    ret.push(std::mem::take(&mut cur));
                }
            }
            _ => cur.push(c),
        }
    }

    if !cur.is_empty() {
        ret.push(cur);
    }
    ret
}

fn match_option<'a>(word: &'a str, names: &[&'a str]) -> Option<(&'a str, Option<&'a str>)> {
    for &name in names {
        let rest = match word.strip_prefix(name) {
            Some(rest) => rest,
            None => continue,
        };
        if rest.is_empty() {
            return Some((name, None));
        }
        if let Some(value) = rest.strip_prefix('=') {
            return Some((name, Some(value)));
        }
    }
    None
}

/// Look for any of `names` in `opts`, either as "name" or "name=value".
/// The last occurrence wins. All occurrences are dropped from `filtered`.
pub fn fstab_filter_options(opts: &str, names: &[&str]) -> FilterResult {
    let mut ret = FilterResult::default();
    let mut kept: Vec<String> = Vec::new();

    for word in split_options(opts) {
        match match_option(&word, names) {
            Some((name, value)) => {
                ret.name = Some(name.to_string());
                ret.value = value.map(|v| v.to_string());
            }
            None => kept.push(word),
        }
    }

    ret.filtered = kept.join(",");
    ret
}

/// return true if any of `names` is present in `opts`
pub fn fstab_test_option(opts: &str, names: &[&str]) -> bool {
    split_options(opts)
        .iter()
        .any(|word| match_option(word, names).is_some())
}

fn is_devnode_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "#+-.:=@_".contains(c)
}

/// Encode a string the way udev names its /dev/disk/by-* symlinks.
/// Unsafe ASCII bytes become "\xNN", valid non-ASCII UTF-8 is kept.
pub fn encode_devnode_name(s: &str) -> String {
    let mut ret = String::with_capacity(s.len());
    for c in s.chars() {
        if !c.is_ascii() || is_devnode_safe_char(c) {
            ret.push(c);
        } else {
            ret.push_str(&format!("\\x{:02x}", c as u32));
        }
    }
    ret
}

fn unquote(s: &str) -> &str {
    for q in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn tag_to_udev_node(tagvalue: &str, by: &str) -> String {
    format!(
        "/dev/disk/by-{}/{}",
        by,
        encode_devnode_name(unquote(tagvalue))
    )
}

/// Resolve the first fstab field to a device node path.
/// "LABEL=", "UUID=", "PARTUUID=" and "PARTLABEL=" are translated to the
/// matching /dev/disk/by-* symlink, anything else is returned unchanged.
pub fn fstab_node_to_udev_node(what: &str) -> String {
    const TAGS: [(&str, &str); 4] = [
        ("LABEL=", "label"),
        ("UUID=", "uuid"),
        ("PARTUUID=", "partuuid"),
        ("PARTLABEL=", "partlabel"),
    ];

    for (tag, by) in TAGS {
        if let Some(value) = what.strip_prefix(tag) {
            return tag_to_udev_node(value, by);
        }
    }

    what.to_string()
}

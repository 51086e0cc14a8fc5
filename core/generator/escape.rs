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

//! Escaping of raw strings that end up in unit files.
//!
//! Values in unit files go through specifier expansion, so a literal '%'
//! has to be doubled. Values in command lines are additionally parsed with
//! C-style escapes.

use crate::error::*;

/// A raw string in the two forms used in unit files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapedPath {
    /// safe for any directive value, e.g. Description=
    pub specifier: String,
    /// safe as an ExecStart= argument
    pub command: String,
}

/// escape a raw string for both directive values and command lines
pub fn escape(raw: &str) -> EscapedPath {
    let specifier = specifier_escape(raw);
    let command = cescape(&specifier);
    EscapedPath { specifier, command }
}

/// double every '%'
pub fn specifier_escape(s: &str) -> String {
    s.replace('%', "%%")
}

fn push_octal(c: u8, ret: &mut String) {
    ret.push('\\');
    ret.push((b'0' + (c >> 6)) as char);
    ret.push((b'0' + ((c >> 3) & 7)) as char);
    ret.push((b'0' + (c & 7)) as char);
}

/// C-style escaping of a string, bytes outside the printable ASCII range
/// are written as three digit octal sequences.
pub fn cescape(s: &str) -> String {
    let mut ret = String::with_capacity(s.len());

    for c in s.bytes() {
        match c {
            0x07 => ret.push_str("\\a"),
            0x08 => ret.push_str("\\b"),
            0x0c => ret.push_str("\\f"),
            b'\n' => ret.push_str("\\n"),
            b'\r' => ret.push_str("\\r"),
            b'\t' => ret.push_str("\\t"),
            0x0b => ret.push_str("\\v"),
            b'\\' => ret.push_str("\\\\"),
            b'"' => ret.push_str("\\\""),
            b'\'' => ret.push_str("\\'"),
            c if !(b' '..0x7f).contains(&c) => push_octal(c, &mut ret),
            c => ret.push(c as char),
        }
    }

    ret
}

fn unoctchar(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'7' => Some(c - b'0'),
        _ => None,
    }
}

fn unhexchar(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

fn bad_escape(s: &str) -> Error {
    Error::Invalid {
        what: format!("bad escape sequence in '{}'", s),
    }
}

/// Undo `cescape`. "\xNN" and "\s" are accepted as well.
pub fn cunescape(s: &str) -> Result<String> {
    let bytes = s.as_bytes();
    let mut ret = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            ret.push(bytes[i]);
            i += 1;
            continue;
        }

        let c = *bytes.get(i + 1).ok_or_else(|| bad_escape(s))?;
        i += 2;
        let b = match c {
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'v' => 0x0b,
            b's' => b' ',
            b'\\' | b'"' | b'\'' => c,
            b'x' => {
                let a = bytes.get(i).copied().and_then(unhexchar);
                let b = bytes.get(i + 1).copied().and_then(unhexchar);
                i += 2;
                match (a, b) {
                    (Some(a), Some(b)) => (a << 4) | b,
                    _ => return Err(bad_escape(s)),
                }
            }
            b'0'..=b'3' => {
                let a = unoctchar(c);
                let b = bytes.get(i).copied().and_then(unoctchar);
                let d = bytes.get(i + 1).copied().and_then(unoctchar);
                i += 2;
                match (a, b, d) {
                    (Some(a), Some(b), Some(d)) => (a << 6) | (b << 3) | d,
                    _ => return Err(bad_escape(s)),
                }
            }
            _ => return Err(bad_escape(s)),
        };
        ret.push(b);
    }

    String::from_utf8(ret).map_err(|_| Error::Invalid {
        what: format!("'{}' does not unescape to valid UTF-8", s),
    })
}

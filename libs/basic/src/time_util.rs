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

//!Parse time

use crate::error::*;

/// USec infinity
pub const USEC_INFINITY: u64 = u64::MAX;

/// USec per Sec
pub const USEC_PER_SEC: u64 = 1000000;
/// USec per MSec
pub const USEC_PER_MSEC: u64 = 1000;
/// USec per Minute
pub const USEC_PER_MINUTE: u64 = 60 * USEC_PER_SEC;
/// USec per Hour
pub const USEC_PER_HOUR: u64 = 60 * USEC_PER_MINUTE;
/// USec per Day
pub const USEC_PER_DAY: u64 = 24 * USEC_PER_HOUR;
/// USec per Week
pub const USEC_PER_WEEK: u64 = 7 * USEC_PER_DAY;
/// USec per Month
pub const USEC_PER_MONTH: u64 = 2629800 * USEC_PER_SEC;
/// USec per Year
pub const USEC_PER_YEAR: u64 = 31557600 * USEC_PER_SEC;

struct Table<'a> {
    suffix: &'a str,
    usec: u64,
}

/* Longer suffixes must come before their prefixes, "m" is last of the m's. */
const TABLE: &[Table] = &[
    Table {
        suffix: "seconds",
        usec: USEC_PER_SEC,
    },
    Table {
        suffix: "second",
        usec: USEC_PER_SEC,
    },
    Table {
        suffix: "sec",
        usec: USEC_PER_SEC,
    },
    Table {
        suffix: "s",
        usec: USEC_PER_SEC,
    },
    Table {
        suffix: "minutes",
        usec: USEC_PER_MINUTE,
    },
    Table {
        suffix: "minute",
        usec: USEC_PER_MINUTE,
    },
    Table {
        suffix: "min",
        usec: USEC_PER_MINUTE,
    },
    Table {
        suffix: "months",
        usec: USEC_PER_MONTH,
    },
    Table {
        suffix: "month",
        usec: USEC_PER_MONTH,
    },
    Table {
        suffix: "M",
        usec: USEC_PER_MONTH,
    },
    Table {
        suffix: "msec",
        usec: USEC_PER_MSEC,
    },
    Table {
        suffix: "ms",
        usec: USEC_PER_MSEC,
    },
    Table {
        suffix: "m",
        usec: USEC_PER_MINUTE,
    },
    Table {
        suffix: "hours",
        usec: USEC_PER_HOUR,
    },
    Table {
        suffix: "hour",
        usec: USEC_PER_HOUR,
    },
    Table {
        suffix: "hr",
        usec: USEC_PER_HOUR,
    },
    Table {
        suffix: "h",
        usec: USEC_PER_HOUR,
    },
    Table {
        suffix: "days",
        usec: USEC_PER_DAY,
    },
    Table {
        suffix: "day",
        usec: USEC_PER_DAY,
    },
    Table {
        suffix: "d",
        usec: USEC_PER_DAY,
    },
    Table {
        suffix: "weeks",
        usec: USEC_PER_WEEK,
    },
    Table {
        suffix: "week",
        usec: USEC_PER_WEEK,
    },
    Table {
        suffix: "w",
        usec: USEC_PER_WEEK,
    },
    Table {
        suffix: "years",
        usec: USEC_PER_YEAR,
    },
    Table {
        suffix: "year",
        usec: USEC_PER_YEAR,
    },
    Table {
        suffix: "y",
        usec: USEC_PER_YEAR,
    },
    Table {
        suffix: "usec",
        usec: 1,
    },
    Table {
        suffix: "us",
        usec: 1,
    },
    Table {
        suffix: "µs",
        usec: 1,
    },
];

fn extract_multiplier(p: &str) -> Option<(&str, u64)> {
    TABLE
        .iter()
        .find(|t| p.starts_with(t.suffix))
        .map(|t| (&p[t.suffix.len()..], t.usec))
}

fn invalid(t: &str) -> Error {
    Error::Invalid {
        what: format!("invalid time span '{}'", t),
    }
}

fn out_of_range(t: &str) -> Error {
    Error::OutOfRange {
        what: t.to_string(),
    }
}

/// parse time
/// default_unit: convert to the specified time unit
pub fn parse_time(t: &str, default_unit: u64) -> Result<u64> {
    let mut p = t.trim();
    if p.is_empty() {
        return Err(invalid(t));
    }

    if let Some(rest) = p.strip_prefix("infinity") {
        if !rest.trim().is_empty() {
            return Err(invalid(t));
        }
        return Ok(USEC_INFINITY);
    }

    let mut usec: u64 = 0;
    let mut something = false;

    loop {
        p = p.trim_start();
        if p.is_empty() {
            if !something {
                return Err(invalid(t));
            }
            break;
        }

        /* Don't allow "-0" */
        if p.starts_with('-') {
            return Err(out_of_range(t));
        }

        let int_len = p.bytes().take_while(|b| b.is_ascii_digit()).count();
        if int_len == 0 {
            return Err(invalid(t));
        }
        let l: u64 = p[..int_len].parse().map_err(|_| out_of_range(t))?;
        p = &p[int_len..];

        let mut frac = "";
        if let Some(rest) = p.strip_prefix('.') {
            let frac_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
            /* Don't allow "0.-0", "3.+1", "3. 1", "3.sec" or "3.hoge" */
            if frac_len == 0 {
                return Err(invalid(t));
            }
            frac = &rest[..frac_len];
            p = &rest[frac_len..];
        }

        let trimmed = p.trim_start();
        let multiplier = match extract_multiplier(trimmed) {
            Some((rest, multiplier)) => {
                p = rest;
                multiplier
            }
            None => {
                /* Don't allow '12.34.56' */
                if !trimmed.is_empty() && trimmed.len() == p.len() {
                    return Err(invalid(t));
                }
                p = trimmed;
                default_unit
            }
        };

        let k = l
            .checked_mul(multiplier)
            .and_then(|k| k.checked_add(usec))
            .filter(|k| *k < USEC_INFINITY)
            .ok_or_else(|| out_of_range(t))?;
        usec = k;

        let mut m = multiplier / 10;
        for b in frac.bytes() {
            usec = usec
                .checked_add((b - b'0') as u64 * m)
                .filter(|k| *k < USEC_INFINITY)
                .ok_or_else(|| out_of_range(t))?;
            m /= 10;
        }

        something = true;
    }

    Ok(usec)
}

/// parse time to sec
pub fn parse_sec(t: &str) -> Result<u64> {
    parse_time(t, USEC_PER_SEC)
}

/// parse time to sec, treating "0" as infinity
pub fn parse_sec_fix_0(t: &str) -> Result<u64> {
    let usec = parse_sec(t)?;
    if usec == 0 {
        return Ok(USEC_INFINITY);
    }
    Ok(usec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sec() {
        assert_eq!(parse_sec("30").unwrap(), 30 * USEC_PER_SEC);
        assert_eq!(parse_sec("5s").unwrap(), 5 * USEC_PER_SEC);
        assert_eq!(parse_sec(" 5 s ").unwrap(), 5 * USEC_PER_SEC);
        assert_eq!(parse_sec("1.5s").unwrap(), 1500 * USEC_PER_MSEC);
        assert_eq!(parse_sec("2min").unwrap(), 2 * USEC_PER_MINUTE);
        assert_eq!(parse_sec("2m").unwrap(), 2 * USEC_PER_MINUTE);
        assert_eq!(parse_sec("2M").unwrap(), 2 * USEC_PER_MONTH);
        assert_eq!(parse_sec("100ms").unwrap(), 100 * USEC_PER_MSEC);
        assert_eq!(
            parse_sec("1h 30min").unwrap(),
            USEC_PER_HOUR + 30 * USEC_PER_MINUTE
        );
        assert_eq!(parse_sec("1h30min").unwrap(), USEC_PER_HOUR + 30 * USEC_PER_MINUTE);
        assert_eq!(parse_sec("10us").unwrap(), 10);
        assert_eq!(parse_sec("infinity").unwrap(), USEC_INFINITY);
        assert_eq!(parse_sec("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_sec_invalid() {
        assert!(parse_sec("").is_err());
        assert!(parse_sec("abc").is_err());
        assert!(parse_sec("30abc").is_err());
        assert!(parse_sec("12.34.56").is_err());
        assert!(parse_sec("3.sec").is_err());
        assert!(parse_sec("infinityx").is_err());
        assert!(matches!(parse_sec("-1"), Err(Error::OutOfRange { .. })));
        assert!(matches!(
            parse_sec("99999999999999999999"),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_sec_fix_0() {
        assert_eq!(parse_sec_fix_0("0").unwrap(), USEC_INFINITY);
        assert_eq!(parse_sec_fix_0("0s").unwrap(), USEC_INFINITY);
        assert_eq!(parse_sec_fix_0("30").unwrap(), 30 * USEC_PER_SEC);
        assert!(parse_sec_fix_0("abc").is_err());
    }
}

//! Conversion between the Jalali (Solar Hijri) calendar used for user-facing
//! dates and the Gregorian calendar used for storage.
//!
//! The arithmetic follows the break-year table formulation of the 2820-year
//! cycle (the same algorithm used by the common `jalaali` libraries), so
//! conversions are deterministic and need no lookup data beyond the table.

use time::{Date, Month, OffsetDateTime};

use crate::Error;

/// Jalali years at which the leap year pattern changes.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Parse a strict `YYYY/MM/DD` or `YYYY-MM-DD` Jalali date string and convert
/// it to the Gregorian [Date] used by storage.
///
/// # Errors
///
/// - [Error::InvalidDateFormat] when the string does not match the pattern
///   (wrong digit counts, mixed separators, stray characters).
/// - [Error::InvalidDate] when the components do not form a real Jalali date
///   (e.g. month 13, or day 30 of Esfand in a non-leap year).
pub fn parse_jalali(value: &str) -> Result<Date, Error> {
    let (year, month, day) = split_date_string(value)?;

    if !(1..=12).contains(&month) {
        return Err(Error::InvalidDate(value.to_owned()));
    }

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::InvalidDate(value.to_owned()));
    }

    if day < 1 || day > jalali_month_length(year, month) {
        return Err(Error::InvalidDate(value.to_owned()));
    }

    let (gy, gm, gd) = jdn_to_gregorian(jalali_to_jdn(year, month, day));
    let month = Month::try_from(gm as u8).map_err(|_| Error::InvalidDate(value.to_owned()))?;

    Date::from_calendar_date(gy, month, gd as u8).map_err(|_| Error::InvalidDate(value.to_owned()))
}

/// Format a Gregorian [Date] as a zero-padded Jalali `YYYY/MM/DD` string.
///
/// Round-trips with [parse_jalali] for any date within the supported year
/// range.
pub fn format_jalali(date: Date) -> String {
    let jdn = gregorian_to_jdn(date.year(), date.month() as i32, date.day() as i32);
    let (jy, jm, jd) = jdn_to_jalali(jdn);

    format!("{jy:04}/{jm:02}/{jd:02}")
}

/// Today's date (UTC) formatted as a Jalali date string, used to pre-populate
/// the new-transaction form.
pub fn today_jalali() -> String {
    format_jalali(OffsetDateTime::now_utc().date())
}

/// Years outside the break table cannot be converted reliably.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 3177;

/// Split `value` into year, month, and day integers, enforcing the strict
/// 4-2-2 digit pattern with a single consistent separator.
fn split_date_string(value: &str) -> Result<(i32, i32, i32), Error> {
    let bytes = value.as_bytes();

    if bytes.len() != 10 {
        return Err(Error::InvalidDateFormat(value.to_owned()));
    }

    let separator = bytes[4];
    if !(separator == b'/' || separator == b'-') || bytes[7] != separator {
        return Err(Error::InvalidDateFormat(value.to_owned()));
    }

    let digits_at = |range: std::ops::Range<usize>| -> Result<i32, Error> {
        let chunk = &value[range];
        if !chunk.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(Error::InvalidDateFormat(value.to_owned()));
        }
        chunk
            .parse()
            .map_err(|_| Error::InvalidDateFormat(value.to_owned()))
    };

    Ok((digits_at(0..4)?, digits_at(5..7)?, digits_at(8..10)?))
}

/// The number of days in Jalali month `jm` of year `jy`.
fn jalali_month_length(jy: i32, jm: i32) -> i32 {
    match jm {
        1..=6 => 31,
        7..=11 => 30,
        _ => {
            if is_jalali_leap_year(jy) {
                30
            } else {
                29
            }
        }
    }
}

fn is_jalali_leap_year(jy: i32) -> bool {
    jal_cal(jy).leap == 0
}

struct JalCycle {
    /// Number of years since the last leap year (0 in a leap year).
    leap: i32,
    /// The Gregorian year of the first day of the Jalali year.
    gy: i32,
    /// The Gregorian day of March of the first day of the Jalali year.
    march: i32,
}

/// Leap year and March-day bookkeeping for Jalali year `jy`.
///
/// `jy` must lie within the break table; [parse_jalali] guarantees this.
fn jal_cal(jy: i32) -> JalCycle {
    let gy = jy + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += (jump / 33) * 8 + (jump % 33) / 4;
        jp = jm;
    }

    let mut n = jy - jp;

    leap_j += (n / 33) * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gy / 4 - ((gy / 100 + 1) * 3) / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + ((jump + 4) / 33) * 33;
    }

    let mut leap = (((n + 1) % 33) - 1).rem_euclid(4);
    if leap == -1 {
        leap = 4;
    }

    JalCycle { leap, gy, march }
}

/// Julian day number of the Jalali date `jy/jm/jd`.
fn jalali_to_jdn(jy: i32, jm: i32, jd: i32) -> i32 {
    let cycle = jal_cal(jy);

    gregorian_to_jdn(cycle.gy, 3, cycle.march) + (jm - 1) * 31 - (jm / 7) * (jm - 7) + jd - 1
}

/// Jalali date of the Julian day number `jdn`.
fn jdn_to_jalali(jdn: i32) -> (i32, i32, i32) {
    let (gy, _, _) = jdn_to_gregorian(jdn);
    let mut jy = gy - 621;
    let cycle = jal_cal(jy);
    let jdn1f = gregorian_to_jdn(gy, 3, cycle.march);

    let mut k = jdn - jdn1f;
    if k >= 0 {
        if k <= 185 {
            return (jy, 1 + k / 31, k % 31 + 1);
        }
        k -= 186;
    } else {
        jy -= 1;
        k += 179;
        if cycle.leap == 1 {
            k += 1;
        }
    }

    (jy, 7 + k / 30, k % 30 + 1)
}

/// Julian day number of the Gregorian date `gy/gm/gd`.
fn gregorian_to_jdn(gy: i32, gm: i32, gd: i32) -> i32 {
    let d = ((gy + (gm - 8).div_euclid(6) + 100100) * 1461).div_euclid(4)
        + (153 * (gm + 9).rem_euclid(12) + 2).div_euclid(5)
        + gd
        - 34840408;

    d - ((gy + 100100 + (gm - 8).div_euclid(6)).div_euclid(100) * 3).div_euclid(4) + 752
}

/// Gregorian date of the Julian day number `jdn`.
fn jdn_to_gregorian(jdn: i32) -> (i32, i32, i32) {
    let mut j = 4 * jdn + 139361631;
    j += ((4 * jdn + 183187720).div_euclid(146097) * 3).div_euclid(4) * 4 - 3908;
    let i = (j.rem_euclid(1461)).div_euclid(4) * 5 + 308;

    let gd = (i.rem_euclid(153)).div_euclid(5) + 1;
    let gm = (i.div_euclid(153)).rem_euclid(12) + 1;
    let gy = j.div_euclid(1461) - 100100 + (8 - gm).div_euclid(6);

    (gy, gm, gd)
}


#[cfg(test)]
mod format_jalali_tests {
    use time::macros::date;

    use super::{format_jalali, parse_jalali};

    #[test]
    fn formats_known_date() {
        assert_eq!(format_jalali(date!(2023 - 10 - 10)), "1402/07/18");
    }

    #[test]
    fn zero_pads_month_and_day() {
        // Farvardin 3rd: both components need padding.
        assert_eq!(format_jalali(date!(2024 - 03 - 22)), "1403/01/03");
    }

    #[test]
    fn round_trips() {
        for value in ["1402/07/18", "1403/01/01", "1403/12/30", "1375/11/09"] {
            let date = parse_jalali(value).expect("test date should parse");
            assert_eq!(format_jalali(date), value, "round trip failed for {value}");
        }
    }
}

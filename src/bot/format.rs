//! Display helpers for amounts, times and privacy masking.

use crate::{apis::users::UNLIMITED, Error};
use chrono::{Local, TimeZone};

const MASK: &str = "****";

/// Renders an amount in cents as a decimal string with two fractional digits.
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Average order amount. Zero orders render as `0.00`.
pub fn format_avg_amount(total_cents: i64, order_count: i64) -> String {
    if order_count == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", total_cents as f64 / order_count as f64 / 100.0)
}

/// A limit in cents, or `unlimited`.
pub fn format_limit(cents: i64) -> String {
    if cents == UNLIMITED {
        "unlimited".to_string()
    } else {
        format!("¥{}", format_amount(cents))
    }
}

/// Fee rate stored in hundredths of a percent.
pub fn format_rate(rate: i32) -> String {
    format!("{:.2}%", rate as f64 / 100.0)
}

/// Local date-time of a unix timestamp in seconds.
pub fn format_time(timestamp: i64) -> String {
    if timestamp == 0 {
        return "not set".to_string();
    }
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

/// Shows only the first and last four characters of secrets longer than eight.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    match chars.len() {
        0 => "not set".to_string(),
        n if n > 8 => {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[n - 4..].iter().collect();
            format!("{}{}{}", head, MASK, tail)
        }
        _ => MASK.to_string(),
    }
}

/// Parses a comma-separated list of group ids, skipping blank segments.
pub fn parse_group_ids(input: &str) -> Result<Vec<i64>, Error> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| Error::Validation(format!("invalid group id: {}", part)))
        })
        .collect()
}

pub fn format_group_ids(groups: &[i64]) -> String {
    if groups.is_empty() {
        return "none".to_string();
    }
    groups
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Keeps the first two digits of ids longer than four digits.
pub fn mask_user_id(uid: i64) -> String {
    let digits = uid.to_string();
    if digits.chars().count() <= 4 {
        return MASK.to_string();
    }
    let head: String = digits.chars().take(2).collect();
    format!("{}{}", head, MASK)
}

pub fn mask_username(username: &str) -> String {
    match username.chars().next() {
        Some(first) => format!("{}**", first),
        None => MASK.to_string(),
    }
}

/// Keeps the first and last characters of names longer than two characters.
pub fn mask_account_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    match chars.as_slice() {
        [] => MASK.to_string(),
        [first] | [first, _] => format!("{}**", first),
        [first, .., last] => format!("{}**{}", first, last),
    }
}

/// Replaces an exact amount with a coarse range for display in groups.
pub fn mask_amount(cents: i64) -> String {
    if cents == 0 {
        return "0.00".to_string();
    }
    let yuan = cents as f64 / 100.0;
    let range = if yuan < 100.0 {
        "< 100"
    } else if yuan < 500.0 {
        "100 - 500"
    } else if yuan < 1_000.0 {
        "500 - 1000"
    } else if yuan < 5_000.0 {
        "1K - 5K"
    } else if yuan < 10_000.0 {
        "5K - 10K"
    } else if yuan < 50_000.0 {
        "10K - 50K"
    } else if yuan < 100_000.0 {
        "50K - 100K"
    } else {
        "> 100K"
    };
    range.to_string()
}

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Duration, Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a day relative to `today`: keywords, `+Nd`/`-Nw` offsets, or `YYYY-MM-DD`.
pub fn parse_day(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        "yesterday" | "yes" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    // 2. Relative format (+Nd, -Nd, +Nw, -Nw)
    if input.starts_with('+') || input.starts_with('-') {
        let (sign, rest) = input.split_at(1);
        if rest.len() < 2 {
            return Err(anyhow!("Invalid relative format: {}", input));
        }
        let (num_str, unit) = rest.split_at(rest.len() - 1);
        let count: i64 = num_str
            .parse()
            .map_err(|_| anyhow!("Invalid relative format: {}", input))?;
        let count = if sign == "-" { -count } else { count };

        return match unit {
            "d" => Ok(today + Duration::days(count)),
            "w" => Ok(today + Duration::weeks(count)),
            _ => Err(anyhow!("Unknown unit in relative date: {}", unit)),
        };
    }

    // 3. Fallback to ISO dates
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Could not parse date: {}", input))
}

/// Parses `YYYY-MM` into a (year, month) pair.
pub fn parse_month(input: &str) -> Result<(i32, u32)> {
    let (year, month) = input
        .trim()
        .split_once('-')
        .ok_or_else(|| anyhow!("Expected YYYY-MM, got: {}", input))?;
    let year: i32 = year.parse().with_context(|| format!("Invalid year in {}", input))?;
    let month: u32 = month.parse().with_context(|| format!("Invalid month in {}", input))?;
    first_of_month(year, month).ok_or_else(|| anyhow!("Invalid month: {}", input))?;
    Ok((year, month))
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    match (first_of_month(year, month), first_of_month(next_year, next_month)) {
        (Some(start), Some(end)) => (end - start).num_days() as u32,
        _ => 0,
    }
}

/// Moves `date` by whole months, clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Monday-first weeks of the month; cells outside the month are `None`.
pub fn month_weeks(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = first_of_month(year, month) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = first.weekday().num_days_from_monday() as usize;

    for day in first.iter_days().take(days_in_month(year, month) as usize) {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_day_keywords() {
        let anchor = ymd(2025, 3, 1);
        assert_eq!(parse_day("today", anchor).unwrap(), anchor);
        assert_eq!(parse_day("TOM", anchor).unwrap(), ymd(2025, 3, 2));
        assert_eq!(parse_day("yesterday", anchor).unwrap(), ymd(2025, 2, 28));
    }

    #[test]
    fn test_parse_day_relative() {
        let anchor = ymd(2025, 3, 1);
        assert_eq!(parse_day("+3d", anchor).unwrap(), ymd(2025, 3, 4));
        assert_eq!(parse_day("-1d", anchor).unwrap(), ymd(2025, 2, 28));
        assert_eq!(parse_day("+2w", anchor).unwrap(), ymd(2025, 3, 15));
        assert!(parse_day("+3m", anchor).is_err());
        assert!(parse_day("+d", anchor).is_err());
        assert!(parse_day("-", anchor).is_err());
    }

    #[test]
    fn test_parse_day_iso() {
        let anchor = ymd(2025, 3, 1);
        assert_eq!(parse_day("2024-02-29", anchor).unwrap(), ymd(2024, 2, 29));
        assert!(parse_day("2023-02-29", anchor).is_err());
        assert!(parse_day("someday", anchor).is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-03").unwrap(), (2025, 3));
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("March").is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn test_add_months_clamps() {
        assert_eq!(add_months(ymd(2025, 1, 31), 1), ymd(2025, 2, 28));
        assert_eq!(add_months(ymd(2025, 1, 15), -1), ymd(2024, 12, 15));
        assert_eq!(add_months(ymd(2024, 12, 31), 2), ymd(2025, 2, 28));
    }

    #[test]
    fn test_month_weeks() {
        // June 2025 starts on a Sunday and spans six rows.
        let weeks = month_weeks(2025, 6);
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0][6], Some(ymd(2025, 6, 1)));
        assert!(weeks[0][..6].iter().all(|c| c.is_none()));
        assert_eq!(weeks[5][0], Some(ymd(2025, 6, 30)));

        // February 2021 fits exactly in four rows.
        let weeks = month_weeks(2021, 2);
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0][0], Some(ymd(2021, 2, 1)));
        assert_eq!(weeks[3][6], Some(ymd(2021, 2, 28)));
    }
}

//! Multi-format date/time parsing.
//!
//! Orders and timesheets come from independent systems that disagree on how
//! timestamps are written. This module tries a fixed, ordered list of
//! accepted formats and returns the first one that yields a valid calendar
//! date and time.
//!
//! Format patterns use Unicode-style field letters:
//!
//! | Letters | Field                                   |
//! |---------|-----------------------------------------|
//! | `yyyy`  | year, 1 to 4 digits                     |
//! | `yy`    | two-digit year, windowed (see [`ParseOptions`]) |
//! | `MM`/`M`| month (`M` without zero padding)        |
//! | `dd`/`d`| day of month                            |
//! | `HH`    | hour 0-23                               |
//! | `h`     | hour 1-12, requires a day period        |
//! | `mm`/`m`| minute                                  |
//! | `ss`    | second                                  |
//! | `a`     | day period: `AM`, `a.m.`, `p`, `noon`, ... |
//!
//! Every other character must appear literally. Only whitespace may follow
//! the last field.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};

/// The accepted timestamp formats, in priority order.
///
/// Strings that satisfy more than one pattern resolve to the first listed.
pub const ACCEPTED_FORMATS: [&str; 7] = [
    "yyyy-MM-dd HH:mm:ss",
    "MM/dd/yyyy h:mm:ss a",
    "MM/dd/yy h:mm a",
    "MM/dd/yyyy h:mm a",
    "M/d/yy h:m a",
    "MM/dd/yyyy HH:mm",
    "M/d/yyyy",
];

/// Reference year used when none is configured.
///
/// With this reference, two-digit years `00`-`49` resolve to `2000`-`2049` and
/// `50`-`99` to `1950`-`1999`.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2000;

/// Options controlling timestamp interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Year around which two-digit years are windowed.
    ///
    /// A two-digit year resolves to the year ending in those digits that lies
    /// within the hundred-year window ending 50 years after the reference.
    pub reference_year: i32,
}

impl ParseOptions {
    /// Creates options windowing two-digit years around `reference_year`.
    pub fn with_reference_year(reference_year: i32) -> Self {
        Self { reference_year }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::with_reference_year(DEFAULT_REFERENCE_YEAR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    ShortYear,
    Month,
    Day,
    Hour12,
    Hour24,
    Minute,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Digits {
    /// One up to `n` digits.
    UpTo(usize),
    /// The field's natural range without padding.
    Unpadded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Number(Field, Digits),
    DayPeriod,
    Literal(char),
}

/// A compiled accepted format.
#[derive(Debug, Clone)]
pub struct DateTimeFormat {
    pattern: &'static str,
    tokens: Vec<Token>,
}

#[derive(Debug, Default)]
struct Fields {
    year: Option<i32>,
    short_year: bool,
    month: Option<u32>,
    day: Option<u32>,
    hour12: Option<u32>,
    hour24: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    pm: Option<bool>,
}

static COMPILED_FORMATS: LazyLock<Vec<DateTimeFormat>> = LazyLock::new(|| {
    ACCEPTED_FORMATS
        .iter()
        .map(|pattern| DateTimeFormat::compile(pattern))
        .collect()
});

/// Returns the compiled accepted formats in priority order.
pub fn accepted_formats() -> &'static [DateTimeFormat] {
    &COMPILED_FORMATS
}

impl DateTimeFormat {
    fn compile(pattern: &'static str) -> Self {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            let mut run = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                run += 1;
            }

            let token = match (c, run) {
                ('y', 2) => Some(Token::Number(Field::ShortYear, Digits::UpTo(2))),
                ('y', n) => Some(Token::Number(Field::Year, Digits::UpTo(n))),
                ('M', 1) => Some(Token::Number(Field::Month, Digits::Unpadded)),
                ('M', n) => Some(Token::Number(Field::Month, Digits::UpTo(n))),
                ('d', 1) => Some(Token::Number(Field::Day, Digits::Unpadded)),
                ('d', n) => Some(Token::Number(Field::Day, Digits::UpTo(n))),
                ('h', 1) => Some(Token::Number(Field::Hour12, Digits::Unpadded)),
                ('h', n) => Some(Token::Number(Field::Hour12, Digits::UpTo(n))),
                ('H', 1) => Some(Token::Number(Field::Hour24, Digits::Unpadded)),
                ('H', n) => Some(Token::Number(Field::Hour24, Digits::UpTo(n))),
                ('m', 1) => Some(Token::Number(Field::Minute, Digits::Unpadded)),
                ('m', n) => Some(Token::Number(Field::Minute, Digits::UpTo(n))),
                ('s', 1) => Some(Token::Number(Field::Second, Digits::Unpadded)),
                ('s', n) => Some(Token::Number(Field::Second, Digits::UpTo(n))),
                ('a', _) => Some(Token::DayPeriod),
                _ => None,
            };

            match token {
                Some(token) => tokens.push(token),
                None => tokens.extend(std::iter::repeat_n(Token::Literal(c), run)),
            }
        }

        Self { pattern, tokens }
    }

    /// The pattern this format was compiled from.
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Parses `input` against this format alone.
    pub fn parse(&self, input: &str, options: &ParseOptions) -> Option<NaiveDateTime> {
        let mut rest = input;
        let mut fields = Fields::default();

        for token in &self.tokens {
            rest = match *token {
                Token::Literal(c) => rest.strip_prefix(c)?,
                Token::DayPeriod => {
                    let (pm, remaining) = read_day_period(rest)?;
                    fields.pm = Some(pm);
                    remaining
                }
                Token::Number(field, digits) => {
                    let (value, remaining) = read_number(rest, field, digits)?;
                    fields.set(field, value);
                    remaining
                }
            };
        }

        if !rest.chars().all(char::is_whitespace) {
            return None;
        }

        fields.resolve(options)
    }
}

impl Fields {
    fn set(&mut self, field: Field, value: u32) {
        match field {
            Field::Year => self.year = Some(value as i32),
            Field::ShortYear => {
                self.year = Some(value as i32);
                self.short_year = true;
            }
            Field::Month => self.month = Some(value),
            Field::Day => self.day = Some(value),
            Field::Hour12 => self.hour12 = Some(value),
            Field::Hour24 => self.hour24 = Some(value),
            Field::Minute => self.minute = Some(value),
            Field::Second => self.second = Some(value),
        }
    }

    fn resolve(&self, options: &ParseOptions) -> Option<NaiveDateTime> {
        let year = match self.year? {
            y if self.short_year => window_two_digit_year(y, options.reference_year),
            y => y,
        };
        let date = NaiveDate::from_ymd_opt(year, self.month?, self.day?)?;

        let hour = match (self.hour12, self.hour24) {
            (Some(h), _) => {
                if !(1..=12).contains(&h) {
                    return None;
                }
                match self.pm {
                    Some(true) if h < 12 => h + 12,
                    Some(false) if h == 12 => 0,
                    _ => h,
                }
            }
            (None, Some(h)) => h,
            (None, None) => 0,
        };

        date.and_hms_opt(hour, self.minute.unwrap_or(0), self.second.unwrap_or(0))
    }
}

/// Resolves a two-digit year to a full year near `reference_year`.
fn window_two_digit_year(two_digit: i32, reference_year: i32) -> i32 {
    let common_era = reference_year > 0;
    let absolute = if common_era {
        reference_year
    } else {
        1 - reference_year
    };

    let resolved = if absolute <= 50 {
        if two_digit == 0 { 100 } else { two_digit }
    } else {
        let range_end = absolute + 50;
        let century = range_end / 100 * 100;
        if two_digit >= range_end % 100 {
            two_digit + century - 100
        } else {
            two_digit + century
        }
    };

    if common_era { resolved } else { 1 - resolved }
}

fn read_number(input: &str, field: Field, digits: Digits) -> Option<(u32, &str)> {
    let bytes = input.as_bytes();
    let len = match digits {
        Digits::UpTo(max) => bytes
            .iter()
            .take(max)
            .take_while(|b| b.is_ascii_digit())
            .count(),
        Digits::Unpadded => unpadded_len(bytes, field)?,
    };

    if len == 0 {
        return None;
    }

    let value = input[..len].parse().ok()?;
    Some((value, &input[len..]))
}

/// Length of the unpadded numeric match for `field` at the start of `bytes`.
fn unpadded_len(bytes: &[u8], field: Field) -> Option<usize> {
    match field {
        Field::Month | Field::Hour12 => pair(bytes, b'1', b'0'..=b'2').or_else(|| lead(bytes, b'0'..=b'0')),
        Field::Day => pair(bytes, b'3', b'0'..=b'1').or_else(|| lead(bytes, b'0'..=b'2')),
        Field::Hour24 => pair(bytes, b'2', b'0'..=b'3').or_else(|| lead(bytes, b'0'..=b'1')),
        Field::Minute | Field::Second => lead(bytes, b'0'..=b'5'),
        Field::Year | Field::ShortYear => None,
    }
}

/// `first` followed by a digit in `second`.
fn pair(bytes: &[u8], first: u8, second: std::ops::RangeInclusive<u8>) -> Option<usize> {
    (bytes.first() == Some(&first) && bytes.get(1).is_some_and(|b| second.contains(b))).then_some(2)
}

/// An optional leading digit in `lead`, then one digit.
fn lead(bytes: &[u8], lead: std::ops::RangeInclusive<u8>) -> Option<usize> {
    match (bytes.first(), bytes.get(1)) {
        (Some(a), Some(b)) if lead.contains(a) && b.is_ascii_digit() => Some(2),
        (Some(a), _) if a.is_ascii_digit() => Some(1),
        _ => None,
    }
}

/// Day-period words accepted by the `a` field, with whether each means PM.
///
/// Every `at <period>` phrase reads as AM, matching the date-fns en-US locale,
/// which classifies the matched text by its leading `a`.
const DAY_PERIOD_WORDS: [(&str, bool); 10] = [
    ("midnight", false),
    ("noon", true),
    ("in the morning", false),
    ("in the afternoon", true),
    ("in the evening", true),
    ("in the night", false),
    ("at morning", false),
    ("at afternoon", false),
    ("at evening", false),
    ("at night", false),
];

/// Reads a day period, returning `true` for PM.
///
/// Full forms (`am`, `p.m.`, `noon`, ...) are tried before the narrow ones
/// (`a`, `p`, `mi`).
fn read_day_period(input: &str) -> Option<(bool, &str)> {
    read_meridiem(input)
        .or_else(|| {
            DAY_PERIOD_WORDS
                .iter()
                .find_map(|&(word, pm)| strip_prefix_ignore_case(input, word).map(|rest| (pm, rest)))
        })
        .or_else(|| read_narrow_day_period(input))
}

/// `a`/`p`, an optional `.` and whitespace, then `m` and an optional `.`.
fn read_meridiem(input: &str) -> Option<(bool, &str)> {
    let bytes = input.as_bytes();
    let pm = match bytes.first()?.to_ascii_lowercase() {
        b'a' => false,
        b'p' => true,
        _ => return None,
    };

    let mut i = 1;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
    }
    if bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    if !bytes.get(i).is_some_and(|b| b.eq_ignore_ascii_case(&b'm')) {
        return None;
    }
    i += 1;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
    }
    Some((pm, &input[i..]))
}

fn read_narrow_day_period(input: &str) -> Option<(bool, &str)> {
    match input.as_bytes().first()?.to_ascii_lowercase() {
        b'a' => Some((false, &input[1..])),
        b'p' => Some((true, &input[1..])),
        _ => strip_prefix_ignore_case(input, "mi").map(|rest| (false, rest)),
    }
}

fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    input
        .get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &input[prefix.len()..])
}

/// Parses a date string, optionally followed by a time string.
///
/// The two parts are joined with a single space and trimmed, then tried
/// against [`ACCEPTED_FORMATS`] in order. Returns `None` when `date` is empty
/// or no format yields a valid calendar timestamp.
///
/// # Examples
///
/// ```
/// use tip_distributor::calculation::{parse_date_time, ParseOptions};
/// use chrono::NaiveDate;
///
/// let options = ParseOptions::default();
/// let parsed = parse_date_time("01/15/2024", "6:30 PM", &options).unwrap();
/// assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(18, 30, 0).unwrap());
///
/// assert!(parse_date_time("02/30/2024", "6:30 PM", &options).is_none());
/// assert!(parse_date_time("", "6:30 PM", &options).is_none());
/// ```
pub fn parse_date_time(date: &str, time: &str, options: &ParseOptions) -> Option<NaiveDateTime> {
    match_format(date, time, options).map(|(_, parsed)| parsed)
}

/// Like [`parse_date_time`], also returning the pattern that matched.
pub fn match_format(
    date: &str,
    time: &str,
    options: &ParseOptions,
) -> Option<(&'static str, NaiveDateTime)> {
    if date.is_empty() {
        return None;
    }

    let combined = format!("{date} {time}");
    let combined = combined.trim();

    accepted_formats()
        .iter()
        .find_map(|format| format.parse(combined, options).map(|parsed| (format.pattern(), parsed)))
}

//! Free-text time range parser
//!
//! Turns descriptions such as "Office hours 1-3 PM", "13:00-15:00" or
//! "9am to 5 in the evening" into a start and end [`TimeOfDay`].
//!
//! Grammars are tried in a fixed order and the first match wins:
//!
//! 1. 24-hour ranges, only when one side is past 12
//! 2. 12-hour ranges with a meridiem on both sides (three surface forms)
//! 3. 12-hour ranges sharing one trailing meridiem ("1-3 PM")
//! 4. an informal scan over loose hour tokens with a default meridiem

use crate::error::{compiled, LazyPattern, NormalizeError, Result};
use crate::models::{Meridiem, ParseResult, TimeOfDay, TimeRange};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Range separator: dash, en dash, em dash or the word "to"
const SEP: &str = r"\s*(?:-|–|—|\bto\b)\s*";
// Meridiem token, "pm", "PM", "p.m." or "P.M."; the letter is captured
const MER: &str = r"([ap])\.?m\b\.?";

static FILLER: LazyPattern =
    Lazy::new(|| Regex::new(r"(?i)\b(?:office\s+hours|hours|by\s+appointment|only|or|and)\b"));

static MILITARY_RANGE: LazyPattern = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(\d{{1,2}})(?::(\d{{2}}))?{SEP}(\d{{1,2}})(?::(\d{{2}}))?\b"))
});

static SPACED_RANGE: LazyPattern = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?::(\d{{2}}))?\s+{MER}{SEP}(\d{{1,2}})(?::(\d{{2}}))?\s+{MER}"
    ))
});

static FULL_RANGE: LazyPattern = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(\d{{1,2}}):(\d{{2}})\s*{MER}{SEP}(\d{{1,2}}):(\d{{2}})\s*{MER}"))
});

static COMPACT_RANGE: LazyPattern = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?::(\d{{2}}))?\s*{MER}{SEP}(\d{{1,2}})(?::(\d{{2}}))?\s*{MER}"
    ))
});

static SHARED_MERIDIEM_RANGE: LazyPattern = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(\d{{1,2}})(?::(\d{{2}}))?{SEP}(\d{{1,2}})(?::(\d{{2}}))?\s*{MER}"))
});

// A loose "H[:MM][am|pm]" token that is not part of a longer number
static LOOSE_TIME: LazyPattern =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b(\d{{1,2}})(?::(\d{{2}}))?(?:\s*{MER})?(?:\D|$)")));

/// How a 12-hour grammar lays out its capture groups
#[derive(Debug, Clone, Copy)]
enum MeridiemLayout {
    /// start hour, start minute, start meridiem, end hour, end minute, end meridiem
    BothSides,
    /// start hour, start minute, end hour, end minute, shared meridiem
    Shared,
}

struct Grammar {
    name: &'static str,
    pattern: &'static LazyPattern,
    layout: MeridiemLayout,
}

static TWELVE_HOUR_GRAMMARS: [Grammar; 4] = [
    Grammar {
        name: "spaced",
        pattern: &SPACED_RANGE,
        layout: MeridiemLayout::BothSides,
    },
    Grammar {
        name: "full",
        pattern: &FULL_RANGE,
        layout: MeridiemLayout::BothSides,
    },
    Grammar {
        name: "compact",
        pattern: &COMPACT_RANGE,
        layout: MeridiemLayout::BothSides,
    },
    Grammar {
        name: "shared",
        pattern: &SHARED_MERIDIEM_RANGE,
        layout: MeridiemLayout::Shared,
    },
];

/// Parse a free-text time range.
///
/// Never fails: empty input, text without a recognizable range and internal
/// errors all produce an unsuccessful [`ParseResult`].
///
/// # Examples
///
/// ```
/// use hours_normalizer::parser::time_parser::parse_time_string;
///
/// let result = parse_time_string("13:00-15:00");
/// let range = result.time_slot().unwrap();
/// assert_eq!(range.to_string(), "1:00PM-3:00PM");
/// ```
pub fn parse_time_string(input: &str) -> ParseResult {
    match try_parse_time_string(input) {
        Ok(range) => range.into(),
        Err(e) => {
            warn!("Failed to parse time string '{}': {}", input, e);
            ParseResult::not_found()
        }
    }
}

/// True when the text is nothing but filler such as "by appointment" or
/// "office hours", with no word or digit left to read a time from.
pub fn is_filler_only(input: &str) -> Result<bool> {
    let cleaned = compiled(&FILLER)?.replace_all(input, " ");
    Ok(!cleaned.chars().any(char::is_alphanumeric))
}

/// Fallible form of [`parse_time_string`]. `Ok(None)` means no range was
/// found; `Err` is reserved for internal failures.
pub fn try_parse_time_string(input: &str) -> Result<Option<TimeRange>> {
    if input.trim().is_empty() {
        return Ok(None);
    }

    let cleaned = compiled(&FILLER)?.replace_all(input, " ");
    let cleaned = cleaned.trim();
    debug!("Parsing time string '{}' (cleaned: '{}')", input, cleaned);

    if let Some(range) = parse_military_range(cleaned)? {
        debug!("Matched 24-hour range: {}", range);
        return Ok(Some(range));
    }

    for grammar in &TWELVE_HOUR_GRAMMARS {
        let Some(caps) = compiled(grammar.pattern)?.captures(cleaned) else {
            continue;
        };
        match range_from_captures(&caps, grammar.layout) {
            Ok(range) => {
                debug!("Matched {} 12-hour range: {}", grammar.name, range);
                return Ok(Some(range));
            }
            Err(NormalizeError::OutOfRange(reason)) => {
                debug!("Rejected {} match '{}': {}", grammar.name, &caps[0], reason);
            }
            Err(e) => return Err(e),
        }
    }

    let range = parse_informal_range(cleaned)?;
    if let Some(range) = &range {
        debug!("Matched informal range: {}", range);
    }
    Ok(range)
}

/// Default meridiem for an hour given without one: 1-7 and 12 are
/// afternoon, 8-11 are morning.
pub fn default_meridiem(hour: u8) -> Meridiem {
    if hour < 8 || hour == 12 {
        Meridiem::Pm
    } else {
        Meridiem::Am
    }
}

fn parse_military_range(text: &str) -> Result<Option<TimeRange>> {
    let Some(caps) = compiled(&MILITARY_RANGE)?.captures(text) else {
        return Ok(None);
    };

    let start_hour = number(&caps, 1)?.unwrap_or(0);
    let end_hour = number(&caps, 3)?.unwrap_or(0);
    if start_hour <= 12 && end_hour <= 12 {
        return Ok(None);
    }

    let start = TimeOfDay::from_24_hour(start_hour, number(&caps, 2)?.unwrap_or(0));
    let end = TimeOfDay::from_24_hour(end_hour, number(&caps, 4)?.unwrap_or(0));
    match (start, end) {
        (Ok(start), Ok(end)) => Ok(Some(TimeRange::new(start, end))),
        (Err(NormalizeError::OutOfRange(reason)), _)
        | (_, Err(NormalizeError::OutOfRange(reason))) => {
            debug!("Rejected 24-hour match '{}': {}", &caps[0], reason);
            Ok(None)
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

fn range_from_captures(caps: &Captures, layout: MeridiemLayout) -> Result<TimeRange> {
    let (start_meridiem, end_meridiem, end_group) = match layout {
        MeridiemLayout::BothSides => (meridiem(caps, 3)?, meridiem(caps, 6)?, 4),
        MeridiemLayout::Shared => {
            let shared = meridiem(caps, 5)?;
            (shared, shared, 3)
        }
    };

    let start = TimeOfDay::new(
        required_number(caps, 1)?,
        number(caps, 2)?.unwrap_or(0),
        start_meridiem,
    )?;
    let end = TimeOfDay::new(
        required_number(caps, end_group)?,
        number(caps, end_group + 1)?.unwrap_or(0),
        end_meridiem,
    )?;
    Ok(TimeRange::new(start, end))
}

/// Collect loose hour tokens and use the first two as start and end
fn parse_informal_range(text: &str) -> Result<Option<TimeRange>> {
    let re = compiled(&LOOSE_TIME)?;
    let mut times = Vec::with_capacity(2);

    for caps in re.captures_iter(text) {
        let hour = required_number(&caps, 1)?;
        let minute = number(&caps, 2)?.unwrap_or(0);
        let meridiem = match caps.get(3) {
            Some(token) => Meridiem::from_token(token.as_str()).unwrap_or(default_meridiem(hour)),
            None => default_meridiem(hour),
        };

        match TimeOfDay::new(hour, minute, meridiem) {
            Ok(time) => times.push(time),
            Err(NormalizeError::OutOfRange(reason)) => {
                debug!("Skipping token '{}': {}", caps[0].trim(), reason);
                continue;
            }
            Err(e) => return Err(e),
        }
        if times.len() == 2 {
            break;
        }
    }

    match times.as_slice() {
        [start, end] => Ok(Some(TimeRange::new(*start, *end))),
        _ => Ok(None),
    }
}

fn number(caps: &Captures, group: usize) -> Result<Option<u8>> {
    caps.get(group)
        .map(|m| {
            m.as_str()
                .parse::<u8>()
                .map_err(|_| NormalizeError::OutOfRange(format!("number '{}'", m.as_str())))
        })
        .transpose()
}

fn required_number(caps: &Captures, group: usize) -> Result<u8> {
    number(caps, group)?
        .ok_or_else(|| NormalizeError::OutOfRange(format!("missing capture group {}", group)))
}

fn meridiem(caps: &Captures, group: usize) -> Result<Meridiem> {
    caps.get(group)
        .and_then(|m| Meridiem::from_token(m.as_str()))
        .ok_or_else(|| NormalizeError::OutOfRange(format!("missing meridiem in group {}", group)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn parsed(input: &str) -> String {
        parse_time_string(input)
            .time_slot()
            .map(|range| range.to_string())
            .unwrap_or_else(|| "none".to_string())
    }

    #[test]
    fn test_empty_input() {
        assert!(!parse_time_string("").success());
        assert!(!parse_time_string("   \t").success());
        assert_eq!(parse_time_string(""), ParseResult::not_found());
    }

    #[test]
    fn test_no_time() {
        assert!(!parse_time_string("no time here").success());
        assert!(!parse_time_string("by appointment").success());
        assert!(!parse_time_string("Room 5").success());
    }

    #[test]
    fn test_basic_spaced_range() {
        let result = parse_time_string("1:00 PM - 2:00 PM");
        assert!(result.success());
        let range = result.time_slot().unwrap();
        assert_eq!(range.start.hour_string(), "1");
        assert_eq!(range.start.minute_string(), "00");
        assert_eq!(range.start.meridiem(), Meridiem::Pm);
        assert_eq!(range.end.hour_string(), "2");
        assert_eq!(range.end.minute_string(), "00");
        assert_eq!(range.end.meridiem(), Meridiem::Pm);
    }

    #[test_case("13:00-15:00", "1:00PM-3:00PM"; "afternoon")]
    #[test_case("09:30 - 17:00", "9:30AM-5:00PM"; "padded morning")]
    #[test_case("8 to 14", "8:00AM-2:00PM"; "word separator")]
    #[test_case("12:00–13:30", "12:00PM-1:30PM"; "en dash")]
    #[test_case("0:00-13:00", "12:00AM-1:00PM"; "midnight")]
    #[test_case("22:00—23:59", "10:00PM-11:59PM"; "em dash")]
    fn test_military_ranges(input: &str, expected: &str) {
        assert_eq!(parsed(input), expected);
    }

    #[test]
    fn test_small_hours_are_not_military() {
        // both sides <= 12 and no meridiem anywhere: informal defaults apply
        assert_eq!(parsed("9-11"), "9:00AM-11:00AM");
        assert_eq!(parsed("2-4"), "2:00PM-4:00PM");
    }

    #[test]
    fn test_invalid_military_hours_fall_through() {
        assert_eq!(parsed("25:00-26:00"), "none");
    }

    #[test_case("1:00 PM - 2:00 PM", "1:00PM-2:00PM")]
    #[test_case("10:30 A.M. to 12:00 P.M.", "10:30AM-12:00PM")]
    #[test_case("9 am - 11 am", "9:00AM-11:00AM")]
    #[test_case("01:00 PM - 03:00 PM", "1:00PM-3:00PM")]
    #[test_case("11:00 am – 1:15 pm", "11:00AM-1:15PM")]
    fn test_spaced_ranges(input: &str, expected: &str) {
        assert_eq!(parsed(input), expected);
    }

    #[test_case("10:00am-11:30am", "10:00AM-11:30AM")]
    #[test_case("1:00PM-2:00PM", "1:00PM-2:00PM")]
    #[test_case("3:15pm to 4:45pm", "3:15PM-4:45PM")]
    fn test_full_ranges(input: &str, expected: &str) {
        assert_eq!(parsed(input), expected);
    }

    #[test_case("9am-5pm", "9:00AM-5:00PM")]
    #[test_case("10am-12pm", "10:00AM-12:00PM")]
    #[test_case("11AM-1:30PM", "11:00AM-1:30PM")]
    #[test_case("9A.M.-12P.M.", "9:00AM-12:00PM")]
    #[test_case("0am-1am", "12:00AM-1:00AM")]
    fn test_compact_ranges(input: &str, expected: &str) {
        assert_eq!(parsed(input), expected);
    }

    #[test_case("1-3 PM", "1:00PM-3:00PM")]
    #[test_case("Office hours 1-3 PM", "1:00PM-3:00PM")]
    #[test_case("2-4pm", "2:00PM-4:00PM")]
    #[test_case("10:00-11:30am", "10:00AM-11:30AM")]
    #[test_case("9 to 11 a.m.", "9:00AM-11:00AM")]
    #[test_case("Hours: 2:30 - 4 pm, by appointment", "2:30PM-4:00PM")]
    fn test_shared_meridiem_ranges(input: &str, expected: &str) {
        assert_eq!(parsed(input), expected);
    }

    #[test]
    fn test_shared_meridiem_applies_to_both_ends() {
        // no reordering or overnight interpretation
        assert_eq!(parsed("11-1 pm"), "11:00PM-1:00PM");
    }

    #[test]
    fn test_end_before_start_passes_through() {
        assert_eq!(parsed("4:00 PM - 2:00 PM"), "4:00PM-2:00PM");
    }

    #[test_case("1 and 3", "1:00PM-3:00PM"; "both default to afternoon")]
    #[test_case("9am to 5 in the evening", "9:00AM-5:00PM"; "explicit start")]
    #[test_case("7 or 8", "7:00PM-8:00AM"; "boundary seven and eight")]
    #[test_case("12 and 1", "12:00PM-1:00PM"; "noon")]
    #[test_case("between 10:30 and 11", "10:30AM-11:00AM"; "with minutes")]
    #[test_case("around 3pm and 5pm", "3:00PM-5:00PM"; "explicit both")]
    fn test_informal_ranges(input: &str, expected: &str) {
        assert_eq!(parsed(input), expected);
    }

    #[test]
    fn test_informal_skips_long_numbers() {
        assert_eq!(parsed("Room 101, 2 and 4"), "2:00PM-4:00PM");
        assert_eq!(parsed("Room 101"), "none");
    }

    #[test]
    fn test_meridiem_not_read_from_words() {
        // "amazing" must not be taken as "am"
        assert_eq!(parsed("10 amazing 11"), "10:00AM-11:00AM");
    }

    #[test_case(1, Meridiem::Pm)]
    #[test_case(7, Meridiem::Pm)]
    #[test_case(8, Meridiem::Am)]
    #[test_case(11, Meridiem::Am)]
    #[test_case(12, Meridiem::Pm)]
    fn test_default_meridiem(hour: u8, expected: Meridiem) {
        assert_eq!(default_meridiem(hour), expected);
    }

    #[test]
    fn test_hours_have_no_leading_zero() {
        for input in ["01:00 PM - 02:30 PM", "09:05-17:00", "01-03 pm", "07 and 08"] {
            let result = parse_time_string(input);
            let range = result.time_slot().unwrap_or_else(|| panic!("no match for {}", input));
            for time in [range.start, range.end] {
                assert!(!time.hour_string().starts_with('0'), "{} -> {}", input, range);
                assert_eq!(time.minute_string().len(), 2);
            }
        }
    }

    #[test]
    fn test_display_round_trip() {
        for input in ["1:00 PM - 2:00 PM", "13:00-15:00", "9am-5pm", "1 and 3", "12:45am-1:05am"] {
            let first = *parse_time_string(input).time_slot().unwrap();
            let again = parse_time_string(&format!("Monday {}", first));
            assert_eq!(again.time_slot(), Some(&first), "round trip of {}", input);
        }
    }

    #[test_case("by appointment", true)]
    #[test_case("By Appointment Only", true)]
    #[test_case("Office hours: by appointment", true)]
    #[test_case("hours and/or by appointment", true)]
    #[test_case("2-4pm or by appointment", false)]
    #[test_case("Tuesdays by appointment", false)]
    fn test_is_filler_only(input: &str, expected: bool) {
        assert_eq!(is_filler_only(input).unwrap(), expected);
    }
}

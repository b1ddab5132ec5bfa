use crate::types::*;

pub const ZERO: RegisterIndex = 0;
pub const REGISTER_COUNT: usize = 32;

fn is_c_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn digit_value(c: u8, radix: u32) -> Option<i64> {
    (c as char).to_digit(radix).map(|d| d as i64)
}

/// Parses the longest integer prefix of `text` in the given radix, the way
/// `strtol` does: leading whitespace and one optional sign are skipped and
/// parsing stops at the first invalid digit. Overflow saturates.
fn parse_prefix(text: &[u8], radix: u32) -> i64 {
    let mut pos = 0;
    while pos < text.len() && is_c_space(text[pos]) {
        pos += 1;
    }
    let negative = match text.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };
    let radix = if radix == 0 {
        match (text.get(pos), text.get(pos + 1), text.get(pos + 2)) {
            (Some(b'0'), Some(b'x' | b'X'), Some(c)) if digit_value(*c, 16).is_some() => {
                pos += 2;
                16
            }
            (Some(b'0'), _, _) => 8,
            _ => 10,
        }
    } else {
        radix
    };
    let mut value: i64 = 0;
    while let Some(digit) = text.get(pos).and_then(|c| digit_value(*c, radix)) {
        value = value.saturating_mul(radix as i64).saturating_add(digit);
        pos += 1;
    }
    if negative {
        -value
    } else {
        value
    }
}

/// Decimal "parse or zero" conversion. The result is truncated to 32 bits.
pub fn atoi(text: &str) -> Int {
    parse_prefix(text.as_bytes(), 10) as Int
}

/// Integer literal conversion with the base taken from the prefix
/// (`0x` hexadecimal, `0` octal, decimal otherwise). Truncated to 32 bits.
pub fn strtol_auto(text: &str) -> Int {
    parse_prefix(text.as_bytes(), 0) as Int
}

pub const RED: &str = "31";
pub const BLUE: &str = "34";
pub fn colorize(text: &str, color: &str) -> String {
    format!("\x1b[{}m{}\x1b[0m", color, text)
}
pub fn colorized_println(text: &str, color: &str) {
    println!("{}", colorize(text, color));
}
pub fn print_filled_with_space(s: &String, n: usize) {
    print!("{}", s);
    if s.len() < n {
        for _ in 0..n - s.len() {
            print!(" ");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atoi() {
        assert_eq!(atoi("10"), 10);
        assert_eq!(atoi("  -42"), -42);
        assert_eq!(atoi("+7"), 7);
        assert_eq!(atoi("12abc"), 12);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi(""), 0);
        assert_eq!(atoi("5)"), 5);
    }

    #[test]
    fn test_strtol_auto() {
        assert_eq!(strtol_auto("0x10"), 16);
        assert_eq!(strtol_auto(" 0XfF"), 255);
        assert_eq!(strtol_auto("-0x1"), -1);
        assert_eq!(strtol_auto("010"), 8);
        assert_eq!(strtol_auto("0x"), 0);
        assert_eq!(strtol_auto("0xFFFFFFFF"), -1);
        assert_eq!(strtol_auto("19"), 19);
    }
}

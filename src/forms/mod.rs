pub mod auth;
pub mod customers;
pub mod manufacturing_types;
pub mod nodes;
pub mod quotes;

/// Collapse runs of whitespace, strip control characters and trim.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize each line, dropping leading/trailing blank lines and collapsing
/// repeated blank lines into one.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        if line.is_empty() {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}

/// Parse a decimal money string (e.g. `1299.5`, `1299.50`, `1299`) into
/// cents. At most two fractional digits are accepted.
pub(crate) fn parse_money_cents(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed),
    };

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    if fraction.len() > 2 || !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole_cents: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().ok()?.checked_mul(100)?
    };

    let fraction_cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse::<i64>().ok()?,
    };

    whole_cents.checked_add(fraction_cents).map(|v| sign * v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_sanitizer_collapses_whitespace() {
        assert_eq!(sanitize_inline_text("  Tilt\tturn \n window "), "Tilt turn window");
        assert_eq!(sanitize_inline_text("\u{0007}bell"), "bell");
    }

    #[test]
    fn multiline_sanitizer_trims_blank_runs() {
        let input = "\n\nfirst line\n\n\nsecond  line\n\n";
        assert_eq!(sanitize_multiline_text(input), "first line\n\nsecond line");
    }

    #[test]
    fn money_parser_accepts_common_shapes() {
        assert_eq!(parse_money_cents("1299.50"), Some(129950));
        assert_eq!(parse_money_cents("1299.5"), Some(129950));
        assert_eq!(parse_money_cents("1299"), Some(129900));
        assert_eq!(parse_money_cents("0.07"), Some(7));
        assert_eq!(parse_money_cents("-12.30"), Some(-1230));
    }

    #[test]
    fn money_parser_rejects_garbage() {
        assert_eq!(parse_money_cents(""), None);
        assert_eq!(parse_money_cents("12.345"), None);
        assert_eq!(parse_money_cents("12,30"), None);
        assert_eq!(parse_money_cents("abc"), None);
    }
}

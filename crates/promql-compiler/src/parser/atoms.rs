//! Literal decoding: numbers and quoted strings.

/// Decodes a numeric literal.
///
/// Integers go through base detection first (`0x` hex, leading-zero octal)
/// and fall back to float parsing, so `09` is nine and `0755` is 493.
/// Returns `None` when the value does not fit.
pub fn parse_number(text: &str) -> Option<f64> {
    match text.to_ascii_lowercase().as_str() {
        "inf" => return Some(f64::INFINITY),
        "nan" => return Some(f64::NAN),
        _ => {}
    }

    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).ok().map(|v| v as f64);
    }

    if text.len() > 1
        && text.starts_with('0')
        && text.bytes().all(|b| (b'0'..=b'7').contains(&b))
    {
        return u64::from_str_radix(&text[1..], 8).ok().map(|v| v as f64);
    }

    if text.bytes().all(|b| b.is_ascii_digit())
        && let Ok(v) = text.parse::<u64>()
    {
        return Some(v as f64);
    }

    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Strips the quotes of a string token and resolves escapes.
///
/// Backtick strings are raw. On failure returns the offending escape.
pub fn unquote(text: &str) -> Result<String, String> {
    let quote = text.chars().next().unwrap_or('"');
    let inner = &text[1..text.len() - 1];

    if quote == '`' {
        return Ok(inner.to_string());
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(escape) = chars.next() else {
            return Err("\\".to_string());
        };
        let decoded = match escape {
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0b',
            '\\' | '\'' | '"' => escape,
            'x' => hex_escape(&mut chars, 2, 'x')?,
            'u' => hex_escape(&mut chars, 4, 'u')?,
            'U' => hex_escape(&mut chars, 8, 'U')?,
            '0'..='7' => {
                let digits: String = std::iter::once(escape).chain(chars.by_ref().take(2)).collect();
                u32::from_str_radix(&digits, 8)
                    .ok()
                    .filter(|_| digits.len() == 3)
                    .filter(|v| *v <= 0o377)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("\\{digits}"))?
            }
            other => return Err(format!("\\{other}")),
        };
        out.push(decoded);
    }

    Ok(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, len: usize, prefix: char) -> Result<char, String> {
    let digits: String = chars.by_ref().take(len).collect();
    if digits.len() != len {
        return Err(format!("\\{prefix}{digits}"));
    }
    u32::from_str_radix(&digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| format!("\\{prefix}{digits}"))
}

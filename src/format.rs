//! Printf-style message formatting
//!
//! The informative text is supplied as a format string plus a list of
//! arguments, checked at runtime. Supported conversions: %s %d %i %u
//! %x %X %f %c and %% for a literal percent. An optional precision
//! follows C semantics: digits after the point for %f, maximum length
//! for %s, minimum digit count for the integer conversions.

use crate::error::FormatError;

/// A checked format argument
#[derive(Clone, Debug, PartialEq)]
pub enum FormatArg {
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Char(char),
}

impl From<i32> for FormatArg {
    fn from(v: i32) -> Self {
        FormatArg::Int(v as i64)
    }
}

impl From<i64> for FormatArg {
    fn from(v: i64) -> Self {
        FormatArg::Int(v)
    }
}

impl From<u32> for FormatArg {
    fn from(v: u32) -> Self {
        FormatArg::Uint(v as u64)
    }
}

impl From<u64> for FormatArg {
    fn from(v: u64) -> Self {
        FormatArg::Uint(v)
    }
}

impl From<f64> for FormatArg {
    fn from(v: f64) -> Self {
        FormatArg::Float(v)
    }
}

impl From<&str> for FormatArg {
    fn from(v: &str) -> Self {
        FormatArg::Str(v.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(v: String) -> Self {
        FormatArg::Str(v)
    }
}

impl From<char> for FormatArg {
    fn from(v: char) -> Self {
        FormatArg::Char(v)
    }
}

impl FormatArg {
    fn type_name(&self) -> &'static str {
        match self {
            FormatArg::Int(_) => "integer",
            FormatArg::Uint(_) => "unsigned integer",
            FormatArg::Float(_) => "float",
            FormatArg::Str(_) => "string",
            FormatArg::Char(_) => "char",
        }
    }
}

/// Expand a printf-style format string against the given arguments
///
/// Every argument must be consumed and every conversion must match the
/// argument's type, otherwise an error is returned and nothing is
/// produced.
pub fn format_message(fmt: &str, args: &[FormatArg]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(fmt.len());
    let mut next_arg = 0;
    let mut chars = fmt.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }

        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        // Optional ".N" precision, only meaningful for %f
        let mut precision: Option<usize> = None;
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut digits = String::new();
            while let Some(d) = chars.peek() {
                if d.is_ascii_digit() {
                    digits.push(*d);
                    chars.next();
                } else {
                    break;
                }
            }
            precision = digits.parse().ok();
        }

        // Validate the conversion before consuming an argument so a
        // bad specifier is reported as such even with no args left
        let spec = chars.next().ok_or(FormatError::TrailingPercent)?;
        if !matches!(spec, 'd' | 'i' | 'u' | 'x' | 'X' | 'f' | 's' | 'c') {
            return Err(FormatError::UnknownSpecifier(spec));
        }
        if spec == 'c' && precision.is_some() {
            return Err(FormatError::InvalidPrecision(spec));
        }

        let arg = args.get(next_arg).ok_or(FormatError::TooFewArguments {
            expected: next_arg + 1,
            given: args.len(),
        })?;
        next_arg += 1;

        match (spec, arg) {
            ('d' | 'i', FormatArg::Int(v)) => out.push_str(&pad_digits(v.to_string(), precision)),
            ('d' | 'i', FormatArg::Uint(v)) => out.push_str(&pad_digits(v.to_string(), precision)),
            ('u', FormatArg::Uint(v)) => out.push_str(&pad_digits(v.to_string(), precision)),
            ('x', FormatArg::Int(v)) => out.push_str(&pad_digits(format!("{v:x}"), precision)),
            ('x', FormatArg::Uint(v)) => out.push_str(&pad_digits(format!("{v:x}"), precision)),
            ('X', FormatArg::Int(v)) => out.push_str(&pad_digits(format!("{v:X}"), precision)),
            ('X', FormatArg::Uint(v)) => out.push_str(&pad_digits(format!("{v:X}"), precision)),
            ('f', FormatArg::Float(v)) => match precision {
                Some(p) => out.push_str(&format!("{v:.p$}")),
                None => out.push_str(&format!("{v:.6}")),
            },
            ('s', FormatArg::Str(v)) => match precision {
                Some(p) => out.extend(v.chars().take(p)),
                None => out.push_str(v),
            },
            ('c', FormatArg::Char(v)) => out.push(*v),
            (_, other) => {
                return Err(FormatError::TypeMismatch {
                    specifier: spec,
                    position: next_arg,
                    found: other.type_name(),
                });
            }
        }
    }

    if next_arg < args.len() {
        return Err(FormatError::TooManyArguments {
            expected: next_arg,
            given: args.len(),
        });
    }

    Ok(out)
}

/// C-style precision on integer conversions: a minimum digit count,
/// zero padded after the sign
fn pad_digits(s: String, precision: Option<usize>) -> String {
    let p = match precision {
        Some(p) => p,
        None => return s,
    };
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    if digits.len() >= p {
        s
    } else {
        format!("{sign}{digits:0>p$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(format_message("no args here", &[]).unwrap(), "no args here");
    }

    #[test]
    fn test_mixed_conversions() {
        let out = format_message(
            "%s crashed with signal %d at 0x%X",
            &["worker".into(), 11.into(), FormatArg::Uint(0xdead)],
        )
        .unwrap();
        assert_eq!(out, "worker crashed with signal 11 at 0xDEAD");
    }

    #[test]
    fn test_literal_percent() {
        assert_eq!(format_message("100%% done", &[]).unwrap(), "100% done");
    }

    #[test]
    fn test_float_precision() {
        let out = format_message("%.2f seconds", &[1.2345.into()]).unwrap();
        assert_eq!(out, "1.23 seconds");
    }

    #[test]
    fn test_too_few_arguments() {
        let err = format_message("%s and %s", &["one".into()]).unwrap_err();
        assert!(matches!(err, FormatError::TooFewArguments { given: 1, .. }));
    }

    #[test]
    fn test_too_many_arguments() {
        let err = format_message("%s", &["one".into(), "two".into()]).unwrap_err();
        assert!(matches!(err, FormatError::TooManyArguments { given: 2, .. }));
    }

    #[test]
    fn test_type_mismatch() {
        let err = format_message("%d", &["not a number".into()]).unwrap_err();
        assert!(matches!(
            err,
            FormatError::TypeMismatch {
                specifier: 'd',
                found: "string",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_specifier() {
        let err = format_message("%q", &["x".into()]).unwrap_err();
        assert_eq!(err, FormatError::UnknownSpecifier('q'));
    }

    #[test]
    fn test_unknown_specifier_reported_before_missing_argument() {
        let err = format_message("%q", &[]).unwrap_err();
        assert_eq!(err, FormatError::UnknownSpecifier('q'));
    }

    #[test]
    fn test_precision_truncates_string() {
        let out = format_message("%.3s", &["abcdef".into()]).unwrap();
        assert_eq!(out, "abc");
    }

    #[test]
    fn test_precision_pads_integers() {
        assert_eq!(format_message("%.4d", &[42.into()]).unwrap(), "0042");
        assert_eq!(
            format_message("%.3d", &[FormatArg::Int(-5)]).unwrap(),
            "-005"
        );
        assert_eq!(
            format_message("%.4x", &[FormatArg::Uint(0xab)]).unwrap(),
            "00ab"
        );
        // Already wide enough, no padding
        assert_eq!(format_message("%.2d", &[12345.into()]).unwrap(), "12345");
    }

    #[test]
    fn test_precision_rejected_on_char() {
        let err = format_message("%.2c", &['x'.into()]).unwrap_err();
        assert_eq!(err, FormatError::InvalidPrecision('c'));
    }

    #[test]
    fn test_trailing_percent() {
        assert_eq!(
            format_message("oops %", &[]).unwrap_err(),
            FormatError::TrailingPercent
        );
    }
}

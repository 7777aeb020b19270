// Latin-1 numeric character references for dialogue text
use std::borrow::Cow;
use std::fmt::Write;

/// Replace every character in U+00A0..=U+00FF with `&#N;`.
///
/// Only the Latin-1 Supplement block is touched. `<`, `>`, `&` and quotes
/// pass through unchanged.
pub fn html_encode_latin1(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_encoding) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if needs_encoding(c) {
            let _ = write!(out, "&#{};", u32::from(c));
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn needs_encoding(c: char) -> bool {
    matches!(u32::from(c), 160..=255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_latin1_supplement() {
        assert_eq!(html_encode_latin1("café"), "caf&#233;");
        assert_eq!(html_encode_latin1("\u{a0}"), "&#160;");
        assert_eq!(html_encode_latin1("ÿ"), "&#255;");
        assert_eq!(html_encode_latin1("¿Qué?"), "&#191;Qu&#233;?");
    }

    #[test]
    fn test_range_bounds() {
        assert_eq!(html_encode_latin1("\u{9f}"), "\u{9f}");
        assert_eq!(html_encode_latin1("\u{100}"), "\u{100}");
        assert_eq!(html_encode_latin1("A"), "A");
    }

    #[test]
    fn test_leaves_markup_and_other_scripts_alone() {
        let text = "<i>Tom & \"Jerry\"</i> … 日本語 🎬";
        assert!(matches!(html_encode_latin1(text), Cow::Borrowed(_)));
        assert_eq!(html_encode_latin1(text), text);
    }
}

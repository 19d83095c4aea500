//! Relaxed JSON source: comments, trailing commas and a leading BOM are
//! blanked out with spaces before serde_json sees the bytes.
//!
//! Blanking keeps every byte offset (and every newline) in place, so parser
//! errors still point at the caller's original line and column. String
//! contents are never touched. Anything that is not one of the tolerated
//! forms (an unterminated block comment, `[,]`) is left for the parser to
//! reject.

const BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn relax(source: &[u8]) -> Vec<u8> {
    let mut out = source.to_vec();
    let mut i = 0;
    if out.starts_with(BOM) {
        out[..BOM.len()].fill(b' ');
        i = BOM.len();
    }

    // last significant byte (index, value) and the one before it
    let mut last: Option<(usize, u8)> = None;
    let mut before: Option<u8> = None;
    let mut in_string = false;

    while i < out.len() {
        let b = out[i];
        if in_string {
            match b {
                b'\\' => i += 2,
                b'"' => {
                    in_string = false;
                    i += 1;
                }
                _ => i += 1,
            }
            continue;
        }
        match b {
            b' ' | b'\t' | b'\n' | b'\r' => i += 1,
            b'/' if out.get(i + 1) == Some(&b'/') => {
                let end = out[i..].iter().position(|&c| c == b'\n').map_or(out.len(), |n| i + n);
                blank(&mut out[i..end]);
                i = end;
            }
            b'/' if out.get(i + 1) == Some(&b'*') => {
                match out[i + 2..].windows(2).position(|w| w == b"*/") {
                    Some(n) => {
                        let end = i + 2 + n + 2;
                        blank(&mut out[i..end]);
                        i = end;
                    }
                    None => {
                        // unterminated: leave it for the parser to reject
                        before = last.map(|(_, c)| c);
                        last = Some((i, b));
                        i += 1;
                    }
                }
            }
            b']' | b'}' => {
                if let Some((j, b',')) = last {
                    if before.is_some_and(|c| !matches!(c, b'[' | b'{' | b',')) {
                        out[j] = b' ';
                    }
                }
                before = last.map(|(_, c)| c);
                last = Some((i, b));
                i += 1;
            }
            _ => {
                if b == b'"' {
                    in_string = true;
                }
                before = last.map(|(_, c)| c);
                last = Some((i, b));
                i += 1;
            }
        }
    }
    out
}

/// Spaces over everything except line breaks.
fn blank(bytes: &mut [u8]) {
    for b in bytes.iter_mut().filter(|b| !matches!(**b, b'\n' | b'\r')) {
        *b = b' ';
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parse(src: &str) -> serde_json::Result<Value> {
        serde_json::from_slice(&relax(src.as_bytes()))
    }

    #[test]
    fn comments_are_skipped() {
        let src = "{\n  // the id\n  \"id\": 1, /* inline */ \"name\": \"a\"\n}";
        assert_eq!(parse(src).unwrap(), json!({"id": 1, "name": "a"}));
    }

    #[test]
    fn trailing_commas_are_tolerated() {
        assert_eq!(parse("[1, 2, 3,]").unwrap(), json!([1, 2, 3]));
        assert_eq!(
            parse("{\"a\": [1,], \"b\": {\"c\": true,},}").unwrap(),
            json!({"a": [1], "b": {"c": true}})
        );
        assert_eq!(parse("[1, // last\n]").unwrap(), json!([1]));
    }

    #[test]
    fn leading_bom_is_dropped() {
        assert_eq!(parse("\u{feff}{\"a\": 1}").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn string_contents_are_untouched() {
        let src = r#"{"url": "http://x/*y*/", "s": "a,]", "q": "say \"hi\", // not a comment"}"#;
        let v = parse(src).unwrap();
        assert_eq!(v["url"], "http://x/*y*/");
        assert_eq!(v["s"], "a,]");
        assert_eq!(v["q"], "say \"hi\", // not a comment");
    }

    #[test]
    fn stray_commas_still_fail() {
        assert!(parse("[,]").is_err());
        assert!(parse("{,}").is_err());
        assert!(parse("[1,,]").is_err());
        assert!(parse("[1 /* open").is_err());
    }

    #[test]
    fn error_positions_survive_blanking() {
        let err = parse("// header\n/* block\n comment */\n{\"a\": }").unwrap_err();
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn offsets_are_preserved() {
        let src = "[1, /* x */ 2,]";
        assert_eq!(relax(src.as_bytes()).len(), src.len());
    }
}

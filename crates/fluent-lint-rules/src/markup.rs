//! Extraction of visible text from values with inline HTML-like markup.
//!
//! Values such as `Click <a data-l10n-name="link">here</a>` carry quotes
//! inside attributes that must not be mistaken for typography. Only the data
//! between markup is returned.
//!
//! Recognized markup:
//!
//! - start and end tags, with quoted attribute values
//! - comments, `<!-- ... -->`
//! - declarations, `<!DOCTYPE ...>`
//! - processing instructions, `<? ... ?>`
//!
//! A `<` that does not open one of these is ordinary text. Markup left
//! unterminated runs to the end of the value. Character references are not
//! decoded.

/// Splits `value` into the runs of text between markup, in order.
///
/// Empty runs are dropped.
#[must_use]
pub fn text_runs(value: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut run_start = 0;
    let mut pos = 0;

    while let Some(found) = value[pos..].find('<') {
        let open = pos + found;
        match markup_end(value, open) {
            Some(end) => {
                if open > run_start {
                    runs.push(&value[run_start..open]);
                }
                run_start = end;
                pos = end;
            }
            None => pos = open + 1,
        }
    }

    if run_start < value.len() {
        runs.push(&value[run_start..]);
    }
    runs
}

/// Returns where the markup opened at `open` ends, or `None` when the `<`
/// is plain text.
fn markup_end(value: &str, open: usize) -> Option<usize> {
    let rest = &value[open..];

    if let Some(body) = rest.strip_prefix("<!--") {
        return Some(body.find("-->").map_or(value.len(), |i| open + 4 + i + 3));
    }

    let bytes = rest.as_bytes();
    match bytes.get(1).copied()? {
        b'!' | b'?' => Some(rest.find('>').map_or(value.len(), |i| open + i + 1)),
        b'/' if bytes.get(2).is_some_and(u8::is_ascii_alphabetic) => Some(tag_end(value, open)),
        next if next.is_ascii_alphabetic() => Some(tag_end(value, open)),
        _ => None,
    }
}

/// Finds the `>` closing a tag, skipping over quoted attribute values.
fn tag_end(value: &str, open: usize) -> usize {
    let mut quote = None;

    for (i, byte) in value.bytes().enumerate().skip(open + 1) {
        match quote {
            Some(q) if byte == q => quote = None,
            Some(_) => {}
            None if byte == b'"' || byte == b'\'' => quote = Some(byte),
            None if byte == b'>' => return i + 1,
            None => {}
        }
    }

    value.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_one_run() {
        assert_eq!(text_runs("Loading..."), vec!["Loading..."]);
        assert!(text_runs("").is_empty());
    }

    #[test]
    fn tags_split_runs() {
        assert_eq!(
            text_runs("Click <a data-l10n-name=\"link\">here</a> now"),
            vec!["Click ", "here", " now"]
        );
        assert_eq!(text_runs("<b>bold</b>"), vec!["bold"]);
        assert_eq!(text_runs("line<br/>break"), vec!["line", "break"]);
    }

    #[test]
    fn quoted_attributes_may_contain_angle_brackets() {
        assert_eq!(
            text_runs("<img alt='a > b' title=\"x\">after"),
            vec!["after"]
        );
    }

    #[test]
    fn comments_declarations_and_instructions_are_skipped() {
        assert_eq!(text_runs("a<!-- \"note\" -->b"), vec!["a", "b"]);
        assert_eq!(text_runs("<!DOCTYPE html>text"), vec!["text"]);
        assert_eq!(text_runs("x<?php echo ?>y"), vec!["x", "y"]);
    }

    #[test]
    fn stray_angle_brackets_are_text() {
        assert_eq!(text_runs("1 < 2 and 3 > 2"), vec!["1 < 2 and 3 > 2"]);
        assert_eq!(text_runs("a </ b"), vec!["a </ b"]);
        assert_eq!(text_runs("ends with <"), vec!["ends with <"]);
    }

    #[test]
    fn unterminated_markup_runs_to_the_end() {
        assert_eq!(text_runs("Press <b to continue"), vec!["Press "]);
        assert_eq!(text_runs("a<!-- open"), vec!["a"]);
    }
}

//! Byte offset to line/column resolution.

use thiserror::Error;

/// Errors raised while indexing a source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The text uses `\r` line endings, which are not supported.
    #[error("carriage return found at line {line} (byte {offset}); only LF line endings are supported")]
    CarriageReturn {
        /// 1-indexed line of the first `\r`.
        line: usize,
        /// Byte offset of the first `\r`.
        offset: usize,
    },
}

/// Maps byte offsets of one source text to 1-indexed line and column
/// numbers.
///
/// Built once per file by recording the offset of every `\n`. A query is a
/// binary search over those offsets.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    newlines: Vec<usize>,
}

impl PositionIndex {
    /// Indexes `source`.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::CarriageReturn`] if the text contains `\r`.
    pub fn new(source: &str) -> Result<Self, PositionError> {
        let newlines: Vec<usize> = source.match_indices('\n').map(|(i, _)| i).collect();

        if let Some(offset) = source.find('\r') {
            let line = newlines.partition_point(|&nl| nl < offset) + 1;
            return Err(PositionError::CarriageReturn { line, offset });
        }

        Ok(Self { newlines })
    }

    /// Resolves a byte offset to `(line, column)`.
    ///
    /// The column is the byte distance from the preceding `\n`, which makes
    /// it 1-indexed. A newline character belongs to the line it terminates.
    #[must_use]
    pub fn resolve(&self, offset: usize) -> (usize, usize) {
        let index = self.newlines.partition_point(|&nl| nl < offset);
        let column = match index.checked_sub(1) {
            Some(previous) => offset - self.newlines[previous],
            None => offset + 1,
        };
        (index + 1, column)
    }

    /// Number of lines, counting a trailing partial line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.newlines.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_line_starts() {
        let index = PositionIndex::new("a\nbb\nccc").unwrap();
        assert_eq!(index.resolve(0), (1, 1));
        assert_eq!(index.resolve(2), (2, 1));
        assert_eq!(index.resolve(5), (3, 1));
    }

    #[test]
    fn resolves_columns_within_lines() {
        let index = PositionIndex::new("a\nbb\nccc").unwrap();
        assert_eq!(index.resolve(3), (2, 2));
        assert_eq!(index.resolve(7), (3, 3));
        // The newline itself is the last column of its line.
        assert_eq!(index.resolve(1), (1, 2));
        assert_eq!(index.resolve(4), (2, 3));
    }

    #[test]
    fn offsets_past_last_newline_use_last_line() {
        let index = PositionIndex::new("one\ntwo\n").unwrap();
        assert_eq!(index.resolve(8), (3, 1));
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn empty_source_has_one_line() {
        let index = PositionIndex::new("").unwrap();
        assert_eq!(index.resolve(0), (1, 1));
        assert_eq!(index.line_count(), 1);
    }

    #[test]
    fn rejects_carriage_returns() {
        let err = PositionIndex::new("key = value\r\nother = x\r\n").unwrap_err();
        assert_eq!(err, PositionError::CarriageReturn { line: 1, offset: 11 });

        let err = PositionIndex::new("a\nb\rc").unwrap_err();
        assert_eq!(err, PositionError::CarriageReturn { line: 2, offset: 3 });
    }
}

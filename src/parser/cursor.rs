/// Forward-only cursor over an immutable sequence of lines.
///
/// Reads past the end yield `None`; the cursor never panics on overrun.
#[derive(Debug)]
pub struct LineCursor<'a, S> {
    lines: &'a [S],
    pos: usize,
}

impl<'a, S: AsRef<str>> LineCursor<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        Self { lines, pos: 0 }
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.peek_at(0)
    }

    /// Line `offset` positions ahead of the current one.
    pub fn peek_at(&self, offset: usize) -> Option<&'a str> {
        self.lines.get(self.pos + offset).map(AsRef::as_ref)
    }

    pub fn advance(&mut self) {
        if self.pos < self.lines.len() {
            self.pos += 1;
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_advance() {
        let lines = ["a", "b"];
        let mut cursor = LineCursor::new(&lines);
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.peek_at(1), Some("b"));
        cursor.advance();
        assert_eq!(cursor.peek(), Some("b"));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_advance_saturates_at_end() {
        let lines = vec!["only".to_string()];
        let mut cursor = LineCursor::new(&lines);
        cursor.advance();
        cursor.advance();
        assert!(cursor.at_end());
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.peek_at(3), None);
    }

    #[test]
    fn test_empty_sequence() {
        let lines: [&str; 0] = [];
        let cursor = LineCursor::new(&lines);
        assert!(cursor.at_end());
        assert_eq!(cursor.peek(), None);
    }
}

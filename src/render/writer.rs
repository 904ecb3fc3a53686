//! Line-oriented Go source writer.
//!
//! Output is canonical by construction: tab indentation, `\n` terminators, and
//! every non-blank line goes through [`GoWriter::writeln`]. There is no
//! re-formatting pass; emitting canonical text directly keeps the renderer
//! idempotent.

/// Accumulates generated Go source a line at a time.
#[derive(Debug, Default)]
pub struct GoWriter {
    buffer: String,
    indent: usize,
}

impl GoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indent, followed by `\n`.
    pub fn writeln(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.buffer.push('\t');
        }
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Write a blank line. Blank lines carry no indentation.
    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_uses_tabs() {
        let mut w = GoWriter::new();
        w.writeln("func F() {");
        w.indent();
        w.writeln("return");
        w.dedent();
        w.writeln("}");
        assert_eq!(w.finish(), "func F() {\n\treturn\n}\n");
    }

    #[test]
    fn test_blank_lines_carry_no_indent() {
        let mut w = GoWriter::new();
        w.indent();
        w.blank();
        w.writeln("x");
        assert_eq!(w.finish(), "\n\tx\n");
    }

    #[test]
    fn test_dedent_saturates_at_zero() {
        let mut w = GoWriter::new();
        w.dedent();
        w.writeln("x");
        assert_eq!(w.finish(), "x\n");
    }
}

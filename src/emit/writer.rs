//! Indentation-aware text buffer shared by every builder of a document.

#[derive(Debug)]
pub(crate) struct SourceWriter {
    out: String,
    level: usize,
    unit: String,
    regions: bool,
}

impl SourceWriter {
    pub(crate) fn new(indent_width: usize, regions: bool) -> Self {
        SourceWriter { out: String::new(), level: 0, unit: " ".repeat(indent_width), regions }
    }

    /// Append `text` at the current indentation. Empty text yields an empty
    /// line with no trailing whitespace.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.out.push_str(&self.unit);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Append an empty line unless the buffer already ends with one.
    pub(crate) fn blank(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    pub(crate) fn indent(&mut self) {
        self.level += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub(crate) fn open(&mut self) {
        self.line("{");
        self.indent();
    }

    pub(crate) fn close(&mut self) {
        self.close_with("");
    }

    /// Close a block with `suffix` after the brace, e.g. `};`.
    pub(crate) fn close_with(&mut self, suffix: &str) {
        self.trim_trailing_blank();
        self.dedent();
        self.line(format!("}}{suffix}"));
    }

    pub(crate) fn region(&mut self, name: &str) {
        if self.regions {
            self.line(format!("#region {name}"));
            self.blank();
        }
    }

    pub(crate) fn end_region(&mut self) {
        if self.regions {
            self.trim_trailing_blank();
            self.blank();
            self.line("#endregion");
            self.blank();
        }
    }

    pub(crate) fn finish(mut self) -> String {
        self.trim_trailing_blank();
        self.out
    }

    fn trim_trailing_blank(&mut self) {
        while self.out.ends_with("\n\n") {
            self.out.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_blocks_and_regions() {
        let mut w = SourceWriter::new(4, true);
        w.line("class A");
        w.open();
        w.region("Props");
        w.line("int X;");
        w.blank();
        w.end_region();
        w.close();

        assert_eq!(w.finish(), "class A\n{\n    #region Props\n\n    int X;\n\n    #endregion\n}\n");
    }

    #[test]
    fn regions_can_be_disabled() {
        let mut w = SourceWriter::new(2, false);
        w.open();
        w.region("Props");
        w.line("x");
        w.end_region();
        w.close_with(";");

        assert_eq!(w.finish(), "{\n  x\n};\n");
    }

    #[test]
    fn blank_never_doubles() {
        let mut w = SourceWriter::new(4, false);
        w.line("a");
        w.blank();
        w.blank();
        w.line("b");
        assert_eq!(w.finish(), "a\n\nb\n");
    }
}

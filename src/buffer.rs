/// Accumulates generated code one statement line at a time.
///
/// Owned by a single [`Converter`](crate::Converter) and cleared at the
/// start of every conversion, so one converter instance can be reused
/// across calls without state leaking between them.
#[derive(Debug, Default)]
pub struct CodeBuffer {
    lines: Vec<String>,
}

impl CodeBuffer {
    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn blank_line(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn as_string(&self) -> String {
        let mut doc = String::new();
        for line in &self.lines {
            doc.push_str(line);
            doc.push('\n');
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_lines_with_newlines() {
        let mut buffer = CodeBuffer::default();
        buffer.push_line("a();").blank_line().push_line("b();");
        assert_eq!(buffer.as_string(), "a();\n\nb();\n");
    }

    #[test]
    fn clear_resets_contents() {
        let mut buffer = CodeBuffer::default();
        buffer.push_line("a();");
        buffer.clear();
        assert_eq!(buffer.as_string(), "");
    }
}

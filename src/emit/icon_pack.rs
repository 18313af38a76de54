use crate::emit::NodeBuilder;
use crate::emit::hooks::HookSink;
use crate::emit::writer::SourceWriter;
use crate::IconPackDescriptor;

pub(crate) struct IconPackBuilder<'a> {
    pack: &'a IconPackDescriptor,
}

impl<'a> IconPackBuilder<'a> {
    pub(crate) fn new(pack: &'a IconPackDescriptor) -> Self {
        IconPackBuilder { pack }
    }
}

impl NodeBuilder for IconPackBuilder<'_> {
    fn inside_class(&self, w: &mut SourceWriter, _hooks: &mut dyn HookSink) {
        w.line(format!("public const string IconPackName = \"{}\";", escape(&self.pack.pack_name)));
    }
}

/// Escape `s` for a regular string literal.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(escape(r#"My "Pack"\v2"#), r#"My \"Pack\"\\v2"#);
    }
}

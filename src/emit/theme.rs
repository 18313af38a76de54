use crate::emit::NodeBuilder;
use crate::emit::hooks::HookSink;
use crate::emit::writer::SourceWriter;
use crate::ThemeDescriptor;

/// Palette enumeration next to the theme type, plus a color lookup inside it.
///
/// The enumeration is named after the owner (`AppTheme` gets `AppThemeColor`)
/// so several themes can share a namespace.
pub(crate) struct ThemeBuilder<'a> {
    theme: &'a ThemeDescriptor,
    enum_name: String,
    /// Static factory building a color from four bytes, e.g. `Color.FromArgb`.
    color_factory: &'a str,
}

impl<'a> ThemeBuilder<'a> {
    pub(crate) fn new(theme: &'a ThemeDescriptor, owner_type: &str, color_factory: &'a str) -> Self {
        ThemeBuilder { theme, enum_name: format!("{}Color", owner_type.replace('.', "")), color_factory }
    }

    /// The type the factory belongs to.
    fn color_type(&self) -> &str {
        self.color_factory.rsplit_once('.').map_or("object", |(ty, _)| ty)
    }
}

impl NodeBuilder for ThemeBuilder<'_> {
    fn before_class(&self, w: &mut SourceWriter) {
        w.line(format!("public enum {}", self.enum_name));
        w.open();
        for color in &self.theme.colors {
            w.line(format!("{},", color.key));
        }
        w.close();
        w.blank();
    }

    fn inside_class(&self, w: &mut SourceWriter, _hooks: &mut dyn HookSink) {
        w.region("Palette");

        w.line(format!("public const bool UsesFallbackPalette = {};", self.theme.uses_fallback_palette));
        w.blank();

        w.line(format!("public static {} GetColor({} key) => key switch", self.color_type(), self.enum_name));
        w.open();
        for color in &self.theme.colors {
            let c = color.argb;
            w.line(format!(
                "{}.{} => {}(0x{:02X}, 0x{:02X}, 0x{:02X}, 0x{:02X}),",
                self.enum_name, color.key, self.color_factory, c.a, c.r, c.g, c.b
            ));
        }
        w.line("_ => throw new global::System.ArgumentOutOfRangeException(nameof(key)),");
        w.close_with(";");

        w.end_region();
    }
}

//! Diagnostic catalog and the self-contained [`Diagnostic`] value.
//!
//! A diagnostic is always addressed by its own source location, so streams of
//! diagnostics can be merged in any order without losing meaning.

use crate::declaration::Location;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Static description of a diagnostic kind.
///
/// `message` uses positional `{0}`, `{1}`, ... placeholders that are filled
/// from [`Diagnostic::args`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct DiagnosticDescriptor {
    pub code: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub category: &'static str,
    pub severity: Severity,
}

pub const NOTIFY_FIELD_SHOULD_BE_PRIVATE: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "STN001",
    title: "Notify marker should only be applied to private fields",
    message: "The 'Notify' marker should not be applied to '{0}'. It is only valid on private fields.",
    category: "Stencil.Notify",
    severity: Severity::Warning,
};

pub const BACKING_FIELD_REQUIRES_CAPABLE_OWNER: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "STN010",
    title: "Backing-field marker requires a capable owner type",
    message: "The field '{0}' is in '{1}', which does not derive from '{2}'",
    category: "Stencil.BackingField",
    severity: Severity::Error,
};

pub const BACKING_FIELD_MUTABILITY_SUGGESTION: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "STN020",
    title: "Backing field is only a marker",
    message: "The field '{0}' is only used as a marker for the generator. Consider marking it as 'readonly'.",
    category: "Stencil.BackingField",
    severity: Severity::Info,
};

pub const DUPLICATE_THEME_DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "STN030",
    title: "Duplicate theme descriptor",
    message: "Only one 'Theme' marker is allowed on '{0}'",
    category: "Stencil.Theme",
    severity: Severity::Error,
};

pub const INVALID_COLOR_LITERAL: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "STN031",
    title: "Invalid color literal",
    message: "Theme entry '{0}' has value '{1}', which is not a #RRGGBB or #AARRGGBB literal",
    category: "Stencil.Theme",
    severity: Severity::Warning,
};

pub const DUPLICATE_ICON_PACK_DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "STN040",
    title: "Duplicate icon-pack descriptor",
    message: "Only one 'IconPack' marker is allowed on '{0}'",
    category: "Stencil.IconPack",
    severity: Severity::Error,
};

/// Every descriptor the engine can report.
pub const CATALOG: &[&DiagnosticDescriptor] = &[
    &NOTIFY_FIELD_SHOULD_BE_PRIVATE,
    &BACKING_FIELD_REQUIRES_CAPABLE_OWNER,
    &BACKING_FIELD_MUTABILITY_SUGGESTION,
    &DUPLICATE_THEME_DESCRIPTOR,
    &INVALID_COLOR_LITERAL,
    &DUPLICATE_ICON_PACK_DESCRIPTOR,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub code: &'static str,
    pub severity: Severity,
    pub message_template: &'static str,
    pub args: Vec<String>,
    pub location: Option<Location>,
}

impl Diagnostic {
    pub fn new<I, S>(descriptor: &DiagnosticDescriptor, location: Option<Location>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Diagnostic {
            code: descriptor.code,
            severity: descriptor.severity,
            message_template: descriptor.message,
            args: args.into_iter().map(Into::into).collect(),
            location,
        }
    }

    /// The template with its placeholders filled in. Placeholders without a
    /// matching argument are left untouched.
    ///
    /// The template is scanned once, so placeholder text inside an argument is
    /// never substituted again.
    pub fn message(&self) -> String {
        regex!(r"\{(\d+)\}")
            .replace_all(self.message_template, |caps: &regex::Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.args.get(i))
                    .map_or_else(|| caps[0].to_string(), Clone::clone)
            })
            .into_owned()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{loc}: {} {}: {}", self.severity, self.code, self.message()),
            None => write!(f, "{} {}: {}", self.severity, self.code, self.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_fills_positional_placeholders() {
        let d = Diagnostic::new(&INVALID_COLOR_LITERAL, None, ["Accent", "nothex"]);
        assert_eq!(d.message(), "Theme entry 'Accent' has value 'nothex', which is not a #RRGGBB or #AARRGGBB literal");
        assert_eq!(d.severity, Severity::Warning);
    }

    #[test]
    fn arguments_are_not_rescanned_for_placeholders() {
        let d = Diagnostic::new(&INVALID_COLOR_LITERAL, None, ["{1}", "zz"]);
        assert_eq!(d.message(), "Theme entry '{1}' has value 'zz', which is not a #RRGGBB or #AARRGGBB literal");
    }

    #[test]
    fn missing_arguments_leave_placeholders() {
        let d = Diagnostic::new(&BACKING_FIELD_REQUIRES_CAPABLE_OWNER, None, ["_x"]);
        assert_eq!(d.message(), "The field '_x' is in '{1}', which does not derive from '{2}'");
    }

    #[test]
    fn display_includes_location_and_code() {
        let loc = Location { file: "Person.cs".into(), line: 7, column: 24 };
        let d = Diagnostic::new(&NOTIFY_FIELD_SHOULD_BE_PRIVATE, Some(loc), ["_name"]);
        assert_eq!(
            d.to_string(),
            "Person.cs:7:24: warning STN001: The 'Notify' marker should not be applied to '_name'. It is only valid on private fields."
        );
    }

    #[test]
    fn catalog_codes_are_unique() {
        let mut codes: Vec<&str> = CATALOG.iter().map(|d| d.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), CATALOG.len());
    }
}

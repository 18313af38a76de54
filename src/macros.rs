#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`MarkerRule`](crate::MarkerRule).
///
/// ```ignore
/// marker_rule! {
///     name: "Notify",
///     targets: SymbolMask::FIELD,
///     prod: move |symbol, marker, report| { ... },
/// }
/// ```
#[macro_export]
macro_rules! marker_rule {
    (
        name: $name:expr,
        targets: $targets:expr,
        prod: move |$symbol:ident, $marker:ident, $report:ident| $body:block
        $(,)?
    ) => {{
        $crate::MarkerRule {
            name: $name,
            targets: $targets,
            production: Box::new(
                move |$symbol: &$crate::Symbol,
                      $marker: &$crate::Marker,
                      $report: &mut Vec<$crate::Diagnostic>|
                      -> Option<$crate::Node> { $body },
            ),
        }
    }};
}

//! Diagnostic collection.
//!
//! Diagnostics come from independent places (rule outcomes, each singleton
//! validator) and each one carries its own location, so they can be merged
//! without any ordering contract between sources.

use crate::Diagnostic;

/// Flatten any number of optional-diagnostic streams into one, dropping
/// absent entries. Streams of plain diagnostics are accepted as well.
pub(crate) fn collect<S, I, D>(streams: S) -> Vec<Diagnostic>
where
    S: IntoIterator<Item = I>,
    I: IntoIterator<Item = D>,
    D: Into<Option<Diagnostic>>,
{
    streams.into_iter().flatten().filter_map(Into::<Option<Diagnostic>>::into).collect()
}

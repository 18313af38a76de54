//! Typed argument records, one per marker kind.
//!
//! Each record is populated once, right at the boundary with the front end's
//! argument list. Rule logic only ever sees these records.

use crate::Marker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotifyArgs {
    pub create_hooks: bool,
}

impl NotifyArgs {
    pub fn from_marker(marker: &Marker) -> Self {
        NotifyArgs { create_hooks: marker.bool_arg("CreateHooks").unwrap_or(false) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackingFieldArgs {
    pub default_value: Option<String>,
    pub has_change_callback: bool,
    pub has_coerce_callback: bool,
    pub binds_two_way_by_default: bool,
    pub is_read_only: bool,
}

impl BackingFieldArgs {
    pub fn from_marker(marker: &Marker) -> Self {
        BackingFieldArgs {
            default_value: marker.string_arg("DefaultValue").map(str::to_string),
            has_change_callback: marker.bool_arg("HasChangeCallback").unwrap_or(false),
            has_coerce_callback: marker.bool_arg("HasCoerceCallback").unwrap_or(false),
            binds_two_way_by_default: marker.bool_arg("BindsTwoWayByDefault").unwrap_or(false),
            is_read_only: marker.bool_arg("IsReadOnly").unwrap_or(false),
        }
    }

    pub fn has_callbacks(&self) -> bool {
        self.has_change_callback || self.has_coerce_callback
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPackArgs {
    pub pack: String,
}

impl IconPackArgs {
    pub fn from_marker(marker: &Marker, default_pack: &str) -> Self {
        let pack = marker.string_arg("Pack").filter(|p| !p.trim().is_empty()).unwrap_or(default_pack);
        IconPackArgs { pack: pack.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgValue, Argument};

    #[test]
    fn backing_field_defaults_when_absent() {
        let args = BackingFieldArgs::from_marker(&Marker::new("DependencyProperty"));
        assert_eq!(args, BackingFieldArgs::default());
        assert!(!args.has_callbacks());
    }

    #[test]
    fn backing_field_reads_mixed_named_and_positional() {
        let marker = Marker::new("DependencyProperty")
            .with_arg(Argument::positional("DefaultValue", ArgValue::Str("Icons.Warning".into())))
            .with_arg(Argument::named("HasChangeCallback", ArgValue::Bool(true)));
        let args = BackingFieldArgs::from_marker(&marker);

        assert_eq!(args.default_value.as_deref(), Some("Icons.Warning"));
        assert!(args.has_change_callback);
        assert!(!args.has_coerce_callback);
        assert!(args.has_callbacks());
    }

    #[test]
    fn icon_pack_falls_back_to_default() {
        let args = IconPackArgs::from_marker(&Marker::new("IconPack"), "Mdl2Assets");
        assert_eq!(args.pack, "Mdl2Assets");

        let blank = Marker::new("IconPack").with_arg(Argument::positional("pack", ArgValue::Str(" ".into())));
        assert_eq!(IconPackArgs::from_marker(&blank, "Mdl2Assets").pack, "Mdl2Assets");
    }
}

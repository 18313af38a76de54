use pretty_assertions::assert_eq;
use stencil::{
    Declaration, EngineConfig, Generator, Location, Marker, PaletteEntry, Severity, Symbol, TypeSymbol, Visibility,
    generate,
};

const FIXTURE: &str = include_str!("../demos/declarations.json");

fn fixture() -> Vec<Declaration> {
    serde_json::from_str(FIXTURE).expect("fixture parses")
}

fn ids(docs: &[stencil::Document]) -> Vec<&str> {
    let mut ids: Vec<&str> = docs.iter().map(|d| d.output_id.as_str()).collect();
    ids.sort_unstable();
    ids
}

fn theme_decl(file_line: u32) -> Declaration {
    Declaration {
        symbol: Symbol::Type(TypeSymbol {
            namespace: "Demo.App".into(),
            name: "AppTheme".into(),
            location: Some(Location { file: "AppTheme.cs".into(), line: file_line, column: 5 }),
            ..Default::default()
        }),
        markers: vec![Marker::new("ThemeAttribute")],
    }
}

#[test]
fn fixture_produces_one_document_per_owner_and_bucket() {
    let out = generate(&fixture());

    assert_eq!(
        ids(&out.documents),
        vec![
            "Demo.App.AppIcons.IconPack.g.cs",
            "Demo.App.AppTheme.Theme.g.cs",
            "Demo.App.Controls.MyButton.Members.g.cs",
            "Demo.App.Person.Members.g.cs",
        ]
    );
    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
}

#[test]
fn person_mixes_notify_and_backing_fields() {
    let out = generate(&fixture());
    let text = &out.document("Demo.App.Person.Members.g.cs").unwrap().text;

    assert!(text.contains("partial class Person : global::System.ComponentModel.INotifyPropertyChanged"));
    assert!(text.contains("public string? Name"));
    assert!(text.contains("public string? Email"));
    assert!(text.contains("internal void SetTitleInternal(string value)"));
    assert!(text.contains("public static readonly global::System.Windows.DependencyProperty FirstNameProperty ="));

    assert_eq!(text.matches("#region Hooks").count(), 1);
    assert!(text.contains("partial void OnEmailChanging(string? oldValue, ref string? newValue, ref bool cancel);"));
    assert!(text.contains("partial void OnEmailChanged(string? oldValue, string? newValue);"));
    assert!(text.contains("partial void OnFirstNameChanged(string? oldValue, string? newValue);"));
    assert!(text.contains("partial void OnFirstNameCoerce(ref string value);"));
    assert!(!text.contains("OnNameChanging"));
}

#[test]
fn control_keeps_its_field_type_namespace() {
    let out = generate(&fixture());
    let text = &out.document("Demo.App.Controls.MyButton.Members.g.cs").unwrap().text;

    assert!(text.contains("using Demo.App.Assets;"));
    assert!(text.contains("namespace Demo.App.Controls"));
    assert!(text.contains("new global::System.Windows.PropertyMetadata(Icons.Warning, OnIconChangedInternal, null));"));
    assert!(text.contains("internal void SetGlyphInternal(string value)"));
    assert!(!text.contains("INotifyPropertyChanged"));
}

#[test]
fn theme_merges_declared_palette_over_fallback() {
    let out = generate(&fixture());
    let text = &out.document("Demo.App.AppTheme.Theme.g.cs").unwrap().text;

    assert!(text.contains("public const bool UsesFallbackPalette = false;"));
    assert!(text.contains("AppThemeColor.Background => global::System.Windows.Media.Color.FromArgb(0xFF, 0x10, 0x10, 0x10),"));
    assert!(text.contains("AppThemeColor.Accent => global::System.Windows.Media.Color.FromArgb(0xFF, 0x50, 0x50, 0x50),"));
    assert!(text.contains("AppThemeColor.Blue => global::System.Windows.Media.Color.FromArgb(0xFF, 0x00, 0x00, 0xFF),"));

    // Declared keys keep their fallback slot; new keys go last.
    let background = text.find("    Background,").unwrap();
    let success = text.find("    Success,").unwrap();
    let blue = text.find("    Blue,").unwrap();
    assert!(background < success && success < blue);
}

#[test]
fn icon_pack_uses_the_positional_argument() {
    let out = generate(&fixture());
    let text = &out.document("Demo.App.AppIcons.IconPack.g.cs").unwrap().text;
    assert!(text.contains("public const string IconPackName = \"Fluent\";"));
}

#[test]
fn duplicate_theme_keeps_the_first_and_reports_the_rest() {
    let mut input = fixture();
    input.push(theme_decl(40));
    input.push(theme_decl(50));

    let out = generate(&input);

    let duplicates: Vec<_> = out.diagnostics.iter().filter(|d| d.code == "STN030").collect();
    assert_eq!(duplicates.len(), 2);
    assert_eq!(duplicates[0].location.as_ref().map(|l| l.line), Some(40));
    assert_eq!(duplicates[1].location.as_ref().map(|l| l.line), Some(50));
    assert_eq!(duplicates[0].message(), "Only one 'Theme' marker is allowed on 'Demo.App.AppTheme'");
    assert!(out.has_errors());

    // The surviving theme is the declared one, not the bare duplicates.
    let text = &out.document("Demo.App.AppTheme.Theme.g.cs").unwrap().text;
    assert!(text.contains("AppThemeColor.Blue =>"));
    assert_eq!(out.documents.len(), 4);
}

#[test]
fn owners_split_differently_across_namespace_and_type_get_distinct_ids() {
    let theme = |namespace: &str, name: &str| Declaration {
        symbol: Symbol::Type(TypeSymbol { namespace: namespace.into(), name: name.into(), ..Default::default() }),
        markers: vec![Marker::new("Theme")],
    };

    let out = generate(&[theme("A", "B.C"), theme("A.B", "C")]);

    assert_eq!(ids(&out.documents), vec!["A.B+C.Theme.g.cs", "A.B.C.Theme.g.cs"]);
    assert!(out.diagnostics.is_empty());
}

#[test]
fn rule_diagnostics_do_not_stop_the_pass() {
    let mut input = fixture();
    let Symbol::Field(field) = &mut input[0].symbol else { panic!("first fixture entry is a field") };
    field.visibility = Visibility::Public;
    let Symbol::Type(theme) = &mut input[6].symbol else { panic!("seventh fixture entry is a type") };
    theme.palette.push(PaletteEntry { key: "Broken".into(), value: "#12".into(), location: None });

    let out = generate(&input);

    let codes: Vec<_> = out.diagnostics.iter().map(|d| (d.code, d.severity)).collect();
    assert_eq!(codes, vec![("STN001", Severity::Warning), ("STN031", Severity::Warning)]);
    assert!(!out.has_errors());
    assert_eq!(out.documents.len(), 4);
}

#[test]
fn backing_field_on_incapable_owner_produces_no_member() {
    let mut input = fixture();
    for decl in &mut input {
        if let Symbol::Field(field) = &mut decl.symbol {
            if field.owner.name == "MyButton" {
                field.owner.base_types.clear();
            }
        }
    }

    let out = generate(&input);

    assert!(out.document("Demo.App.Controls.MyButton.Members.g.cs").is_none());
    assert_eq!(out.diagnostics.iter().filter(|d| d.code == "STN010").count(), 2);
    assert!(out.has_errors());
}

#[test]
fn generator_reuses_untouched_owners() {
    let mut generator = Generator::new(EngineConfig::default()).unwrap();
    let mut input = fixture();

    let first = generator.run(&input);
    assert_eq!(first.metrics.outcomes_computed, 8);
    assert_eq!(first.metrics.documents_built, 4);

    let again = generator.run(&input);
    assert!(again.metrics.fully_reused());
    assert_eq!(again.documents, first.documents);

    let Symbol::Type(theme) = &mut input[6].symbol else { panic!("seventh fixture entry is a type") };
    theme.palette[0].value = "#202020".into();
    let edited = generator.run(&input);

    assert_eq!(edited.metrics.outcomes_computed, 1);
    assert_eq!(edited.metrics.outcomes_reused, 7);
    assert_eq!(edited.metrics.documents_built, 1);
    assert_eq!(edited.metrics.documents_reused, 3);
    assert!(edited.document("Demo.App.AppTheme.Theme.g.cs").unwrap().text.contains("FromArgb(0xFF, 0x20, 0x20, 0x20)"));
}

#[test]
fn output_is_identical_across_fresh_runs() {
    let input = fixture();
    let a = generate(&input);
    let b = Generator::new(EngineConfig::default()).unwrap().run(&input);

    assert_eq!(a.documents, b.documents);
    assert_eq!(a.diagnostics, b.diagnostics);
}

#[test]
fn toml_config_reaches_every_document() {
    let config = EngineConfig::from_toml_str(
        r#"
        output_extension = "generated.cs"
        emit_regions = false
        "#,
    )
    .unwrap();

    let out = Generator::new(config).unwrap().run(&fixture());

    assert!(out.documents.iter().all(|d| d.output_id.ends_with(".generated.cs")));
    assert!(out.documents.iter().all(|d| !d.text.contains("#region")));
}

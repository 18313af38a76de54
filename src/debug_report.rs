use stencil::{Output, Severity};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, output: &Output, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Generating from {input}"), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Documents ━━━", ansi::GRAY));
    if output.documents.is_empty() {
        println!("{}", palette.dim("  No documents produced"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • No marker matched a registered rule (check names and the marker suffix)");
        println!("  • Markers sit on the wrong kind of symbol");
        println!("  • Every occurrence failed a precondition (see diagnostics)");
        println!("\n{}", palette.dim("  Tip: set RUST_LOG=stencil=trace to see every rule decision"));
    } else {
        print_documents(output, &palette);
    }

    println!("\n{}", palette.paint("━━━ Diagnostics ━━━", ansi::GRAY));
    if output.diagnostics.is_empty() {
        println!("{}", palette.dim("  None"));
    } else {
        print_diagnostics(output, &palette);
    }

    let m = &output.metrics;
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Extract: {}  │  Validate: {}  │  Emit: {}",
        palette.paint(format!("{:?}", m.total), ansi::GREEN),
        palette.paint(format!("{:?}", m.extract), ansi::CYAN),
        palette.dim(format!("{:?}", m.validate)),
        palette.dim(format!("{:?}", m.emit)),
    );
    println!(
        "  {} {} computed, {} reused  {} {} built, {} reused",
        palette.dim("declarations:"),
        m.outcomes_computed,
        m.outcomes_reused,
        palette.dim("│ documents:"),
        m.documents_built,
        m.documents_reused,
    );
    println!();
}

fn print_documents(output: &Output, palette: &ansi::Palette) {
    for (idx, doc) in output.documents.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{idx}]"), ansi::GRAY),
            palette.bold(palette.paint(&doc.output_id, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(format!("{} lines", doc.text.lines().count()), ansi::YELLOW),
        );
    }
}

fn print_diagnostics(output: &Output, palette: &ansi::Palette) {
    for d in &output.diagnostics {
        let severity = match d.severity {
            Severity::Error => palette.bold(palette.paint("error", ansi::RED)),
            Severity::Warning => palette.paint("warning", ansi::YELLOW),
            Severity::Info => palette.paint("info", ansi::BLUE),
        };
        let location = d.location.as_ref().map(|l| l.to_string()).unwrap_or_else(|| "<unknown>".to_string());

        println!("  {} {} {}", severity, palette.paint(d.code, ansi::CYAN), palette.dim(location));
        println!("      {}", d.message());
    }
}

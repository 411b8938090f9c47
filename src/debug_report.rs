use linkweave::ExtractResultVerbose;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

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

pub fn print_run(input: &str, out: &ExtractResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Extracting: \"{}\"", input.trim()), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Matching ━━━", ansi::GRAY));
    println!(
        "  {} {}",
        palette.paint(format!("{} fact(s) matched", out.result.matched), ansi::GREEN),
        palette.dim(format!("in {:?}", out.details.matching)),
    );

    println!("\n{}", palette.paint("━━━ Saturation ━━━", ansi::GRAY));
    print_saturation(out, &palette);

    println!("\n{}", palette.paint("━━━ Facts ━━━", ansi::GRAY));
    if out.result.graph.is_empty() {
        println!("{}", palette.dim("  No facts extracted"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • Patterns were gated out (a required class or literal is absent)");
        println!("  • No template aligned with the tag sequence");
        println!("  • Tags in the input don't match the template classes");
    } else {
        print_facts(out, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Matching: {}  │  Saturation: {}",
        palette.paint(format!("{:?}", out.details.total), ansi::GREEN),
        palette.dim(format!("{:?}", out.details.matching)),
        palette.paint(format!("{:?}", out.details.saturation_total), ansi::CYAN),
    );
    println!();
}

fn print_saturation(out: &ExtractResultVerbose, palette: &ansi::Palette) {
    if out.details.rounds.is_empty() {
        println!("{}", palette.dim("  No rules to apply"));
        return;
    }
    for pass in &out.details.rounds {
        println!(
            "  {} {}",
            palette.paint(format!("Round {}:", pass.round), ansi::BLUE),
            if pass.produced > 0 {
                palette.paint(format!("✓ {} new fact(s)", pass.produced), ansi::GREEN)
            } else {
                palette.dim("✗ fixpoint".to_string())
            }
        );
        for sample in pass.samples.iter().take(5) {
            println!("    {}", palette.dim(sample));
        }
        if pass.samples.len() > 5 {
            println!("    {}", palette.dim(format!("... +{} more", pass.samples.len() - 5)));
        }
    }
}

fn print_facts(out: &ExtractResultVerbose, palette: &ansi::Palette) {
    for (idx, link) in out.result.graph.iter().enumerate() {
        let derived = idx >= out.details.initial_facts;
        println!(
            "  {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(link.to_string(), ansi::GREEN)),
            if derived { palette.paint("(derived)", ansi::YELLOW) } else { palette.dim("(matched)") },
        );
    }
}

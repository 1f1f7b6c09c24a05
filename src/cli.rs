use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "debscan")]
#[command(version)]
#[command(about = "Read Debian package metadata from a local .deb or HTTP URL", long_about = None)]
#[command(after_help = "Examples:\n  \
  debscan hello_2.10-3_amd64.deb           print all control fields\n  \
  debscan -f version -f depends pkg.deb    print selected fields\n  \
  debscan -l https://example.com/pkg.deb   list ar members of a remote package")]
pub struct Cli {
    /// .deb file path or HTTP URL
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Print only these control fields (case-insensitive)
    #[arg(short = 'f', long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,

    /// List ar members instead of parsing control metadata
    #[arg(short = 'l', long = "list-members")]
    pub list: bool,

    /// Narrate parsing progress on stderr
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.file.starts_with("http://") || self.file.starts_with("https://")
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match (self.verbose, self.quiet) {
            (_, q) if q > 1 => "off",
            (_, 1) => "error",
            (true, _) => "info",
            (false, _) => "warn",
        }
    }
}

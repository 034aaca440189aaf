use clap::Parser;
use filegraph::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli::run(cli) {
        // `{:#}` joins the context chain on one line
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

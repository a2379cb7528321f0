//! localtoc-css - generate the Local ToC stylesheet

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "localtoc-css")]
#[command(version, about = "Generate the Local ToC stylesheet", long_about = None)]
#[command(after_help = "EXAMPLES:
    localtoc-css styles/localtoc.css    Write the stylesheet (overwrites)
    localtoc-css -                      Print the stylesheet to stdout")]
struct Cli {
    /// Output file, or '-' for stdout. An existing file is overwritten.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.output.as_os_str() == "-" {
        print!("{}", localtoc::css::generate_stylesheet());
        return ExitCode::SUCCESS;
    }

    match localtoc::css::write_stylesheet(&cli.output) {
        Ok(()) => {
            println!("wrote {}", cli.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

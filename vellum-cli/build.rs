use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    // A simplified mirror of the runtime CLI; build scripts can't reach
    // src/ modules, and completions only need the surface shape.
    let mut cmd = Command::new("vellum")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert and inspect vellum documents")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input file path")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Target format (docx, html, text)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .help("Source format (auto-detected from the file extension)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file path")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        );

    generate_to(Bash, &mut cmd, "vellum", &outdir)?;
    generate_to(Zsh, &mut cmd, "vellum", &outdir)?;
    generate_to(Fish, &mut cmd, "vellum", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}

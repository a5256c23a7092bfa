// Command-line interface for vellum
//
// This binary drives the vellum document pipeline: converting between the
// word-processor container (.docx), editor HTML, and plain text.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from
// the file extension, while being overridable by an explicit --from flag.
// Usage:
//  vellum <input> --to <format> [--from <format>] [--output <file>]  - Convert (default)
//  vellum convert <input> --to <format> [...]                        - Same, explicit
//  vellum inspect <path>                                             - Dump the block model as JSON
//  vellum generate-css                                               - Print the HTML export CSS
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  vellum draft.html --to docx -o draft.docx --extra-toc --extra-header "My Novel"

use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use vellum_config::{Loader, VellumConfig};
use vellum_convert::{
    sanitize_file_name, AssembleOptions, FormatRegistry, SerializedDocument,
};

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = if i + 1 < args.len() {
                let next = &args[i + 1];
                !next.starts_with('-')
            } else {
                false
            };

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("vellum")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting vellum documents")
        .long_about(
            "vellum is a command-line tool for the vellum document pipeline.\n\n\
            Commands:\n  \
            - convert: Transform between formats (docx, html, text)\n  \
            - inspect: View the block-model representation of a document\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            vellum draft.docx --to html -o draft.html     # Import to editor HTML\n  \
            vellum draft.html --to docx -o draft.docx     # Export back to Word\n  \
            vellum draft.docx --to text                   # Plain text to stdout\n  \
            vellum draft.html --to docx --extra-toc       # Export with a table of contents",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a vellum.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - docx: Word-processor documents (.docx)\n  \
                    - html: Editor HTML (.html)\n  \
                    - text: Plain text projection (.txt, serialize only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Text output goes to stdout by default; binary output derives a\n\
                    sanitized file name from the input when -o is not given.\n\n\
                    Examples:\n  \
                    vellum convert draft.docx --to html -o draft.html\n  \
                    vellum convert draft.html --to docx --extra-header \"My Novel\"\n  \
                    vellum draft.docx --to text                # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (text formats default to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Dump a document's block-model representation as JSON")
                .long_about(
                    "Parse a document and print the resulting block sequence as JSON.\n\n\
                    Useful for debugging conversions: every paragraph, run and style\n\
                    flag the pipeline resolved is visible in the output.\n\n\
                    Examples:\n  \
                    vellum inspect draft.html\n  \
                    vellum inspect draft.docx",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the document")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the default CSS used for HTML export")
                .long_about(
                    "Outputs the baseline CSS embedded into HTML exports.\n\n\
                    Save it, customize it, then pass the result back with\n\
                    --extra-custom-css on a convert to html.",
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    // Try normal parsing; if the first arg looks like a file, inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "inspect"
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "generate-css"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from_arg = sub_matches.get_one::<String>("from");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let from = resolve_from(from_arg, input);
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let from_arg = sub_matches.get_one::<String>("from");
            let from = resolve_from(from_arg, path);
            handle_inspect_command(path, &from);
        }
        Some(("generate-css", _)) => {
            print!(
                "{}",
                vellum_convert::formats::html::serializer::default_css()
            );
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn resolve_from(from_arg: Option<&String>, input: &str) -> String {
    if let Some(from) = from_arg {
        return from.to_string();
    }
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &VellumConfig,
) {
    let registry = FormatRegistry::default();

    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let blocks = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    // Config supplies the baseline options; --extra-* wins key by key.
    let mut format_options = HashMap::new();
    if to == "docx" {
        format_options = docx_params_from_config(config);
    }
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    let result = registry
        .serialize_with_options(&blocks, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match (output, result) {
        (Some(path), data) => {
            let path = forced_extension_path(path, to, &registry);
            fs::write(&path, data.into_bytes()).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        (None, SerializedDocument::Text(text)) => {
            print!("{text}");
        }
        (None, SerializedDocument::Binary(bytes)) => {
            // Binary output with no -o: derive a sanitized name next to cwd.
            let stem = Path::new(input)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");
            let name = sanitize_file_name(stem, "docx");
            fs::write(&name, bytes).unwrap_or_else(|e| {
                eprintln!("Error writing file '{name}': {e}");
                std::process::exit(1);
            });
            println!("Wrote {name}");
        }
    }
}

/// Sanitize the file-name component of an output path and force the
/// extension the target format expects.
fn forced_extension_path(path: &str, to: &str, registry: &FormatRegistry) -> String {
    let extension = registry
        .get(to)
        .ok()
        .and_then(|f| f.file_extensions().first().copied())
        .unwrap_or("out");

    let as_path = Path::new(path);
    let file_name = as_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let sanitized = sanitize_file_name(file_name, extension);

    match as_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.join(sanitized).to_string_lossy().into_owned()
        }
        _ => sanitized,
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, from: &str) {
    let source = fs::read(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let registry = FormatRegistry::default();
    let blocks = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let json = serde_json::to_string_pretty(&blocks).unwrap_or_else(|e| {
        eprintln!("JSON error: {e}");
        std::process::exit(1);
    });
    println!("{json}");
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let format = registry.get(&format_name).expect("listed format exists");
        let directions = match (format.supports_parsing(), format.supports_serialization()) {
            (true, true) => "read/write",
            (true, false) => "read",
            (false, true) => "write",
            (false, false) => "-",
        };
        println!("  {format_name:<8} {directions:<12} {}", format.description());
    }
}

fn docx_params_from_config(config: &VellumConfig) -> HashMap<String, String> {
    let options = AssembleOptions::from(config);
    let mut params = HashMap::new();
    if let Some(header) = options.header_text {
        params.insert("header".to_string(), header);
    }
    if let Some(footer) = options.footer_text {
        params.insert("footer".to_string(), footer);
    }
    params.insert("facing-pages".to_string(), options.facing_pages.to_string());
    params.insert("page-numbers".to_string(), options.page_numbers.to_string());
    params.insert("toc".to_string(), options.include_toc.to_string());
    params.insert(
        "chars-per-page".to_string(),
        options.chars_per_page.to_string(),
    );
    params
}

fn load_cli_config(explicit_path: Option<&str>) -> VellumConfig {
    let loader = Loader::new().with_optional_file("vellum.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

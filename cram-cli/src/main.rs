//! Command-line interface for cram
//!
//! Compiles one or more .cram files into a single linked deck. All inputs
//! belong to one compilation run, so cards may reference topics declared in
//! any of the given files.
//!
//! Usage:
//!   cram <files...> [-o out.html] [--format html|json] [--check] [--config path]
//!
//! Diagnostics print to stderr in compile order; the exit status is 1 when
//! any error-severity diagnostic was produced, 0 otherwise.

use clap::{Arg, ArgAction, Command};
use cram_config::{CramConfig, Loader};
use cram_html::{render_forest, RenderOptions};
use cram_parser::cram::ast::error::format_source_context;
use cram_parser::cram::ast::range::Range;
use cram_parser::cram::{compile_sources_with, CompileOptions, CompileOutput, SourceFile};
use std::collections::HashMap;
use std::fs;
use std::process;

fn main() {
    let matches = Command::new("cram")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compiler for cram learning-card files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("files")
                .help("Input .cram files, compiled as one run")
                .required(true)
                .num_args(1..),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the rendered output to this file instead of stdout"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: html or json")
                .default_value("html"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Compile and report diagnostics without writing output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to a cram.toml overriding the built-in defaults"),
        )
        .get_matches();

    let config = load_config(matches.get_one::<String>("config"));
    let sources = read_sources(
        matches
            .get_many::<String>("files")
            .into_iter()
            .flatten()
            .map(String::as_str),
    );

    let texts: HashMap<String, String> = sources
        .iter()
        .map(|s| (s.id.clone(), s.text.clone()))
        .collect();

    let options = CompileOptions {
        lenient_card_close: config.grammar.lenient_card_close,
        synthesize_annotation_cards: config.resolve.synthesize_annotation_cards,
    };
    let output = compile_sources_with(sources, &options);

    for diagnostic in &output.diagnostics {
        eprintln!("{}", diagnostic);
        if diagnostic.is_error() {
            if let Some(text) = texts.get(&diagnostic.file_id) {
                let range = Range::new(0..0, diagnostic.position, diagnostic.position);
                eprint!("{}", format_source_context(text, &range));
            }
        }
    }

    if !matches.get_flag("check") {
        let format = matches
            .get_one::<String>("format")
            .map(String::as_str)
            .unwrap_or("html");
        let rendered = render(&output, format, &config);
        write_output(&rendered, matches.get_one::<String>("output"));
    }

    if output.has_errors() {
        process::exit(1);
    }
}

fn load_config(path: Option<&String>) -> CramConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("cram.toml"),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    })
}

fn read_sources<'a>(paths: impl Iterator<Item = &'a str>) -> Vec<SourceFile> {
    paths
        .map(|path| {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Cannot read {}: {}", path, e);
                process::exit(1);
            });
            SourceFile::new(path, &text)
        })
        .collect()
}

fn render(output: &CompileOutput, format: &str, config: &CramConfig) -> String {
    match format {
        "html" => {
            let options = RenderOptions {
                theme: config.html.theme,
                title: config.html.title.clone(),
            };
            render_forest(&output.forest, &options)
        }
        "json" => output.forest.to_json().unwrap_or_else(|e| {
            eprintln!("Error serializing forest: {}", e);
            process::exit(1);
        }),
        other => {
            eprintln!("Format '{}' not supported", other);
            eprintln!("Available formats: html, json");
            process::exit(1);
        }
    }
}

fn write_output(rendered: &str, path: Option<&String>) {
    match path {
        Some(path) => {
            fs::write(path, rendered).unwrap_or_else(|e| {
                eprintln!("Cannot write {}: {}", path, e);
                process::exit(1);
            });
        }
        None => print!("{}", rendered),
    }
}

mod debug_report;

use linkweave::{GrammarClass, Options, PatternSetHandler, Phrase, default_patterns, default_rules, extract_verbose_with};
use std::io::{self, IsTerminal, Read};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let handler = match &config.pattern_file {
        Some(path) => match PatternSetHandler::from_file(path) {
            Ok(handler) => handler,
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(2);
            }
        },
        None => default_patterns().clone(),
    };

    let phrases = match parse_tagged(&config.input) {
        Ok(phrases) => phrases,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let opts = Options { round_cap: config.round_cap };
    match extract_verbose_with(&phrases, &handler, default_rules(), &opts) {
        Ok(out) => debug_report::print_run(&config.input, &out, config.color),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

struct CliConfig {
    input: String,
    pattern_file: Option<String>,
    round_cap: usize,
    color: bool,
}

/// Turn `dog/N chases/V cat/N` into a phrase sequence. Underscores stand in
/// for spaces inside one phrase: `bank_transfer/N`, `because_of/I`.
fn parse_tagged(input: &str) -> Result<Vec<Phrase>, String> {
    input
        .split_whitespace()
        .map(|token| {
            let (text, code) = token
                .rsplit_once('/')
                .ok_or_else(|| format!("error: token '{token}' is missing a /TAG suffix"))?;
            let tag = GrammarClass::from_code(code)
                .ok_or_else(|| format!("error: token '{token}' has unknown tag '{code}'"))?;
            Ok(Phrase::word(text.replace('_', " "), tag))
        })
        .collect()
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut pattern_file: Option<String> = None;
    let mut round_cap = Options::default().round_cap;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("linkweave {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--patterns" => {
                let value = args.next().ok_or_else(|| "error: --patterns expects a path".to_string())?;
                pattern_file = Some(value);
            }
            "--round-cap" => {
                let value = args.next().ok_or_else(|| "error: --round-cap expects a value".to_string())?;
                round_cap = parse_round_cap(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--patterns=") => {
                pattern_file = Some(arg.trim_start_matches("--patterns=").to_string());
            }
            _ if arg.starts_with("--round-cap=") => {
                round_cap = parse_round_cap(arg.trim_start_matches("--round-cap="))?;
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, pattern_file, round_cap, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_round_cap(value: &str) -> Result<usize, String> {
    value.parse::<usize>().map_err(|_| format!("error: invalid --round-cap '{value}' (expected an integer)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "linkweave {version}

Semantic-link extraction CLI.

Input is a pre-tagged token sequence: each token is text/TAG, where TAG is
one of N (noun), V (verb), A (adjective), D (adverb), P (preposition),
I (indicator). Underscores inside the text stand for spaces
(because_of/I, bank_transfer/N).

Usage:
  linkweave [OPTIONS] [--] <input...>
  linkweave [OPTIONS] --input <text>

Options:
  -i, --input <text>        Tagged input. If omitted, reads remaining args
                            or stdin when no args are provided.
  --patterns <path>         JSON pattern file; defaults to the built-in set.
  --round-cap <n>           Saturation round cap. Default: {default_cap}
  --color                   Force ANSI color output.
  --no-color                Disable ANSI color output.
  -h, --help                Show this help message.
  -V, --version             Print version information.

Exit codes:
  0  Success.
  1  Saturation did not converge.
  2  Invalid arguments, input, or pattern file.
",
        version = env!("CARGO_PKG_VERSION"),
        default_cap = Options::default().round_cap
    )
}

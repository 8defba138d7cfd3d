use clap::{Parser, ValueEnum};
use lexgen::definitions::Definitions;
use lexgen::generator::{Construction, Lexer, PatternAutomaton};
use lexgen::parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::{fs, io};
use thiserror::Error;

/// Generates a lexical analyzer from a file of named regular expression
/// definitions and tokenizes an input file with it.
#[derive(Debug, Parser)]
#[command(name = "lexgen", version, about)]
struct LexgenArgs {
    /// File with one `NAME: REGEX` pattern definition per line
    definitions: PathBuf,
    /// Text file to tokenize
    input: PathBuf,
    /// Where to write the tokens, one `<LEXEME, PATTERN>` per line
    #[arg(default_value = "tokens.txt")]
    output: PathBuf,
    /// Which regex-to-automaton construction to use
    #[arg(long, value_enum, default_value = "followpos")]
    method: Method,
    /// Write automaton dump files for every stage into this directory
    #[arg(long)]
    dump_dir: Option<PathBuf>,
    /// Print the transition table of every stage
    #[arg(long)]
    tables: bool,
    /// Print the symbol table after scanning
    #[arg(long)]
    symbol_table: bool,
    /// Only write the output file, no progress output
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Thompson ε-NFA construction, then union and determinization
    Thompson,
    /// Followpos direct-to-DFA construction, then union and determinization
    Followpos,
}

impl From<Method> for Construction {
    fn from(value: Method) -> Self {
        match value {
            Method::Thompson => Construction::Thompson,
            Method::Followpos => Construction::Followpos,
        }
    }
}

#[derive(Debug, Error)]
enum Error {
    #[error("error reading {}: {1}", .0.display())]
    Read(PathBuf, io::Error),
    #[error("error writing {}: {1}", .0.display())]
    Write(PathBuf, io::Error),
    #[error("definitions file: {0}")]
    Definitions(String),
}

fn main() -> ExitCode {
    let args = LexgenArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &LexgenArgs) -> Result<(), Error> {
    let log = |s: &str| {
        if !args.quiet {
            println!("{s}")
        }
    };
    macro_rules! log {
        ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
    }

    let definitions_source = fs::read_to_string(&args.definitions)
        .map_err(|e| Error::Read(args.definitions.clone(), e))?;
    let parsed = parser::definitions(&definitions_source);
    for skipped in &parsed.malformed {
        eprintln!(
            "warning: {}:{}: skipping malformed line: {}",
            args.definitions.display(),
            skipped.line,
            skipped.text
        );
    }
    let definitions: Definitions = parsed
        .try_into()
        .map_err(|e: lexgen::definitions::DefinitionsError| Error::Definitions(e.to_string()))?;
    log!(
        "Loaded {} pattern definitions from {}",
        definitions.patterns().len(),
        args.definitions.display()
    );
    if !definitions.reserved_words().is_empty() {
        log!("Reserved words: {}", definitions.reserved_words().join(", "));
    }

    let lexer = Lexer::generate(&definitions, args.method.into());
    log!(
        "Combined ε-NFA has {} states; determinized DFA has {} states",
        lexer.combined().states().len(),
        lexer.dfa().states().len()
    );

    if args.tables {
        for automaton in lexer.per_pattern() {
            log!("\nAutomaton for '{}':", automaton.pattern());
            log!("{}", automaton.to_table());
        }
        log!("\nCombined ε-NFA:");
        log!("{}", lexer.combined().to_table());
        log!("\nDeterminized DFA:");
        log!("{}", lexer.dfa().to_table());
    }

    if let Some(dump_dir) = &args.dump_dir {
        write_dumps(dump_dir, &lexer)?;
        log!("Automaton dumps written to {}", dump_dir.display());
    }

    let input =
        fs::read_to_string(&args.input).map_err(|e| Error::Read(args.input.clone(), e))?;
    let mut scanner = lexer.scanner();
    let tokens = scanner.scan(&input);

    let mut rendered = tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    if !rendered.is_empty() {
        rendered.push('\n');
    }
    fs::write(&args.output, rendered).map_err(|e| Error::Write(args.output.clone(), e))?;

    log!("\n{} tokens written to {}:", tokens.len(), args.output.display());
    for token in &tokens {
        log!("{token}");
    }

    if args.symbol_table {
        log!("");
        log!("{}", scanner.symbol_table());
    }
    Ok(())
}

/// One dump file per pattern automaton (`<pattern>.nfa`/`<pattern>.dfa` depending
/// on the construction route), plus `combined.nfa` and `determinized.dfa`.
fn write_dumps(dir: &Path, lexer: &Lexer) -> Result<(), Error> {
    fs::create_dir_all(dir).map_err(|e| Error::Write(dir.to_path_buf(), e))?;
    let write = |path: PathBuf, content: String| {
        fs::write(&path, content).map_err(|e| Error::Write(path, e))
    };

    for automaton in lexer.per_pattern() {
        let extension = match automaton {
            PatternAutomaton::Nfa(_) => "nfa",
            PatternAutomaton::Dfa(_) => "dfa",
        };
        write(
            dir.join(format!("{}.{extension}", automaton.pattern())),
            automaton.dump(),
        )?;
    }
    write(dir.join("combined.nfa"), lexer.combined().dump())?;
    write(dir.join("determinized.dfa"), lexer.dfa().dump())?;
    Ok(())
}

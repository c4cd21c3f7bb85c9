use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use yapp_common::{Error, ErrorManager, FileManager, SourceFile};
use yapp_lex::{lex_strict, CharLexer, LexError, Lexer, Scanner, ScannerConfig, Token};

const LOG_ENV: &str = "YAPP_LOG";

#[derive(Parser, Debug)]
#[command(name = "yapp", about = "Lexer front-end for generated parser drivers")]
struct CliArgs {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tokens of a file, one per line.
    Lex(LexArgs),
}

#[derive(Args, Debug)]
struct LexArgs {
    file: PathBuf,

    /// Split the input into single characters instead of scanning it.
    #[arg(
        long,
        conflicts_with_all = [
            "keywords",
            "symbols",
            "no_default_symbols",
            "comment_prefix",
            "no_comments",
            "keep_comments",
            "strict",
        ]
    )]
    chars: bool,

    #[arg(short = 'k', long = "keyword")]
    keywords: Vec<String>,

    #[arg(short = 's', long = "symbol")]
    symbols: Vec<String>,

    /// Only recognise symbols given with --symbol.
    #[arg(long)]
    no_default_symbols: bool,

    #[arg(long, value_name = "PREFIX")]
    comment_prefix: Option<String>,

    #[arg(long, conflicts_with = "comment_prefix")]
    no_comments: bool,

    #[arg(long)]
    keep_comments: bool,

    /// Print nothing but the diagnostics if the input has lexical errors.
    #[arg(long)]
    strict: bool,
}

impl LexArgs {
    fn scanner_config(&self) -> ScannerConfig {
        let mut config = ScannerConfig::default();
        if self.no_default_symbols {
            config = config.without_default_symbols();
        }
        if self.no_comments {
            config = config.with_comment_prefix(None);
        } else if let Some(prefix) = &self.comment_prefix {
            config = config.with_comment_prefix(Some(prefix.clone()));
        }

        config
            .with_keywords(self.keywords.iter().cloned())
            .with_symbols(self.symbols.iter().cloned())
            .keep_comments(self.keep_comments)
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();

    match args.command {
        Command::Lex(arg) => lex(arg),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("cannot install log subscriber: {err}");
    }
}

fn lex(arg: LexArgs) -> ExitCode {
    let mut files = FileManager::default();
    let file = match files.open(arg.file.clone()) {
        Ok(file) => file,
        Err(source) => {
            eprintln!("{}", LexError::Io { path: arg.file, source });
            return ExitCode::FAILURE;
        }
    };
    debug!(file = %arg.file.display(), chars = arg.chars, strict = arg.strict, "lexing");

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    match write_lex_output(&arg, &files, file, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(%err, "cannot write tokens");
            ExitCode::FAILURE
        }
    }
}

/// Lexes `file` and writes tokens to `out` and diagnostics to `diag`.
/// Returns whether the input lexed without diagnostics.
fn write_lex_output(
    arg: &LexArgs,
    files: &FileManager,
    file: SourceFile,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> std::io::Result<bool> {
    let mut errors = ErrorManager::default();

    if arg.chars {
        let mut lexer = CharLexer::new(file.text);
        print_chars(out, &lexer.lex(&mut errors))?;
    } else {
        let mut scanner = Scanner::new(file, arg.scanner_config());
        if arg.strict {
            match lex_strict(&mut scanner, &mut errors) {
                Ok(tokens) => print_tokens(out, files, &tokens)?,
                Err(LexError::Malformed { errors: reported }) => {
                    print_errors(diag, files, reported)?;
                    return Ok(false);
                }
                Err(err) => {
                    writeln!(diag, "{err}")?;
                    return Ok(false);
                }
            }
        } else {
            print_tokens(out, files, &scanner.lex(&mut errors))?;
        }
    }

    let reported = errors.take();
    let clean = reported.is_empty();
    print_errors(diag, files, reported)?;
    Ok(clean)
}

fn print_tokens(out: &mut impl Write, files: &FileManager, tokens: &[Token]) -> std::io::Result<()> {
    for token in tokens {
        match files.location(token.pos) {
            Some(location) => write!(out, "{}:{}", location.line, location.col)?,
            None => write!(out, "?:?")?,
        }
        writeln!(out, "\t{}\t{}", token.kind, token.value.escape_debug())?;
    }
    out.flush()
}

fn print_chars(out: &mut impl Write, tokens: &[String]) -> std::io::Result<()> {
    for token in tokens {
        writeln!(out, "{}", token.escape_debug())?;
    }
    out.flush()
}

fn print_errors(diag: &mut impl Write, files: &FileManager, errors: Vec<Error>) -> std::io::Result<()> {
    for err in errors {
        match err.pos.and_then(|pos| files.location(pos)) {
            Some(location) => writeln!(diag, "{location}: {}", err.message)?,
            None => writeln!(diag, "{}", err.message)?,
        }
    }
    diag.flush()
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_lex(args: &[&str]) -> LexArgs {
        let argv = ["yapp", "lex"].iter().chain(args).copied();
        match CliArgs::try_parse_from(argv).unwrap().command {
            Command::Lex(arg) => arg,
        }
    }

    #[test]
    fn test_scanner_config_from_flags() {
        let arg = parse_lex(&["grammar.y", "-k", "token", "--keyword", "left", "-s", "%%", "--keep-comments"]);
        assert_eq!(arg.file, PathBuf::from("grammar.y"));

        let config = arg.scanner_config();
        assert!(config.keywords.contains("token"));
        assert!(config.keywords.contains("left"));
        assert!(config.symbols.contains("%%"));
        assert!(config.symbols.contains("::"));
        assert!(config.keep_comments);
        assert_eq!(config.comment_prefix.as_deref(), Some("//"));
    }

    #[test]
    fn test_comment_flags() {
        let config = parse_lex(&["g.y", "--comment-prefix", "#"]).scanner_config();
        assert_eq!(config.comment_prefix.as_deref(), Some("#"));

        let config = parse_lex(&["g.y", "--no-comments", "--no-default-symbols"]).scanner_config();
        assert!(config.comment_prefix.is_none());
        assert!(config.symbols.is_empty());

        let argv = ["yapp", "lex", "g.y", "--no-comments", "--comment-prefix", "#"];
        assert!(CliArgs::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_chars_rejects_scanner_flags() {
        assert!(parse_lex(&["g.y", "--chars"]).chars);
        let flags: [&[&str]; 7] = [
            &["--strict"],
            &["-k", "token"],
            &["--symbol", "%%"],
            &["--no-default-symbols"],
            &["--comment-prefix", "#"],
            &["--no-comments"],
            &["--keep-comments"],
        ];
        for flag in flags {
            let argv = ["yapp", "lex", "g.y", "--chars"].iter().chain(flag).copied();
            assert!(CliArgs::try_parse_from(argv).is_err(), "{flag:?}");
        }
    }

    fn run(args: &[&str], source: &str) -> (bool, String, String) {
        let arg = parse_lex(args);
        let mut files = FileManager::default();
        let file = files.add_file(arg.file.clone(), source.to_string());

        let mut out = Vec::default();
        let mut diag = Vec::default();
        let clean = write_lex_output(&arg, &files, file, &mut out, &mut diag).unwrap();
        (
            clean,
            String::from_utf8(out).unwrap(),
            String::from_utf8(diag).unwrap(),
        )
    }

    #[test]
    fn test_token_lines() {
        let (clean, out, diag) = run(&["g.y", "-k", "token"], "token\n  x \"a\\tb\"");
        assert!(clean);
        assert_eq!(out, "1:1\tKEYWORD\ttoken\n2:3\tIDENT\tx\n2:5\tSTRING_LIT\t\\\"a\\\\tb\\\"\n");
        assert_eq!(diag, "");
    }

    #[test]
    fn test_diagnostic_lines() {
        let (clean, out, diag) = run(&["g.y"], "a $");
        assert!(!clean);
        assert_eq!(out, "1:1\tIDENT\ta\n1:3\tINVALID\t$\n");
        assert_eq!(diag, "g.y:1:3: Unexpected char '$'\n");
    }

    #[test]
    fn test_strict_prints_only_diagnostics() {
        let (clean, out, diag) = run(&["g.y", "--strict"], "a $");
        assert!(!clean);
        assert_eq!(out, "");
        assert_eq!(diag, "g.y:1:3: Unexpected char '$'\n");

        let (clean, out, diag) = run(&["g.y", "--strict"], "a");
        assert!(clean);
        assert_eq!(out, "1:1\tIDENT\ta\n");
        assert_eq!(diag, "");
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }

    #[test]
    fn test_chars_output() {
        let (clean, out, _) = run(&["g.y", "--chars"], "a+\nb");
        assert!(clean);
        assert_eq!(out, "a\n+\nb\n");
    }
}

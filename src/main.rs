use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cryptify::cli::{self, Outcome, TerminalPrompt};
use cryptify::config::{Settings, ITERATIONS_ENV};
use cryptify::crypto::PBKDF2_ITERATIONS;
use cryptify::{CryptifyError, Result};

#[derive(Parser)]
#[command(name = "cryptify")]
#[command(author = "Oleg")]
#[command(version)]
#[command(about = "Encrypt or decrypt a file with a password (AES-256-CBC)", long_about = None)]
struct Cli {
    /// e to encrypt, d to decrypt
    mode: Mode,

    /// File to read
    input: PathBuf,

    /// File to write (replaced atomically)
    output: PathBuf,

    /// PBKDF2 iteration count; containers only decrypt with the count they were made with
    #[arg(
        long,
        env = ITERATIONS_ENV,
        default_value_t = PBKDF2_ITERATIONS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    iterations: u32,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Encrypt INPUT into a container at OUTPUT
    #[value(name = "e", alias = "encrypt")]
    Encrypt,
    /// Decrypt the container INPUT into OUTPUT
    #[value(name = "d", alias = "decrypt")]
    Decrypt,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return report(&usage_error(&e)),
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(outcome) => {
            let verb = match cli.mode {
                Mode::Encrypt => "Encrypted",
                Mode::Decrypt => "Decrypted",
            };
            eprintln!(
                "{} {} bytes -> {} ({} bytes)",
                verb.green().bold(),
                outcome.bytes_in,
                cli.output.display(),
                outcome.bytes_out
            );
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let settings = Settings::new(cli.iterations)?;
    let mut prompt = TerminalPrompt;

    match cli.mode {
        Mode::Encrypt => cli::encrypt::run(&mut prompt, &cli.input, &cli.output, &settings),
        Mode::Decrypt => cli::decrypt::run(&mut prompt, &cli.input, &cli.output, &settings),
    }
}

fn report(e: &CryptifyError) -> ExitCode {
    eprintln!("{} {}", "Error:".red().bold(), e);
    ExitCode::from(e.exit_code())
}

fn usage_error(e: &clap::Error) -> CryptifyError {
    let rendered = e.to_string();
    let message = rendered
        .trim_start_matches("error: ")
        .trim_end()
        .to_string();
    CryptifyError::Usage(message)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_short_modes() {
        let cli = Cli::try_parse_from(["cryptify", "e", "in.txt", "out.enc"]).unwrap();
        assert!(matches!(cli.mode, Mode::Encrypt));
        assert_eq!(cli.input, PathBuf::from("in.txt"));
        assert_eq!(cli.output, PathBuf::from("out.enc"));

        let cli = Cli::try_parse_from(["cryptify", "decrypt", "out.enc", "in.txt"]).unwrap();
        assert!(matches!(cli.mode, Mode::Decrypt));
    }

    #[test]
    fn test_bad_mode_is_usage_error() {
        let err = Cli::try_parse_from(["cryptify", "x", "in", "out"])
            .err()
            .unwrap();
        let err = usage_error(&err);

        assert!(matches!(err, CryptifyError::Usage(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_wrong_argument_count_is_rejected() {
        assert!(Cli::try_parse_from(["cryptify", "e", "in"]).is_err());
        assert!(Cli::try_parse_from(["cryptify", "e", "in", "out", "extra"]).is_err());
    }

    #[test]
    fn test_zero_iterations_rejected_by_parser() {
        let result = Cli::try_parse_from(["cryptify", "--iterations", "0", "e", "in", "out"]);
        assert!(result.is_err());
    }
}

use std::path::PathBuf;
use std::process;

use clap::Parser;

mod config;
mod generate;
mod interactive;
mod table;

#[derive(Parser)]
#[command(name = "passgen", about = "Generate passwords that use every selected character set.")]
enum Args {
    /// Generate one or more passwords.
    Generate(generate::GenerateArgs),
    /// List the available character sets.
    Sets {
        #[arg(long, value_enum, default_value_t = table::ListFormat::Table)]
        format: table::ListFormat,
    },
    /// Pick the character sets and length at a prompt, then generate a password.
    Interactive {
        #[arg(long)]
        config: Option<PathBuf>,
        /// Also copy the password to the clipboard.
        #[arg(long)]
        copy: bool,
    },
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();

    match args {
        Args::Generate(args) => generate::generate_passwords(args)?,
        Args::Sets { format } => table::list_sets(format)?,
        Args::Interactive { config, copy } => interactive::interactive(config, copy)?,
    }

    Ok(())
}

fn main() {
    pretty_env_logger::init();

    match run() {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("{err:?}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("Character set selection cancelled; exiting.")]
    SelectionCancelled,
    #[error("Nothing to generate: the password count must be at least 1.")]
    NothingToGenerate,
    #[error("The configuration file {} does not exist.", .0.display())]
    ConfigNotFound(PathBuf),
    #[error("Cannot generate a password: {0}")]
    Generation(passgen::GenerationError),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<passgen::GenerationError> for ProgError {
    fn from(err: passgen::GenerationError) -> ProgError {
        ProgError::Generation(err)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_sets_subcommand() {
        let args = Args::try_parse_from(["passgen", "sets", "--format", "json"]).unwrap();
        assert!(matches!(
            args,
            Args::Sets {
                format: table::ListFormat::Json
            }
        ));
    }

    #[test]
    fn generation_errors_are_reported_plainly() {
        let err = ProgError::from(passgen::GenerationError::EmptySelection);
        assert_eq!(
            err.to_string(),
            "Cannot generate a password: at least one character set must be selected"
        );
    }
}

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;

use passgen::{CharacterSet, GenerationRequest, Secret, Strategy};

use crate::config::{load_config, Config};
use crate::ProgError;

#[derive(clap::Args)]
pub(crate) struct GenerateArgs {
    /// Character set to draw from; may be repeated (upper, lower, digits, symbols).
    #[arg(long = "set", value_name = "SET")]
    sets: Vec<CharacterSet>,
    /// Use upper case letters.
    #[arg(short = 'u', long)]
    upper: bool,
    /// Use lower case letters.
    #[arg(short = 'l', long)]
    lower: bool,
    /// Use digits.
    #[arg(short = 'd', long)]
    digits: bool,
    /// Use symbols.
    #[arg(short = 's', long)]
    symbols: bool,
    /// Password length.
    #[arg(short = 'n', long)]
    length: Option<usize>,
    /// Allow visually ambiguous characters (I, O, l).
    #[arg(long)]
    allow_ambiguous: bool,
    /// Number of passwords to generate.
    #[arg(long)]
    count: Option<usize>,
    /// Either "rejection" or "placement".
    #[arg(long)]
    strategy: Option<Strategy>,
    /// Seed the random generator, for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,
    /// Copy the first password to the clipboard.
    #[arg(long)]
    copy: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
    Yaml,
}

impl GenerateArgs {
    /// Layer the command line on top of the configured defaults.
    fn apply_to(&self, mut config: Config) -> Config {
        let mut sets = self.sets.clone();
        for (flag, set) in [
            (self.upper, CharacterSet::UpperCaseLetters),
            (self.lower, CharacterSet::LowerCaseLetters),
            (self.digits, CharacterSet::Digits),
            (self.symbols, CharacterSet::Symbols),
        ] {
            if flag {
                sets.push(set);
            }
        }
        if !sets.is_empty() {
            config.sets = sets;
        }
        if let Some(length) = self.length {
            config.length = length;
        }
        if self.allow_ambiguous {
            config.allow_ambiguous = true;
        }
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        config
    }
}

pub(crate) fn generate_passwords(args: GenerateArgs) -> Result<(), ProgError> {
    let config = args.apply_to(load_config(args.config.clone())?);
    if config.count == 0 {
        return Err(ProgError::NothingToGenerate);
    }
    let request = GenerationRequest::new(&config.sets, config.length, config.allow_ambiguous)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let passwords = (0..config.count)
        .map(|_| passgen::generate_with(&mut rng, &request, config.strategy))
        .collect::<Vec<_>>();
    log::info!("generated {} password(s)", passwords.len());

    write_passwords(&passwords, args.format, io::stdout().lock())
        .context("failed to write passwords to stdout")?;

    if args.copy {
        if let Some(first) = passwords.first() {
            send_to_clipboard(first.as_str().as_bytes())?;
            eprintln!("Copied to the clipboard.");
        }
    }
    Ok(())
}

fn write_passwords(
    passwords: &[Secret],
    format: OutputFormat,
    mut output: impl Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Plain => {
            for password in passwords {
                writeln!(output, "{}", password.as_str())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut output, passwords)?;
            writeln!(output)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut output, passwords)?,
    }
    output.flush()?;
    Ok(())
}

pub(crate) fn send_to_clipboard(data: &[u8]) -> anyhow::Result<()> {
    let mut child = clipboard_cmd()
        .stdin(Stdio::piped())
        .spawn()
        .context("failed to start the clipboard command")?;
    child
        .stdin
        .as_mut()
        .context("clipboard command has no stdin")?
        .write_all(data)?;
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("the clipboard command exited with {}", status))
    }
}

#[cfg(target_os = "macos")]
fn clipboard_cmd() -> Command {
    Command::new("pbcopy")
}

#[cfg(not(target_os = "macos"))]
fn clipboard_cmd() -> Command {
    let mut cmd = Command::new("xsel");
    cmd.arg("-b");
    cmd
}

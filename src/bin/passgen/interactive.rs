use std::path::PathBuf;

use anyhow::Context;
use dialoguer::theme::ColorfulTheme;
use rand::rngs::StdRng;
use rand::SeedableRng;

use passgen::{CharacterSet, GenerationRequest, MIN_PASSWORD_LENGTH};

use crate::config::load_config;
use crate::ProgError;

pub(crate) fn interactive(config_path: Option<PathBuf>, copy: bool) -> Result<(), ProgError> {
    let config = load_config(config_path)?;
    let theme = ColorfulTheme::default();

    let sets = select_sets(&theme, &config.sets)?;
    let length = dialoguer::Input::<usize>::with_theme(&theme)
        .with_prompt("Password length")
        .default(config.length.max(MIN_PASSWORD_LENGTH))
        .validate_with(|length: &usize| -> Result<(), String> {
            if *length >= MIN_PASSWORD_LENGTH {
                Ok(())
            } else {
                Err(format!("must be at least {}", MIN_PASSWORD_LENGTH))
            }
        })
        .interact_text()
        .context("failed to read the password length")?;
    let allow_ambiguous = dialoguer::Confirm::with_theme(&theme)
        .with_prompt("Allow ambiguous characters (I, O, l)?")
        .default(config.allow_ambiguous)
        .interact()
        .context("failed to prompt you, somehow")?;

    let request = GenerationRequest::new(&sets, length, allow_ambiguous)?;
    let password = passgen::generate_with(&mut StdRng::from_entropy(), &request, config.strategy);
    println!("{}", console::style(password.as_str()).bold());

    if copy {
        crate::generate::send_to_clipboard(password.as_str().as_bytes())?;
        eprintln!("Copied to the clipboard.");
    }
    Ok(())
}

fn select_sets(
    theme: &ColorfulTheme,
    preselected: &[CharacterSet],
) -> Result<Vec<CharacterSet>, ProgError> {
    let items = CharacterSet::ALL.map(|set| set.describe());
    let defaults = CharacterSet::ALL.map(|set| preselected.contains(&set));
    let selection = dialoguer::MultiSelect::with_theme(theme)
        .with_prompt("Character sets")
        .items(&items)
        .defaults(&defaults)
        .interact_opt()
        .context("failed to query your selection")?
        .ok_or(ProgError::SelectionCancelled)?;

    Ok(selection.into_iter().map(|idx| CharacterSet::ALL[idx]).collect())
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_config_file, missing_keys};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn edit(requested: Option<&String>) -> AppResult<()> {
    let path = Config::config_file();
    if !path.exists() {
        warning("No configuration file yet, writing defaults first.");
        Config::default().save()?;
    }

    let fallback = default_editor();
    let editor = requested.cloned().unwrap_or_else(|| fallback.clone());

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {
            success(format!("Configuration file edited using '{}'", editor));
        }
        _ if editor != fallback => {
            warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor, fallback
            ));
            match Command::new(&fallback).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!("Configuration file edited using '{}'", fallback));
                }
                _ => eprintln!("❌ Failed to edit configuration file using '{}'", fallback),
            }
        }
        _ => eprintln!("❌ Failed to edit configuration file using '{}'", editor),
    }
    Ok(())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        // ---- CHECK ----
        if *check {
            if !path.exists() {
                warning(format!("{} does not exist; run `rtcal init`.", path.display()));
            } else {
                let missing = missing_keys(&path)?;
                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    warning(format!("Missing keys: {}", missing.join(", ")));
                    info("Run `rtcal config --migrate` to add them with their defaults.");
                }
            }
            if cfg.base_url().is_err() {
                warning("redmine_base_url is not set (nor REDMINE_BASE_URL).");
            }
        }

        // ---- MIGRATE ----
        if *migrate && path.exists() && !migrate_config_file(&path)? {
            info("Configuration file already up to date.");
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            edit(editor.as_ref())?;
        }
    }

    Ok(())
}

//! The `setup` subcommand: interactive first-run wizard.
//!
//! The client ID is written to `.env`, never into source or config
//! files. Config edits go through the config store's save path.

use std::path::Path;
use std::process::ExitCode;

use presenced_config::{load_or_default, save_to_path, CLIENT_ID_ENV};

use crate::prompt::{print_header, read_line};

pub fn execute(config_path: &Path) -> ExitCode {
    print_header("presenced setup");

    loop {
        println!("\nOptions:");
        println!("1. Set Discord Client ID");
        println!("2. Customize configuration");
        println!("3. Verify installation");
        println!("4. View README");
        println!("5. Exit");

        let Some(choice) = read_line("\nSelect an option (1-5): ") else {
            break;
        };
        match choice.as_str() {
            "1" => set_client_id(),
            "2" => customize_config(config_path),
            "3" => verify_installation(config_path),
            "4" => view_readme(),
            "5" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("✗ Invalid option"),
        }
    }

    ExitCode::SUCCESS
}

fn set_client_id() {
    print_header("Discord Client ID");
    println!("\nTo get your Client ID:");
    println!("1. Go to https://discord.com/developers/applications");
    println!("2. Click 'New Application' and give it a name");
    println!("3. Copy the 'Client ID' from General Information");

    loop {
        let Some(id) = read_line("\nEnter your Discord Client ID: ") else {
            return;
        };
        if !is_valid_client_id(&id) {
            println!("✗ Invalid Client ID format — it should be a large number.");
            continue;
        }
        match std::fs::write(".env", format!("{CLIENT_ID_ENV}={id}\n")) {
            Ok(()) => {
                println!("✓ Saved Client ID to .env (keep this file out of version control)")
            }
            Err(e) => println!("✗ Failed to write .env: {e}"),
        }
        return;
    }
}

fn is_valid_client_id(id: &str) -> bool {
    id.len() >= 15 && id.chars().all(|c| c.is_ascii_digit())
}

fn customize_config(config_path: &Path) {
    print_header("Configuration");
    let mut config = load_or_default(config_path);

    if let Ok(json) = serde_json::to_string_pretty(&config) {
        println!("\nCurrent configuration:\n{json}");
    }
    println!("\nLeave blank to keep the current value.\n");

    if let Some(value) = prompt_field("state", &config.state) {
        config.state = value;
    }
    if let Some(value) = prompt_field("details", &config.details) {
        config.details = value;
    }
    if let Some(value) = prompt_field("large_text", &config.large_text) {
        config.large_text = value;
    }
    if let Some(value) = read_line(&format!(
        "Enter update_interval in seconds [{}]: ",
        config.update_interval
    )) {
        if !value.is_empty() {
            match value.parse::<u64>() {
                Ok(n) if n > 0 => config.update_interval = n,
                _ => println!("✗ Invalid interval, keeping current value"),
            }
        }
    }

    match save_to_path(&config, config_path) {
        Ok(()) => {
            println!("\n✓ Configuration saved");
            if let Ok(json) = serde_json::to_string_pretty(&config) {
                println!("\nUpdated configuration:\n{json}");
            }
        }
        Err(e) => println!("✗ Error saving configuration: {e}"),
    }
}

fn prompt_field(name: &str, current: &str) -> Option<String> {
    read_line(&format!("Enter {name} [{current}]: ")).filter(|value| !value.is_empty())
}

fn verify_installation(config_path: &Path) {
    print_header("Verifying installation");

    let required = [
        (config_path.display().to_string(), config_path.exists()),
        ("README.md".to_string(), Path::new("README.md").exists()),
    ];

    let mut all_exist = true;
    for (name, exists) in &required {
        println!("{} {name}", if *exists { "✓" } else { "✗" });
        all_exist &= exists;
    }
    if Path::new(".env").exists() {
        println!("✓ .env");
    } else {
        println!("- .env (optional, created by option 1)");
    }

    if all_exist {
        println!("\n✓ All required files found");
    } else {
        println!("\n✗ Some files are missing; options 1 and 2 can create them");
    }
}

fn view_readme() {
    match std::fs::read_to_string("README.md") {
        Ok(contents) => println!("\n{contents}"),
        Err(e) => println!("✗ Could not read README.md: {e}"),
    }
}

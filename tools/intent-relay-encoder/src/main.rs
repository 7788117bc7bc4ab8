use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use intent_relay_encoder::encoder::{decode_script, encode_specs, parse_intents, script_hex};

/// Build and inspect intent relay scripts.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a JSON array of intents into script hex (the `script` argument of `create`).
    Encode {
        /// Path to the intents JSON file.
        #[arg(long, env = "INTENTS_FILE")]
        input: PathBuf,
    },
    /// Decode script hex and print its intents as JSON.
    Decode {
        /// Script bytes as hex (0x...).
        #[arg(long, env = "SCRIPT_HEX")]
        script: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Encode { input } => {
            let json = fs::read_to_string(&input)
                .with_context(|| format!("failed reading {}", input.display()))?;
            let specs = parse_intents(&json)
                .with_context(|| format!("failed loading intents from {}", input.display()))?;
            let script = encode_specs(&specs)?;
            println!("{}", script_hex(&script));
        }
        Command::Decode { script } => {
            let specs = decode_script(&script)?;
            let json =
                serde_json::to_string_pretty(&specs).context("failed serialising intents JSON")?;
            println!("{json}");
        }
    }
    Ok(())
}

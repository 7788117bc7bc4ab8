use anyhow::{anyhow, Context, Result};

use intent_relay_types::{decode, encode};

use crate::types::IntentSpec;

/// Parse a JSON array of intents.
pub fn parse_intents(json: &str) -> Result<Vec<IntentSpec>> {
    serde_json::from_str(json).context("failed parsing intents JSON")
}

/// Encode intents into script bytes.
pub fn encode_specs(specs: &[IntentSpec]) -> Result<Vec<u8>> {
    let intents = specs
        .iter()
        .enumerate()
        .map(|(i, spec)| spec.to_intent().with_context(|| format!("intent #{i}")))
        .collect::<Result<Vec<_>>>()?;
    let script = encode(&intents).map_err(|err| anyhow!("cannot encode intents: {err:?}"))?;

    // Refuse to emit anything the contract would reject.
    decode(&script).map_err(|err| anyhow!("encoded script does not decode: {err:?}"))?;
    Ok(script)
}

/// Decode a hex script (`0x` optional) back into intents.
pub fn decode_script(script_hex: &str) -> Result<Vec<IntentSpec>> {
    let digits = script_hex.trim();
    let digits = digits.strip_prefix("0x").unwrap_or(digits);
    let script = hex::decode(digits).context("script is not valid hex")?;
    let intents = decode(&script).map_err(|err| anyhow!("invalid script: {err:?}"))?;
    intents.iter().map(IntentSpec::from_intent).collect()
}

pub fn script_hex(script: &[u8]) -> String {
    format!("0x{}", hex::encode(script))
}

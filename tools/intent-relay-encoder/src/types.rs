use alloy_primitives::Address;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::opcodes::{Intent, Operation, Value};

/// One intent as written by hand or by governance tooling.
///
/// ```json
/// { "target": "0x...", "method": "transfer(address,uint256)", "args": ["0x01", ["0x02"]] }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSpec {
    pub target: Address,
    pub method: String,
    #[serde(default)]
    pub args: Vec<ArgSpec>,
}

/// A literal as a hex string (`0x` optional), or a nested array of arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgSpec {
    Literal(String),
    Array(Vec<ArgSpec>),
}

impl ArgSpec {
    pub fn to_value(&self) -> Result<Value> {
        match self {
            ArgSpec::Literal(hex_str) => {
                let digits = hex_str.strip_prefix("0x").unwrap_or(hex_str);
                let bytes = hex::decode(digits)
                    .with_context(|| format!("argument `{hex_str}` is not valid hex"))?;
                Ok(Value::Bytes(bytes))
            }
            ArgSpec::Array(items) => Ok(Value::Array(
                items.iter().map(ArgSpec::to_value).collect::<Result<_>>()?,
            )),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Bytes(bytes) => ArgSpec::Literal(format!("0x{}", hex::encode(bytes))),
            Value::Array(items) => ArgSpec::Array(items.iter().map(ArgSpec::from_value).collect()),
        }
    }
}

impl IntentSpec {
    pub fn to_intent(&self) -> Result<Intent> {
        if self.method.is_empty() {
            return Err(anyhow!("intent for {} has an empty method", self.target));
        }
        let args = self
            .args
            .iter()
            .map(ArgSpec::to_value)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("bad arguments for `{}`", self.method))?;
        Ok(Intent::invoke(self.target, self.method.clone(), args))
    }

    pub fn from_intent(intent: &Intent) -> Result<Self> {
        match &intent.operation {
            Operation::Invoke { method, args } => Ok(IntentSpec {
                target: intent.target,
                method: method.clone(),
                args: args.iter().map(ArgSpec::from_value).collect(),
            }),
            other => Err(anyhow!("intent for {} is not an invocation: {other:?}", intent.target)),
        }
    }
}

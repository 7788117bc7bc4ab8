use alloc::{string::String, vec::Vec};

use alloy_primitives::Address;

/// Opcodes understood by the intent script decoder.
///
/// Byte values follow the NeoVM instructions the governance tooling emits. `PACK` does not
/// share NeoVM's element order: here the value pushed first becomes element 0, where NeoVM
/// puts the last-pushed value first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    PushData = 0x0C,
    CallT = 0x37,
    Ret = 0x40,
    Pack = 0xC0,
}

impl TryFrom<u8> for Opcode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use Opcode::*;
        let op = match value {
            0x0C => PushData,
            0x37 => CallT,
            0x40 => Ret,
            0xC0 => Pack,
            _ => return Err(()),
        };
        Ok(op)
    }
}

/// A value on the decoder's working stack, and an argument of an invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Bytes(Vec<u8>),
    Array(Vec<Value>),
}

impl Value {
    /// Appends the value to `out` as flat bytes: literals verbatim, arrays element by element.
    pub fn flatten_into(&self, out: &mut Vec<u8>) {
        match self {
            Value::Bytes(bytes) => out.extend_from_slice(bytes),
            Value::Array(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

/// What an intent does against its target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Invoke { method: String, args: Vec<Value> },
    PackArray(u8),
    PushLiteral(Vec<u8>),
}

/// One atomic external action.
///
/// The decoder only ever produces `Operation::Invoke`; the other operations exist so that
/// tooling can express raw script fragments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intent {
    pub target: Address,
    pub operation: Operation,
}

impl Intent {
    pub fn invoke(target: Address, method: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            target,
            operation: Operation::Invoke {
                method: method.into(),
                args,
            },
        }
    }
}

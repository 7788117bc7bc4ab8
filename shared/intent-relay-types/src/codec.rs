//! Intent script codec.
//!
//! A script is a flat sequence of stack-machine operations closed by a single `RET`:
//! - `PUSHDATA len:u8 bytes` pushes a literal
//! - `PACK n:u8` pops `n` values and pushes them back as one array in push order (the
//!   reverse of NeoVM's `PACK`, which puts the last-pushed value first)
//! - `CALLT target:bytes20 len:u8 method` pops the argument array and emits one intent; the
//!   zero address is not a valid target
//!
//! Decoding is single-pass over an explicit cursor with a bounded working stack.

use alloc::{string::String, vec::Vec};

use alloy_primitives::Address;

use crate::opcodes::{Intent, Opcode, Operation, Value};

/// Largest script accepted by `decode`, in bytes.
pub const MAX_SCRIPT_LEN: usize = 4096;
/// Largest number of operations (including the closing `RET`) accepted by `decode`.
pub const MAX_OPERATIONS: usize = 256;
/// Capacity of the decoder's working stack.
pub const MAX_STACK_DEPTH: usize = 32;

/// Errors during script decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    Truncated,
    UnknownOpcode(u8),
    TooLarge,
    TrailingBytes,
    StackUnderflow,
    ExpectedArray,
    InvalidMethod,
    UnbalancedStack,
    InvalidTarget,
}

/// Errors during script encoding; every operand length must fit in a `u8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    LiteralTooLong(usize),
    MethodTooLong(usize),
    ArrayTooLong(usize),
}

/// Decode script bytes into the ordered intents it describes.
pub fn decode(script: &[u8]) -> Result<Vec<Intent>, DecodeError> {
    if script.len() > MAX_SCRIPT_LEN {
        return Err(DecodeError::TooLarge);
    }

    let mut intents = Vec::new();
    let mut stack = WorkingStack::new();
    let mut operations = 0usize;
    let mut i = 0usize;

    loop {
        if operations == MAX_OPERATIONS {
            return Err(DecodeError::TooLarge);
        }
        let byte = read_u8(script, &mut i)?;
        let opcode = Opcode::try_from(byte).map_err(|_| DecodeError::UnknownOpcode(byte))?;
        operations += 1;

        match opcode {
            Opcode::PushData => {
                let len = read_u8(script, &mut i)? as usize;
                let literal = read_vec(script, &mut i, len)?;
                stack.push(Value::Bytes(literal))?;
            }
            Opcode::Pack => {
                let count = read_u8(script, &mut i)? as usize;
                let items = stack.pop_n(count)?;
                stack.push(Value::Array(items))?;
            }
            Opcode::CallT => {
                let target = read_address(script, &mut i)?;
                if target == Address::ZERO {
                    return Err(DecodeError::InvalidTarget);
                }
                let method = read_method(script, &mut i)?;
                let args = match stack.pop()? {
                    Value::Array(items) => items,
                    Value::Bytes(_) => return Err(DecodeError::ExpectedArray),
                };
                intents.push(Intent::invoke(target, method, args));
            }
            Opcode::Ret => {
                if !stack.is_empty() {
                    return Err(DecodeError::UnbalancedStack);
                }
                if i != script.len() {
                    return Err(DecodeError::TrailingBytes);
                }
                return Ok(intents);
            }
        }
    }
}

/// Encode intents into script bytes.
///
/// `decode(encode(x)) == x` holds for every `x` produced by `decode`. Raw `PushLiteral` and
/// `PackArray` intents are written as their bare opcode and are not expected to round-trip.
pub fn encode(intents: &[Intent]) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    for intent in intents {
        match &intent.operation {
            Operation::Invoke { method, args } => {
                for arg in args {
                    encode_value(arg, &mut buf)?;
                }
                buf.push(Opcode::Pack as u8);
                buf.push(operand_len(args.len(), EncodeError::ArrayTooLong)?);
                buf.push(Opcode::CallT as u8);
                buf.extend_from_slice(intent.target.as_slice());
                buf.push(operand_len(method.len(), EncodeError::MethodTooLong)?);
                buf.extend_from_slice(method.as_bytes());
            }
            Operation::PackArray(count) => {
                buf.push(Opcode::Pack as u8);
                buf.push(*count);
            }
            Operation::PushLiteral(literal) => push_literal(literal, &mut buf)?,
        }
    }
    buf.push(Opcode::Ret as u8);
    Ok(buf)
}

fn encode_value(value: &Value, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    match value {
        Value::Bytes(literal) => push_literal(literal, buf),
        Value::Array(items) => {
            for item in items {
                encode_value(item, buf)?;
            }
            buf.push(Opcode::Pack as u8);
            buf.push(operand_len(items.len(), EncodeError::ArrayTooLong)?);
            Ok(())
        }
    }
}

fn push_literal(literal: &[u8], buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    buf.push(Opcode::PushData as u8);
    buf.push(operand_len(literal.len(), EncodeError::LiteralTooLong)?);
    buf.extend_from_slice(literal);
    Ok(())
}

fn operand_len(len: usize, err: fn(usize) -> EncodeError) -> Result<u8, EncodeError> {
    u8::try_from(len).map_err(|_| err(len))
}

/// Working stack with a hard capacity of `MAX_STACK_DEPTH`.
struct WorkingStack {
    items: Vec<Value>,
}

impl WorkingStack {
    fn new() -> Self {
        Self {
            items: Vec::with_capacity(MAX_STACK_DEPTH),
        }
    }

    fn push(&mut self, value: Value) -> Result<(), DecodeError> {
        if self.items.len() == MAX_STACK_DEPTH {
            return Err(DecodeError::TooLarge);
        }
        self.items.push(value);
        Ok(())
    }

    fn pop(&mut self) -> Result<Value, DecodeError> {
        self.items.pop().ok_or(DecodeError::StackUnderflow)
    }

    fn pop_n(&mut self, count: usize) -> Result<Vec<Value>, DecodeError> {
        if count > self.items.len() {
            return Err(DecodeError::StackUnderflow);
        }
        let at = self.items.len() - count;
        Ok(self.items.split_off(at))
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn read_u8(bytes: &[u8], i: &mut usize) -> Result<u8, DecodeError> {
    let b = *bytes.get(*i).ok_or(DecodeError::Truncated)?;
    *i += 1;
    Ok(b)
}

fn read_vec(bytes: &[u8], i: &mut usize, len: usize) -> Result<Vec<u8>, DecodeError> {
    if bytes.len() < *i + len {
        return Err(DecodeError::Truncated);
    }
    let out = bytes[*i..*i + len].to_vec();
    *i += len;
    Ok(out)
}

fn read_address(bytes: &[u8], i: &mut usize) -> Result<Address, DecodeError> {
    if bytes.len() < *i + 20 {
        return Err(DecodeError::Truncated);
    }
    let addr = Address::from_slice(&bytes[*i..*i + 20]);
    *i += 20;
    Ok(addr)
}

fn read_method(bytes: &[u8], i: &mut usize) -> Result<String, DecodeError> {
    let len = read_u8(bytes, i)? as usize;
    let raw = read_vec(bytes, i, len)?;
    let method = String::from_utf8(raw).map_err(|_| DecodeError::InvalidMethod)?;
    if method.is_empty() {
        return Err(DecodeError::InvalidMethod);
    }
    Ok(method)
}

//! Format-string-driven binary marshalling.
//!
//! Each format character selects one field encoding:
//!
//! | char | field                                         |
//! |------|-----------------------------------------------|
//! | `B`/`b` | 1 byte, unsigned/signed                    |
//! | `H`/`h` | 2 bytes big-endian, unsigned/signed        |
//! | `I`/`i` | 4 bytes big-endian, unsigned/signed        |
//! | `S`  | 2-byte big-endian length prefix + raw bytes   |
//! | `s`  | 1-byte length prefix + raw bytes              |
//!
//! Encoded buffers are opaque payloads for the wire; consumers never see
//! the format string.

use thiserror::Error;

use crate::script::Value;

#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    #[error("unknown format specifier '{spec}' in {op}")]
    UnknownFormat { spec: char, op: &'static str },
}

/// Encodes one value per format character, appending to `out`.
///
/// Integer fields truncate to their width; `S`/`s` payloads are silently
/// truncated to 65535/255 bytes. Missing trailing values read as nil
/// (zero / empty).
pub fn encode(fmt: &str, values: &[Value], out: &mut Vec<u8>) -> Result<(), CodecError> {
    const NIL: Value = Value::Nil;

    for (arg, spec) in fmt.chars().enumerate() {
        let value = values.get(arg).unwrap_or(&NIL);
        match spec {
            'B' | 'b' => {
                out.push(value.as_i64() as u8);
            }
            'H' | 'h' => {
                let v = value.as_i64() as u16;
                out.extend_from_slice(&v.to_be_bytes());
            }
            'I' | 'i' => {
                let v = value.as_i64() as u32;
                out.extend_from_slice(&v.to_be_bytes());
            }
            'S' => {
                let data = value.as_bytes();
                let len = data.len().min(65535);
                out.extend_from_slice(&(len as u16).to_be_bytes());
                out.extend_from_slice(&data[..len]);
            }
            's' => {
                let data = value.as_bytes();
                let len = data.len().min(255);
                out.push(len as u8);
                out.extend_from_slice(&data[..len]);
            }
            other => return Err(CodecError::UnknownFormat { spec: other, op: "encode" }),
        }
    }
    Ok(())
}

/// Decodes the buffer left-to-right, one value per format character.
///
/// When the remaining buffer is too short for the current field, that field
/// and every following field are skipped: decode yields fewer values than
/// format characters rather than raising a truncation error. Callers that
/// care must compare the result count against the format length.
pub fn decode(fmt: &str, mut data: &[u8]) -> Result<Vec<Value>, CodecError> {
    let mut values = Vec::with_capacity(fmt.len());

    for spec in fmt.chars() {
        match spec {
            'B' => {
                let Some((&byte, rest)) = data.split_first() else { break };
                values.push(Value::Int(byte as i64));
                data = rest;
            }
            'b' => {
                let Some((&byte, rest)) = data.split_first() else { break };
                values.push(Value::Int(byte as i8 as i64));
                data = rest;
            }
            'H' => {
                let Some((field, rest)) = split_fixed::<2>(data) else { break };
                values.push(Value::Int(u16::from_be_bytes(field) as i64));
                data = rest;
            }
            'h' => {
                let Some((field, rest)) = split_fixed::<2>(data) else { break };
                values.push(Value::Int(i16::from_be_bytes(field) as i64));
                data = rest;
            }
            'I' => {
                let Some((field, rest)) = split_fixed::<4>(data) else { break };
                values.push(Value::Int(u32::from_be_bytes(field) as i64));
                data = rest;
            }
            'i' => {
                let Some((field, rest)) = split_fixed::<4>(data) else { break };
                values.push(Value::Int(i32::from_be_bytes(field) as i64));
                data = rest;
            }
            'S' => {
                let Some((prefix, rest)) = split_fixed::<2>(data) else { break };
                let len = u16::from_be_bytes(prefix) as usize;
                if rest.len() < len {
                    break;
                }
                values.push(Value::Bytes(rest[..len].to_vec()));
                data = &rest[len..];
            }
            's' => {
                let Some((&len, rest)) = data.split_first() else { break };
                let len = len as usize;
                if rest.len() < len {
                    break;
                }
                values.push(Value::Bytes(rest[..len].to_vec()));
                data = &rest[len..];
            }
            other => return Err(CodecError::UnknownFormat { spec: other, op: "decode" }),
        }
    }

    Ok(values)
}

#[inline]
fn split_fixed<const N: usize>(data: &[u8]) -> Option<([u8; N], &[u8])> {
    if data.len() < N {
        return None;
    }
    let (field, rest) = data.split_at(N);
    Some((field.try_into().expect("split_at length"), rest))
}

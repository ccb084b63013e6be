//! Decoder for Valve's binary KeyValues format (`shortcuts.vdf`).

use std::collections::BTreeMap;

use anyhow::{Result, anyhow, bail};

const TYPE_MAP: u8 = 0x00;
const TYPE_STRING: u8 = 0x01;
const TYPE_INT32: u8 = 0x02;
const TYPE_FLOAT32: u8 = 0x03;
const TYPE_UINT64: u8 = 0x07;
const TYPE_MAP_END: u8 = 0x08;

/// Nesting limit; real shortcut files are three maps deep.
const MAX_DEPTH: usize = 64;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Map(BTreeMap<String, Value>),
    String(String),
    Int32(i32),
    Float32(f32),
    UInt64(u64),
}

impl Value {
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payloads as an unsigned 32-bit id.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Int32(v) => Some(*v as u32),
            Value::UInt64(v) => Some(*v as u32),
            _ => None,
        }
    }
}

/// Decodes a document; keys are lowercased at every level.
pub fn parse(bytes: &[u8]) -> Result<BTreeMap<String, Value>> {
    let mut r = Reader { bytes, pos: 0 };
    let root = r.read_map(0)?;
    Ok(root)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn read_map(&mut self, depth: usize) -> Result<BTreeMap<String, Value>> {
        if depth > MAX_DEPTH {
            bail!("maps nested deeper than {} at offset {}", MAX_DEPTH, self.pos);
        }
        let mut out = BTreeMap::new();
        loop {
            let Some(tag) = self.next_byte() else {
                if depth == 0 {
                    return Ok(out);
                }
                bail!("unexpected end of input inside map");
            };
            if tag == TYPE_MAP_END {
                return Ok(out);
            }
            let key = self.read_cstr()?.to_lowercase();
            let value = match tag {
                TYPE_MAP => Value::Map(self.read_map(depth + 1)?),
                TYPE_STRING => Value::String(self.read_cstr()?),
                TYPE_INT32 => Value::Int32(i32::from_le_bytes(self.take::<4>()?)),
                TYPE_FLOAT32 => Value::Float32(f32::from_le_bytes(self.take::<4>()?)),
                TYPE_UINT64 => Value::UInt64(u64::from_le_bytes(self.take::<8>()?)),
                other => bail!("unknown value type 0x{:02x} at offset {}", other, self.pos - 1),
            };
            out.insert(key, value);
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.pos + N;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| anyhow!("truncated value at offset {}", self.pos))?;
        self.pos = end;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn read_cstr(&mut self) -> Result<String> {
        let rest = &self.bytes[self.pos..];
        let len = rest
            .iter()
            .position(|b| *b == 0)
            .ok_or_else(|| anyhow!("unterminated string at offset {}", self.pos))?;
        let s = String::from_utf8_lossy(&rest[..len]).into_owned();
        self.pos += len + 1;
        Ok(s)
    }
}

#[cfg(test)]
#[path = "../tests/shortcuts/vdf_tests.rs"]
mod tests;

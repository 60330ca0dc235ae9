use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, B256, U256};
use std::fmt;
use std::str::FromStr;

use super::address::address_from_hex;
use crate::errors::{Result, SummonError};

/// ABI type of a single parameter.
///
/// Only the types the summon pipeline actually encodes are representable;
/// anything else is rejected when parsing an interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `address`
    Address,
    /// `uintN` with `N` in `8..=256`, multiple of 8
    Uint(usize),
    /// `bool`
    Bool,
    /// `bytes` (dynamic)
    Bytes,
    /// `bytesN` with `N` in `1..=32`
    FixedBytes(usize),
    /// `string`
    String,
    /// `T[]` (dynamic)
    Array(Box<TypeTag>),
}

impl TypeTag {
    /// `uint256`
    pub const UINT256: TypeTag = TypeTag::Uint(256);

    /// `T[]` for the given element type.
    pub fn array(inner: TypeTag) -> Self {
        TypeTag::Array(Box::new(inner))
    }

    /// Whether the type is encoded through a head/tail offset.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, TypeTag::Bytes | TypeTag::String | TypeTag::Array(_))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Address => f.write_str("address"),
            TypeTag::Uint(bits) => write!(f, "uint{bits}"),
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::Bytes => f.write_str("bytes"),
            TypeTag::FixedBytes(size) => write!(f, "bytes{size}"),
            TypeTag::String => f.write_str("string"),
            TypeTag::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}

impl FromStr for TypeTag {
    type Err = SummonError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(inner) = s.strip_suffix("[]") {
            return Ok(TypeTag::array(inner.parse()?));
        }

        let unsupported = || SummonError::Encoding(format!("unsupported ABI type {s:?}"));
        match s {
            "address" => Ok(TypeTag::Address),
            "bool" => Ok(TypeTag::Bool),
            "string" => Ok(TypeTag::String),
            "bytes" => Ok(TypeTag::Bytes),
            "uint" => Ok(TypeTag::UINT256),
            _ => {
                if let Some(bits) = s.strip_prefix("uint") {
                    let bits: usize = bits.parse().map_err(|_| unsupported())?;
                    if bits == 0 || bits > 256 || bits % 8 != 0 {
                        return Err(unsupported());
                    }
                    Ok(TypeTag::Uint(bits))
                } else if let Some(size) = s.strip_prefix("bytes") {
                    let size: usize = size.parse().map_err(|_| unsupported())?;
                    if size == 0 || size > 32 {
                        return Err(unsupported());
                    }
                    Ok(TypeTag::FixedBytes(size))
                } else {
                    Err(unsupported())
                }
            }
        }
    }
}

/// A value to be ABI encoded against a [`TypeTag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// 20-byte address
    Address(Address),
    /// Unsigned integer, checked against the declared width at encode time
    Uint(U256),
    /// Boolean
    Bool(bool),
    /// Raw byte string
    Bytes(Bytes),
    /// Left-aligned fixed-size byte word
    FixedBytes(B256),
    /// UTF-8 string. Also accepted for `uintN` (decimal or `0x` hex) and
    /// `address` (hex) parameters.
    String(String),
    /// Homogeneous array
    Array(Vec<Value>),
}

impl Value {
    /// Coerce into the dynamic ABI value for `ty`.
    pub fn coerce(&self, ty: &TypeTag) -> Result<DynSolValue> {
        match (ty, self) {
            (TypeTag::Address, Value::Address(addr)) => Ok(DynSolValue::Address(*addr)),
            (TypeTag::Address, Value::String(s)) => address_from_hex(s)
                .map(DynSolValue::Address)
                .map_err(|_| SummonError::mismatch(ty, self.describe())),
            (TypeTag::Uint(bits), Value::Uint(v)) => uint_within(*v, *bits, ty, self),
            (TypeTag::Uint(bits), Value::String(s)) => {
                let v = parse_uint(s).ok_or_else(|| SummonError::mismatch(ty, self.describe()))?;
                uint_within(v, *bits, ty, self)
            }
            (TypeTag::Bool, Value::Bool(b)) => Ok(DynSolValue::Bool(*b)),
            (TypeTag::Bytes, Value::Bytes(b)) => Ok(DynSolValue::Bytes(b.to_vec())),
            (TypeTag::FixedBytes(size), Value::FixedBytes(word)) => {
                if word[*size..].iter().any(|b| *b != 0) {
                    return Err(SummonError::mismatch(ty, self.describe()));
                }
                Ok(DynSolValue::FixedBytes(*word, *size))
            }
            (TypeTag::FixedBytes(size), Value::Bytes(b)) if b.len() == *size => {
                let mut word = B256::ZERO;
                word[..*size].copy_from_slice(b);
                Ok(DynSolValue::FixedBytes(word, *size))
            }
            (TypeTag::String, Value::String(s)) => Ok(DynSolValue::String(s.clone())),
            (TypeTag::Array(inner), Value::Array(items)) => items
                .iter()
                .map(|item| item.coerce(inner))
                .collect::<Result<Vec<_>>>()
                .map(DynSolValue::Array),
            _ => Err(SummonError::mismatch(ty, self.describe())),
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Address(addr) => format!("address {addr}"),
            Value::Uint(v) => format!("integer {v}"),
            Value::Bool(b) => format!("bool {b}"),
            Value::Bytes(b) => format!("{} bytes", b.len()),
            Value::FixedBytes(w) => format!("word {w}"),
            Value::String(s) => format!("string {s:?}"),
            Value::Array(items) => format!("array of {}", items.len()),
        }
    }
}

/// Parse a non-negative integer from a decimal or `0x`-prefixed hex string.
pub fn parse_uint(s: &str) -> Option<U256> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    match s.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16).ok(),
        None if s.bytes().all(|b| b.is_ascii_digit()) => U256::from_str_radix(s, 10).ok(),
        None => None,
    }
}

fn uint_within(v: U256, bits: usize, ty: &TypeTag, value: &Value) -> Result<DynSolValue> {
    if v.bit_len() > bits {
        return Err(SummonError::mismatch(ty, value.describe()));
    }
    Ok(DynSolValue::Uint(v, bits))
}

impl From<Address> for Value {
    fn from(addr: Address) -> Self {
        Value::Address(addr)
    }
}

impl From<U256> for Value {
    fn from(v: U256) -> Self {
        Value::Uint(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(U256::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint(U256::from(v))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<B256> for Value {
    fn from(w: B256) -> Self {
        Value::FixedBytes(w)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

//! Mutable byte sequence (`bytearray`).

use std::fmt::{self, Write as _};

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::{CoreError, ErrorKind};
use pycoll_core::index::{checked_index, clamp_insert_index, normalize_index, slice_items};

use crate::errors::Result;
use crate::repr::{PyRepr, ReprConfig, write_bytes_literal};
use crate::text::Text;

const KIND: ContainerTypeId = ContainerTypeId::ByteArray;

/// A growable sequence of bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteArray {
    bytes: Vec<u8>,
}

impl ByteArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// UTF-8 encode `text` into a new byte array.
    pub fn from_text(text: &Text) -> Self {
        text.encode()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u8> {
        self.bytes.iter()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// ## Errors
    /// - `IndexError` if `index` is out of range.
    pub fn get(&self, index: i64) -> Result<u8> {
        let i = checked_index(KIND, self.bytes.len(), index)?;
        Ok(self.bytes[i])
    }

    /// ## Errors
    /// - `IndexError` if `index` is out of range; nothing is written.
    pub fn set(&mut self, index: i64, byte: u8) -> Result<()> {
        let i = checked_index(KIND, self.bytes.len(), index)?;
        self.bytes[i] = byte;
        Ok(())
    }

    pub fn append(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Insert before `index`, clamping out-of-range positions like `list.insert`.
    pub fn insert(&mut self, index: i64, byte: u8) {
        let i = clamp_insert_index(self.bytes.len(), index);
        self.bytes.insert(i, byte);
    }

    /// Remove the byte at `index` (`del b[i]`).
    ///
    /// ## Errors
    /// - `IndexError` if `index` is out of range.
    pub fn delete(&mut self, index: i64) -> Result<u8> {
        let i = checked_index(KIND, self.bytes.len(), index)?;
        Ok(self.bytes.remove(i))
    }

    /// Remove and return the byte at `index` (default: last).
    ///
    /// ## Errors
    /// - `IndexError` if empty or `index` is out of range.
    pub fn pop(&mut self, index: Option<i64>) -> Result<u8> {
        if self.bytes.is_empty() {
            return Err(CoreError::pop_from_empty(KIND).into());
        }
        let index = index.unwrap_or(-1);
        let i = normalize_index(self.bytes.len(), index)
            .ok_or_else(|| CoreError::index_out_of_range_for(KIND, index, self.bytes.len()))?;
        Ok(self.bytes.remove(i))
    }

    pub fn concat(&self, other: &[u8]) -> ByteArray {
        let mut bytes = Vec::with_capacity(self.bytes.len() + other.len());
        bytes.extend_from_slice(&self.bytes);
        bytes.extend_from_slice(other);
        ByteArray { bytes }
    }

    pub fn repeat(&self, n: i64) -> ByteArray {
        if n <= 0 {
            return ByteArray::new();
        }
        ByteArray {
            bytes: self.bytes.repeat(n as usize),
        }
    }

    /// ## Errors
    /// - `ValueError` if `step == 0`.
    pub fn slice(&self, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Result<ByteArray> {
        Ok(ByteArray {
            bytes: slice_items(&self.bytes, start, end, step)?,
        })
    }

    /// Decode as UTF-8.
    ///
    /// ## Errors
    /// - `ValueError` naming the first invalid byte; the array is unchanged.
    pub fn decode(&self) -> Result<Text> {
        match std::str::from_utf8(&self.bytes) {
            Ok(s) => Ok(Text::new(s)),
            Err(e) => {
                let pos = e.valid_up_to();
                Err(CoreError::with_message(
                    ErrorKind::Value,
                    format!(
                        "'utf-8' codec can't decode byte 0x{:02x} in position {pos}",
                        self.bytes[pos]
                    ),
                )
                .into())
            }
        }
    }

    /// Offset of the first occurrence of `needle`.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        self.bytes.windows(needle.len()).position(|w| w == needle)
    }

    /// Count non-overlapping occurrences of `needle`.
    pub fn count(&self, needle: &[u8]) -> usize {
        if needle.is_empty() {
            return self.bytes.len() + 1;
        }
        let mut count = 0;
        let mut i = 0;
        while i + needle.len() <= self.bytes.len() {
            if &self.bytes[i..i + needle.len()] == needle {
                count += 1;
                i += needle.len();
            } else {
                i += 1;
            }
        }
        count
    }

    pub fn contains(&self, needle: &[u8]) -> bool {
        self.find(needle).is_some()
    }

    pub fn reverse(&mut self) {
        self.bytes.reverse();
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Lowercase hex digits, two per byte (`bytearray.hex`).
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(self.bytes.len() * 2);
        for b in &self.bytes {
            let _ = write!(out, "{b:02x}");
        }
        out
    }
}

impl From<Vec<u8>> for ByteArray {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for ByteArray {
    fn from(bytes: &[u8]) -> Self {
        Self { bytes: bytes.to_vec() }
    }
}

impl FromIterator<u8> for ByteArray {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self {
            bytes: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[u8]> for ByteArray {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PyRepr for ByteArray {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        out.push_str("bytearray(");
        write_bytes_literal(out, &self.bytes, config);
        out.push(')');
    }
}

impl fmt::Display for ByteArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;

    #[test]
    fn index_and_mutate() {
        let mut b = ByteArray::from(b"abc".to_vec());
        assert_eq!(b.get(-1).unwrap(), b'c');
        b.set(0, b'z').unwrap();
        assert!(matches!(b.set(3, b'q'), Err(CollectionError::Index(_))));
        b.insert(100, b'!');
        assert_eq!(b.as_slice(), b"zbc!");
        assert_eq!(b.delete(1).unwrap(), b'b');
        assert_eq!(b.pop(None).unwrap(), b'!');
        assert_eq!(b.as_slice(), b"zc");
    }

    #[test]
    fn pop_empty_is_index_error() {
        let mut b = ByteArray::new();
        let err = b.pop(None).unwrap_err();
        assert_eq!(err.to_string(), "IndexError: pop from an empty bytearray");
    }

    #[test]
    fn decode_invalid_utf8() {
        let b = ByteArray::from(vec![b'o', b'k', 0xff]);
        let err = b.decode().unwrap_err();
        assert!(matches!(err, CollectionError::Value(_)));
        assert!(err.to_string().contains("0xff in position 2"));
    }

    #[test]
    fn search_and_hex() {
        let b = ByteArray::from(b"abab".to_vec());
        assert_eq!(b.find(b"ba"), Some(1));
        assert_eq!(b.count(b"ab"), 2);
        assert!(!b.contains(b"x"));
        assert_eq!(ByteArray::from(vec![0x0f, 0xa0]).to_hex(), "0fa0");
    }

    #[test]
    fn repr() {
        assert_eq!(ByteArray::from(b"ab".to_vec()).to_string(), "bytearray(b'ab')");
    }
}

use std::fmt;

use num_enum::TryFromPrimitive;

use crate::constants::{COMPRESSED_SUFFIX, DEFAULT_FILENAME};

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

// Flatten ordered chunk outputs into a single blob
pub fn chunks_to_plaintext(chunks: &[impl AsRef<[u8]>]) -> Vec<u8> {
    let total = chunks.iter().map(|c| c.as_ref().len()).sum();
    let mut out = Vec::with_capacity(total);
    for chunk in chunks {
        out.extend_from_slice(chunk.as_ref());
    }
    out
}

/// Name stored for a source: falls back to [`DEFAULT_FILENAME`] when blank.
pub fn effective_filename(name: &str) -> &str {
    if name.trim().is_empty() {
        DEFAULT_FILENAME
    } else {
        name
    }
}

/// `report.pdf` -> `report.pdf.compressed`
pub fn compressed_filename(name: &str) -> String {
    format!("{}{}", effective_filename(name), COMPRESSED_SUFFIX)
}

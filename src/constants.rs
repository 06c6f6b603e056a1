pub const DEFAULT_INDENT: usize = 4;

pub const MAX_DEPTH: usize = 256;

/// Prefix byte marking a non-public property name.
pub(crate) const VISIBILITY_MARKER: char = '\0';

pub(crate) const PROTECTED_MARKER: &str = "*";

pub(crate) const CLASS_SEPARATOR: &str = "::";

pub const INCOMPLETE_CLASS: &str = "__PHP_Incomplete_Class";

pub const INCOMPLETE_CLASS_NAME_KEY: &str = "__PHP_Incomplete_Class_Name";

pub const SERIALIZED_KEY: &str = "serialized";

pub const STD_CLASS: &str = "stdClass";

#[inline]
pub fn is_key_tag(byte: u8) -> bool {
    matches!(byte, b'i' | b's')
}

/// Separator that must follow a known type tag. `N` is the only tag closed
/// by `;`.
#[inline]
pub fn tag_separator(tag: u8) -> Option<u8> {
    match tag {
        b'N' => Some(b';'),
        b'b' | b'i' | b'd' | b's' | b'a' | b'O' | b'C' | b'r' | b'R' => Some(b':'),
        _ => None,
    }
}

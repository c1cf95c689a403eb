//! Zig type name to Bun ABI type mapping.

use super::error::UnsupportedTypeError;
use super::types::AbiType;

/// How a rule matches a type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMatcher {
    /// Token starts with the given sigil
    Prefix(&'static str),
    /// Token is exactly the given name
    Exact(&'static str),
}

impl TypeMatcher {
    fn matches(&self, token: &str) -> bool {
        match self {
            TypeMatcher::Prefix(sigil) => token.starts_with(sigil),
            TypeMatcher::Exact(name) => token == *name,
        }
    }
}

/// Mapping rules, tested top to bottom.
///
/// Pointer sigils come first so any pointer collapses to `ptr` without the
/// pointee being looked at. `size` maps to a signed tag while `usize` maps to
/// an unsigned one; both are deliberate.
pub const TYPE_RULES: &[(TypeMatcher, AbiType)] = &[
    (TypeMatcher::Prefix("*"), AbiType::Ptr),
    (TypeMatcher::Prefix("?*"), AbiType::Ptr),
    (TypeMatcher::Prefix("[*c]"), AbiType::Ptr),
    (TypeMatcher::Exact("void"), AbiType::Void),
    (TypeMatcher::Exact("bool"), AbiType::Bool),
    (TypeMatcher::Exact("u8"), AbiType::U8),
    (TypeMatcher::Exact("i8"), AbiType::I8),
    (TypeMatcher::Exact("u16"), AbiType::U16),
    (TypeMatcher::Exact("i16"), AbiType::I16),
    (TypeMatcher::Exact("u32"), AbiType::U32),
    (TypeMatcher::Exact("i32"), AbiType::I32),
    (TypeMatcher::Exact("u64"), AbiType::U64),
    (TypeMatcher::Exact("i64"), AbiType::I64),
    (TypeMatcher::Exact("c_uint"), AbiType::U32),
    (TypeMatcher::Exact("c_int"), AbiType::I32),
    (TypeMatcher::Exact("usize"), AbiType::U64),
    (TypeMatcher::Exact("size"), AbiType::I64),
];

/// Map a Zig type token to its ABI tag.
pub fn map_type(token: &str) -> Result<AbiType, UnsupportedTypeError> {
    let token = token.trim();

    TYPE_RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(token))
        .map(|(_, abi)| *abi)
        .ok_or_else(|| UnsupportedTypeError::new(token))
}

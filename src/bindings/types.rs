//! Type definitions for Bun FFI binding tables.
//!
//! These types describe the caller-side view of a Zig library: which symbols
//! it exports and the ABI type of every argument and return value.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// ABI type tag understood by `bun:ffi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiType {
    Void,
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    /// Opaque pointer; every Zig pointer shape collapses to this.
    Ptr,
}

impl AbiType {
    /// All tags, in declaration order.
    pub const ALL: [AbiType; 11] = [
        AbiType::Void,
        AbiType::Bool,
        AbiType::U8,
        AbiType::I8,
        AbiType::U16,
        AbiType::I16,
        AbiType::U32,
        AbiType::I32,
        AbiType::U64,
        AbiType::I64,
        AbiType::Ptr,
    ];

    /// Get the `bun:ffi` type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AbiType::Void => "void",
            AbiType::Bool => "bool",
            AbiType::U8 => "u8",
            AbiType::I8 => "i8",
            AbiType::U16 => "u16",
            AbiType::I16 => "i16",
            AbiType::U32 => "u32",
            AbiType::I32 => "i32",
            AbiType::U64 => "u64",
            AbiType::I64 => "i64",
            AbiType::Ptr => "ptr",
        }
    }

    /// Look up a tag by its `bun:ffi` name (`"ptr"`, `"u32"`, ...).
    pub fn from_tag(tag: &str) -> Option<AbiType> {
        AbiType::ALL.into_iter().find(|abi| abi.as_str() == tag)
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The FFI signature of one exported function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Exported symbol name (the table key, so not serialized)
    #[serde(skip)]
    pub name: String,

    /// Argument types in declaration order
    pub args: Vec<AbiType>,

    /// Return type
    pub returns: AbiType,
}

impl FunctionDescriptor {
    /// Create a descriptor with no arguments.
    pub fn new(name: impl Into<String>, returns: AbiType) -> Self {
        FunctionDescriptor {
            name: name.into(),
            args: Vec::new(),
            returns,
        }
    }

    /// Append an argument.
    pub fn with_arg(mut self, arg: AbiType) -> Self {
        self.args.push(arg);
        self
    }

    /// Replace all arguments.
    pub fn with_args(mut self, args: impl IntoIterator<Item = AbiType>) -> Self {
        self.args = args.into_iter().collect();
        self
    }
}

/// Mapping from exported function name to its descriptor.
///
/// Inserting a name that is already present replaces the old descriptor.
/// Iteration is ordered by name so generated output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BindingTable {
    functions: BTreeMap<String, FunctionDescriptor>,
}

impl BindingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor, returning the one it replaced.
    pub fn insert(&mut self, descriptor: FunctionDescriptor) -> Option<FunctionDescriptor> {
        self.functions.insert(descriptor.name.clone(), descriptor)
    }

    /// Fold an ordered batch of entries into the table. Later entries win.
    pub fn extend_entries(&mut self, entries: impl IntoIterator<Item = FunctionDescriptor>) {
        for descriptor in entries {
            if let Some(previous) = self.insert(descriptor) {
                tracing::debug!("`{}` redefined, keeping the later signature", previous.name);
            }
        }
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Iterate descriptors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.functions.values()
    }

    /// Exported names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

impl FromIterator<FunctionDescriptor> for BindingTable {
    fn from_iter<I: IntoIterator<Item = FunctionDescriptor>>(iter: I) -> Self {
        let mut table = BindingTable::new();
        table.extend_entries(iter);
        table
    }
}

impl<'a> IntoIterator for &'a BindingTable {
    type Item = &'a FunctionDescriptor;
    type IntoIter = std::collections::btree_map::Values<'a, String, FunctionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.functions.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_insert_replaces() {
        let mut table = BindingTable::new();
        table.insert(FunctionDescriptor::new("f", AbiType::Void));
        let previous = table.insert(FunctionDescriptor::new("f", AbiType::I32).with_arg(AbiType::Ptr));

        assert_eq!(previous.map(|d| d.returns), Some(AbiType::Void));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("f").unwrap().returns, AbiType::I32);
        assert_eq!(table.get("f").unwrap().args, vec![AbiType::Ptr]);
    }

    #[test]
    fn test_table_serializes_as_name_map() {
        let table: BindingTable = vec![
            FunctionDescriptor::new("add", AbiType::I32).with_args([AbiType::I32, AbiType::I32]),
            FunctionDescriptor::new("reset", AbiType::Void),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "add": { "args": ["i32", "i32"], "returns": "i32" },
                "reset": { "args": [], "returns": "void" },
            })
        );
    }

    #[test]
    fn test_abi_type_strings() {
        for ty in AbiType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty));
        }
    }
}

//! IR Type System
//!
//! Types describe shape only. Every composite type compares structurally,
//! with one exception: two *named* structs are equal when their names match,
//! whatever their field lists say. This keeps forward declarations of a
//! struct compatible with its later, complete definition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical width reported for every pointer, independent of address space.
pub const POINTER_BITS: u64 = 64;

/// Category of a type, without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Void,
    Integer,
    Float,
    Pointer,
    Array,
    Struct,
    Function,
    Vector,
    Label,
}

/// Struct type, optionally named
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructType {
    pub name: Option<String>,
    pub fields: Vec<Type>,
    pub packed: bool,
}

impl StructType {
    /// Brace-delimited field list, ignoring the name.
    pub fn body(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if self.packed {
            format!("<{{ {fields} }}>")
        } else {
            format!("{{ {fields} }}")
        }
    }
}

/// Named structs compare by name; anything involving an anonymous struct
/// compares fields and packing. The mix is not transitive (`{ i32 }` equals
/// both `%A = { i32 }` and `%A = { f64 }`, which differ from each other), so
/// neither `StructType` nor `Type` implements `Eq` or `Hash`.
impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        match (&self.name, &other.name) {
            (Some(a), Some(b)) => a == b,
            _ => self.fields == other.fields && self.packed == other.packed,
        }
    }
}

/// Function signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionType {
    pub return_type: Box<Type>,
    pub param_types: Vec<Type>,
    pub variadic: bool,
}

impl FunctionType {
    pub fn new(return_type: Type, param_types: Vec<Type>, variadic: bool) -> Self {
        Self {
            return_type: Box::new(return_type),
            param_types,
            variadic,
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        for (i, param) in self.param_types.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{param}")?;
        }
        if self.variadic {
            if !self.param_types.is_empty() { write!(f, ", ")?; }
            write!(f, "...")?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

/// IR Type system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    /// Absence of a value
    Void,

    /// Integer of arbitrary width; `signed` only affects the spelling
    Integer { bits: u32, signed: bool },

    /// IEEE float of the given width
    Float { bits: u32 },

    /// Pointer to `pointee` in `address_space` (0 is the default space)
    Pointer { pointee: Box<Type>, address_space: u32 },

    /// Fixed-length array [len x element]
    Array { element: Box<Type>, len: u64 },

    Struct(StructType),

    Function(FunctionType),

    /// SIMD vector; scalable vectors have `len` as a minimum multiple
    Vector { element: Box<Type>, len: u32, scalable: bool },

    /// Basic block address
    Label,
}

impl Type {
    pub fn int(bits: u32, signed: bool) -> Self {
        Type::Integer { bits, signed }
    }

    pub fn float(bits: u32) -> Self {
        Type::Float { bits }
    }

    pub fn i1() -> Self { Type::int(1, true) }
    pub fn i8() -> Self { Type::int(8, true) }
    pub fn i16() -> Self { Type::int(16, true) }
    pub fn i32() -> Self { Type::int(32, true) }
    pub fn i64() -> Self { Type::int(64, true) }
    pub fn i128() -> Self { Type::int(128, true) }
    pub fn u8() -> Self { Type::int(8, false) }
    pub fn u16() -> Self { Type::int(16, false) }
    pub fn u32() -> Self { Type::int(32, false) }
    pub fn u64() -> Self { Type::int(64, false) }
    pub fn f16() -> Self { Type::float(16) }
    pub fn f32() -> Self { Type::float(32) }
    pub fn f64() -> Self { Type::float(64) }
    pub fn f128() -> Self { Type::float(128) }

    pub fn pointer(pointee: Type) -> Self {
        Type::pointer_in(pointee, 0)
    }

    pub fn pointer_in(pointee: Type, address_space: u32) -> Self {
        Type::Pointer { pointee: Box::new(pointee), address_space }
    }

    pub fn array(element: Type, len: u64) -> Self {
        Type::Array { element: Box::new(element), len }
    }

    /// An empty name yields an anonymous struct.
    pub fn named_struct(name: impl Into<String>, fields: Vec<Type>, packed: bool) -> Self {
        let name = name.into();
        Type::Struct(StructType { name: (!name.is_empty()).then_some(name), fields, packed })
    }

    pub fn anonymous_struct(fields: Vec<Type>, packed: bool) -> Self {
        Type::Struct(StructType { name: None, fields, packed })
    }

    pub fn function(return_type: Type, param_types: Vec<Type>, variadic: bool) -> Self {
        Type::Function(FunctionType::new(return_type, param_types, variadic))
    }

    pub fn vector(element: Type, len: u32) -> Self {
        Type::Vector { element: Box::new(element), len, scalable: false }
    }

    pub fn scalable_vector(element: Type, min_len: u32) -> Self {
        Type::Vector { element: Box::new(element), len: min_len, scalable: true }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Type::Void => TypeKind::Void,
            Type::Integer { .. } => TypeKind::Integer,
            Type::Float { .. } => TypeKind::Float,
            Type::Pointer { .. } => TypeKind::Pointer,
            Type::Array { .. } => TypeKind::Array,
            Type::Struct(_) => TypeKind::Struct,
            Type::Function(_) => TypeKind::Function,
            Type::Vector { .. } => TypeKind::Vector,
            Type::Label => TypeKind::Label,
        }
    }

    /// Size in bits, or `None` for unsized types (void, label, functions,
    /// scalable vectors and anything built from them). A size past `u64::MAX`
    /// is also `None`.
    pub fn bit_size(&self) -> Option<u64> {
        match self {
            Type::Void | Type::Label | Type::Function(_) => None,
            Type::Integer { bits, .. } | Type::Float { bits } => Some(u64::from(*bits)),
            Type::Pointer { .. } => Some(POINTER_BITS),
            Type::Array { element, len } => element.bit_size()?.checked_mul(*len),
            Type::Struct(s) => {
                let mut total: u64 = 0;
                for field in &s.fields {
                    total = total.checked_add(field.bit_size()?)?;
                }
                Some(total)
            }
            Type::Vector { scalable: true, .. } => None,
            Type::Vector { element, len, .. } => {
                element.bit_size()?.checked_mul(u64::from(*len))
            }
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Integer { .. })
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Type::Float { .. })
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Type::Pointer { .. })
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Type::Struct(_) | Type::Array { .. })
    }

    /// Element type for pointers, arrays and vectors
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Pointer { pointee, .. } => Some(pointee),
            Type::Array { element, .. } | Type::Vector { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(sig) => Some(sig),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Integer { bits, signed: true } => write!(f, "i{bits}"),
            Type::Integer { bits, signed: false } => write!(f, "u{bits}"),
            Type::Float { bits } => write!(f, "f{bits}"),
            Type::Pointer { pointee, address_space: 0 } => write!(f, "ptr<{pointee}>"),
            Type::Pointer { pointee, address_space } => write!(f, "ptr<{pointee}, {address_space}>"),
            Type::Array { element, len } => write!(f, "[{len} x {element}]"),
            Type::Struct(StructType { name: Some(name), .. }) => write!(f, "%{name}"),
            Type::Struct(s) => write!(f, "{}", s.body()),
            Type::Function(sig) => write!(f, "{sig}"),
            Type::Vector { element, len, scalable: true } => write!(f, "<vscale x {len} x {element}>"),
            Type::Vector { element, len, scalable: false } => write!(f, "<{len} x {element}>"),
            Type::Label => write!(f, "label"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_spelling() {
        assert_eq!(Type::i32().to_string(), "i32");
        assert_eq!(Type::u8().to_string(), "u8");
        assert_eq!(Type::int(17, true).to_string(), "i17");
        assert_eq!(Type::i1().to_string(), "i1");
    }

    #[test]
    fn test_float_spelling() {
        assert_eq!(Type::f16().to_string(), "f16");
        assert_eq!(Type::f128().to_string(), "f128");
        assert_eq!(Type::float(80).to_string(), "f80");
    }

    #[test]
    fn test_composite_spelling() {
        assert_eq!(Type::pointer(Type::i8()).to_string(), "ptr<i8>");
        assert_eq!(Type::pointer_in(Type::i8(), 3).to_string(), "ptr<i8, 3>");
        assert_eq!(Type::array(Type::i32(), 4).to_string(), "[4 x i32]");
        assert_eq!(Type::vector(Type::f32(), 4).to_string(), "<4 x f32>");
        assert_eq!(Type::scalable_vector(Type::f32(), 4).to_string(), "<vscale x 4 x f32>");
        assert_eq!(Type::Label.to_string(), "label");
        assert_eq!(Type::Void.to_string(), "void");
    }

    #[test]
    fn test_struct_spelling() {
        let named = Type::named_struct("Point", vec![Type::i32(), Type::i32()], false);
        assert_eq!(named.to_string(), "%Point");

        let anon = Type::anonymous_struct(vec![Type::i32(), Type::f64()], false);
        assert_eq!(anon.to_string(), "{ i32, f64 }");

        let packed = Type::anonymous_struct(vec![Type::i8(), Type::i32()], true);
        assert_eq!(packed.to_string(), "<{ i8, i32 }>");
    }

    #[test]
    fn test_function_spelling() {
        let sig = Type::function(Type::i32(), vec![Type::i32(), Type::pointer(Type::i8())], false);
        assert_eq!(sig.to_string(), "fn(i32, ptr<i8>) -> i32");

        let variadic = Type::function(Type::i32(), vec![Type::pointer(Type::i8())], true);
        assert_eq!(variadic.to_string(), "fn(ptr<i8>, ...) -> i32");

        let bare_variadic = Type::function(Type::Void, vec![], true);
        assert_eq!(bare_variadic.to_string(), "fn(...) -> void");
    }

    #[test]
    fn test_named_struct_equality_is_nominal() {
        let a = Type::named_struct("Point", vec![Type::i32(), Type::i32()], false);
        let b = Type::named_struct("Point", vec![Type::f64()], false);
        let c = Type::named_struct("Pair", vec![Type::i32(), Type::i32()], false);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_anonymous_struct_equality_is_structural() {
        let a = Type::anonymous_struct(vec![Type::i32(), Type::i32()], false);
        let b = Type::anonymous_struct(vec![Type::i32(), Type::i32()], false);
        let packed = Type::anonymous_struct(vec![Type::i32(), Type::i32()], true);
        let named = Type::named_struct("Point", vec![Type::i32(), Type::i32()], false);
        assert_eq!(a, b);
        assert_ne!(a, packed);
        // only one side is named, so fields decide
        assert_eq!(a, named);
    }

    #[test]
    fn test_mixed_struct_equality_is_not_transitive() {
        let anon = Type::anonymous_struct(vec![Type::i32()], false);
        let ints = Type::named_struct("A", vec![Type::i32()], false);
        let floats = Type::named_struct("A", vec![Type::f64()], false);
        assert_eq!(anon, ints);
        assert_eq!(ints, floats);
        assert_ne!(anon, floats);
    }

    #[test]
    fn test_empty_struct_name_is_anonymous() {
        let ty = Type::named_struct("", vec![Type::i32()], false);
        assert_eq!(ty.to_string(), "{ i32 }");
        match ty {
            Type::Struct(s) => assert!(s.name.is_none()),
            other => panic!("expected a struct, got {other}"),
        }
    }

    #[test]
    fn test_structural_equality() {
        assert_ne!(Type::i32(), Type::u32());
        assert_ne!(Type::i32(), Type::f32());
        assert_ne!(Type::pointer(Type::i8()), Type::pointer_in(Type::i8(), 1));
        assert_eq!(Type::array(Type::i8(), 2), Type::array(Type::i8(), 2));
        assert_ne!(Type::array(Type::i8(), 2), Type::array(Type::i8(), 3));
        assert_ne!(Type::vector(Type::i8(), 2), Type::scalable_vector(Type::i8(), 2));
        assert_ne!(
            Type::function(Type::Void, vec![Type::i32()], false),
            Type::function(Type::Void, vec![Type::i32()], true)
        );
        // nominal equality applies inside composites too
        assert_eq!(
            Type::pointer(Type::named_struct("Node", vec![], false)),
            Type::pointer(Type::named_struct("Node", vec![Type::i64()], false))
        );
    }

    #[test]
    fn test_bit_size() {
        assert_eq!(Type::i32().bit_size(), Some(32));
        assert_eq!(Type::f64().bit_size(), Some(64));
        assert_eq!(Type::pointer(Type::i8()).bit_size(), Some(POINTER_BITS));
        assert_eq!(Type::array(Type::i16(), 10).bit_size(), Some(160));
        assert_eq!(
            Type::anonymous_struct(vec![Type::i8(), Type::i32()], false).bit_size(),
            Some(40)
        );
        assert_eq!(Type::vector(Type::f32(), 4).bit_size(), Some(128));
        assert_eq!(Type::scalable_vector(Type::f32(), 4).bit_size(), None);
        assert_eq!(Type::function(Type::Void, vec![], false).bit_size(), None);
        assert_eq!(Type::Label.bit_size(), None);
        assert_eq!(Type::Void.bit_size(), None);
        assert_eq!(
            Type::array(Type::scalable_vector(Type::i8(), 2), 4).bit_size(),
            None
        );
    }

    #[test]
    fn test_bit_size_overflow_is_unsized() {
        assert_eq!(Type::array(Type::i64(), u64::MAX).bit_size(), None);

        let half = Type::array(Type::i8(), u64::MAX / 16 + 1);
        assert_eq!(half.bit_size(), Some((u64::MAX / 16 + 1) * 8));
        assert_eq!(Type::anonymous_struct(vec![half.clone(), half.clone()], false).bit_size(), None);

        assert_eq!(Type::vector(half, 2).bit_size(), None);
        assert_eq!(Type::vector(Type::array(Type::i8(), u64::MAX / 8), 1).bit_size(), Some(u64::MAX / 8 * 8));
    }

    #[test]
    fn test_predicates() {
        assert!(Type::i8().is_integer());
        assert!(Type::f32().is_float());
        assert!(Type::pointer(Type::Void).is_pointer());
        assert!(Type::array(Type::i8(), 1).is_aggregate());
        assert!(Type::anonymous_struct(vec![], false).is_aggregate());
        assert!(!Type::vector(Type::i8(), 4).is_aggregate());
        assert_eq!(Type::array(Type::i8(), 1).element_type(), Some(&Type::i8()));
        assert_eq!(Type::i8().element_type(), None);
        assert_eq!(Type::Label.kind(), TypeKind::Label);
    }
}

//! Mapping from generated-code type names to host type names.

use std::collections::HashMap;

use crate::{Error, Result};

/// Resolves the host type name for a native (generated-code) type name.
pub trait HostTypeMapper {
    /// Returns [`Error::UnknownType`] if `native_type` has no known mapping.
    fn host_type(&self, native_type: &str) -> Result<String>;
}

/// Maps the builtin types of the generated C code onto host numeric type names.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTypeMapper;

impl DefaultTypeMapper {
    fn lookup(native_type: &str) -> Option<&'static str> {
        let host = match native_type {
            "real_T" | "double" | "time_T" => "float64",
            "real32_T" | "float" => "float32",
            "int8_T" | "char_T" | "signed char" => "int8",
            "uint8_T" | "uchar_T" | "byte_T" | "unsigned char" => "uint8",
            "int16_T" | "short" => "int16",
            "uint16_T" | "unsigned short" => "uint16",
            "int32_T" | "int_T" | "int" => "int32",
            "uint32_T" | "uint_T" | "unsigned int" => "uint32",
            "int64_T" | "long long" => "int64",
            "uint64_T" | "unsigned long long" => "uint64",
            "boolean_T" | "bool" => "bool",
            _ => return None,
        };
        Some(host)
    }
}

impl HostTypeMapper for DefaultTypeMapper {
    fn host_type(&self, native_type: &str) -> Result<String> {
        Self::lookup(native_type)
            .map(str::to_string)
            .ok_or_else(|| Error::UnknownType(native_type.to_string()))
    }
}

/// A mapper with user-registered names (enumerations, aliased typedefs) checked before a fallback
/// mapper.
#[derive(Debug, Default, Clone)]
pub struct TableTypeMapper<M = DefaultTypeMapper> {
    table: HashMap<String, String>,
    fallback: M,
}

impl TableTypeMapper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: HostTypeMapper> TableTypeMapper<M> {
    pub fn with_fallback(fallback: M) -> Self {
        Self {
            table: HashMap::new(),
            fallback,
        }
    }

    /// Register a mapping, replacing any previous mapping for `native_type`.
    pub fn register(&mut self, native_type: impl Into<String>, host_type: impl Into<String>) {
        self.table.insert(native_type.into(), host_type.into());
    }
}

impl<M: HostTypeMapper> HostTypeMapper for TableTypeMapper<M> {
    fn host_type(&self, native_type: &str) -> Result<String> {
        match self.table.get(native_type) {
            Some(host) => Ok(host.clone()),
            None => self.fallback.host_type(native_type),
        }
    }
}

impl<M: HostTypeMapper + ?Sized> HostTypeMapper for &M {
    fn host_type(&self, native_type: &str) -> Result<String> {
        (**self).host_type(native_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("real_T", "float64")]
    #[case("time_T", "float64")]
    #[case("real32_T", "float32")]
    #[case("int8_T", "int8")]
    #[case("uint8_T", "uint8")]
    #[case("int16_T", "int16")]
    #[case("uint16_T", "uint16")]
    #[case("int32_T", "int32")]
    #[case("uint32_T", "uint32")]
    #[case("boolean_T", "bool")]
    #[case("double", "float64")]
    fn test_default_mapping(#[case] native: &str, #[case] host: &str) {
        assert_eq!(DefaultTypeMapper.host_type(native).unwrap(), host);
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(
            DefaultTypeMapper.host_type("slBus1"),
            Err(Error::UnknownType("slBus1".to_string()))
        );
        // No normalization of type names either
        assert!(DefaultTypeMapper.host_type("Real_T").is_err());
    }

    #[test]
    fn test_table_mapper() {
        let mut mapper = TableTypeMapper::new();
        mapper.register("GearMode", "int32");
        mapper.register("real_T", "float");

        assert_eq!(mapper.host_type("GearMode").unwrap(), "int32");
        assert_eq!(mapper.host_type("real_T").unwrap(), "float");
        assert_eq!(mapper.host_type("uint8_T").unwrap(), "uint8");
        assert!(matches!(
            mapper.host_type("slBus1"),
            Err(Error::UnknownType(_))
        ));
    }
}

//! MsgPack payload codec using `rmp-serde`.
//!
//! Encoding uses `to_vec_named` so structs serialize as maps with field
//! names rather than positional arrays. Hosts in other languages can then
//! decode payloads without a compiled schema, and either side may add
//! optional fields without breaking the other.

use crate::error::Result;

/// MessagePack codec for frame payloads.
pub struct MsgPackCodec;

impl MsgPackCodec {
    /// Encode a value to MsgPack bytes (struct-as-map format).
    #[inline]
    pub fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(value)?)
    }

    /// Decode MsgPack bytes to a value.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct TestStruct {
        id: u32,
        name: String,
        active: bool,
    }

    #[test]
    fn test_encode_decode_struct() {
        let original = TestStruct {
            id: 42,
            name: "gitea".to_string(),
            active: true,
        };
        let encoded = MsgPackCodec::encode(&original).unwrap();
        let decoded: TestStruct = MsgPackCodec::decode(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_struct_serialized_as_map() {
        let value = TestStruct {
            id: 1,
            name: "x".to_string(),
            active: false,
        };
        let encoded = MsgPackCodec::encode(&value).unwrap();
        // fixmap marker for a 3-entry map, not a fixarray.
        assert_eq!(encoded[0], 0x83);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result: Result<TestStruct> = MsgPackCodec::decode(&[0xc1, 0xff, 0x00]);
        assert!(result.is_err());
    }
}

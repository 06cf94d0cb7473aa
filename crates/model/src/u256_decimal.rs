use {
    alloy_primitives::U256,
    serde::{Deserializer, Serializer, de},
    serde_with::{DeserializeAs, SerializeAs},
    std::{fmt, str::FromStr},
};

/// Serializes a `U256` as a decimal string. Deserialization also accepts
/// `0x` prefixed hex strings and plain JSON integers, since order payloads
/// produced by different front-ends use all three.
pub struct DecimalU256;

impl<'de> DeserializeAs<'de, U256> for DecimalU256 {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize(deserializer)
    }
}

impl SerializeAs<U256> for DecimalU256 {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize(source, serializer)
    }
}

pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor {}
    impl de::Visitor<'_> for Visitor {
        type Value = U256;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            write!(
                formatter,
                "a u256 encoded as a decimal or 0x-prefixed hex string"
            )
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(U256::from(value))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            // `U256::from_str` treats unprefixed input as decimal.
            U256::from_str(s)
                .map_err(|err| de::Error::custom(format!("failed to decode {s:?} as u256: {err}")))
        }
    }

    deserializer.deserialize_any(Visitor {})
}

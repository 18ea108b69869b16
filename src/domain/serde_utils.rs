//! Serde helpers for API payloads.

use serde::de::{self, Visitor};
use serde::Deserializer;
use std::fmt;

/// Snowflake IDs that may arrive as JSON strings or integers, kept as text.
pub mod snowflake {
    use super::{de, fmt, Deserializer, Visitor};

    /// Deserializes a snowflake from a string or an unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither, or the string is not numeric.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SnowflakeVisitor;

        impl Visitor<'_> for SnowflakeVisitor {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing a snowflake ID")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map(|v| v.to_string())
                    .map_err(|_| E::custom(format!("negative snowflake ID {value}")))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(E::custom(format!("snowflake ID {value:?} is not numeric")));
                }
                Ok(value.to_string())
            }
        }

        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

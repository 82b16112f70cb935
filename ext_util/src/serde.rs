use std::{
    fmt,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use itertools::Itertools;
use serde::{de, Deserialize, Deserializer, Serializer};

/// `"AD15,MDL3,PBSB"` <-> `["AD15", "MDL3", "PBSB"]`
pub mod comma_separated {
    use super::*;

    pub fn serialize<S>(values: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&values.iter().join(","))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let joined = String::deserialize(deserializer)?;
        let values = joined
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(values)
    }
}

/// Unix timestamps in whole seconds, as a number or a numeric string.
pub mod epoch_secs {
    use super::*;

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let secs = match time.duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_secs() as i64,
            Err(before) => -(before.duration().as_secs() as i64),
        };

        serializer.serialize_i64(secs)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SecsVisitor)
    }

    fn from_epoch(secs: i64) -> SystemTime {
        if secs >= 0 {
            UNIX_EPOCH + Duration::from_secs(secs as u64)
        } else {
            UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
        }
    }

    struct SecsVisitor;
    impl<'de> de::Visitor<'de> for SecsVisitor {
        type Value = SystemTime;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("unix seconds as a number or string")
        }

        fn visit_i64<E>(self, secs: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(from_epoch(secs))
        }

        fn visit_u64<E>(self, secs: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i64::try_from(secs)
                .map(from_epoch)
                .map_err(|_| de::Error::invalid_value(de::Unexpected::Unsigned(secs), &self))
        }

        fn visit_str<E>(self, secs: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            secs.parse().map(from_epoch).map_err(de::Error::custom)
        }
    }
}

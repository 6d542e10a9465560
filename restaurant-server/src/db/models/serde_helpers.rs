//! Timestamp serde helpers
//!
//! 时间戳以固定宽度的 RFC 3339 字符串 (微秒, `Z` 结尾) 存储，
//! 保证按字符串排序 (`ORDER BY created_at`) 与时间先后一致。

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// 固定宽度格式化
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp<E: serde::de::Error>(raw: &str) -> Result<DateTime<Utc>, E> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| E::custom(format!("invalid timestamp {raw:?}: {e}")))
}

/// `DateTime<Utc>` ⇄ fixed-width string
pub mod timestamp {
    use super::*;

    pub fn serialize<S>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&format_timestamp(ts))
    }

    pub fn deserialize<'de, D>(d: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(d)?;
        parse_timestamp(&raw)
    }
}

/// `Option<DateTime<Utc>>` ⇄ fixed-width string or null
pub mod option_timestamp {
    use super::*;

    pub fn serialize<S>(ts: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => s.serialize_some(&format_timestamp(ts)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(d)? {
            Some(raw) => parse_timestamp(&raw).map(Some),
            None => Ok(None),
        }
    }
}

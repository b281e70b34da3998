use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Loosely-typed construction parameters for a component or behaviour.
///
/// Data tables write these inline (`"Wander"`, `5`, `{"hitpoints": 3}`), so
/// the serde representation is untagged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Params {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Text(String),
    Map(BTreeMap<String, Params>),
}

impl Params {
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Params)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn get(&self, key: &str) -> Option<&Params> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Reads an optional non-negative integer field of a map.
    ///
    /// Missing fields (and `Params::None`) read as `None`; anything else of
    /// the wrong shape is an error attributed to `owner`.
    pub fn uint(&self, owner: &str, key: &str) -> Result<Option<u32>, ConfigError> {
        match self.field(owner, key)? {
            Some(value) => value.to_uint(owner, key).map(Some),
            None => Ok(None),
        }
    }

    /// Like [`Params::uint`], but a bare integer is taken as the value of
    /// `key` (so `Souls(5)` and `Souls({"value": 5})` read the same).
    pub fn uint_or_bare(&self, owner: &str, key: &str) -> Result<Option<u32>, ConfigError> {
        match self {
            Self::Int(_) => self.to_uint(owner, key).map(Some),
            other => other.uint(owner, key),
        }
    }

    fn to_uint(&self, owner: &str, key: &str) -> Result<u32, ConfigError> {
        let number = self.as_int().ok_or_else(|| {
            ConfigError::invalid_params(owner, format!("\"{key}\" must be an integer"))
        })?;
        u32::try_from(number)
            .map_err(|_| ConfigError::invalid_params(owner, format!("\"{key}\" is out of range")))
    }

    /// Reads an optional string field of a map.
    pub fn text(&self, owner: &str, key: &str) -> Result<Option<&str>, ConfigError> {
        let Some(value) = self.field(owner, key)? else {
            return Ok(None);
        };
        value
            .as_str()
            .map(Some)
            .ok_or_else(|| ConfigError::invalid_params(owner, format!("\"{key}\" must be a string")))
    }

    fn field(&self, owner: &str, key: &str) -> Result<Option<&Params>, ConfigError> {
        match self {
            Self::None => Ok(None),
            Self::Map(entries) => Ok(entries.get(key)),
            other => Err(ConfigError::invalid_params(
                owner,
                format!("expected a map, found {other:?}"),
            )),
        }
    }
}

impl From<&str> for Params {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Params {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Params {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

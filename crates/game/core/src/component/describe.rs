use std::any::Any;

use super::Component;
use crate::entity::Params;
use crate::error::ConfigError;

/// Player-facing name and description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Describe {
    pub name: String,
    pub description: Option<String>,
}

impl Describe {
    pub const NAME: &'static str = "Describe";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Accepts `"Rat"` or `{"name": "Rat", "description": "..."}`.
    pub fn from_params(params: &Params) -> Result<Self, ConfigError> {
        if let Params::Text(name) = params {
            return Ok(Self::new(name.as_str()));
        }
        let name = params
            .text(Self::NAME, "name")?
            .ok_or_else(|| ConfigError::invalid_params(Self::NAME, "missing \"name\""))?;
        let description = params.text(Self::NAME, "description")?;
        Ok(Self {
            name: name.to_string(),
            description: description.map(str::to_string),
        })
    }
}

impl Component for Describe {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

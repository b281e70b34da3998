use crate::common::EntityId;

/// Events fanned out to every component of an entity.
///
/// Names follow the kebab-case form used in data and logs
/// (`before-turn`, `after-attacked`, ...). Anything unknown travels as
/// [`Event::Custom`].
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Event {
    BeforeTurn,
    AfterTurn,
    BeforeAction { action: &'static str },
    AfterAction { action: &'static str, succeeded: bool },
    BeforeAttack { target: EntityId },
    BeforeAttacked { attacker: EntityId },
    AfterAttack { target: EntityId },
    AfterAttacked { attacker: EntityId },
    Killed { victim: EntityId },
    Death,
    Custom(String),
}

impl Event {
    pub fn name(&self) -> &str {
        match self {
            Self::Custom(name) => name,
            other => other.into(),
        }
    }
}

impl From<&str> for Event {
    fn from(name: &str) -> Self {
        match name {
            "before-turn" => Self::BeforeTurn,
            "after-turn" => Self::AfterTurn,
            "death" => Self::Death,
            other => Self::Custom(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_upgrade_to_events() {
        assert_eq!(Event::from("after-turn"), Event::AfterTurn);
        assert_eq!(Event::from("request-action"), Event::Custom("request-action".into()));
        assert_eq!(Event::from("death").name(), "death");
        assert_eq!(Event::Killed { victim: EntityId(1) }.name(), "killed");
        assert_eq!(Event::Custom("bleed".into()).name(), "bleed");
    }
}

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How edits to channel messages are authorized.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEditPolicy {
    /// The channel target is trusted and authorship is not checked.
    #[default]
    TrustTarget,
    /// Only the original sender may edit, as in direct conversations.
    RequireAuthor,
}

#[derive(Debug)]
pub struct UnknownPolicy(String);

impl Display for UnknownPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown channel edit policy `{}`", self.0)
    }
}

impl std::error::Error for UnknownPolicy {}

impl FromStr for ChannelEditPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trust_target" => Ok(ChannelEditPolicy::TrustTarget),
            "require_author" => Ok(ChannelEditPolicy::RequireAuthor),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_policies() {
        assert_eq!(
            "trust_target".parse::<ChannelEditPolicy>().unwrap(),
            ChannelEditPolicy::TrustTarget
        );
        assert_eq!(
            "require_author".parse::<ChannelEditPolicy>().unwrap(),
            ChannelEditPolicy::RequireAuthor
        );
        assert!("anyone".parse::<ChannelEditPolicy>().is_err());
    }
}

pub mod identities;
pub mod messages;
pub mod notifications;

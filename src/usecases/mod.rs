pub mod addresses;
pub mod authorization;
pub mod identities;
pub mod messages;
pub mod notifications;
pub mod replies;

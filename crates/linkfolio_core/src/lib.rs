pub mod analytics;
pub mod auth;
pub mod domain;
pub mod onboarding;
pub mod password;
pub mod ports;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::{
    AnalyticsEvent, AuthIdentity, EventType, LinkData, NewLink, Profile, SocialLink,
    UserCredentials,
};
pub use ports::{AuthFailure, CoreError, CoreResult, ProfileStore};

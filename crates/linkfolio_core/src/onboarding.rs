//! crates/linkfolio_core/src/onboarding.rs
//!
//! The account-provisioning state machine. Steps arrive as a name plus a
//! JSON payload; `account_setup` creates the account and issues the bearer
//! token, and every other step authenticates against that token before
//! writing. Each step call is its own transaction boundary; a failed step
//! never rolls back previously completed steps.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::auth;
use crate::domain::NewLink;
use crate::password;
use crate::ports::{CoreError, CoreResult, ProfileStore};
use crate::token;

//=========================================================================================
// Steps and Payloads
//=========================================================================================

/// One named unit of work in the provisioning workflow, in natural lifecycle
/// order. The set is closed: an unrecognized name is an error, not a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingStep {
    AccountSetup { username: String, email: String },
    Password { password: String },
    Industry { industry: String },
    ProfileInfo { bio: String, full_name: String },
    Links { links: Vec<NewLink> },
    Theme { theme: String },
    Complete,
}

#[derive(Deserialize)]
struct AccountSetupData {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
}

#[derive(Deserialize)]
struct PasswordData {
    password: String,
}

#[derive(Deserialize)]
struct IndustryData {
    industry: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileInfoData {
    #[serde(default)]
    bio: String,
    full_name: String,
}

#[derive(Deserialize)]
struct LinksData {
    links: Vec<NewLink>,
}

#[derive(Deserialize)]
struct ThemeData {
    theme: String,
}

fn payload<T: serde::de::DeserializeOwned>(step: &str, data: Value) -> CoreResult<T> {
    serde_json::from_value(data)
        .map_err(|e| CoreError::Validation(format!("invalid data for step '{step}': {e}")))
}

impl OnboardingStep {
    /// Parses a named step and its payload.
    pub fn parse(step: &str, data: Value) -> CoreResult<Self> {
        match step {
            "account_setup" => {
                let d: AccountSetupData = payload(step, data)?;
                Ok(Self::AccountSetup {
                    username: d.username,
                    email: d.email,
                })
            }
            "password" => {
                let d: PasswordData = payload(step, data)?;
                Ok(Self::Password {
                    password: d.password,
                })
            }
            "industry" => {
                let d: IndustryData = payload(step, data)?;
                Ok(Self::Industry {
                    industry: d.industry,
                })
            }
            "profile_info" => {
                let d: ProfileInfoData = payload(step, data)?;
                Ok(Self::ProfileInfo {
                    bio: d.bio,
                    full_name: d.full_name,
                })
            }
            "links" => {
                let d: LinksData = payload(step, data)?;
                Ok(Self::Links { links: d.links })
            }
            "theme" => {
                let d: ThemeData = payload(step, data)?;
                Ok(Self::Theme { theme: d.theme })
            }
            "complete" => Ok(Self::Complete),
            other => Err(CoreError::UnknownStep(other.to_string())),
        }
    }
}

/// What a completed step reports back to the caller. Only `account_setup`
/// carries an id and a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub message: &'static str,
    pub user_id: Option<Uuid>,
    pub token: Option<String>,
}

impl StepOutcome {
    fn ack(message: &'static str) -> Self {
        Self {
            message,
            user_id: None,
            token: None,
        }
    }
}

//=========================================================================================
// The State Machine
//=========================================================================================

/// Runs one onboarding step.
///
/// Every step except `account_setup` authenticates the bearer token first
/// and writes against the authenticated user id, never a client-supplied
/// one.
pub async fn apply_step(
    store: &dyn ProfileStore,
    bearer: Option<&str>,
    step: OnboardingStep,
) -> CoreResult<StepOutcome> {
    match step {
        OnboardingStep::AccountSetup { username, email } => {
            account_setup(store, &username, &email).await
        }
        OnboardingStep::Password { password: raw } => {
            let who = auth::authenticate(store, bearer).await?;
            let hash = password::hash_password(&raw).map_err(CoreError::Storage)?;
            store.set_password_hash(who.user_id, &hash).await?;
            Ok(StepOutcome::ack("Password saved"))
        }
        OnboardingStep::Industry { industry } => {
            let who = auth::authenticate(store, bearer).await?;
            store.set_industry(who.user_id, &industry).await?;
            Ok(StepOutcome::ack("Industry saved"))
        }
        OnboardingStep::ProfileInfo { bio, full_name } => {
            let who = auth::authenticate(store, bearer).await?;
            store.set_profile_info(who.user_id, &full_name, &bio).await?;
            Ok(StepOutcome::ack("Profile details saved"))
        }
        OnboardingStep::Links { links } => {
            let who = auth::authenticate(store, bearer).await?;
            store.replace_links(who.user_id, &links).await?;
            Ok(StepOutcome::ack("Links saved"))
        }
        OnboardingStep::Theme { theme } => {
            let who = auth::authenticate(store, bearer).await?;
            store.set_theme(who.user_id, &theme).await?;
            Ok(StepOutcome::ack("Theme saved"))
        }
        OnboardingStep::Complete => {
            let who = auth::authenticate(store, bearer).await?;
            store.mark_onboarding_complete(who.user_id).await?;
            Ok(StepOutcome::ack("Onboarding complete"))
        }
    }
}

async fn account_setup(
    store: &dyn ProfileStore,
    username: &str,
    email: &str,
) -> CoreResult<StepOutcome> {
    if username.trim().is_empty() {
        return Err(CoreError::Validation("username is required".to_string()));
    }
    if email.trim().is_empty() {
        return Err(CoreError::Validation("email is required".to_string()));
    }
    if let Some(field) = store.find_conflict(username, email).await? {
        return Err(CoreError::DuplicateField(field));
    }

    let user_id = store.create_user(username, email).await?;
    let token = token::issue(user_id, email);
    store.store_auth_token(user_id, &token).await?;

    Ok(StepOutcome {
        message: "Account created",
        user_id: Some(user_id),
        token: Some(token),
    })
}

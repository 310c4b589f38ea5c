//! In-memory `ProfileStore` implementation backing the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AnalyticsEvent, AuthIdentity, NewLink, Profile, SocialLink, UserCredentials};
use crate::ports::{CoreError, CoreResult, ProfileStore};

#[derive(Debug, Clone, Default)]
pub struct MemUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub industry: Option<String>,
    pub theme_preference: Option<String>,
    pub auth_token: Option<String>,
    pub onboarding_completed: bool,
    pub onboarding_completed_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
pub struct MemStore {
    users: Mutex<Vec<MemUser>>,
    links: Mutex<HashMap<Uuid, Vec<NewLink>>>,
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self, user_id: Uuid) -> Option<MemUser> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }

    fn update(&self, user_id: Uuid, apply: impl FnOnce(&mut MemUser)) -> CoreResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| CoreError::NotFound(format!("user {user_id}")))?;
        apply(user);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemStore {
    async fn find_conflict(&self, username: &str, email: &str) -> CoreResult<Option<String>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.username == username || u.email == email)
            .map(|u| {
                if u.username == username {
                    "username".to_string()
                } else {
                    "email".to_string()
                }
            }))
    }

    async fn create_user(&self, username: &str, email: &str) -> CoreResult<Uuid> {
        let mut users = self.users.lock().unwrap();
        let id = Uuid::new_v4();
        users.push(MemUser {
            id,
            username: username.to_string(),
            email: email.to_string(),
            ..MemUser::default()
        });
        Ok(id)
    }

    async fn store_auth_token(&self, user_id: Uuid, token: &str) -> CoreResult<()> {
        self.update(user_id, |u| u.auth_token = Some(token.to_string()))
    }

    async fn identity_by_token(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> CoreResult<Option<AuthIdentity>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.id == user_id && u.auth_token.as_deref() == Some(token))
            .map(|u| AuthIdentity {
                user_id: u.id,
                email: u.email.clone(),
            }))
    }

    async fn credentials_by_email(&self, email: &str) -> CoreResult<Option<UserCredentials>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).map(|u| {
            UserCredentials {
                user_id: u.id,
                username: u.username.clone(),
                email: u.email.clone(),
                password_hash: u.password_hash.clone(),
            }
        }))
    }

    async fn set_password_hash(&self, user_id: Uuid, password_hash: &str) -> CoreResult<()> {
        self.update(user_id, |u| u.password_hash = Some(password_hash.to_string()))
    }

    async fn set_industry(&self, user_id: Uuid, industry: &str) -> CoreResult<()> {
        self.update(user_id, |u| u.industry = Some(industry.to_string()))
    }

    async fn set_profile_info(&self, user_id: Uuid, full_name: &str, bio: &str) -> CoreResult<()> {
        self.update(user_id, |u| {
            u.full_name = Some(full_name.to_string());
            u.bio = Some(bio.to_string());
        })
    }

    async fn set_theme(&self, user_id: Uuid, theme: &str) -> CoreResult<()> {
        self.update(user_id, |u| u.theme_preference = Some(theme.to_string()))
    }

    async fn mark_onboarding_complete(&self, user_id: Uuid) -> CoreResult<()> {
        self.update(user_id, |u| {
            u.onboarding_completed = true;
            if u.onboarding_completed_at.is_none() {
                u.onboarding_completed_at = Some(Utc::now());
            }
        })
    }

    async fn replace_links(&self, user_id: Uuid, links: &[NewLink]) -> CoreResult<()> {
        self.links.lock().unwrap().insert(user_id, links.to_vec());
        Ok(())
    }

    async fn profile_by_username(&self, username: &str) -> CoreResult<Option<Profile>> {
        let users = self.users.lock().unwrap();
        let Some(user) = users.iter().find(|u| u.username == username) else {
            return Ok(None);
        };
        let links = self
            .links
            .lock()
            .unwrap()
            .get(&user.id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|l| SocialLink {
                platform: l.platform,
                url: l.url,
                button_text: l.button_text,
            })
            .collect();
        Ok(Some(Profile {
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            bio: user.bio.clone(),
            industry: user.industry.clone(),
            theme_preference: user.theme_preference.clone(),
            links,
        }))
    }

    async fn insert_event(&self, event: &AnalyticsEvent) -> CoreResult<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

// File: src/account.rs
// Purpose: Mock user directory and the explicit session handed out at sign-in
//
// A `Session` is created by `login`/`register` and consumed by `logout` or
// `delete_account`, so a signed-out session cannot be used again.

use crate::checkout::Order;
use crate::config::AuthConfig;
use crate::error::AuthError;
use accessflow_forms::FormValues;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    /// Newest first
    pub orders: Vec<Order>,
}

/// Details collected by the registration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn from_form(values: &FormValues) -> Self {
        Self {
            name: values.get("name").trim().to_string(),
            email: values.get("email").trim().to_string(),
            password: values.get("password").to_string(),
        }
    }
}

/// Profile fields to change; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn from_form(values: &FormValues) -> Self {
        let field = |name: &str| {
            values
                .contains(name)
                .then(|| values.get(name).trim().to_string())
        };
        Self {
            name: field("name"),
            email: field("email"),
        }
    }
}

/// Proof that a user signed in
#[derive(Debug, PartialEq, Eq)]
pub struct Session {
    user_id: Uuid,
    started_at: DateTime<Utc>,
}

impl Session {
    fn start(user_id: Uuid) -> Self {
        Self {
            user_id,
            started_at: Utc::now(),
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// In-memory accounts for the current run
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<Uuid, Account>,
    allow_unknown_login: bool,
}

impl AccountStore {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            accounts: HashMap::new(),
            allow_unknown_login: config.allow_unknown_login,
        }
    }

    fn find_by_email(&self, email: &str) -> Option<&Account> {
        let email = normalize_email(email);
        self.accounts
            .values()
            .find(|account| normalize_email(&account.user.email) == email)
    }

    fn account_mut(&mut self, session: &Session) -> Result<&mut Account, AuthError> {
        self.accounts
            .get_mut(&session.user_id)
            .ok_or(AuthError::SessionExpired)
    }

    fn create(&mut self, registration: Registration) -> Uuid {
        let id = Uuid::new_v4();
        let user = User {
            id,
            name: registration.name,
            email: registration.email.trim().to_string(),
            created_at: Utc::now(),
            orders: Vec::new(),
        };
        self.accounts.insert(
            id,
            Account {
                user,
                password: registration.password,
            },
        );
        id
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        let existing = self
            .find_by_email(email)
            .map(|account| (account.user.id, account.password == password));
        let user_id = match existing {
            Some((id, true)) => id,
            Some((_, false)) => return Err(AuthError::InvalidCredentials),
            None if self.allow_unknown_login => {
                let name = email.split('@').next().unwrap_or(email).to_string();
                self.create(Registration {
                    name,
                    email: email.to_string(),
                    password: password.to_string(),
                })
            }
            None => return Err(AuthError::InvalidCredentials),
        };

        tracing::info!(%user_id, "signed in");
        Ok(Session::start(user_id))
    }

    pub fn register(&mut self, registration: Registration) -> Result<Session, AuthError> {
        if self.find_by_email(&registration.email).is_some() {
            return Err(AuthError::EmailTaken);
        }
        let user_id = self.create(registration);
        tracing::info!(%user_id, "registered");
        Ok(Session::start(user_id))
    }

    pub fn logout(&self, session: Session) {
        tracing::info!(user_id = %session.user_id, "signed out");
    }

    pub fn user(&self, session: &Session) -> Result<&User, AuthError> {
        self.accounts
            .get(&session.user_id)
            .map(|account| &account.user)
            .ok_or(AuthError::SessionExpired)
    }

    pub fn update_profile(
        &mut self,
        session: &Session,
        update: ProfileUpdate,
    ) -> Result<&User, AuthError> {
        if let Some(email) = &update.email {
            let taken = self
                .find_by_email(email)
                .is_some_and(|other| other.user.id != session.user_id);
            if taken {
                return Err(AuthError::EmailTaken);
            }
        }

        let account = self.account_mut(session)?;
        if let Some(name) = update.name {
            account.user.name = name;
        }
        if let Some(email) = update.email {
            account.user.email = email;
        }
        Ok(&account.user)
    }

    pub fn add_order(&mut self, session: &Session, order: Order) -> Result<(), AuthError> {
        let account = self.account_mut(session)?;
        tracing::info!(user_id = %session.user_id, order_id = %order.id, "order recorded");
        account.user.orders.insert(0, order);
        Ok(())
    }

    pub fn delete_account(&mut self, session: Session) -> Result<(), AuthError> {
        self.accounts
            .remove(&session.user_id)
            .ok_or(AuthError::SessionExpired)?;
        tracing::info!(user_id = %session.user_id, "account deleted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

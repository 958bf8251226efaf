use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use mesa_model::{Capability, SessionKey};

use crate::{auth::CredentialValidator, error::AuthError};

/// What one user is allowed to do.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Grant {
    /// When set, the session token must match.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub roles: BTreeSet<String>,
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
}

impl Grant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }
}

/// Credential validator backed by a fixed user table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticCredentials {
    #[serde(default)]
    users: HashMap<String, Grant>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: impl Into<String>, grant: Grant) -> Self {
        self.users.insert(user.into(), grant);
        self
    }

    fn grant(&self, session: &SessionKey) -> Result<&Grant, AuthError> {
        let Some(grant) = self.users.get(&session.user) else {
            return Err(AuthError::Denied(format!("unknown user {}", session.user)));
        };

        match &grant.token {
            Some(token) if *token != session.token => {
                let reason = format!("invalid session for {}", session.user);
                Err(AuthError::Denied(reason))
            }
            _ => Ok(grant),
        }
    }
}

impl CredentialValidator for StaticCredentials {
    fn check_authenticated(&self, session: &SessionKey, role: &str) -> Result<(), AuthError> {
        if self.grant(session)?.roles.contains(role) {
            Ok(())
        } else {
            Err(AuthError::Denied(format!(
                "{} is not a member of role {role}",
                session.user
            )))
        }
    }

    fn check_authorized(
        &self,
        session: &SessionKey,
        capability: Capability,
    ) -> Result<(), AuthError> {
        if self.grant(session)?.capabilities.contains(&capability) {
            Ok(())
        } else {
            Err(AuthError::Denied(format!(
                "{} lacks capability {capability}",
                session.user
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> StaticCredentials {
        StaticCredentials::new()
            .with_user("foo_user", Grant::new().with_role("bar_role"))
            .with_user(
                "admin",
                Grant::new()
                    .with_token("s3cret")
                    .with_capability(Capability::Root),
            )
    }

    #[test]
    fn role_membership() {
        let c = creds();
        let member = SessionKey::new("foo_user");
        let stranger = SessionKey::new("nobody");

        assert!(c.check_authenticated(&member, "bar_role").is_ok());
        assert!(c.check_authenticated(&member, "other").is_err());
        assert!(c.check_authenticated(&stranger, "bar_role").is_err());
    }

    #[test]
    fn token_must_match_when_configured() {
        let c = creds();
        let good = SessionKey::new("admin").with_token("s3cret");
        let bad = SessionKey::new("admin").with_token("guess");

        assert!(c.check_authorized(&good, Capability::Root).is_ok());
        assert!(c.check_authorized(&bad, Capability::Root).is_err());
        assert!(c.check_authorized(&good, Capability::Provisioner).is_err());
    }

    #[test]
    fn deserializes_from_json_table() {
        let json = r#"{
            "users": {
                "ops": { "capabilities": ["ROOT", "PROVISIONER"] },
                "dev": { "roles": ["web"] }
            }
        }"#;
        let c: StaticCredentials = serde_json::from_str(json).unwrap();

        let ops = SessionKey::new("ops");
        let dev = SessionKey::new("dev");

        assert!(c.check_authorized(&ops, Capability::Provisioner).is_ok());
        assert!(c.check_authenticated(&dev, "web").is_ok());
    }
}

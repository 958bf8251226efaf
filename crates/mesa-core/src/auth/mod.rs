//! Authorization primitives used by the command gateway.
//!
//! A command declares a [`Requirement`]; the [`Authorizer`] evaluates it against a
//! [`CredentialValidator`] before the command body is allowed to run.

mod credentials;
pub use credentials::{Grant, StaticCredentials};

use std::sync::Arc;

use tracing::{debug, trace};

use mesa_model::{Capability, SessionKey};

use crate::error::AuthError;

/// Opaque authorization oracle.
///
/// Checks are pure in-process computations; implementations must not block.
pub trait CredentialValidator: Send + Sync {
    /// Succeeds if the session acts for `role`.
    fn check_authenticated(&self, session: &SessionKey, role: &str) -> Result<(), AuthError>;

    /// Succeeds if the session holds `capability`.
    fn check_authorized(
        &self,
        session: &SessionKey,
        capability: Capability,
    ) -> Result<(), AuthError>;
}

/// Authorization declared by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Session must act for the role owning the target resource.
    Role(String),
    /// Session must hold one of the capabilities, tried in order.
    AnyCapability(Vec<Capability>),
}

impl Requirement {
    pub fn role(role: impl Into<String>) -> Self {
        Requirement::Role(role.into())
    }

    pub fn capability(capability: Capability) -> Self {
        Requirement::AnyCapability(vec![capability])
    }
}

/// Evaluates requirements against a credential validator.
#[derive(Clone)]
pub struct Authorizer {
    validator: Arc<dyn CredentialValidator>,
}

impl Authorizer {
    pub fn new(validator: Arc<dyn CredentialValidator>) -> Self {
        Self { validator }
    }

    pub fn authorize(
        &self,
        session: &SessionKey,
        requirement: &Requirement,
    ) -> Result<(), AuthError> {
        match requirement {
            Requirement::Role(role) => self.check_role(session, role),
            Requirement::AnyCapability(capabilities) => {
                let mut denied = None;
                for capability in capabilities {
                    match self.check_capability(session, *capability) {
                        Ok(()) => return Ok(()),
                        Err(e) => denied = Some(e),
                    }
                }
                Err(denied.unwrap_or_else(|| AuthError::Denied("no capability accepted".into())))
            }
        }
    }

    /// Role check against the role owning the resource, not the caller's own identity.
    pub fn check_role(&self, session: &SessionKey, role: &str) -> Result<(), AuthError> {
        self.validator
            .check_authenticated(session, role)
            .inspect(|()| trace!(user = %session.user, role, "role check passed"))
            .inspect_err(|e| debug!(user = %session.user, role, reason = %e, "role check failed"))
    }

    pub fn check_capability(
        &self,
        session: &SessionKey,
        capability: Capability,
    ) -> Result<(), AuthError> {
        self.validator
            .check_authorized(session, capability)
            .inspect(|()| trace!(user = %session.user, %capability, "capability check passed"))
            .inspect_err(|e| {
                debug!(user = %session.user, %capability, reason = %e, "capability check failed")
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records every check and allows only what it was told to.
    #[derive(Default)]
    struct Recorder {
        roles: Vec<String>,
        capabilities: Vec<Capability>,
        calls: Mutex<Vec<String>>,
    }

    impl CredentialValidator for Recorder {
        fn check_authenticated(&self, _session: &SessionKey, role: &str) -> Result<(), AuthError> {
            self.calls.lock().unwrap().push(format!("role:{role}"));
            if self.roles.iter().any(|r| r == role) {
                Ok(())
            } else {
                Err(AuthError::Denied("Denied!".into()))
            }
        }

        fn check_authorized(
            &self,
            _session: &SessionKey,
            capability: Capability,
        ) -> Result<(), AuthError> {
            self.calls.lock().unwrap().push(format!("cap:{capability}"));
            if self.capabilities.contains(&capability) {
                Ok(())
            } else {
                Err(AuthError::Denied("Denied!".into()))
            }
        }
    }

    fn authorizer(recorder: Recorder) -> (Authorizer, Arc<Recorder>) {
        let recorder = Arc::new(recorder);
        (Authorizer::new(recorder.clone()), recorder)
    }

    #[test]
    fn capabilities_are_tried_in_order_until_one_passes() {
        let (auth, rec) = authorizer(Recorder {
            capabilities: vec![Capability::Provisioner],
            ..Default::default()
        });
        let req = Requirement::AnyCapability(vec![Capability::Root, Capability::Provisioner]);

        assert!(auth.authorize(&SessionKey::new("u"), &req).is_ok());
        assert_eq!(
            *rec.calls.lock().unwrap(),
            vec!["cap:ROOT", "cap:PROVISIONER"]
        );
    }

    #[test]
    fn first_passing_capability_short_circuits() {
        let (auth, rec) = authorizer(Recorder {
            capabilities: vec![Capability::Root],
            ..Default::default()
        });
        let req = Requirement::AnyCapability(vec![Capability::Root, Capability::Provisioner]);

        assert!(auth.authorize(&SessionKey::new("u"), &req).is_ok());
        assert_eq!(*rec.calls.lock().unwrap(), vec!["cap:ROOT"]);
    }

    #[test]
    fn all_capabilities_failing_is_denied() {
        let (auth, _) = authorizer(Recorder::default());
        let req = Requirement::AnyCapability(vec![Capability::Root, Capability::Provisioner]);

        assert_eq!(
            auth.authorize(&SessionKey::new("u"), &req),
            Err(AuthError::Denied("Denied!".into()))
        );
    }

    #[test]
    fn role_requirement_checks_the_resource_role() {
        let (auth, rec) = authorizer(Recorder {
            roles: vec!["bar_role".into()],
            ..Default::default()
        });

        let session = SessionKey::new("foo_user");
        assert!(auth.authorize(&session, &Requirement::role("bar_role")).is_ok());
        assert!(auth.authorize(&session, &Requirement::role("other")).is_err());
        assert_eq!(
            *rec.calls.lock().unwrap(),
            vec!["role:bar_role", "role:other"]
        );
    }
}

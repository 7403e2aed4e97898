//! Ownership guard shared by the notes and news applications
//!
//! Owner-only endpoints never reveal whether someone else's resource exists:
//! a non-owner gets the same "not found" as for an unknown identifier.

use crate::coordination::CoreError;
use crate::userdb::UserId;

/// The acting identity of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User(UserId),
}

impl Principal {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Principal::Anonymous => None,
            Principal::User(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Principal::User(_))
    }
}

/// A resource with a designated owner
pub trait Owned {
    fn owner(&self) -> UserId;
}

pub fn is_owner<T: Owned + ?Sized>(principal: &Principal, resource: &T) -> bool {
    principal.user_id() == Some(resource.owner())
}

pub fn require_user(principal: &Principal) -> Result<UserId, CoreError> {
    principal.user_id().ok_or(CoreError::AuthenticationRequired)
}

/// Resolve a looked-up resource against the principal
///
/// Authentication is checked before existence, so anonymous callers are sent
/// to the login page even for identifiers that do not exist.
pub fn authorize_owner<T: Owned>(
    principal: &Principal,
    resource: Option<T>,
    resource_type: &str,
    resource_id: &str,
) -> Result<T, CoreError> {
    require_user(principal)?;

    let not_found = || CoreError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        resource_id: resource_id.to_string(),
    };

    match resource {
        Some(resource) if is_owner(principal, &resource) => Ok(resource),
        Some(_) => {
            tracing::info!(
                principal = ?principal,
                resource_type,
                resource_id,
                "Access by non-owner reported as not found"
            );
            Err(not_found())
        }
        None => Err(not_found()),
    }
}

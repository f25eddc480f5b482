//! Resource Ownership Guard
//!
//! A pure decision function: no I/O, no clock, no logging. The caller
//! supplies the identity resolved from the session and the owner loaded
//! from the store; the guard only compares them.
//!
//! The two denial variants are deliberately distinct. A missing
//! identity means "log in and retry" (401); a present but wrong
//! identity means "this will never work" (403).

use crate::domain::value_object::UserId;

/// What the caller wants to do with the resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
    Delete,
}

/// Who may read (configured per route, not hard-coded per type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPolicy {
    #[default]
    Public,
    AuthenticatedOnly,
}

/// Guard verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// No session identity present
    DenyUnauthenticated,
    /// Identity present but not the owner
    DenyForbidden,
}

/// Decide whether `current` may perform `action` on a resource owned by
/// `owner`
pub fn authorize(
    current: Option<UserId>,
    owner: UserId,
    action: Action,
    policy: ReadPolicy,
) -> Decision {
    match action {
        Action::Read => match policy {
            ReadPolicy::Public => Decision::Allow,
            ReadPolicy::AuthenticatedOnly => match current {
                Some(_) => Decision::Allow,
                None => Decision::DenyUnauthenticated,
            },
        },
        Action::Write | Action::Delete => match current {
            None => Decision::DenyUnauthenticated,
            Some(user_id) if user_id == owner => Decision::Allow,
            Some(_) => Decision::DenyForbidden,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_read_allows_anyone() {
        let owner = UserId::new();
        for current in [None, Some(owner), Some(UserId::new())] {
            assert_eq!(
                authorize(current, owner, Action::Read, ReadPolicy::Public),
                Decision::Allow
            );
        }
    }

    #[test]
    fn test_authenticated_read_requires_identity_only() {
        let owner = UserId::new();

        assert_eq!(
            authorize(None, owner, Action::Read, ReadPolicy::AuthenticatedOnly),
            Decision::DenyUnauthenticated
        );
        // Any identity will do, ownership is irrelevant for reads
        assert_eq!(
            authorize(
                Some(UserId::new()),
                owner,
                Action::Read,
                ReadPolicy::AuthenticatedOnly
            ),
            Decision::Allow
        );
    }

    #[test]
    fn test_mutations_full_matrix() {
        let owner = UserId::new();
        let stranger = UserId::new();

        for action in [Action::Write, Action::Delete] {
            for policy in [ReadPolicy::Public, ReadPolicy::AuthenticatedOnly] {
                assert_eq!(
                    authorize(None, owner, action, policy),
                    Decision::DenyUnauthenticated
                );
                assert_eq!(
                    authorize(Some(stranger), owner, action, policy),
                    Decision::DenyForbidden
                );
                assert_eq!(authorize(Some(owner), owner, action, policy), Decision::Allow);
            }
        }
    }
}

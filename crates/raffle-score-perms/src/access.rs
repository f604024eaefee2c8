//! Owner state and the checks built on it.

use raffle_score_core::{Identity, LedgerEvent};

use crate::error::{PermsError, Result};

/// Tracks the single privileged owner.
///
/// Invariant: `owner` is never the null identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessControl {
    owner: Identity,
}

impl AccessControl {
    /// Create with an initial owner.
    ///
    /// Fails with [`PermsError::InvalidOwner`] if `initial_owner` is null.
    pub fn new(initial_owner: Identity) -> Result<Self> {
        if initial_owner.is_null() {
            return Err(PermsError::InvalidOwner {
                owner: initial_owner,
            });
        }
        Ok(Self {
            owner: initial_owner,
        })
    }

    /// The current owner.
    pub fn owner(&self) -> Identity {
        self.owner
    }

    pub fn is_owner(&self, caller: &Identity) -> bool {
        *caller == self.owner
    }

    /// Succeed iff `caller` is the owner. No effect either way.
    pub fn require_owner(&self, caller: &Identity) -> Result<()> {
        if !self.is_owner(caller) {
            tracing::warn!(caller = %caller, owner = %self.owner, "rejected non-owner caller");
            return Err(PermsError::Unauthorized { account: *caller });
        }
        Ok(())
    }

    /// Hand ownership to `new_owner`.
    ///
    /// Returns the `OwnershipTransferred` notification for the caller to
    /// publish. State is unchanged on error.
    pub fn transfer_ownership(
        &mut self,
        caller: &Identity,
        new_owner: Identity,
    ) -> Result<LedgerEvent> {
        self.require_owner(caller)?;
        if new_owner.is_null() {
            return Err(PermsError::InvalidOwner { owner: new_owner });
        }

        let previous = std::mem::replace(&mut self.owner, new_owner);
        tracing::info!(previous = %previous, new_owner = %new_owner, "ownership transferred");

        Ok(LedgerEvent::ownership_transferred(previous, new_owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn identity(byte: u8) -> Identity {
        Identity::from_bytes([byte; 20])
    }

    #[test]
    fn test_new_rejects_null_owner() {
        assert_eq!(
            AccessControl::new(Identity::NULL),
            Err(PermsError::InvalidOwner {
                owner: Identity::NULL
            })
        );
    }

    #[test]
    fn test_require_owner() {
        let access = AccessControl::new(identity(1)).unwrap();

        assert!(access.require_owner(&identity(1)).is_ok());
        assert_eq!(
            access.require_owner(&identity(2)),
            Err(PermsError::Unauthorized {
                account: identity(2)
            })
        );
    }

    #[test]
    fn test_transfer_ownership() {
        let mut access = AccessControl::new(identity(1)).unwrap();

        let event = access.transfer_ownership(&identity(1), identity(2)).unwrap();
        assert_eq!(
            event,
            LedgerEvent::ownership_transferred(identity(1), identity(2))
        );
        assert_eq!(access.owner(), identity(2));

        // The old owner is locked out, the new one is in.
        assert!(access.require_owner(&identity(1)).is_err());
        assert!(access.require_owner(&identity(2)).is_ok());
    }

    #[test]
    fn test_transfer_by_non_owner_fails_without_effect() {
        let mut access = AccessControl::new(identity(1)).unwrap();

        let result = access.transfer_ownership(&identity(2), identity(3));
        assert_eq!(
            result,
            Err(PermsError::Unauthorized {
                account: identity(2)
            })
        );
        assert_eq!(access.owner(), identity(1));
    }

    #[test]
    fn test_transfer_to_null_fails_without_effect() {
        let mut access = AccessControl::new(identity(1)).unwrap();

        let result = access.transfer_ownership(&identity(1), Identity::NULL);
        assert_eq!(
            result,
            Err(PermsError::InvalidOwner {
                owner: Identity::NULL
            })
        );
        assert_eq!(access.owner(), identity(1));
    }

    #[test]
    fn test_transfer_to_self_is_allowed() {
        let mut access = AccessControl::new(identity(1)).unwrap();
        access.transfer_ownership(&identity(1), identity(1)).unwrap();
        assert_eq!(access.owner(), identity(1));
    }

    proptest! {
        #[test]
        fn test_owner_never_null(steps in prop::collection::vec((any::<u8>(), any::<u8>()), 0..32)) {
            let mut access = AccessControl::new(identity(1)).unwrap();
            for (caller, target) in steps {
                let _ = access.transfer_ownership(&identity(caller), identity(target));
                prop_assert!(!access.owner().is_null());
            }
        }
    }
}

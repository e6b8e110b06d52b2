use thiserror::Error;

/// The authenticated customer tried to act on a record owned by someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unauthorized action")]
pub struct UnauthorizedAction {
    pub subject: i64,
    pub owner: i64,
}

/// Allow the operation only when the caller owns the resource.
///
/// `owner` must come from the stored record, never from the request body.
pub fn authorize(subject: i64, owner: i64) -> Result<(), UnauthorizedAction> {
    if subject == owner {
        Ok(())
    } else {
        Err(UnauthorizedAction { subject, owner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_authorized() {
        assert_eq!(authorize(1, 1), Ok(()));
        assert_eq!(authorize(0, 0), Ok(()));
    }

    #[test]
    fn every_other_pairing_is_rejected() {
        let ids = [-1, 0, 1, 2, 10, i64::MAX];
        for subject in ids {
            for owner in ids {
                let decision = authorize(subject, owner);
                if subject == owner {
                    assert!(decision.is_ok());
                } else {
                    assert_eq!(decision, Err(UnauthorizedAction { subject, owner }));
                }
            }
        }
    }

    #[test]
    fn message_does_not_leak_ids() {
        let err = authorize(1, 2).unwrap_err();
        assert_eq!(err.to_string(), "unauthorized action");
    }
}

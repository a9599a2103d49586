use diesel::r2d2;
use std::fmt;

/// Failure kinds surfaced by the ledger and inventory core.
///
/// The first six variants are rejected business operations: the enclosing
/// transaction rolls back and the wallet/inventory state is unchanged.
/// `Database` and `DatabaseConnection` are store faults with the same
/// full-rollback guarantee.
#[derive(Debug)]
pub enum CoreError {
    InsufficientAvailableBalance { requested: i64, available: i64 },
    InsufficientLockedBalance { requested: i64, locked: i64 },
    InsufficientInventory { requested: i64, available: i64 },
    WalletNotFound(String),
    BudgetInvariantViolation(String),
    DuplicateSeedAttempt(String),
    Validation(String),
    Database(diesel::result::Error),
    DatabaseConnection(String),
    Internal(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InsufficientAvailableBalance {
                requested,
                available,
            } => write!(
                f,
                "Insufficient available balance: requested {} but only {} available",
                requested, available
            ),
            CoreError::InsufficientLockedBalance { requested, locked } => write!(
                f,
                "Insufficient locked balance: requested {} but only {} locked",
                requested, locked
            ),
            CoreError::InsufficientInventory {
                requested,
                available,
            } => write!(
                f,
                "Insufficient inventory: requested {} codes but only {} in pool",
                requested, available
            ),
            CoreError::WalletNotFound(e) => write!(f, "Wallet not found: {}", e),
            CoreError::BudgetInvariantViolation(e) => {
                write!(f, "Campaign budget invariant violated: {}", e)
            }
            CoreError::DuplicateSeedAttempt(e) => write!(f, "Duplicate seed attempt: {}", e),
            CoreError::Validation(e) => write!(f, "Validation error: {}", e),
            CoreError::Database(e) => write!(f, "Database error: {}", e),
            CoreError::DatabaseConnection(e) => write!(f, "Database connection error: {}", e),
            CoreError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for CoreError {
    fn from(err: diesel::result::Error) -> Self {
        CoreError::Database(err)
    }
}

impl From<r2d2::Error> for CoreError {
    fn from(err: r2d2::Error) -> Self {
        CoreError::DatabaseConnection(err.to_string())
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl CoreError {
    /// True for rejected business operations, false for system faults.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            CoreError::Database(_) | CoreError::DatabaseConnection(_) | CoreError::Internal(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_are_distinguished_from_faults() {
        assert!(CoreError::InsufficientAvailableBalance {
            requested: 100,
            available: 50
        }
        .is_rejection());
        assert!(CoreError::DuplicateSeedAttempt("vendor".into()).is_rejection());
        assert!(!CoreError::DatabaseConnection("pool exhausted".into()).is_rejection());
    }

    #[test]
    fn display_carries_amounts() {
        let e = CoreError::InsufficientInventory {
            requested: 12,
            available: 10,
        };
        assert_eq!(
            e.to_string(),
            "Insufficient inventory: requested 12 codes but only 10 in pool"
        );
    }
}

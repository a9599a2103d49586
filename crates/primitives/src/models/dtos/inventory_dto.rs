use serde::{Deserialize, Serialize};
use validator::Validate;

/// Result of a bulk import: how many rows landed and how many hashes were
/// already present (silently skipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub created: usize,
    pub duplicates: usize,
}

/// One-time provisioning request for a vendor's inventory pool.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SeedSpec {
    #[validate(length(min = 2, max = 16))]
    pub series_code: String,

    #[validate(range(min = 1, max = 100_000))]
    pub target_count: i64,
}

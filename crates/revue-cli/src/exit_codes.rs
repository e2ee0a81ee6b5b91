//! Exit codes for the revue CLI.
//! These codes are part of the public contract.

pub const SUCCESS: i32 = 0;
pub const REVIEW_FAILED: i32 = 1; // Service rejected the code or could not review it
pub const INVALID_INPUT: i32 = 2; // Local validation, usage, or config error
pub const TRANSIENT: i32 = 3; // Timed out or service unreachable
pub const UNHEALTHY: i32 = 4; // Health check reported unhealthy

/// Exit code for a classified dispatch failure.
pub fn for_status(status: u16) -> i32 {
    match status {
        408 | 503 => TRANSIENT,
        _ => REVIEW_FAILED,
    }
}

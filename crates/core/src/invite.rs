//! Workspace invite-code generation.
//!
//! An invite code is a capability secret: knowing it is sufficient to
//! join the workspace it belongs to, so codes must carry enough
//! entropy to make brute-force guessing infeasible. Codes are only
//! ever replaced wholesale via the reset operation.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Default invite-code length. Alphanumeric at this length gives
/// 62^8 (~2.2e14) possible codes.
pub const INVITE_CODE_LENGTH: usize = 8;

/// Generate a URL-safe random invite code of the given length.
pub fn generate_invite_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

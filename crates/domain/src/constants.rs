//! Shared constants
//!
//! Storage keys and wire-level literals the portal backend and the
//! persisted session contract agree on. The key names are part of the
//! storage contract and must not change.

/// Credential-store key holding the bearer access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Credential-store key holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Credential-store key holding the serialized current-user snapshot
pub const USER_KEY: &str = "user";

/// Literal message the backend returns from login/signup when the account
/// email has not been verified yet. Matching it exactly is part of the
/// login contract: the session must not be persisted in this case.
pub const EMAIL_NOT_VERIFIED_MESSAGE: &str =
    "Your email is not verified. A new verification OTP has been sent to your email.";

/// Query-string value requesting the unpaginated appointment list
pub const APPOINTMENT_COUNT_ALL: &str = "all";

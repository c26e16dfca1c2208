//! Conveniences for working against the public sandbox.

use crate::error::ApiError;
use crate::session::Session;

/// Base URL of the sandbox instance. Data there is periodically wiped.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.tagstore.io";

/// Username and password of the shared sandbox account.
pub const SANDBOX_CREDENTIALS: (&str, &str) = ("test", "test");

/// A session logged into the sandbox with the shared test account.
pub fn sandbox_session() -> Result<Session, ApiError> {
    let mut session = Session::new(SANDBOX_BASE_URL)?;
    let (username, password) = SANDBOX_CREDENTIALS;
    session.login(username, password);
    Ok(session)
}

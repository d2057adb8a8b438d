use rouille::Request;
use thiserror::Error;

use crate::domain::token::TokenAuthority;

pub const TOKEN_PARAM: &str = "token";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("missing token")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,
}

/// Gate run before routing: absent token first, then a wrong one.
pub fn authenticate(request: &Request, authority: &TokenAuthority) -> Result<(), AuthRejection> {
    let token = request
        .get_param(TOKEN_PARAM)
        .ok_or(AuthRejection::MissingToken)?;

    if !authority.validate(&token) {
        return Err(AuthRejection::InvalidToken);
    }
    Ok(())
}

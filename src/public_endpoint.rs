use std::fmt::Display;

use crate::{config::Scheme, domain::token::AccessToken};

/// How the client reached us: used only to build absolute URLs back to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub scheme: Scheme,
    pub hostname: String,
    /// Public port to print in URLs. Not necessarily the port we listen on.
    pub port: Option<u16>,
    pub base_path: String,
}

impl RequestContext {
    pub fn track_url(&self, track_ref: impl Display, token: &AccessToken) -> String {
        build_track_url(
            self.scheme,
            &self.hostname,
            self.port,
            &self.base_path,
            track_ref,
            token,
        )
    }
}

/// returns url players fetch a single track from
///
/// `scheme://hostname[:port]base_path/tracks/track_ref?token=token`, nothing is escaped
/// or validated.
pub fn build_track_url(
    scheme: Scheme,
    hostname: &str,
    port: Option<u16>,
    base_path: &str,
    track_ref: impl Display,
    token: &AccessToken,
) -> String {
    let scheme = scheme.as_str();
    let token = token.as_str();
    match port {
        Some(port) => format!("{scheme}://{hostname}:{port}{base_path}/tracks/{track_ref}?token={token}"),
        None => format!("{scheme}://{hostname}{base_path}/tracks/{track_ref}?token={token}"),
    }
}

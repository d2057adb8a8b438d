use rouille::Request;

use crate::{
    config::{Config, Scheme},
    public_endpoint::RequestContext,
};

const FALLBACK_HOSTNAME: &str = "localhost";

/// Collects what the URL builder needs from an incoming request.
pub fn request_context(request: &Request, config: &Config) -> RequestContext {
    let scheme = if request.is_secure() {
        Scheme::Https
    } else {
        Scheme::Http
    };

    let hostname = request
        .header("Host")
        .map(hostname_from_host_header)
        .filter(|h| !h.is_empty())
        .unwrap_or(FALLBACK_HOSTNAME)
        .to_string();

    RequestContext {
        scheme,
        hostname,
        port: config.port_in_url(scheme),
        base_path: config.app_base_path.clone(),
    }
}

/// Strips the port from a `Host` header value, keeping `[v6]` literals whole.
fn hostname_from_host_header(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.rsplit_once(':').map_or(host, |(name, _port)| name)
}

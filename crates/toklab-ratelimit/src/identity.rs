//! Client key extraction

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use axum::extract::ConnectInfo;
use axum::http::HeaderMap;
use http::Extensions;

/// Key used when the peer address is not known
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Strategy for identifying the client behind a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientIdentity {
    /// The immediate TCP peer. Every client behind a shared proxy or NAT
    /// shares one window.
    #[default]
    Peer,
    /// First `X-Forwarded-For` hop, then `X-Real-IP`, then the peer.
    /// Only safe behind a proxy that overwrites these headers.
    Forwarded,
}

impl ClientIdentity {
    pub fn client_key(&self, headers: &HeaderMap, extensions: &Extensions) -> String {
        if *self == ClientIdentity::Forwarded {
            if let Some(address) = forwarded_address(headers) {
                return address;
            }
        }

        extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
    }
}

fn forwarded_address(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    header("x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| header("x-real-ip"))
        .map(str::to_string)
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientIdentity::Peer => write!(f, "peer"),
            ClientIdentity::Forwarded => write!(f, "forwarded"),
        }
    }
}

impl FromStr for ClientIdentity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "peer" => Ok(ClientIdentity::Peer),
            "forwarded" => Ok(ClientIdentity::Forwarded),
            other => Err(format!(
                "unknown client identity '{}', expected 'peer' or 'forwarded'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer_extensions(addr: &str) -> Extensions {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(addr.parse::<SocketAddr>().unwrap()));
        extensions
    }

    #[test]
    fn test_peer_identity_uses_ip_only() {
        let key = ClientIdentity::Peer
            .client_key(&HeaderMap::new(), &peer_extensions("10.0.0.7:51234"));
        assert_eq!(key, "10.0.0.7");
    }

    #[test]
    fn test_peer_identity_ignores_forwarded_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));

        let key = ClientIdentity::Peer.client_key(&headers, &peer_extensions("10.0.0.7:1"));
        assert_eq!(key, "10.0.0.7");
    }

    #[test]
    fn test_forwarded_identity_uses_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static(" 203.0.113.9 , 10.0.0.1"),
        );

        let key = ClientIdentity::Forwarded.client_key(&headers, &peer_extensions("10.0.0.7:1"));
        assert_eq!(key, "203.0.113.9");
    }

    #[test]
    fn test_forwarded_identity_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        let key = ClientIdentity::Forwarded.client_key(&headers, &peer_extensions("10.0.0.7:1"));
        assert_eq!(key, "198.51.100.4");

        let key = ClientIdentity::Forwarded
            .client_key(&HeaderMap::new(), &peer_extensions("10.0.0.7:1"));
        assert_eq!(key, "10.0.0.7");
    }

    #[test]
    fn test_missing_peer_is_unknown() {
        let key = ClientIdentity::Peer.client_key(&HeaderMap::new(), &Extensions::new());
        assert_eq!(key, UNKNOWN_CLIENT);
    }

    #[test]
    fn test_parse_identity() {
        assert_eq!("peer".parse::<ClientIdentity>(), Ok(ClientIdentity::Peer));
        assert_eq!("Forwarded".parse::<ClientIdentity>(), Ok(ClientIdentity::Forwarded));
        assert!("proxy".parse::<ClientIdentity>().is_err());
        assert_eq!(ClientIdentity::Forwarded.to_string(), "forwarded");
    }
}

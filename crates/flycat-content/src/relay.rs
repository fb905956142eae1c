use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::{Host, Url};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayUrlError {
    #[error("relay url must start with ws:// or wss://")]
    UnsupportedScheme,
    #[error("relay url contains illegal character {ch:?} at byte {index}")]
    IllegalCharacter { ch: char, index: usize },
    #[error("relay url has no valid domain name: {0}")]
    InvalidDomain(String),
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayUrlPolicy {
    /// Also require a DNS host name. Off by default so private relays
    /// reachable by IP or single-label host keep working.
    pub require_domain: bool,
}

fn domain_regex() -> &'static Regex {
    static DOMAIN_RE: OnceLock<Regex> = OnceLock::new();
    DOMAIN_RE.get_or_init(|| {
        Regex::new(r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$")
            .expect("valid domain regex")
    })
}

fn is_illegal(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(ch, '\u{FEFF}' | '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}')
}

pub fn check_relay_url(url: &str, policy: &RelayUrlPolicy) -> Result<(), RelayUrlError> {
    if !url.starts_with("wss://") && !url.starts_with("ws://") {
        return Err(RelayUrlError::UnsupportedScheme);
    }
    if let Some((index, ch)) = url.char_indices().find(|(_, ch)| is_illegal(*ch)) {
        return Err(RelayUrlError::IllegalCharacter { ch, index });
    }
    if policy.require_domain {
        let parsed = Url::parse(url).map_err(|e| RelayUrlError::InvalidDomain(e.to_string()))?;
        match parsed.host() {
            Some(Host::Domain(domain)) if domain_regex().is_match(domain) => {}
            other => {
                let host = other.map(|h| h.to_string()).unwrap_or_default();
                tracing::warn!(url, host = %host, "rejecting relay url without a domain name");
                return Err(RelayUrlError::InvalidDomain(host));
            }
        }
    }
    Ok(())
}

/// Cheap sanity check for relay URLs typed into the relay manager.
pub fn is_valid_wss_url(url: &str) -> bool {
    check_relay_url(url, &RelayUrlPolicy::default()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ws_and_wss() {
        assert!(is_valid_wss_url("wss://relay.example.com"));
        assert!(is_valid_wss_url("ws://localhost:7777"));
        assert!(is_valid_wss_url("wss://192.168.1.10/nostr"));
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(!is_valid_wss_url("http://x"));
        assert!(!is_valid_wss_url("relay.example.com"));
        assert_eq!(
            check_relay_url("https://relay.example.com", &RelayUrlPolicy::default()),
            Err(RelayUrlError::UnsupportedScheme)
        );
    }

    #[test]
    fn rejects_whitespace_and_control_characters() {
        assert!(!is_valid_wss_url("wss://bad url"));
        assert!(!is_valid_wss_url("wss://relay.example.com\n"));
        assert!(!is_valid_wss_url("wss://relay\u{0085}.example.com"));
        assert!(!is_valid_wss_url("wss://a\u{FEFF}b.com"));
        assert_eq!(
            check_relay_url("wss://a\tb", &RelayUrlPolicy::default()),
            Err(RelayUrlError::IllegalCharacter { ch: '\t', index: 7 })
        );
    }

    #[test]
    fn strict_policy_requires_domain() {
        let strict = RelayUrlPolicy {
            require_domain: true,
        };
        assert!(check_relay_url("wss://relay.damus.io", &strict).is_ok());
        assert!(check_relay_url("wss://nos.lol/", &strict).is_ok());
        assert!(matches!(
            check_relay_url("ws://localhost:7777", &strict),
            Err(RelayUrlError::InvalidDomain(_))
        ));
        assert!(matches!(
            check_relay_url("wss://10.0.0.1", &strict),
            Err(RelayUrlError::InvalidDomain(_))
        ));
    }
}

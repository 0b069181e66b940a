//! Validated announce parameters (spec §4.4), built from a [`Target`].

use std::net::Ipv4Addr;

use super::query::Target;
use crate::primitives::{InfoHash, PeerId};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnnounceError {
    #[error("missing required parameter `{0}`")]
    Missing(&'static str),
    #[error("`{0}` is not a valid non-negative integer")]
    NotANumber(&'static str),
    #[error("port out of range")]
    PortOutOfRange,
    #[error("unknown event value")]
    UnknownEvent,
    #[error("info_hash or peer_id exceeds 60 bytes")]
    IdentifierTooLong,
    #[error("neither compact nor no_peer_id was present")]
    NoReplyFormatSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Started,
    Completed,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    Compact,
    DictionaryList,
}

#[derive(Debug)]
pub struct AnnounceRequest {
    pub info_hash: InfoHash,
    pub peer_id: PeerId,
    pub port: u16,
    pub uploaded: u64,
    pub downloaded: u64,
    pub left: u64,
    pub event: Option<Event>,
    pub ip_override: Option<IpOverride>,
    pub format: ReplyFormat,
}

/// The raw `ip` parameter, not yet resolved — a dotted-quad literal is used
/// verbatim, anything else requires a DNS lookup the announce handler
/// performs (spec §4.4; a suspension point, per spec §5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpOverride {
    Literal(Ipv4Addr),
    Hostname(String),
}

fn required_number(target: &Target, name: &'static str) -> Result<u64, AnnounceError> {
    let raw = target.get(name.as_bytes()).ok_or(AnnounceError::Missing(name))?;
    let text = std::str::from_utf8(raw).map_err(|_| AnnounceError::NotANumber(name))?;
    text.parse().map_err(|_| AnnounceError::NotANumber(name))
}

impl AnnounceRequest {
    pub fn parse(target: &Target) -> Result<Self, AnnounceError> {
        let info_hash_raw = target.get(b"info_hash").ok_or(AnnounceError::Missing("info_hash"))?;
        let peer_id_raw = target.get(b"peer_id").ok_or(AnnounceError::Missing("peer_id"))?;
        let info_hash = InfoHash::new(info_hash_raw).map_err(|_| AnnounceError::IdentifierTooLong)?;
        let peer_id = PeerId::new(peer_id_raw).map_err(|_| AnnounceError::IdentifierTooLong)?;

        let port = required_number(target, "port")?;
        #[allow(clippy::cast_possible_truncation)]
        let port: u16 = match port {
            1..=65535 => port as u16,
            _ => return Err(AnnounceError::PortOutOfRange),
        };

        let uploaded = required_number(target, "uploaded")?;
        let downloaded = required_number(target, "downloaded")?;
        let left = required_number(target, "left")?;

        let event = match target.get(b"event") {
            None => None,
            Some(b"started") => Some(Event::Started),
            Some(b"completed") => Some(Event::Completed),
            Some(b"stopped") => Some(Event::Stopped),
            Some(_) => return Err(AnnounceError::UnknownEvent),
        };

        let ip_override = target.get(b"ip").and_then(|raw| std::str::from_utf8(raw).ok()).map(|s| match s.parse::<Ipv4Addr>() {
            Ok(ip) => IpOverride::Literal(ip),
            Err(_) => IpOverride::Hostname(s.to_owned()),
        });

        let format = if target.has(b"compact") {
            ReplyFormat::Compact
        } else if target.has(b"no_peer_id") {
            ReplyFormat::DictionaryList
        } else {
            return Err(AnnounceError::NoReplyFormatSelected);
        };

        Ok(Self {
            info_hash,
            peer_id,
            port,
            uploaded,
            downloaded,
            left,
            event,
            ip_override,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(raw: &'static str) -> Target {
        Target::parse(raw.as_bytes()).unwrap().unwrap()
    }

    #[test]
    fn missing_required_parameter_fails() {
        let t = target("/announce.php?info_hash=H&peer_id=P&port=1");
        assert_eq!(AnnounceRequest::parse(&t), Err(AnnounceError::Missing("uploaded")));
    }

    #[test]
    fn port_zero_and_port_65536_are_both_out_of_range() {
        let t = target("/announce.php?info_hash=H&peer_id=P&port=0&uploaded=0&downloaded=0&left=0&compact=1");
        assert_eq!(AnnounceRequest::parse(&t), Err(AnnounceError::PortOutOfRange));

        let t = target("/announce.php?info_hash=H&peer_id=P&port=65536&uploaded=0&downloaded=0&left=0&compact=1");
        assert_eq!(AnnounceRequest::parse(&t), Err(AnnounceError::PortOutOfRange));
    }

    #[test]
    fn port_one_and_port_65535_succeed() {
        let t = target("/announce.php?info_hash=H&peer_id=P&port=1&uploaded=0&downloaded=0&left=0&compact=1");
        assert_eq!(AnnounceRequest::parse(&t).unwrap().port, 1);

        let t = target("/announce.php?info_hash=H&peer_id=P&port=65535&uploaded=0&downloaded=0&left=0&compact=1");
        assert_eq!(AnnounceRequest::parse(&t).unwrap().port, 65535);
    }

    #[test]
    fn missing_reply_format_fails() {
        let t = target("/announce.php?info_hash=H&peer_id=P&port=1&uploaded=0&downloaded=0&left=0");
        assert_eq!(AnnounceRequest::parse(&t), Err(AnnounceError::NoReplyFormatSelected));
    }

    #[test]
    fn unknown_event_fails() {
        let t = target("/announce.php?info_hash=H&peer_id=P&port=1&uploaded=0&downloaded=0&left=0&compact=1&event=paused");
        assert_eq!(AnnounceRequest::parse(&t), Err(AnnounceError::UnknownEvent));
    }

    #[test]
    fn ip_override_accepts_a_dotted_quad_literal_verbatim() {
        let t = target("/announce.php?info_hash=H&peer_id=P&port=1&uploaded=0&downloaded=0&left=0&compact=1&ip=203.0.113.5");
        assert_eq!(
            AnnounceRequest::parse(&t).unwrap().ip_override,
            Some(IpOverride::Literal(Ipv4Addr::new(203, 0, 113, 5)))
        );
    }

    #[test]
    fn ip_override_treats_non_dotted_quad_as_a_hostname_to_resolve() {
        let t = target("/announce.php?info_hash=H&peer_id=P&port=1&uploaded=0&downloaded=0&left=0&compact=1&ip=tracker.example.com");
        assert_eq!(
            AnnounceRequest::parse(&t).unwrap().ip_override,
            Some(IpOverride::Hostname("tracker.example.com".to_owned()))
        );
    }

    #[test]
    fn negative_numbers_fail_as_not_a_number() {
        let t = target("/announce.php?info_hash=H&peer_id=P&port=1&uploaded=-1&downloaded=0&left=0&compact=1");
        assert_eq!(AnnounceRequest::parse(&t), Err(AnnounceError::NotANumber("uploaded")));
    }
}

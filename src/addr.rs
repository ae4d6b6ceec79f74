use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use combine::{optional, token, Parser};

use crate::parser::{not_sp, not_sp_slash, number, parse_all, sp};
use crate::FieldError;

/// `<nettype>` of `o=` and `c=` lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NetType {
    /// `IN`, the internet. The only one defined by RFC 4566.
    #[default]
    Internet,
    /// Any other token, kept verbatim.
    Unknown(String),
}

impl NetType {
    fn from_token(s: &str) -> Self {
        match s {
            "IN" => NetType::Internet,
            _ => NetType::Unknown(s.to_string()),
        }
    }
}

impl fmt::Display for NetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetType::Internet => write!(f, "IN"),
            NetType::Unknown(v) => write!(f, "{v}"),
        }
    }
}

/// `<addrtype>` of `o=` and `c=` lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddrType {
    /// `IP4`
    Ip4,
    /// `IP6`
    Ip6,
    /// Any other token, kept verbatim.
    Unknown(String),
}

impl AddrType {
    /// The address type matching an address. Host names are assumed `IP4`.
    pub fn for_address(address: &Address) -> Self {
        match address {
            Address::Ip(IpAddr::V6(_)) => AddrType::Ip6,
            _ => AddrType::Ip4,
        }
    }

    fn from_token(s: &str) -> Self {
        match s {
            "IP4" => AddrType::Ip4,
            "IP6" => AddrType::Ip6,
            _ => AddrType::Unknown(s.to_string()),
        }
    }
}

impl fmt::Display for AddrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddrType::Ip4 => write!(f, "IP4"),
            AddrType::Ip6 => write!(f, "IP6"),
            AddrType::Unknown(v) => write!(f, "{v}"),
        }
    }
}

/// An address in `o=` or `c=`. Either an IP literal or a host name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    /// Literal IP address, compared in its canonical form.
    Ip(IpAddr),
    /// Fully qualified domain name, or anything else that isn't an IP.
    Host(String),
}

impl Address {
    /// Parse an address. Anything that isn't an IP literal is a host name.
    pub fn parse(s: &str) -> Self {
        match s.parse::<IpAddr>() {
            Ok(ip) => Address::Ip(ip),
            Err(_) => Address::Host(s.to_string()),
        }
    }

    /// The IP, if this is a literal.
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Address::Ip(ip) => Some(*ip),
            Address::Host(_) => None,
        }
    }

    /// Whether this is a multicast IP literal.
    pub fn is_multicast(&self) -> bool {
        self.ip().map(|ip| ip.is_multicast()).unwrap_or(false)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Ip(ip) => write!(f, "{ip}"),
            Address::Host(h) => write!(f, "{h}"),
        }
    }
}

impl From<IpAddr> for Address {
    fn from(v: IpAddr) -> Self {
        Address::Ip(v)
    }
}

impl From<Ipv4Addr> for Address {
    fn from(v: Ipv4Addr) -> Self {
        Address::Ip(v.into())
    }
}

impl From<[u8; 4]> for Address {
    fn from(v: [u8; 4]) -> Self {
        Address::Ip(v.into())
    }
}

impl From<Ipv6Addr> for Address {
    fn from(v: Ipv6Addr) -> Self {
        Address::Ip(v.into())
    }
}

/// Connection data from a `c=` line.
///
/// `c=<nettype> <addrtype> <connection-address>`, where the address for
/// IPv4 multicast may carry a TTL and an address count
/// (`224.2.1.1/127/3`), and for IPv6 multicast an address count
/// (`FF15::101/3`).
///
/// Two connections are equal when address and TTL are. IP addresses
/// compare in their parsed form, so `2001:db8::1` equals
/// `2001:db8:0:0:0:0:0:1`. Type tokens and the address count are ignored.
#[derive(Debug, Clone)]
pub struct ConnectionData {
    /// Network type, `IN`.
    pub net_type: NetType,
    /// Address type, `IP4` or `IP6`.
    pub addr_type: AddrType,
    /// The connection address.
    pub address: Address,
    /// Multicast TTL, IPv4 only.
    pub ttl: Option<u8>,
    /// Number of contiguous multicast addresses.
    ///
    /// For IPv4 this is only encoded when `ttl` is also set.
    pub count: Option<u32>,
}

impl ConnectionData {
    /// Connection data for an address, `IN` and `IP4`/`IP6` derived from it.
    pub fn new(address: impl Into<Address>) -> Self {
        let address = address.into();
        ConnectionData {
            net_type: NetType::Internet,
            addr_type: AddrType::for_address(&address),
            address,
            ttl: None,
            count: None,
        }
    }

    /// Set the multicast TTL.
    pub fn with_ttl(mut self, ttl: u8) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set the multicast address count.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Decode the value of a `c=` line.
    pub fn decode(s: &str) -> Result<ConnectionData, FieldError> {
        let malformed = || FieldError::MalformedAddress(s.to_string());

        let suffix = || optional((token('/'), number::<_, u32>()).map(|(_, n)| n));

        let (net_type, _, addr_type, _, address, first, second) = parse_all(
            (
                not_sp(),
                sp(),
                not_sp(),
                sp(),
                not_sp_slash(),
                suffix(),
                suffix(),
            ),
            s,
        )
        .map_err(|_| malformed())?;

        let addr_type = AddrType::from_token(&addr_type);

        let (ttl, count) = match addr_type {
            // RFC 4566 5.7: IPv6 has no TTL, a single suffix is the count.
            AddrType::Ip6 => {
                if second.is_some() {
                    return Err(malformed());
                }
                (None, first)
            }
            _ => {
                let ttl = first
                    .map(|v| u8::try_from(v).map_err(|_| malformed()))
                    .transpose()?;
                (ttl, second)
            }
        };

        Ok(ConnectionData {
            net_type: NetType::from_token(&net_type),
            addr_type,
            address: Address::parse(&address),
            ttl,
            count,
        })
    }
}

impl PartialEq for ConnectionData {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address && self.ttl == other.ttl
    }
}

impl Eq for ConnectionData {}

impl Hash for ConnectionData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
        self.ttl.hash(state);
    }
}

impl fmt::Display for ConnectionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.net_type, self.addr_type, self.address)?;
        match self.addr_type {
            AddrType::Ip6 => {
                if let Some(count) = self.count {
                    write!(f, "/{count}")?;
                }
            }
            _ => {
                if let Some(ttl) = self.ttl {
                    write!(f, "/{ttl}")?;
                    if let Some(count) = self.count {
                        write!(f, "/{count}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Session originator from the `o=` line.
///
/// `o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    /// Login on the originating host, `-` if not supported.
    pub username: String,
    /// Globally unique session id.
    pub session_id: u64,
    /// Version of this session description.
    pub session_version: u64,
    /// Network type, `IN`.
    pub net_type: NetType,
    /// Address type, `IP4` or `IP6`.
    pub addr_type: AddrType,
    /// Address of the originating host.
    pub address: Address,
}

impl Origin {
    /// Origin with `IN` and `IP4`/`IP6` derived from the address.
    pub fn new(
        username: impl Into<String>,
        session_id: u64,
        session_version: u64,
        address: impl Into<Address>,
    ) -> Self {
        let address = address.into();
        Origin {
            username: username.into(),
            session_id,
            session_version,
            net_type: NetType::Internet,
            addr_type: AddrType::for_address(&address),
            address,
        }
    }

    /// Decode the value of an `o=` line.
    pub fn decode(s: &str) -> Result<Origin, FieldError> {
        parse_all(
            (
                not_sp(),
                sp(),
                number::<_, u64>(),
                sp(),
                number::<_, u64>(),
                sp(),
                not_sp(),
                sp(),
                not_sp(),
                sp(),
                not_sp(),
            ),
            s,
        )
        .map(
            |(username, _, session_id, _, session_version, _, net_type, _, addr_type, _, address)| {
                Origin {
                    username,
                    session_id,
                    session_version,
                    net_type: NetType::from_token(&net_type),
                    addr_type: AddrType::from_token(&addr_type),
                    address: Address::parse(&address),
                }
            },
        )
        .map_err(|_| FieldError::MalformedOrigin(s.to_string()))
    }
}

impl Default for Origin {
    fn default() -> Self {
        Origin::new("-", 0, 0, Ipv4Addr::UNSPECIFIED)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.username,
            self.session_id,
            self.session_version,
            self.net_type,
            self.addr_type,
            self.address
        )
    }
}

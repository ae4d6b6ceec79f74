//! A Sans I/O Session Description Protocol (SDP) codec in Rust.
//!
//! SDP ([RFC 4566][rfc]) is the text format SIP, WebRTC and RTSP use to
//! negotiate multimedia sessions. This crate turns the bytes of such a
//! description into a structured [`Message`], and a `Message` back into
//! canonical bytes. It does no network talking and has no internal threads
//! or async tasks.
//!
//! # Usage
//!
//! Decoding happens in two steps. [`Session::decode()`] splits the input in
//! lines, and a [`Decoder`] interprets them.
//!
//! ```
//! use str0m_sdp::{BandwidthType, Decoder, Session};
//!
//! let input = b"v=0\r\n\
//!     o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5\r\n\
//!     s=SDP Seminar\r\n\
//!     c=IN IP4 224.2.17.12/127\r\n\
//!     b=CT:154798\r\n\
//!     t=2873397496 2873404696\r\n\
//!     a=recvonly\r\n\
//!     m=audio 49170 RTP/AVP 0\r\n\
//!     m=video 51372 RTP/AVP 99\r\n\
//!     a=rtpmap:99 h263-1998/90000\r\n";
//!
//! let session = Session::decode(input).unwrap();
//! let msg = Decoder::default().decode(&session).unwrap();
//!
//! assert!(msg.flag("recvonly"));
//! assert_eq!(msg.bandwidths.get(&BandwidthType::ConferenceTotal), Some(154798));
//! assert_eq!(msg.medias[1].attribute("rtpmap"), Some("99 h263-1998/90000"));
//! ```
//!
//! Encoding goes the other way. [`Message::append()`] produces the lines,
//! and [`Session::append_to()`] writes them to a buffer.
//!
//! ```
//! # use str0m_sdp::{Message, Session};
//! # let msg: Message = "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\n".parse().unwrap();
//! let mut buf = Vec::new();
//! msg.append(Session::new()).append_to(&mut buf);
//! ```
//!
//! For the common case, [`Message`] implements [`FromStr`][std::str::FromStr]
//! and [`Display`][std::fmt::Display] doing both steps at once.
//!
//! ## Canonical form
//!
//! Encoding only depends on the decoded values. Several fields have more
//! than one textual form, such as the interval `86400` which is also `1d`,
//! and the encoder always picks the same one. Decoding arbitrary input and
//! encoding it again therefore doesn't necessarily give back the same bytes,
//! but encoding is stable: decoding canonical output and encoding it gives
//! identical bytes.
//!
//! ## Untrusted input
//!
//! SDP usually comes from a remote peer. Decoding never panics, does a
//! single pass over the lines, and the work for each line is bounded by its
//! length. The first bad line fails the decode with an [`SdpError`] that
//! says which line and why.
//!
//! ## Logging
//!
//! The crate logs using [`tracing`][tracing]. Personal data such as the
//! origin address is redacted from debug logs with the `pii` feature.
//!
//! [rfc]:     https://www.rfc-editor.org/rfc/rfc4566
//! [tracing]: https://docs.rs/tracing

#![forbid(unsafe_code)]
#![allow(clippy::new_without_default)]
#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod addr;
pub use addr::{AddrType, Address, ConnectionData, NetType, Origin};

mod attributes;
pub use attributes::{Attribute, Attributes};

mod bandwidth;
pub use bandwidth::{BandwidthType, Bandwidths};

mod config;
pub use config::DecoderConfig;

mod decoder;
pub use decoder::Decoder;

mod encoder;

mod error;
pub use error::{FieldError, SdpError};

mod interval;
pub use interval::Interval;

mod message;
pub use message::{Encryption, Media, MediaDescription, MediaType, Message};
pub use message::{Repeat, TimeZone, Timing};

mod ntp;
pub use ntp::{ntp_to_time, time_to_ntp, NtpTimeExt};

mod parser;

mod ser;

mod session;
pub use session::{Line, Session};

mod util;

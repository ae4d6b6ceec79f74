mod common;
use common::{init_log, FULL, WEBRTC};

use std::net::Ipv4Addr;

use str0m_sdp::{ntp_to_time, BandwidthType, ConnectionData, Decoder, DecoderConfig};
use str0m_sdp::{Encryption, FieldError, Interval, MediaDescription, MediaType, Origin};
use str0m_sdp::{SdpError, Session, TimeZone};

#[test]
pub fn decode_full() {
    init_log();

    let session = Session::decode(FULL).unwrap();
    let m = Decoder::default().decode(&session).unwrap();

    assert_eq!(m.version, 0);
    assert!(m.flag("recvonly"));
    assert_eq!(m.medias.len(), 2);
    assert_eq!(
        m.medias[1].attributes.value("rtpmap"),
        Some("99 h263-1998/90000")
    );
    assert_eq!(
        m.bandwidths.get(&BandwidthType::ConferenceTotal),
        Some(154798)
    );

    assert_eq!(m.encryption, Some(Encryption::clear("ab8c4df8b8f4as8v8iuy8re")));
    assert_eq!(m.medias[0].encryption, None);
    assert_eq!(m.medias[1].encryption, Some(Encryption::prompt()));

    assert_eq!(m.start(), ntp_to_time(2873397496).unwrap());
    assert_eq!(m.end(), ntp_to_time(2873404696).unwrap());

    let repeat = &m.timing[0].repeats[0];
    assert_eq!(repeat.interval, Interval::from_days(7));
    assert_eq!(repeat.active, Interval::from_hours(1));
    assert_eq!(repeat.offsets, vec![Interval::ZERO, Interval::from_hours(25)]);

    assert_eq!(
        m.connection,
        Some(ConnectionData::new(Ipv4Addr::new(224, 2, 17, 12)).with_ttl(127))
    );
    assert_eq!(
        m.origin,
        Origin::new("jdoe", 2890844526, 2890842807, Ipv4Addr::new(10, 47, 16, 5))
    );

    assert_eq!(m.name, "SDP Seminar");
    assert_eq!(
        m.info.as_deref(),
        Some("A Seminar on the session description protocol")
    );
    assert_eq!(m.uri.as_deref(), Some("http://www.example.com/seminars/sdp.pdf"));
    assert_eq!(m.email.as_deref(), Some("j.doe@example.com (Jane Doe)"));
    assert_eq!(m.phone.as_deref(), Some("+1 617 555-6011"));

    assert_eq!(
        m.tz_adjustments,
        vec![
            TimeZone {
                start: ntp_to_time(2882844526).unwrap(),
                offset: Interval::from_hours(-1),
            },
            TimeZone {
                start: ntp_to_time(2898848070).unwrap(),
                offset: Interval::ZERO,
            },
        ]
    );

    assert_eq!(
        m.medias[0].description,
        MediaDescription::new(MediaType::Audio, 49170, "RTP/AVP", ["0"])
    );
    assert_eq!(
        m.medias[1].description,
        MediaDescription::new(MediaType::Video, 51372, "RTP/AVP", ["99"])
    );
    assert_eq!(m.medias[1].bandwidths.application_specific(), Some(66781));
}

#[test]
pub fn decode_webrtc() {
    init_log();

    let session = Session::decode(WEBRTC).unwrap();
    let m = Decoder::default().decode(&session).unwrap();

    assert_eq!(m.version, 0);
    assert_eq!(m.origin.session_id, 4611731400430051336);
    assert_eq!(m.start(), None);
    assert_eq!(m.end(), None);
    assert_eq!(m.attribute("group"), Some("BUNDLE 0 1 2"));
    assert!(m.flag("extmap-allow-mixed"));

    assert_eq!(m.medias.len(), 3);

    let audio = &m.medias[0];
    assert_eq!(audio.description.formats.len(), 8);
    assert_eq!(audio.attribute("mid"), Some("0"));
    assert_eq!(audio.attributes.values("rtpmap").count(), 8);
    assert_eq!(audio.attributes.values("candidate").count(), 2);
    assert!(audio.flag("rtcp-mux"));
    assert!(audio.attribute("fingerprint").unwrap().starts_with("sha-256 45:AD:5C"));

    let video = &m.medias[1];
    assert_eq!(video.bandwidths.application_specific(), Some(2500));
    let fbs: Vec<_> = video.attributes.values("rtcp-fb").collect();
    assert_eq!(
        fbs,
        vec![
            "96 goog-remb",
            "96 transport-cc",
            "96 ccm fir",
            "96 nack",
            "96 nack pli"
        ]
    );

    let app = &m.medias[2];
    assert_eq!(app.description.media_type, MediaType::Application);
    assert_eq!(app.description.protocol, "UDP/DTLS/SCTP");
    assert_eq!(app.description.formats, vec!["webrtc-datachannel"]);
    assert_eq!(app.attribute("sctp-port"), Some("5000"));
}

#[test]
pub fn decode_webrtc_strict() {
    init_log();

    let session = Session::decode(WEBRTC).unwrap();
    let decoder = DecoderConfig::new()
        .set_strict_order(true)
        .set_ignore_unknown(false)
        .build();
    assert!(decoder.decode(&session).is_ok());
}

#[test]
pub fn decode_lf_only() {
    init_log();

    let lf: Vec<u8> = FULL.iter().copied().filter(|b| *b != b'\r').collect();
    let a = str0m_sdp::Message::decode(&lf).unwrap();
    let b = str0m_sdp::Message::decode(FULL).unwrap();
    assert_eq!(a, b);
}

#[test]
pub fn decode_dangling_repeat() {
    init_log();

    let input = b"v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nr=7d 1h 0 25h\r\n";
    let err = str0m_sdp::Message::decode(input).unwrap_err();
    assert_eq!(err.field(), Some(&FieldError::DanglingRepeat));
}

#[test]
pub fn decode_tokenize_error() {
    init_log();

    let input = b"v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\nnonsense\r\n";
    assert_eq!(
        str0m_sdp::Message::decode(input),
        Err(SdpError::Tokenize { line: 2 })
    );
}

#[test]
pub fn decode_error_reports_first_bad_line() {
    init_log();

    let input = b"v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nb=CT:x\r\nc=IN IP4 10.0.0.1/999\r\n";
    let err = str0m_sdp::Message::decode(input).unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert!(matches!(
        err.field(),
        Some(FieldError::MalformedBandwidth(_))
    ));
}

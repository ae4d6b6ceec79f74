mod common;
use common::{init_log, reencode, FULL, WEBRTC};

use std::net::Ipv4Addr;

use str0m_sdp::{ntp_to_time, BandwidthType, Bandwidths, ConnectionData, Encryption};
use str0m_sdp::{Interval, Media, MediaDescription, MediaType, Message, Origin};
use str0m_sdp::{Repeat, Session, TimeZone, Timing};

fn seminar() -> Message {
    let mut audio = Media::new(MediaDescription::new(
        MediaType::Audio,
        49170,
        "RTP/AVP",
        ["0"],
    ));
    audio.title = Some("audiotitle".into());
    audio.bandwidths = [(BandwidthType::Tias, 96000)].into_iter().collect();
    audio.connection = Some(ConnectionData::new(Ipv4Addr::new(224, 2, 1, 1)).with_ttl(127));

    let mut video = Media::new(MediaDescription::new(
        MediaType::Video,
        51372,
        "RTP/AVP",
        ["99"],
    ));
    video.title = Some("videotitle".into());
    video.bandwidths = [(BandwidthType::ApplicationSpecific, 66781)]
        .into_iter()
        .collect::<Bandwidths>();
    video.encryption = Some(Encryption::prompt());
    video.add_attribute("rtpmap", &["99", "h263-1998/90000"]);

    let mut m = Message {
        origin: Origin::new("jdoe", 2890844526, 2890842807, Ipv4Addr::new(10, 47, 16, 5)),
        name: "SDP Seminar".into(),
        info: Some("A Seminar on the session description protocol".into()),
        uri: Some("http://www.example.com/seminars/sdp.pdf".into()),
        email: Some("j.doe@example.com (Jane Doe)".into()),
        phone: Some("12345".into()),
        connection: Some(ConnectionData::new(Ipv4Addr::new(224, 2, 17, 12)).with_ttl(127)),
        bandwidths: [(BandwidthType::ConferenceTotal, 154798)].into_iter().collect(),
        timing: vec![Timing {
            start: ntp_to_time(2873397496).unwrap(),
            end: ntp_to_time(2873404696).unwrap(),
            repeats: vec![Repeat {
                interval: Interval::from_days(7),
                active: Interval::from_secs(3600),
                offsets: vec![Interval::ZERO, Interval::from_hours(25)],
            }],
        }],
        tz_adjustments: vec![
            TimeZone {
                start: ntp_to_time(2882844526).unwrap(),
                offset: Interval::from_hours(-1),
            },
            TimeZone {
                start: ntp_to_time(2898848070).unwrap(),
                offset: Interval::ZERO,
            },
        ],
        encryption: Some(Encryption::clear("ab8c4df8b8f4as8v8iuy8re")),
        medias: vec![audio, video],
        ..Default::default()
    };
    m.add_flag("recvonly");
    m
}

const SEMINAR: &str = "v=0
o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5
s=SDP Seminar
i=A Seminar on the session description protocol
u=http://www.example.com/seminars/sdp.pdf
e=j.doe@example.com (Jane Doe)
p=12345
c=IN IP4 224.2.17.12/127
b=CT:154798
t=2873397496 2873404696
r=7d 1h 0 25h
z=2882844526 -1h 2898848070 0
k=clear:ab8c4df8b8f4as8v8iuy8re
a=recvonly
m=audio 49170 RTP/AVP 0
i=audiotitle
c=IN IP4 224.2.1.1/127
b=TIAS:96000
m=video 51372 RTP/AVP 99
i=videotitle
b=AS:66781
k=prompt
a=rtpmap:99 h263-1998/90000
";

#[test]
pub fn encode_seminar() {
    init_log();

    let expected = SEMINAR.replace('\n', "\r\n");

    let m = seminar();
    let s = m.append(Session::with_capacity(100));
    let mut buf = Vec::with_capacity(1024);
    s.append_to(&mut buf);

    assert_eq!(String::from_utf8(buf).unwrap(), expected);
    assert_eq!(m.to_string(), expected);
}

#[test]
pub fn encode_seminar_decodes_back() {
    init_log();

    let m = seminar();
    let m2 = Message::decode(&m.to_bytes()).unwrap();
    assert_eq!(m, m2);
}

#[test]
pub fn encode_buffer_reuse() {
    init_log();

    let m = seminar();
    let mut s = Session::with_capacity(100);
    let mut buf = Vec::with_capacity(1024);

    for _ in 0..3 {
        s = m.append(s);
        s.append_to(&mut buf);
        assert_eq!(buf, m.to_bytes());
        s.clear();
        buf.clear();
    }
}

#[test]
pub fn roundtrip_fixtures() {
    init_log();

    assert_eq!(reencode(FULL), FULL);
    assert_eq!(reencode(WEBRTC), WEBRTC);
}

#[test]
pub fn canonicalizes_intervals() {
    init_log();

    let input = b"v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\nr=604800 3600 0 90000\r\n";
    let once = reencode(input);
    assert_eq!(
        once,
        b"v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\nr=7d 1h 0 25h\r\n"
    );
    assert_eq!(reencode(&once), once);
}

#[test]
pub fn canonicalizes_line_endings_and_whitespace() {
    init_log();

    let input = b"v=0\no=- 1 1 IN IP6 2001:db8:0:0:0:0:0:1 \n\ns=x\n";
    let once = reencode(input);
    assert_eq!(once, b"v=0\r\no=- 1 1 IN IP6 2001:db8::1\r\ns=x\r\n");
    assert_eq!(reencode(&once), once);
}

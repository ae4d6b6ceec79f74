#![allow(unused)]
use std::sync::Once;

use str0m_sdp::Message;

pub const FULL: &[u8] = include_bytes!("data/sdp_session_ex_full.sdp");
pub const WEBRTC: &[u8] = include_bytes!("data/sdp_session_ex_webrtc1.sdp");

pub fn init_log() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    static START: Once = Once::new();

    START.call_once(|| {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(env_filter)
            .init();
    });
}

/// Decode and encode again.
pub fn reencode(input: &[u8]) -> Vec<u8> {
    let msg = Message::decode(input).expect("input to decode");
    msg.to_bytes()
}

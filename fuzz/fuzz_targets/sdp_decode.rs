#![no_main]

use libfuzzer_sys::fuzz_target;
use str0m_sdp::Message;

fuzz_target!(|data: &[u8]| {
    let Ok(msg) = Message::decode(data) else {
        return;
    };

    // Canonical output must decode, and encode to the same bytes.
    let once = msg.to_bytes();
    let msg2 = Message::decode(&once).expect("canonical output to decode");
    assert_eq!(msg2.to_bytes(), once);
});

#![no_main]

use libfuzzer_sys::fuzz_target;

use cohort_types::{Address, Digest};

// Parse arbitrary text as addresses and digests.
// Parsing must never panic, and anything accepted must print back to an
// equivalent value.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(addr) = Address::parse(text) {
        assert_eq!(Address::parse(&addr.to_string()).ok(), Some(addr));
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(serde_json::from_str::<Address>(&json).ok(), Some(addr));
    }

    if let Ok(digest) = Digest::from_hex(text) {
        assert_eq!(Digest::from_hex(&digest.to_string()).ok(), Some(digest));
    }

    let _ = serde_json::from_slice::<Address>(data);
});

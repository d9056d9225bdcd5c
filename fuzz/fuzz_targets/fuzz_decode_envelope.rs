#![no_main]

use libfuzzer_sys::fuzz_target;

use serde_json::Value;
use sounds_console::rpc::decode_envelope;
use sounds_console::sounds::{LangCatalog, SoundFile};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    // Any device reply must decode to a value or an error, never a panic.
    if let Ok(payload) = decode_envelope("get_langs", raw) {
        let _ = serde_json::from_value::<LangCatalog>(payload.clone()).map(|c| c.languages());
        let _ = serde_json::from_value::<Vec<String>>(payload)
            .map(|names| names.iter().map(|n| SoundFile::new(n.as_str())).count());
    }
});

//! Fuzz target: stored config blob
//!
//! Feeds arbitrary bytes to the NVS config store and checks:
//! - No panics while decoding or validating
//! - Whatever `load` accepts passes validation and survives a save/load
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartsafe::adapters::nvs::NvsConfigStore;
use smartsafe::app::ports::ConfigPort;

fuzz_target!(|data: &[u8]| {
    let mut store = NvsConfigStore::new().expect("host store");
    store.put_raw(data.to_vec());

    let Ok(cfg) = store.load() else {
        return;
    };
    assert!(cfg.validate().is_ok());

    store.save(&cfg).expect("valid config saves");
    assert_eq!(store.load().expect("reload"), cfg);
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use restyle_ir::config::LoweringConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        // Errors are fine, panics are not
        let _ = LoweringConfig::from_yaml_str(yaml_str);
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use restyle_ir::features::normalization::infrastructure::normalizer::normalize_selector;
use restyle_ir::shared::models::SlotTable;
use restyle_ir::SelectorClassifier;

fuzz_target!(|data: &[u8]| {
    if let Ok(selector) = std::str::from_utf8(data) {
        let classifier = SelectorClassifier::new();
        let _ = classifier.classify(selector, None);
        let _ = classifier.classify(&normalize_selector(selector, &SlotTable::new()), Some("input"));
    }
});

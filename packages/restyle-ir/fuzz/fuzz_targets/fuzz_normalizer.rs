#![no_main]

use libfuzzer_sys::fuzz_target;
use restyle_ir::features::normalization::RawNode;
use restyle_ir::shared::models::{SlotExpr, SlotTable};
use restyle_ir::CssRuleNormalizer;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // First line is the selector, the rest declaration text
    let (selector, body) = text.split_once('\n').unwrap_or(("&", text));
    let slots: SlotTable = [SlotExpr::new("Icon"), SlotExpr::new("p => p.color")].into_iter().collect();
    let nodes = vec![
        RawNode::declaration(body),
        RawNode::rule(selector, vec![RawNode::declaration(body)]),
        RawNode::at_rule("media", selector, vec![RawNode::declaration(body)]),
    ];
    let _ = CssRuleNormalizer::new().normalize(&nodes, &slots);
});

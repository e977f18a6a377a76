#![no_main]
use libfuzzer_sys::fuzz_target;
use rankforge_core::config::GeneratorConfig;
use rankforge_core::documents::{DocumentBuilder, DocumentKind};
use rankforge_core::types::Character;

fuzz_target!(|data: &[u8]| {
    let Ok(character) = serde_json::from_slice::<Character>(data) else {
        return;
    };
    let config = GeneratorConfig::default();
    let builder = DocumentBuilder::new(&config);
    let ranks = character.ranks();
    for stage in 0..=ranks {
        for kind in DocumentKind::ALL {
            if kind.applies_to(stage, ranks) {
                let doc = builder.build(kind, &character, stage);
                let _ = serde_json::to_string_pretty(&doc);
            }
        }
    }
});

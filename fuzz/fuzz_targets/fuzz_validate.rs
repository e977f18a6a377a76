#![no_main]
use libfuzzer_sys::fuzz_target;
use rankforge_core::types::{CharacterName, HexColor};

fuzz_target!(|data: &str| {
    if let Ok(name) = CharacterName::new(data) {
        assert!(!name.as_str().starts_with('_') && !name.as_str().ends_with('_'));
        assert!(name.as_str().chars().all(|c| c.is_ascii_lowercase() || c == '_'));
    }
    if let Ok(color) = HexColor::new(data) {
        assert_eq!(color.as_str().len(), 7);
    }
});

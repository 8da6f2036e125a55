#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must either parse or fail with an error, never panic
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(canonical) = chemprep::smiles::canonicalize(text) {
        // A canonical string must itself be valid
        let _ = chemprep::smiles::canonicalize(&canonical);
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use tablesift_core::query::Parser;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string (ignore invalid UTF-8)
    if let Ok(query) = std::str::from_utf8(data) {
        // Limit query length to prevent timeout
        if query.len() > 10_000 {
            return;
        }

        // Parsing must never panic, and a parsed tree must re-parse from its
        // rendered form without panicking either.
        if let Ok(Some(condition)) = Parser::new(query).parse() {
            let _ = Parser::new(&condition.to_string()).parse();
        }
    }
});

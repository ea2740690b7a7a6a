#![no_main]

use libfuzzer_sys::fuzz_target;
use pycoll::prelude::*;
use pycoll_core::template::parse_template;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parsing must never panic; rendering a parsed template must not either.
        if parse_template(s).is_ok() {
            let text = Text::new(s);
            let _ = text.format(&[Value::Int(7), Value::from("x")], &[("name", Value::Float(1.5))]);
        }
    }
});

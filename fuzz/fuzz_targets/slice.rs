#![no_main]

use libfuzzer_sys::fuzz_target;
use pycoll::prelude::*;
use pycoll_core::strings::str_slice;

fuzz_target!(|input: (String, i64, i64, i64)| {
    let (s, start, end, step) = input;
    let step = Some(step);
    let core = str_slice(&s, Some(start), Some(end), step);
    let text = Text::new(s.as_str()).slice(Some(start), Some(end), step);
    match (core, text) {
        (Ok(a), Ok(b)) => assert_eq!(a, b.as_str()),
        (Err(_), Err(_)) => {}
        _ => panic!("str_slice and Text::slice disagree"),
    }

    let list: List<char> = s.chars().collect();
    if let Ok(sliced) = list.slice(Some(start), Some(end), step) {
        assert!(sliced.len() <= list.len());
    }
});

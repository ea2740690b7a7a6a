//! Checks the `tracing` events containers emit, captured with a `tracing-subscriber` fmt layer.

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use pycoll::prelude::*;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut inner) = self.0.lock() {
            inner.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(filter: &str, f: F) -> String {
    let sink = Capture::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    sink.text()
}

#[test]
fn logging_hooks_emit_one_event_per_write() {
    let out = capture("pycoll=info", || {
        let mut d = UserDict::new(LoggingHooks);
        d.insert("k", 1).unwrap();
        d.remove(&"k").unwrap();

        let mut l = UserList::new(LoggingHooks);
        l.append('x').unwrap();
    });
    assert!(out.contains("userdict write"), "{out}");
    assert!(out.contains("operation=\"set\""), "{out}");
    assert!(out.contains("operation=\"remove\""), "{out}");
    assert!(out.contains("userlist write"), "{out}");
    assert_eq!(out.lines().filter(|l| l.contains("INFO")).count(), 3, "{out}");
}

#[test]
fn default_dict_logs_default_insertion_at_debug() {
    let out = capture("pycoll=debug", || {
        let mut d: DefaultDict<&str, i32> = DefaultDict::new(|| 0);
        *d.get_or_default("a") += 1;
        *d.get_or_default("a") += 1;
    });
    assert_eq!(out.matches("inserting default value").count(), 1, "{out}");
}

#[test]
fn chain_map_logs_misses_at_debug() {
    let out = capture("pycoll=debug", || {
        let cm: ChainMap<&str, i32> = ChainMap::new();
        let _ = cm.get(&"missing");
    });
    assert!(out.contains("key missing from every layer"), "{out}");
}

#[test]
fn rotation_trace_is_filtered_out_at_info() {
    let out = capture("pycoll=info", || {
        let mut d: Deque<i32> = (0..4).collect();
        d.rotate(1);
    });
    assert!(out.is_empty(), "{out}");
}

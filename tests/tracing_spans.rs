//! Integration test verifying that `#[instrument]` annotations and log events
//! are emitted by signing, verification and key binding.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fmt;
use std::sync::{Arc, Mutex};

use jws_cipher::SigningCipher;
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::{layer::SubscriberExt, registry::LookupSpan};

// ---------------------------------------------------------------------------
// Collecting layer — records span names, event messages and event field names
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Collector {
    spans: Arc<Mutex<Vec<String>>>,
    events: Arc<Mutex<Vec<(Level, String)>>>,
    fields: Arc<Mutex<Vec<(String, Vec<&'static str>)>>>,
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<&'static str>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(field.name());
        }
    }
}

impl Collector {
    fn fields_of(&self, message: &str) -> Vec<Vec<&'static str>> {
        self.fields
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|(msg, _)| msg == message)
            .map(|(_, names)| names.clone())
            .collect()
    }
}

impl<S> tracing_subscriber::Layer<S> for Collector
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        _attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if let Some(span) = ctx.span(id) {
            self.spans.lock().expect("lock poisoned").push(span.name().to_owned());
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        self.fields
            .lock()
            .expect("lock poisoned")
            .push((visitor.message.clone(), visitor.fields));
        self.events
            .lock()
            .expect("lock poisoned")
            .push((*event.metadata().level(), visitor.message));
    }
}

fn install() -> (Collector, tracing::subscriber::DefaultGuard) {
    let collector = Collector::default();
    let subscriber = tracing_subscriber::registry().with(collector.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (collector, guard)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn sign_and_verify_create_spans() {
    let (collector, _guard) = install();

    let cipher = SigningCipher::with_secret("0123456789abcdef0123456789abcdef");
    let token = cipher.sign(b"hello").unwrap();
    cipher.verify(&token).unwrap();

    let recorded = collector.spans.lock().expect("lock poisoned");
    for name in ["bind", "sign", "verify"] {
        assert!(
            recorded.iter().any(|s| s == name),
            "expected a '{name}' span, got: {recorded:?}"
        );
    }
}

#[test]
fn successful_verify_logs_at_debug() {
    let (collector, _guard) = install();

    let cipher = SigningCipher::with_secret("0123456789abcdef0123456789abcdef");
    let token = cipher.sign(b"hello").unwrap();
    cipher.verify(&token).unwrap();

    let events = collector.events.lock().expect("lock poisoned");
    assert!(
        events
            .iter()
            .any(|(level, msg)| *level == Level::DEBUG && msg == "token verified"),
        "expected a debug 'token verified' event, got: {events:?}"
    );
    drop(events);
    assert_eq!(collector.fields_of("token verified"), vec![vec!["payload_len"]]);
}

#[test]
fn weak_key_and_rebind_are_logged() {
    let (collector, _guard) = install();

    let mut cipher = SigningCipher::with_secret("short");
    cipher.bind(&"k".repeat(64));

    let events = collector.events.lock().expect("lock poisoned");
    assert!(
        events.iter().any(|(level, msg)| *level == Level::WARN
            && msg == "signing key is shorter than the HS512 hash output"),
        "expected a weak key warning, got: {events:?}"
    );
    assert!(
        events
            .iter()
            .any(|(level, msg)| *level == Level::INFO && msg == "signing key rebound"),
        "expected a rebind event, got: {events:?}"
    );
    let warnings = events.iter().filter(|(level, _)| *level == Level::WARN).count();
    assert_eq!(warnings, 1, "a 64-byte key is not weak");
}

#[test]
fn weak_key_warning_omits_fingerprint() {
    let (collector, _guard) = install();

    let _cipher = SigningCipher::with_secret("short");

    let warnings = collector.fields_of("signing key is shorter than the HS512 hash output");
    assert_eq!(warnings.len(), 1, "expected one weak key warning");
    let names = &warnings[0];
    assert!(names.contains(&"key_len"), "got fields: {names:?}");
    assert!(!names.contains(&"fingerprint"), "got fields: {names:?}");

    let bound = collector.fields_of("signing key bound");
    assert_eq!(bound, vec![vec!["fingerprint"]]);
}

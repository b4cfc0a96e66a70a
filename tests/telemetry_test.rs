//! Integration tests for telemetry initialization and span helpers.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use bookshelf::catalog::Catalog;
use bookshelf::db::Db;
use bookshelf::error::Error;
use bookshelf::telemetry::book::{record_outcome, start_book_span};
use tracing::field::{Field, Visit};
use tracing::span;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt as _};

/// Collects every value recorded into a `book.outcome` span field.
#[derive(Clone, Default)]
struct OutcomeCapture(Arc<Mutex<Vec<String>>>);

impl OutcomeCapture {
    fn outcomes(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl<S: tracing::Subscriber> Layer<S> for OutcomeCapture {
    fn on_record(&self, _id: &span::Id, values: &span::Record<'_>, _ctx: Context<'_, S>) {
        values.record(&mut OutcomeVisitor(&self.0));
    }
}

struct OutcomeVisitor<'a>(&'a Mutex<Vec<String>>);

impl Visit for OutcomeVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "book.outcome" {
            self.0.lock().unwrap().push(value.to_string());
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

#[test]
fn telemetry_initializes_once_without_endpoint() {
    let config = || bookshelf::telemetry::TelemetryConfig {
        endpoint: None,
        service_name: "bookshelf-test".to_string(),
        default_level: "debug".to_string(),
    };

    // Only this test installs a global subscriber in this binary.
    let first = bookshelf::telemetry::init_telemetry(config());
    assert!(first.is_ok());
    let second = bookshelf::telemetry::init_telemetry(config());
    assert!(matches!(second, Err(Error::Other(_))));
}

#[test]
fn book_span_records_success_and_failure() {
    let capture = OutcomeCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let span = start_book_span("add", Some("Dune"));
        record_outcome(&span, "add", Instant::now(), &Ok::<_, Error>(()));

        let span = start_book_span("edit_commit", None);
        let failed: Result<(), Error> = Err(Error::NotFound("Dune".to_string()));
        record_outcome(&span, "edit_commit", Instant::now(), &failed);
    });

    assert_eq!(capture.outcomes(), vec!["ok", "not_found"]);
}

#[tokio::test]
async fn catalog_operations_record_their_outcome() {
    let capture = OutcomeCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let _default = tracing::subscriber::set_default(subscriber);

    let catalog = Catalog::new(Arc::new(Db::in_memory().await.unwrap()));
    catalog
        .add_book(Some("Dune"), Some("Frank Herbert"), Some("95"))
        .await
        .unwrap();
    let _ = catalog
        .add_book(Some("Dune"), Some("Someone"), Some("50"))
        .await;
    let _ = catalog.commit_edit(Some("10"), None).await;

    assert_eq!(
        capture.outcomes(),
        vec!["ok", "duplicate_title", "not_found"]
    );
}

//! Metric instrument factories for bookshelf.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! Without an OTLP endpoint the global provider is a no-op.

use opentelemetry::metrics::{Counter, Histogram, Meter, UpDownCounter};

fn meter() -> Meter {
    opentelemetry::global::meter("bookshelf")
}

/// Counter: catalog operations.
/// Labels: `operation` ("add" | "edit_select" | "edit_commit" | "delete" | "list"),
/// `result` ("ok" | error kind).
pub fn book_operations() -> Counter<u64> {
    meter()
        .u64_counter("bookshelf.book.operations")
        .with_description("Number of catalog operations")
        .build()
}

/// Up/down counter: titles waiting in the pending-edit queue.
pub fn pending_edits_depth() -> UpDownCounter<i64> {
    meter()
        .i64_up_down_counter("bookshelf.pending_edits.depth")
        .with_description("Titles waiting for a rating update")
        .build()
}

/// Histogram: operation duration in milliseconds.
/// Labels: `operation`.
pub fn operation_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("bookshelf.operation.duration_ms")
        .with_description("Catalog operation duration in milliseconds")
        .with_unit("ms")
        .build()
}

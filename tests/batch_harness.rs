//! Batch converter integration harness.
//!
//! # What this covers
//!
//! - **Ordering**: results come back in input order no matter which file
//!   finishes first (paused tokio time drives completion order).
//! - **Isolation**: unreadable and malformed files become per-file errors and
//!   never disturb their siblings.
//! - **Real sources**: paths on disk via `tempfile`, missing paths, and the
//!   session's handling of superseded batches.
//!
//! # Running
//!
//! ```sh
//! cargo test --test batch_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use xmljson_core::{convert_batch, BatchOutput, ConvertOptions, Session};

#[tokio::test(start_paused = true)]
async fn results_follow_input_order_not_completion_order() {
    let files = BatchBuilder::new()
        .file("slow.xml", 300, "<a>slow</a>")
        .file("fast.xml", 10, "<a>fast</a>")
        .file("middle.xml", 100, "<a>middle</a>")
        .build();

    let results = convert_batch(files, ConvertOptions::default()).await.unwrap();

    assert_file_order!(results, ["slow.xml", "fast.xml", "middle.xml"]);
    assert_file_content!(results, 0, "slow");
    assert_file_content!(results, 1, "fast");
    assert_file_content!(results, 2, "middle");
}

#[tokio::test(start_paused = true)]
async fn failures_stay_with_their_own_file() {
    let files = BatchBuilder::new()
        .file("good.xml", 50, "<root><x>1</x></root>")
        .file("broken.xml", 5, "<root>")
        .unreadable("locked.xml", 20)
        .file("also-good.xml", 1, "<root/>")
        .build();

    let results = convert_batch(files, ConvertOptions::default()).await.unwrap();

    assert_file_order!(results, ["good.xml", "broken.xml", "locked.xml", "also-good.xml"]);
    assert_file_content!(results, 0, {"x": "1"});
    assert_file_error!(results, 1, "Invalid XML");
    assert_file_error!(results, 2, "Failed to read file: simulated read failure");
    assert_file_content!(results, 3, {});
}

#[tokio::test]
async fn empty_batch_is_an_empty_array() {
    let results = convert_batch(Vec::<DelayedFile>::new(), ConvertOptions::default())
        .await
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(BatchOutput::from(Ok(results)).to_json(), "[]");
}

#[tokio::test]
async fn files_on_disk_are_read_by_basename() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_fixture(dir.path(), "catalog.xml", CATALOG);
    let b = write_fixture(dir.path(), "feed.xml", RSS);
    let missing = dir.path().join("missing.xml");

    let args = vec![
        a.display().to_string(),
        missing.display().to_string(),
        b.display().to_string(),
    ];
    let results = convert_batch(xmljson_sources::from_args(&args), ConvertOptions::default())
        .await
        .unwrap();

    assert_file_order!(results, ["catalog.xml", "missing.xml", "feed.xml"]);
    assert!(!results[0].is_error());
    let missing_error = results[1].error_message().unwrap();
    assert!(missing_error.starts_with("Failed to read file: "), "{missing_error}");
    assert!(!results[2].is_error());
}

#[tokio::test]
async fn same_path_twice_yields_two_results() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_fixture(dir.path(), "a.xml", "<a>1</a>").display().to_string();
    let results = convert_batch(
        xmljson_sources::from_args(&[a.clone(), a]),
        ConvertOptions::default(),
    )
    .await
    .unwrap();
    assert_file_order!(results, ["a.xml", "a.xml"]);
    assert_eq!(results[0], results[1]);
}

#[tokio::test(start_paused = true)]
async fn batch_finishing_after_reset_is_ignored() {
    let mut session = Session::default();
    let ticket = session.select(vec!["slow.xml".into()]).unwrap();

    let files = BatchBuilder::new().file("slow.xml", 500, "<a/>").build();
    let pending = tokio::spawn(convert_batch(files, ConvertOptions::default()));

    session.reset();
    let output = BatchOutput::from(pending.await.unwrap());

    assert!(!session.complete(ticket, &output));
    assert_eq!(session.output(), None);
    assert!(session.selected().is_empty());
}

#[tokio::test(start_paused = true)]
async fn newer_selection_wins_over_older_batch() {
    let mut session = Session::default();
    let old = session.select(vec!["old.xml".into()]).unwrap();
    let new = session.select(vec!["new.xml".into()]).unwrap();

    let old_run = tokio::spawn(convert_batch(
        BatchBuilder::new().file("old.xml", 200, "<old/>").build(),
        ConvertOptions::default(),
    ));
    let new_run = tokio::spawn(convert_batch(
        BatchBuilder::new().file("new.xml", 10, "<new/>").build(),
        ConvertOptions::default(),
    ));

    let new_output = BatchOutput::from(new_run.await.unwrap());
    assert!(session.complete(new, &new_output));
    let old_output = BatchOutput::from(old_run.await.unwrap());
    assert!(!session.complete(old, &old_output));

    assert_eq!(session.output(), Some(new_output.to_json().as_str()));
}

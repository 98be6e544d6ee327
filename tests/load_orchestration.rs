use std::sync::Mutex;

use user_import::load::{load, recreate_table};
use user_import::pipeline::{process_path, ImportObserver};
use user_import::sink::{MemorySink, RecordSink};
use user_import::types::{BatchDecision, InsertResult, NormalizedRecord};

fn record(email: &str) -> NormalizedRecord {
    NormalizedRecord {
        name: "John".to_string(),
        surname: "Smith".to_string(),
        email: email.to_string(),
    }
}

#[derive(Default)]
struct InsertRecorder {
    events: Mutex<Vec<(String, bool)>>,
}

impl ImportObserver for InsertRecorder {
    fn on_insert(&self, record: &NormalizedRecord, result: &InsertResult) {
        self.events
            .lock()
            .unwrap()
            .push((record.email.clone(), *result == InsertResult::Inserted));
    }
}

#[tokio::test]
async fn loadable_file_loads_every_record_in_order() {
    let (_batch, decision) = process_path("tests/fixtures/users.csv", None).unwrap();
    let records = match decision {
        BatchDecision::Loadable(records) => records,
        other => panic!("expected Loadable, got {other:?}"),
    };

    let sink = MemorySink::new();
    let results = load(&records, &sink, None).await;

    assert_eq!(results, vec![InsertResult::Inserted; 3]);
    let emails: Vec<String> = sink.rows().into_iter().map(|r| r.email).collect();
    assert_eq!(
        emails,
        vec![
            "john@example.com",
            "jane_doe+test@example.com",
            "sam.smith@example.co.uk",
        ]
    );
}

#[tokio::test]
async fn duplicate_email_fails_one_insert_and_continues() {
    let records = vec![
        record("a@example.com"),
        record("a@example.com"),
        record("b@example.com"),
    ];

    let sink = MemorySink::new();
    let obs = InsertRecorder::default();
    let results = load(&records, &sink, Some(&obs)).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0], InsertResult::Inserted);
    assert!(matches!(results[1], InsertResult::Failed(_)));
    assert_eq!(results[2], InsertResult::Inserted);
    assert_eq!(sink.row_count(), 2);

    // Every attempt was reported, including the failed one.
    let events = obs.events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            ("a@example.com".to_string(), true),
            ("a@example.com".to_string(), false),
            ("b@example.com".to_string(), true),
        ]
    );
}

#[tokio::test]
async fn rejected_batch_performs_zero_inserts() {
    let sink = MemorySink::new();
    let (_batch, decision) = process_path("tests/fixtures/users_invalid.csv", None).unwrap();

    // The control flow only ever hands Loadable records to `load`; a rejected
    // batch means the sink is never touched.
    if let BatchDecision::Loadable(records) = decision {
        load(&records, &sink, None).await;
        panic!("fixture was expected to be rejected");
    }

    assert_eq!(sink.row_count(), 0);
}

#[tokio::test]
async fn recreate_table_survives_a_failed_drop() {
    let sink = MemorySink::failing_drops();
    recreate_table(&sink).await.unwrap();

    assert_eq!(
        sink.insert(&record("a@example.com")).await,
        InsertResult::Inserted
    );
}

#[tokio::test]
async fn recreate_table_clears_previous_contents() {
    let sink = MemorySink::new();
    sink.insert(&record("old@example.com")).await;

    recreate_table(&sink).await.unwrap();
    assert_eq!(sink.row_count(), 0);

    // The rebuilt table accepts an email that previously existed.
    assert_eq!(
        sink.insert(&record("old@example.com")).await,
        InsertResult::Inserted
    );
}

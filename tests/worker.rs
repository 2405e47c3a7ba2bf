use std::collections::HashSet;
use std::time::{Duration, Instant};

use powork::logging::{init_logging, LogFormat};
use powork::{
    blake3_factory, digest_factory, hash_factory, outcome_channel, ConfigError, HashError, Proof,
    ProofHasher, SearchError, Worker, WorkerConfig,
};

/// Hashes nothing and never finishes a digest.
struct FailingHasher;

impl ProofHasher for FailingHasher {
    fn reset(&mut self) {}

    fn update(&mut self, _data: &[u8]) -> Result<(), HashError> {
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>, HashError> {
        Err(HashError::Finalize("no output".into()))
    }
}

/// Panics on use.
struct PanickingHasher;

impl ProofHasher for PanickingHasher {
    fn reset(&mut self) {}

    fn update(&mut self, _data: &[u8]) -> Result<(), HashError> {
        panic!("hash backend crashed");
    }

    fn finalize(&mut self) -> Result<Vec<u8>, HashError> {
        Ok(Vec::new())
    }
}

fn easy_worker() -> Worker {
    let mut worker = Worker::new();
    worker.set_difficulty(8).unwrap();
    worker
}

#[test]
fn defaults() {
    let worker = Worker::new();
    assert_eq!(worker.difficulty(), 10);
    assert_eq!(worker.timeout(), Some(Duration::from_millis(5_000)));
    assert_eq!(worker.config(), WorkerConfig::default());
}

#[test]
fn invalid_settings_are_rejected_without_mutation() {
    let mut worker = Worker::new();

    assert_eq!(
        worker.set_difficulty(0),
        Err(ConfigError::InvalidDifficulty(0))
    );
    assert_eq!(worker.difficulty(), 10);

    assert_eq!(worker.set_timeout(-1), Err(ConfigError::InvalidTimeout(-1)));
    assert_eq!(worker.timeout(), Some(Duration::from_millis(5_000)));

    assert_eq!(worker.set_difficulty(12), Ok(()));
    assert_eq!(worker.set_timeout(0), Ok(()));
    assert_eq!(worker.difficulty(), 12);
    assert_eq!(worker.timeout(), None);
}

#[test]
fn sync_search_and_validate() {
    let worker = easy_worker();
    let proof = worker.search("hello").unwrap();

    assert_eq!(proof.message_str(), "hello");
    assert_eq!(worker.validate(&proof), Ok(true));

    let again = worker.search_str("hello").unwrap();
    assert_eq!(again.nonce(), proof.nonce());
}

#[test]
fn validation_depends_on_difficulty() {
    let mut worker = easy_worker();
    let proof = worker.search("raise the bar").unwrap();

    assert_eq!(worker.validate(&proof), Ok(true));

    // an 8-bit proof does not carry 512 zero bits
    worker.set_difficulty(512).unwrap();
    assert_eq!(worker.validate(&proof), Ok(false));
}

#[test]
fn timeout_is_reported() {
    let mut worker = Worker::new();
    worker.set_difficulty(400).unwrap();
    worker.set_timeout(1).unwrap();

    let started = Instant::now();
    let result = worker.search("too hard");
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(matches!(result, Err(SearchError::Timeout { timeout_ms: 1, .. })));
}

#[test]
fn difficulty_above_digest_length() {
    let mut worker = Worker::new();
    worker.set_hash_factory(blake3_factory());
    worker.set_difficulty(257).unwrap();

    assert!(matches!(
        worker.search("x"),
        Err(SearchError::DigestTooShort(_))
    ));
}

#[test]
fn alternative_digest() {
    let mut worker = easy_worker();
    worker.set_hash_factory(digest_factory::<sha2::Sha256>());

    let proof = worker.search("sha256").unwrap();
    assert_eq!(worker.validate(&proof), Ok(true));
}

#[test]
fn blocking_wait_on_handle() {
    let worker = easy_worker();
    let proof = worker.search_async("blocking").wait().unwrap();
    assert_eq!(proof.message(), b"blocking");
    assert_eq!(worker.validate(&proof), Ok(true));
}

#[test]
fn try_outcome_eventually_yields() {
    let worker = easy_worker();
    let mut handle = worker.search_async("polling");

    let deadline = Instant::now() + Duration::from_secs(10);
    let outcome = loop {
        if let Some(outcome) = handle.try_outcome() {
            break outcome;
        }
        assert!(Instant::now() < deadline, "search never finished");
        std::thread::sleep(Duration::from_millis(1));
    };
    assert_eq!(outcome.unwrap().message_str(), "polling");
}

#[tokio::test]
async fn async_searches_keep_their_messages() {
    let worker = easy_worker();
    let messages: Vec<String> = (0..16).map(|i| format!("message {i}")).collect();

    let handles: Vec<_> = messages
        .iter()
        .map(|m| worker.search_async(m.clone()))
        .collect();

    for (message, handle) in messages.iter().zip(handles) {
        let proof = handle.await.unwrap();
        assert_eq!(proof.message_str(), message.as_str());
        assert_eq!(worker.validate(&proof), Ok(true));
    }
}

#[tokio::test]
async fn submission_snapshots_configuration() {
    let mut worker = Worker::new();
    worker.set_difficulty(400).unwrap();
    worker.set_timeout(20).unwrap();

    let handle = worker.search_async("snapshot");

    // too late to rescue the in-flight search
    worker.set_difficulty(1).unwrap();
    worker.set_timeout(0).unwrap();

    assert!(matches!(
        handle.await,
        Err(SearchError::Timeout { timeout_ms: 20, .. })
    ));
}

#[tokio::test]
async fn shared_channel_collects_every_outcome() {
    let worker = easy_worker();
    let (tx, mut rx) = outcome_channel(4);

    let messages: HashSet<String> = (0..8).map(|i| format!("shared {i}")).collect();
    for message in &messages {
        worker.send_to_channel(message.clone(), &tx);
    }

    let mut seen = HashSet::new();
    for _ in 0..messages.len() {
        let proof = rx.recv().await.unwrap().unwrap();
        assert_eq!(worker.validate(&proof), Ok(true));
        seen.insert(proof.message_str().into_owned());
    }
    assert_eq!(seen, messages);

    // the channel stays open for further searches
    worker.send_to_channel("one more", &tx);
    let proof = rx.recv().await.unwrap().unwrap();
    assert_eq!(proof.message_str(), "one more");
}

#[tokio::test]
async fn failures_arrive_through_the_channel() {
    let mut worker = Worker::new();
    worker.set_hash_factory(hash_factory(|| FailingHasher));
    let (tx, mut rx) = outcome_channel(0);

    worker.send_to_channel("x", &tx);
    assert_eq!(
        rx.recv().await.unwrap(),
        Err(SearchError::Hash(HashError::Finalize("no output".into())))
    );
}

#[tokio::test]
async fn panicking_hash_reports_interrupted() {
    let mut worker = Worker::new();
    worker.set_hash_factory(hash_factory(|| PanickingHasher));

    assert_eq!(
        worker.search_async("x").await,
        Err(SearchError::Interrupted)
    );

    let (tx, mut rx) = outcome_channel(1);
    worker.send_to_channel("y", &tx);
    assert_eq!(rx.recv().await.unwrap(), Err(SearchError::Interrupted));
}

#[test]
fn batch_validation() {
    let worker = easy_worker();
    let good = worker.search("batch").unwrap();
    let forged = Proof::new("forged", good.nonce());

    let results = worker.validate_batch(&[good, forged.clone()]);
    assert_eq!(results[0], Ok(true));
    assert_eq!(results[1], worker.validate(&forged));
}

#[test]
fn config_from_json() {
    let config: WorkerConfig = serde_json::from_str(r#"{ "difficulty": 12 }"#).unwrap();
    assert_eq!(config.difficulty, 12);
    assert_eq!(config.timeout_ms, 5_000);

    let worker = Worker::from_config(config).unwrap();
    assert_eq!(worker.difficulty(), 12);

    let json = serde_json::to_string(&worker.config()).unwrap();
    assert_eq!(json, r#"{"difficulty":12,"timeout_ms":5000}"#);

    let zero: WorkerConfig = serde_json::from_str(r#"{ "difficulty": 0 }"#).unwrap();
    assert_eq!(
        Worker::from_config(zero).unwrap_err(),
        ConfigError::InvalidDifficulty(0)
    );
}

#[test]
fn logging_installs_once() {
    assert!(init_logging(LogFormat::Human, "debug").is_ok());
    assert!(init_logging(LogFormat::Json, "debug").is_err());

    // events from the search path go through the installed subscriber
    let proof = easy_worker().search("logged").unwrap();
    assert!(proof.nonce() >= 0);
}

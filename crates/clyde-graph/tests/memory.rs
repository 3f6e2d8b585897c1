//! Unit tests for memory: RunnableConfig, Checkpoint, MemorySaver.

use clyde_graph::{
    Checkpoint, CheckpointError, CheckpointMetadata, CheckpointSource, Checkpointer, MemorySaver,
    RunnableConfig,
};

#[derive(Debug, Clone, Default)]
struct TestState {
    value: String,
}

fn checkpoint(id: &str, value: &str) -> Checkpoint<TestState> {
    Checkpoint {
        id: id.into(),
        ts: "123".into(),
        state: TestState {
            value: value.into(),
        },
        metadata: CheckpointMetadata {
            source: CheckpointSource::Loop,
            step: 0,
            created_at: None,
        },
    }
}

#[tokio::test]
async fn memory_saver_put_and_get_tuple() {
    let saver: MemorySaver<TestState> = MemorySaver::new();
    let config = RunnableConfig::thread("t1");

    let id = saver.put(&config, &checkpoint("c1", "hello")).await.unwrap();
    assert_eq!(id, "c1");

    let (cp, meta) = saver.get_tuple(&config).await.unwrap().unwrap();
    assert_eq!(cp.id, "c1");
    assert_eq!(cp.state.value, "hello");
    assert_eq!(meta.source, CheckpointSource::Loop);
    assert_eq!(meta.step, 0);
}

#[tokio::test]
async fn memory_saver_get_tuple_returns_latest() {
    let saver: MemorySaver<TestState> = MemorySaver::new();
    let config = RunnableConfig::thread("t1");
    saver.put(&config, &checkpoint("c1", "old")).await.unwrap();
    saver.put(&config, &checkpoint("c2", "new")).await.unwrap();

    let (cp, _) = saver.get_tuple(&config).await.unwrap().unwrap();
    assert_eq!(cp.state.value, "new");
}

#[tokio::test]
async fn memory_saver_get_tuple_by_checkpoint_id() {
    let saver: MemorySaver<TestState> = MemorySaver::new();
    let config = RunnableConfig::thread("t1");
    saver.put(&config, &checkpoint("c1", "old")).await.unwrap();
    saver.put(&config, &checkpoint("c2", "new")).await.unwrap();

    let at = RunnableConfig {
        checkpoint_id: Some("c1".into()),
        ..RunnableConfig::thread("t1")
    };
    let (cp, _) = saver.get_tuple(&at).await.unwrap().unwrap();
    assert_eq!(cp.state.value, "old");

    let missing = RunnableConfig {
        checkpoint_id: Some("c9".into()),
        ..RunnableConfig::thread("t1")
    };
    assert!(matches!(
        saver.get_tuple(&missing).await,
        Err(CheckpointError::NotFound(id)) if id == "c9"
    ));
}

#[tokio::test]
async fn memory_saver_get_tuple_empty_returns_none() {
    let saver: MemorySaver<TestState> = MemorySaver::new();
    let tuple = saver.get_tuple(&RunnableConfig::thread("t2")).await.unwrap();
    assert!(tuple.is_none());
}

#[tokio::test]
async fn memory_saver_requires_thread_id() {
    let saver: MemorySaver<TestState> = MemorySaver::new();
    let config = RunnableConfig::default();
    assert!(matches!(
        saver.put(&config, &checkpoint("c1", "x")).await,
        Err(CheckpointError::ThreadIdRequired)
    ));
    assert!(matches!(
        saver.get_tuple(&config).await,
        Err(CheckpointError::ThreadIdRequired)
    ));
}

#[tokio::test]
async fn memory_saver_threads_and_namespaces_are_isolated() {
    let saver: MemorySaver<TestState> = MemorySaver::new();
    saver
        .put(&RunnableConfig::thread("a"), &checkpoint("c1", "a"))
        .await
        .unwrap();

    assert!(saver
        .get_tuple(&RunnableConfig::thread("b"))
        .await
        .unwrap()
        .is_none());

    let namespaced = RunnableConfig {
        checkpoint_ns: "sub".into(),
        ..RunnableConfig::thread("a")
    };
    assert!(saver.get_tuple(&namespaced).await.unwrap().is_none());
}

#[tokio::test]
async fn memory_saver_list_newest_first_with_limit() {
    let saver: MemorySaver<TestState> = MemorySaver::new();
    let config = RunnableConfig::thread("t3");
    assert!(saver.list(&config, None).await.unwrap().is_empty());

    for id in ["c1", "c2", "c3"] {
        saver.put(&config, &checkpoint(id, id)).await.unwrap();
    }
    let all = saver.list(&config, None).await.unwrap();
    let ids: Vec<_> = all.iter().map(|i| i.checkpoint_id.as_str()).collect();
    assert_eq!(ids, ["c3", "c2", "c1"]);

    let two = saver.list(&config, Some(2)).await.unwrap();
    assert_eq!(two.len(), 2);
    assert_eq!(two[0].checkpoint_id, "c3");
}

#[tokio::test]
async fn checkpoint_from_state() {
    let cp = Checkpoint::from_state(
        TestState {
            value: "test".into(),
        },
        CheckpointSource::Loop,
        1,
    );
    assert!(!cp.id.is_empty());
    assert!(!cp.ts.is_empty());
    assert_eq!(cp.state.value, "test");
    assert_eq!(cp.metadata.step, 1);
    assert!(cp.metadata.created_at.is_some());

    let other = Checkpoint::from_state(TestState::default(), CheckpointSource::Loop, 1);
    assert_ne!(cp.id, other.id);
}

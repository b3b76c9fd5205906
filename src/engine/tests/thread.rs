use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::engine::PlaybackThread;
use crate::error::QueueError;

#[tokio::test]
async fn test_jobs_run_on_dedicated_thread() {
    let thread = PlaybackThread::spawn("test-playback", Vec::<u32>::new()).unwrap();
    let expected = thread.thread_id();

    let (id, name) = thread
        .run(|_| {
            let current = std::thread::current();
            (current.id(), current.name().map(str::to_string))
        })
        .await
        .unwrap();

    assert_eq!(id, expected);
    assert_eq!(name.as_deref(), Some("test-playback"));
    assert!(!thread.is_current());
    thread.shutdown();
}

#[tokio::test]
async fn test_jobs_run_in_order() {
    let thread = PlaybackThread::spawn("ordered", Vec::<u32>::new()).unwrap();

    let mut pending = Vec::new();
    for i in 0..10 {
        pending.push(thread.run(move |state| state.push(i)));
    }
    for job in pending {
        job.await.unwrap();
    }

    let state = thread.run(|state| state.clone()).await.unwrap();
    assert_eq!(state, (0..10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_panicking_job_does_not_stop_thread() {
    let counter = Arc::new(AtomicUsize::new(0));
    let thread = PlaybackThread::spawn("panicky", ()).unwrap();

    let result: Result<(), _> = thread.run(|_| panic!("boom")).await;
    assert!(matches!(result, Err(QueueError::EngineUnavailable)));

    let c = Arc::clone(&counter);
    thread
        .run(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pagetable::{SEARCH_DEBOUNCE, SearchDebouncer};
use tokio::time::{Instant, sleep};

type Calls = Arc<Mutex<Vec<(Option<String>, Instant)>>>;

fn install(debouncer: &SearchDebouncer) -> Calls {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    debouncer.set_callback(move |q| sink.lock().unwrap().push((q, Instant::now())));
    calls
}

#[test]
fn test_default_delay() {
    assert_eq!(SEARCH_DEBOUNCE, Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn test_blank_query_fires_none() {
    let debouncer = SearchDebouncer::default();
    let calls = install(&debouncer);
    debouncer.input("abc");
    sleep(Duration::from_millis(500)).await;
    debouncer.input("   ");
    sleep(Duration::from_millis(500)).await;

    let queries: Vec<_> = calls.lock().unwrap().iter().map(|c| c.0.clone()).collect();
    assert_eq!(queries, vec![Some("abc".to_string()), None]);
}

#[tokio::test(start_paused = true)]
async fn test_query_is_trimmed() {
    let debouncer = SearchDebouncer::default();
    let calls = install(&debouncer);
    debouncer.input("  widget ");
    sleep(Duration::from_millis(450)).await;
    assert_eq!(calls.lock().unwrap()[0].0.as_deref(), Some("widget"));
}

#[tokio::test(start_paused = true)]
async fn test_identical_text_keeps_deadline() {
    let debouncer = SearchDebouncer::default();
    let calls = install(&debouncer);
    let t0 = Instant::now();
    debouncer.input("abc");
    sleep(Duration::from_millis(300)).await;
    debouncer.input("abc");
    sleep(Duration::from_millis(500)).await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1 - t0, Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn test_callback_swap_does_not_restart_timer() {
    let debouncer = SearchDebouncer::default();
    let first = install(&debouncer);
    let t0 = Instant::now();
    debouncer.input("abc");
    sleep(Duration::from_millis(200)).await;

    let second = install(&debouncer);
    sleep(Duration::from_millis(300)).await;

    assert!(first.lock().unwrap().is_empty());
    let second = second.lock().unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].1 - t0, Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn test_fires_without_callback_do_not_panic() {
    let debouncer = SearchDebouncer::new(Duration::from_millis(50));
    debouncer.input("abc");
    sleep(Duration::from_millis(100)).await;
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels() {
    let calls;
    {
        let debouncer = SearchDebouncer::default();
        calls = install(&debouncer);
        debouncer.input("abc");
    }
    sleep(Duration::from_secs(2)).await;
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_input_outside_runtime_is_recorded() {
    let debouncer = SearchDebouncer::default();
    debouncer.input("abc");
    assert!(debouncer.is_pending());
    debouncer.cancel();
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_retyping_cancelled_text_fires() {
    let debouncer = SearchDebouncer::default();
    let calls = install(&debouncer);
    debouncer.input("abc");
    debouncer.cancel();
    debouncer.input("abc");
    sleep(Duration::from_secs(1)).await;

    let queries: Vec<_> = calls.lock().unwrap().iter().map(|c| c.0.clone()).collect();
    assert_eq!(queries, vec![Some("abc".to_string())]);
}

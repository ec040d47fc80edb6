use super::*;
use std::sync::Arc;

#[test]
fn test_noop_observer_is_silent() {
    let observer = NoopObserver;
    observer.record_read();
    observer.record_write();
}

#[test]
fn test_counting_observer() {
    let observer = CountingObserver::new();
    observer.record_read();
    observer.record_read();
    observer.record_write();

    let counts = observer.counts();
    assert_eq!(counts, OpCounts { reads: 2, writes: 1 });
    assert_eq!(counts.total(), 3);

    observer.reset();
    assert_eq!(observer.counts(), OpCounts::default());
}

#[test]
fn test_counting_observer_concurrent() {
    let observer = CountingObserver::new();

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..1000 {
                    observer.record_read();
                    observer.record_write();
                }
            });
        }
    });

    let counts = observer.counts();
    assert_eq!(counts.reads, 8000);
    assert_eq!(counts.writes, 8000);
}

#[test]
fn test_composite_observer_fans_out() {
    let a = Arc::new(CountingObserver::new());
    let b = Arc::new(CountingObserver::new());

    let composite = CompositeObserver::new()
        .add_arc(a.clone())
        .add_arc(b.clone())
        .add(TracingObserver::new());
    assert_eq!(composite.len(), 3);

    composite.record_write();
    composite.record_read();
    composite.record_write();

    assert_eq!(a.counts(), OpCounts { reads: 1, writes: 2 });
    assert_eq!(b.counts(), OpCounts { reads: 1, writes: 2 });
}

#[test]
fn test_empty_composite() {
    let composite = CompositeObserver::default();
    assert!(composite.is_empty());
    composite.record_read();
}

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use eventvisor::{Event, EventRef, HandlerError, HandlerFn, HandlerRef, IntoEvent, global};

#[derive(Debug, Default)]
struct Ping {
    seq: u32,
}
impl Event for Ping {}

// Single test: the process bus is shared by every test in this binary.
#[tokio::test]
async fn setup_installs_and_replaces_process_bus() {
    let bus = global::setup(2).unwrap();
    assert_eq!(global::event_bus().config().pool_capacity, 2);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let h: HandlerRef = HandlerFn::arc("ping", move |ev: EventRef| {
        let tx = tx.clone();
        async move {
            if let Some(p) = ev.downcast_ref::<Ping>() {
                let _ = tx.send(p.seq);
            }
            Ok::<_, HandlerError>(())
        }
    });
    global::subscriber().subscribe(&Ping::default(), vec![h]);
    assert_eq!(bus.handler_count(&Ping::default()), 1);

    global::publisher()
        .publish(vec![Ping { seq: 7 }.into_event()])
        .await
        .unwrap();
    let seq = timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
    assert_eq!(seq, Some(7));

    let replacement = global::setup(3).unwrap();
    assert_eq!(global::event_bus().config().pool_capacity, 3);
    assert_eq!(global::event_bus().handler_count(&Ping::default()), 0);

    // The replaced bus is not released.
    assert!(!bus.is_released());
    bus.publish([Arc::new(Ping { seq: 8 })]).await.unwrap();
    let seq = timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
    assert_eq!(seq, Some(8));

    assert!(global::setup(0).is_err());
    assert_eq!(global::event_bus().config().pool_capacity, 3);

    replacement.release();
    bus.release();
}

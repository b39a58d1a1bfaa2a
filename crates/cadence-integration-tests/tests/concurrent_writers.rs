//! Many writers, one store.

use cadence_integration_tests::{post_instruction, spawn_node};
use cadence_store::{Fragment, Phase, SequenceStore, Submission, SubmitError};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn parallel_fragments_assemble_in_order() {
    let store = Arc::new(SequenceStore::default());
    let writers = 8;
    let per_writer = 50i64;
    let total = writers * per_writer;

    let handles: Vec<_> = (0..writers)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                // Interleaved positions, submitted back to front.
                for i in (0..per_writer).rev() {
                    let seq = i * writers + w + 1;
                    store.submit(seq, Fragment::content("ab")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.count(false).count, total as usize);
    match store.submit(total + 1, Fragment::Terminator).unwrap() {
        Submission::Finalized(summary) => {
            assert_eq!(summary.steps_counted, total as usize);
            assert_eq!(summary.message_length, 2 * total as usize);
            assert_eq!(summary.repeating_unit_length, 2);
        }
        other => panic!("expected finalized, got {:?}", other),
    }
}

#[test]
fn only_one_terminator_wins() {
    let store = Arc::new(SequenceStore::default());
    store.submit(1, Fragment::content("a")).unwrap();
    store.submit(2, Fragment::content("b")).unwrap();

    let racers = 16;
    let barrier = Arc::new(Barrier::new(racers));
    let handles: Vec<_> = (0..racers)
        .map(|_| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.submit(3, Fragment::Terminator)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let finalized = results
        .iter()
        .filter(|r| matches!(r, Ok(Submission::Finalized(_))))
        .count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(SubmitError::AlreadyFinalized { final_seq: 3 })))
        .count();

    assert_eq!(finalized, 1);
    assert_eq!(rejected, racers - 1);
}

#[test]
fn reset_races_never_leave_a_hybrid() {
    let store = Arc::new(SequenceStore::default());
    let rounds = 200;

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..rounds {
                let _ = store.submit(1, Fragment::content("a"));
                let _ = store.submit(2, Fragment::Terminator);
            }
        })
    };
    let resetter = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..rounds {
                store.reset();
            }
        })
    };
    let observer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..rounds {
                let snapshot = store.snapshot();
                match snapshot.phase {
                    Phase::Final => {
                        assert!(snapshot.summary.is_some());
                        assert_eq!(snapshot.live_entries, 0);
                    }
                    Phase::InProgress => assert!(snapshot.summary.is_none()),
                }
                let view = store.list(true);
                if view.status == Phase::Final {
                    assert_eq!(view.instructions, vec!["a"]);
                    assert_eq!(view.message.as_deref(), Some("a"));
                }
            }
        })
    };

    writer.join().unwrap();
    resetter.join().unwrap();
    observer.join().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_http_clients() {
    let node = spawn_node().await;
    let total = 40i64;

    let tasks: Vec<_> = (1..=total)
        .map(|seq| {
            let addr = node.addr;
            tokio::spawn(async move { post_instruction(addr, seq, "xyz").await.status })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), 202);
    }

    let reply = post_instruction(node.addr, total + 1, "").await;
    assert_eq!(reply.status, 200);
    let body = reply.json();
    assert_eq!(body["steps_counted"], total);
    assert_eq!(body["repeating_unit_length"], 3);
}

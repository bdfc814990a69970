#![expect(missing_docs, reason = "tests")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

use phyros_logging::MemoryProvider;

#[test]
fn concurrent_first_registration_creates_one_writer() {
    const THREADS: usize = 16;

    let barrier = Arc::new(Barrier::new(THREADS));
    let configured = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = barrier.clone();
            let configured = configured.clone();
            std::thread::spawn(move || {
                barrier.wait();
                let writer = phyros_logging::register(|builder| {
                    configured.fetch_add(1, Ordering::SeqCst);
                    builder.use_provider(MemoryProvider::new().0);
                })
                .unwrap();
                std::ptr::from_ref(writer) as usize
            })
        })
        .collect();

    let addresses: Vec<usize> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(configured.load(Ordering::SeqCst), 1);
    assert!(addresses.iter().all(|address| *address == addresses[0]));
}

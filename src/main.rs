use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Barrier;
use std::thread;

use parking_lot::Mutex;
use unico::config::Config;
use unico::counter;
use unico::SharedCounter;

// ========================================
// MAIN ENTRY POINT
// ========================================

fn main() {
    let config = Config::global();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.demo.log_level)),
        )
        .init();

    println!("🚀 Unico demo starting...");
    tracing::info!("demo workload: {:?}", config.demo);

    construction_race(config.demo.race_threads);
    sequential_demo();
    increment_stress(
        config.demo.writer_threads,
        config.demo.increments_per_writer,
        config.demo.reader_threads,
    );
}

// ========================================
// STAGE 1: CONSTRUCTION RACE
// ========================================

/// All threads hit the accessor at the same instant, before the instance
/// exists. Every returned address must be the same, and the constructor
/// must have run exactly once.
fn construction_race(threads: usize) {
    let barrier = Barrier::new(threads);

    let addresses: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    SharedCounter::global() as *const SharedCounter as usize
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = addresses[0];
    let identical = addresses.iter().all(|&addr| addr == first);

    println!(
        "[Race] {} threads raced the accessor: identical references = {}, constructions = {}",
        threads,
        identical,
        counter::constructions()
    );
}

// ========================================
// STAGE 2: SEQUENTIAL BASELINE
// ========================================

/// Single-threaded baseline: two references, one increment through each,
/// both reads agree because both point at the same object.
fn sequential_demo() {
    let s1 = SharedCounter::global();
    let s2 = SharedCounter::global();

    println!(
        "[Sequential] same object through both references: {}",
        std::ptr::eq(s1, s2)
    );

    s1.increment();
    s2.increment();

    println!("[Sequential] read through first reference:  {}", s1.value());
    println!("[Sequential] read through second reference: {}", s2.value());
}

// ========================================
// STAGE 3: INCREMENT STRESS
// ========================================

/// Writers hammer `increment` while readers sample `value`. The counter
/// must move by exactly writers * per_writer, and no sample may land
/// outside what the counter could actually have held.
fn increment_stress(writers: usize, per_writer: u64, readers: usize) {
    let expected = writers as u64 * per_writer;
    let start_value = SharedCounter::global().value();
    let samples: Mutex<Vec<u64>> = Mutex::new(Vec::new());
    let writers_done = AtomicBool::new(false);

    thread::scope(|s| {
        let writer_handles: Vec<_> = (0..writers)
            .map(|id| {
                s.spawn(move || {
                    for _ in 0..per_writer {
                        SharedCounter::global().increment();
                    }
                    tracing::debug!("writer {} finished", id);
                })
            })
            .collect();

        for _ in 0..readers {
            let samples = &samples;
            let writers_done = &writers_done;
            s.spawn(move || {
                while !writers_done.load(Ordering::Relaxed) {
                    samples.lock().push(SharedCounter::global().value());
                    thread::yield_now();
                }
            });
        }

        for handle in writer_handles {
            handle.join().unwrap();
        }
        writers_done.store(true, Ordering::Relaxed);
    });

    let moved = SharedCounter::global().value() - start_value;
    let samples = samples.into_inner();
    let ceiling = start_value + expected;
    let in_bounds = samples.iter().all(|&v| v <= ceiling);

    println!(
        "[Stress] {} writers x {} increments: counter moved {} (expected {}), lost updates = {}",
        writers,
        per_writer,
        moved,
        expected,
        expected - moved
    );
    println!(
        "[Stress] {} readers took {} samples, all within bounds: {}",
        readers,
        samples.len(),
        in_bounds
    );
}

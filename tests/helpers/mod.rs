use std::sync::Barrier;
use std::thread;
use std::time::Instant;

/// Run `f` on `n` threads that all start together behind a barrier.
/// Returns each thread's result in spawn order.
pub fn racing<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    let barrier = Barrier::new(n);

    thread::scope(|s| {
        let handles: Vec<_> = (0..n)
            .map(|i| {
                let barrier = &barrier;
                let f = &f;
                s.spawn(move || {
                    barrier.wait();
                    f(i)
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

pub struct Benchmark {
    pub name: String,
    pub start: Instant,
    pub count: usize,
}

impl Benchmark {
    pub fn start(name: &str, count: usize) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
            count,
        }
    }

    pub fn stop(self) {
        let total_duration = self.start.elapsed();
        let secs = total_duration.as_secs_f64();
        let ops_sec = self.count as f64 / secs;

        println!("\n{}", self.name);
        println!("  {} ops in {:?} ({:.0} ops/sec)", self.count, total_duration, ops_sec);
    }
}

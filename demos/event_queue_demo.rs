//! Spawns one producer thread per logical core, each pushing a random event
//! every millisecond, while the main thread polls and prints them.
//!
//! Commands (press Enter after each one — no raw terminal mode, since
//! nothing in this crate's dependency stack reaches for a terminal-raw-mode
//! crate):
//!   q  quit: stop all producers, drain the queue, print per-producer metrics
//!   p  toggle work on every producer
//!   1  toggle work on producer 0
//!   2  toggle work on producer 1

use eventq::{Config, EventKind, EventQueue};
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

struct ProducerHandle {
    do_work: Arc<AtomicBool>,
    keep_alive: Arc<AtomicBool>,
}

struct ProducerMetrics {
    thread_index: usize,
    produced_count: u64,
    elapsed: Duration,
}

impl ProducerMetrics {
    fn events_per_sec(&self) -> f64 {
        self.produced_count as f64 / self.elapsed.as_secs_f64()
    }

    fn events_per_sec_max(&self, period: Duration) -> f64 {
        1.0 / period.as_secs_f64()
    }
}

fn main() {
    const EVENT_COUNT: usize = 10_000;
    const PERIOD: Duration = Duration::from_millis(1);

    let queue = Arc::new(EventQueue::with_capacity(EVENT_COUNT, Config::default()).unwrap());

    let producer_count = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    println!("starting {producer_count} producer thread(s), pool capacity {EVENT_COUNT}");

    let (metrics_tx, metrics_rx) = mpsc::channel::<ProducerMetrics>();
    let mut handles = Vec::with_capacity(producer_count);
    let mut join_handles = Vec::with_capacity(producer_count);

    for thread_index in 0..producer_count {
        let do_work = Arc::new(AtomicBool::new(true));
        let keep_alive = Arc::new(AtomicBool::new(true));
        let queue = Arc::clone(&queue);
        let metrics_tx = metrics_tx.clone();
        let producer_do_work = Arc::clone(&do_work);
        let producer_keep_alive = Arc::clone(&keep_alive);

        join_handles.push(thread::spawn(move || {
            let start = Instant::now();
            let mut produced_count = 0u64;
            while producer_keep_alive.load(Ordering::Relaxed) {
                if producer_do_work.load(Ordering::Relaxed) {
                    if queue.enqueue(EventKind::Random) {
                        produced_count += 1;
                    }
                }
                thread::sleep(PERIOD);
            }
            let _ = metrics_tx.send(ProducerMetrics { thread_index, produced_count, elapsed: start.elapsed() });
        }));
        handles.push(ProducerHandle { do_work, keep_alive });
    }
    drop(metrics_tx);

    let stdin_lines = spawn_stdin_reader();
    'main: loop {
        if let Some(event) = queue.poll() {
            println!("{:?} at {} from producer {}", event.kind, event.timestamp, event.producer_id);
        }

        match stdin_lines.try_recv() {
            Ok(line) => match line.trim() {
                "q" => {
                    for handle in &handles {
                        handle.keep_alive.store(false, Ordering::Relaxed);
                        handle.do_work.store(false, Ordering::Relaxed);
                    }
                    break 'main;
                }
                "p" => {
                    for handle in &handles {
                        let current = handle.do_work.load(Ordering::Relaxed);
                        handle.do_work.store(!current, Ordering::Relaxed);
                    }
                }
                "1" => toggle_producer(&handles, 0),
                "2" => toggle_producer(&handles, 1),
                _ => {}
            },
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {}
        }
    }

    for join_handle in join_handles {
        let _ = join_handle.join();
    }

    let mut metrics: Vec<ProducerMetrics> = metrics_rx.try_iter().collect();
    metrics.sort_by_key(|m| m.thread_index);

    println!("\n=== producer metrics ===");
    let mut sum_events_per_sec = 0.0;
    let mut sum_events_per_sec_max = 0.0;
    for metric in &metrics {
        let per_sec = metric.events_per_sec();
        let per_sec_max = metric.events_per_sec_max(PERIOD);
        println!(
            "thread {}: {:.1} events/second ({:.2}% of max)",
            metric.thread_index,
            per_sec,
            100.0 * per_sec / per_sec_max
        );
        sum_events_per_sec += per_sec;
        sum_events_per_sec_max += per_sec_max;
    }
    println!(
        "sum: {:.1} events/second ({:.2}% of max)",
        sum_events_per_sec,
        100.0 * sum_events_per_sec / sum_events_per_sec_max
    );

    let final_metrics = queue.metrics();
    println!(
        "queue totals: enqueued={} dropped={} polled={}",
        final_metrics.enqueued_total, final_metrics.dropped_total, final_metrics.polled_total
    );
}

fn toggle_producer(handles: &[ProducerHandle], index: usize) {
    if let Some(handle) = handles.get(index) {
        let current = handle.do_work.load(Ordering::Relaxed);
        handle.do_work.store(!current, Ordering::Relaxed);
    }
}

/// Reads lines from stdin on a background thread so the main loop can keep
/// polling the queue without blocking on keyboard input.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        return;
                    }
                }
                Err(_) => return,
            }
        }
    });
    rx
}

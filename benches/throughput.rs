use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use eventq::{Config, EventKind, EventQueue};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

const MSG_PER_PRODUCER: u64 = 1_000_000;

fn bench_spsc(c: &mut Criterion) {
    let mut group = c.benchmark_group("spsc");
    group.throughput(Throughput::Elements(MSG_PER_PRODUCER));

    group.bench_function("single_producer_consumer", |b| {
        b.iter(|| {
            let queue = Arc::new(EventQueue::with_capacity(4096, Config::default()).unwrap());

            let producer_queue = Arc::clone(&queue);
            let producer_handle = thread::spawn(move || {
                let mut sent = 0u64;
                while sent < MSG_PER_PRODUCER {
                    if producer_queue.enqueue(EventKind::Random) {
                        sent += 1;
                    } else {
                        std::hint::spin_loop();
                    }
                }
            });

            let mut count = 0u64;
            while count < MSG_PER_PRODUCER {
                if let Some(event) = queue.poll() {
                    black_box(event);
                    count += 1;
                } else {
                    std::hint::spin_loop();
                }
            }

            producer_handle.join().unwrap();
        });
    });

    group.finish();
}

fn bench_mpsc(c: &mut Criterion) {
    let mut group = c.benchmark_group("mpsc");

    for num_producers in [2, 4, 8].iter() {
        let total_msgs = MSG_PER_PRODUCER * (*num_producers as u64);
        group.throughput(Throughput::Elements(total_msgs));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}P_1C", num_producers)),
            num_producers,
            |b, &n| {
                b.iter(|| {
                    let queue = Arc::new(EventQueue::with_capacity(8192, Config::default()).unwrap());

                    let mut producer_handles = vec![];
                    for _ in 0..n {
                        let producer_queue = Arc::clone(&queue);
                        producer_handles.push(thread::spawn(move || {
                            let mut sent = 0u64;
                            while sent < MSG_PER_PRODUCER {
                                if producer_queue.enqueue(EventKind::Random) {
                                    sent += 1;
                                } else {
                                    std::hint::spin_loop();
                                }
                            }
                        }));
                    }

                    let consumer_queue = Arc::clone(&queue);
                    let target = MSG_PER_PRODUCER * (n as u64);
                    let consumer_handle = thread::spawn(move || {
                        let mut count = 0u64;
                        while count < target {
                            if let Some(event) = consumer_queue.poll() {
                                black_box(event);
                                count += 1;
                            } else {
                                std::hint::spin_loop();
                            }
                        }
                        count
                    });

                    for handle in producer_handles {
                        handle.join().unwrap();
                    }
                    let count = consumer_handle.join().unwrap();
                    assert_eq!(count, target);
                });
            },
        );
    }

    group.finish();
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");

    // A small pool forces frequent free-list exhaustion and retries — the
    // regime where the tail/head CAS loops spend the most time spinning.
    let msgs = 50_000u64;

    for num_producers in [4, 8].iter() {
        let total = msgs * (*num_producers as u64);
        group.throughput(Throughput::Elements(total));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}P_small_pool", num_producers)),
            num_producers,
            |b, &n| {
                b.iter(|| {
                    let queue = Arc::new(EventQueue::with_capacity(64, Config::default()).unwrap());
                    let counter = Arc::new(AtomicU64::new(0));

                    let mut handles = vec![];
                    for _ in 0..n {
                        let producer_queue = Arc::clone(&queue);
                        let sent_counter = Arc::clone(&counter);
                        handles.push(thread::spawn(move || {
                            let mut sent = 0u64;
                            while sent < msgs {
                                if producer_queue.enqueue(EventKind::Random) {
                                    sent += 1;
                                }
                                sent_counter.fetch_add(1, Ordering::Relaxed);
                            }
                        }));
                    }

                    let consumer_queue = Arc::clone(&queue);
                    let consumer = thread::spawn(move || {
                        let mut drained = 0u64;
                        // A small pool means some sends are dropped; drain
                        // until producers are done and the queue goes quiet.
                        for _ in 0..(msgs * n as u64 * 2) {
                            if let Some(event) = consumer_queue.poll() {
                                black_box(event);
                                drained += 1;
                            } else {
                                std::hint::spin_loop();
                            }
                        }
                        drained
                    });

                    for handle in handles {
                        handle.join().unwrap();
                    }
                    consumer.join().unwrap();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_spsc, bench_mpsc, bench_contention);
criterion_main!(benches);

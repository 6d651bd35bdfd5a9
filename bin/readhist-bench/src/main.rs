//! ReadHist bench - multi-threaded read-history producer
//!
//! Hammers one pool's recorder from N producer threads with randomized
//! read events, then reports what the history retained and optionally
//! dumps the rendered stat table or clears it through the write path.

use anyhow::Result;
use clap::Parser;
use rand::Rng;
use readhist_core::{HistoryPolicy, PoolIdent, ReadEvent, ReadFlags};
use readhist_stat::{PoolStats, StatRegistry};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "readhist-bench")]
#[command(about = "ReadHist multi-threaded producer bench")]
#[command(version)]
struct Args {
    /// Pool name to record against
    #[arg(long, default_value = "tank")]
    pool: String,

    /// Producer threads
    #[arg(short, long, default_value = "4")]
    threads: usize,

    /// Events recorded per thread
    #[arg(short, long, default_value = "10000")]
    events: u64,

    /// History capacity (0 disables retention)
    #[arg(short, long, default_value = "512")]
    capacity: usize,

    /// Record reads served from cache
    #[arg(long)]
    include_cache_hits: bool,

    /// Percentage of events flagged as cache hits (0-100)
    #[arg(long, default_value = "25")]
    cached_pct: u32,

    /// Print the rendered stat table before exiting
    #[arg(long)]
    dump: bool,

    /// Clear the history through the stat write path afterwards
    #[arg(long)]
    clear: bool,

    /// Emit the summary as JSON
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let registry = Arc::new(StatRegistry::new());
    let policy = Arc::new(HistoryPolicy::new(args.capacity, args.include_cache_hits));
    let stats = PoolStats::init(PoolIdent::new(&args.pool), policy, Arc::clone(&registry))?;
    let recorder = Arc::clone(stats.recorder());

    info!(
        pool = %args.pool,
        threads = args.threads,
        events = args.events,
        capacity = args.capacity,
        "starting producers"
    );

    let started = Instant::now();
    thread::scope(|scope| {
        for worker in 0..args.threads {
            let recorder = Arc::clone(&recorder);
            let events = args.events;
            let cached_pct = args.cached_pct;
            thread::Builder::new()
                .name(format!("bench-worker-{worker}"))
                .spawn_scoped(scope, move || {
                    let mut rng = rand::thread_rng();
                    for _ in 0..events {
                        let mut flags = ReadFlags::NONE;
                        if rng.gen_range(0..100) < cached_pct {
                            flags |= ReadFlags::CACHED;
                        }
                        if rng.gen_bool(0.05) {
                            flags |= ReadFlags::PREFETCH;
                        }
                        recorder.record(&ReadEvent {
                            objset: rng.gen_range(0..4),
                            object: rng.gen_range(0..(1 << 20)),
                            level: rng.gen_range(0..3),
                            blkid: rng.gen_range(0..(1 << 16)),
                            origin: "bench_read",
                            flags,
                        });
                    }
                })
                .expect("failed to spawn bench worker");
        }
    });
    let elapsed = started.elapsed();

    let retained = registry.entry_count(stats.reads_path())?;
    let retained_bytes = registry.byte_size(stats.reads_path())?;
    let total = args.threads as u64 * args.events;

    if args.dump {
        print!("{}", registry.read_to_string(stats.reads_path())?);
    }

    if args.clear {
        registry.write(stats.reads_path())?;
        info!(
            remaining = registry.entry_count(stats.reads_path())?,
            "history cleared"
        );
    }

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "pool": args.pool,
                "threads": args.threads,
                "events_per_thread": args.events,
                "events_total": total,
                "retained": retained,
                "retained_bytes": retained_bytes,
                "elapsed_ms": elapsed.as_millis() as u64,
            })
        );
    } else {
        println!(
            "recorded {total} events across {} threads in {elapsed:?}; {retained} retained ({retained_bytes} bytes)",
            args.threads,
        );
    }

    stats.destroy();
    Ok(())
}

//! Basic usage example for barklog
//!
//! Run with: cargo run --example basic_usage

use std::io;
use std::sync::Arc;

use barklog::*;

fn main() -> Result<(), ConfigError> {
    println!("barklog Basic Usage Example");
    println!("===========================");

    // Example 1: Text records straight to stdout
    println!("\n1. Text Records:");
    {
        let logger = TextLogger::new(WriterSink::new(io::stdout()));
        logger
            .info()
            .str("user", "alice")
            .int("attempt", 3)
            .float64("latency_ms", 12.5)
            .bool("cached", false)
            .msg("login");

        let err = io::Error::new(io::ErrorKind::NotFound, "no such \"file\"");
        logger.info().str("path", "/etc/app.toml").error(Some(&err)).msg("config lookup failed");
    }

    // Example 2: Binary records captured in memory
    println!("\n2. Binary Records:");
    {
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let logger = BinaryLogger::new(Arc::clone(&sink));

        logger
            .info()
            .uint64("bytes", 4096)
            .int16("retries", -1)
            .complex64("z", Complex::new(1.0, 2.0))
            .bytes("digest", &[0xDE, 0xAD, 0xBE, 0xEF])
            .msg("fetch");

        let data = sink.with_writer(|w| w.clone());
        let record_type = u16::from_le_bytes([data[0], data[1]]);
        let payload_len = u32::from_le_bytes([data[2], data[3], data[4], data[5]]);
        println!(
            "  record type={}, payload={} bytes, total={} bytes",
            record_type,
            payload_len,
            data.len()
        );
        println!("  hex: {}", data.iter().map(|b| format!("{:02x}", b)).collect::<String>());
    }

    // Example 3: Configuration and pool reuse
    println!("\n3. Configured Logger:");
    {
        let config = EncoderConfig::builder()
            .initial_capacity(4096)
            .time_zone(TimeZone::Local)
            .build()?;
        let logger = TextLogger::with_config(Discard, config);

        for i in 0..1000 {
            logger.info().int("i", i).msg("tick");
        }

        let metrics = logger.pool_metrics();
        println!(
            "  pool hits={}, misses={}, hit rate={:.3}",
            metrics.hits,
            metrics.misses,
            metrics.hit_rate()
        );
    }

    // Example 4: Rejected configuration
    println!("\n4. Invalid Configuration:");
    match EncoderConfig::builder().initial_capacity(64).build() {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(e) => println!("  rejected: {}", e),
    }

    Ok(())
}

//! Stress tests for shared logger state
//!
//! These tests verify:
//! - Concurrent registration of common fields loses no keys
//! - Concurrent emission produces whole, parseable lines
//! - Contexts derived concurrently stay isolated
//! - Metrics stay consistent under contention

use std::sync::Arc;
use std::thread;
use structured_logger::prelude::*;
use structured_logger::ContextKey;

const THREADS: usize = 8;
const PER_THREAD: usize = 200;

fn capture_logger(kind: LoggerType) -> (CaptureWriter, SharedLogger) {
    let capture = CaptureWriter::new();
    let logger = new_logger(
        kind,
        [with_level(LogLevel::Debug), with_output(capture.clone())],
    );
    (capture, logger)
}

#[test]
fn test_concurrent_registration_keeps_every_key() {
    for kind in [LoggerType::Logrus, LoggerType::ZeroLog] {
        let (capture, logger) = capture_logger(kind);

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        logger.register_common_field(&format!("t{}_{}", t, i), (i as u64).into());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("register thread panicked");
        }

        assert_eq!(logger.common_fields().len(), THREADS * PER_THREAD);

        logger.info(&[]);
        let record = capture.last_json().unwrap();
        assert_eq!(record["t3_17"], 17);
        assert_eq!(record.as_object().unwrap().len(), THREADS * PER_THREAD + 2);
    }
}

#[test]
fn test_concurrent_overwrite_leaves_one_value() {
    let (capture, logger) = capture_logger(LoggerType::ZeroLog);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    logger.register_common_field("owner", (t as u64).into());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("register thread panicked");
    }

    logger.info(&[]);
    let line = capture.lines().pop().unwrap();
    assert_eq!(line.matches("\"owner\"").count(), 1);
    let owner = capture.last_json().unwrap()["owner"].as_u64().unwrap();
    assert!(owner < THREADS as u64);
}

#[test]
fn test_concurrent_emission_writes_whole_lines() {
    for kind in [LoggerType::Logrus, LoggerType::ZeroLog] {
        let (capture, logger) = capture_logger(kind);
        logger.register_common_field("service", "stress".into());
        let ctx = logger.with_context(&Context::background());

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let ctx = ctx.clone();
                thread::spawn(move || {
                    let logger = from_context(&ctx, kind);
                    let mut fields = Fields::new();
                    fields.insert("thread".into(), (t as u64).into());
                    for i in 0..PER_THREAD {
                        let message = format!("thread {} message {}", t, i);
                        logger.info(&[with_message(&message), with_fields(&fields)]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("logging thread panicked");
        }

        let lines = capture.lines();
        let records = capture.records();
        assert_eq!(lines.len(), THREADS * PER_THREAD);
        assert_eq!(records.len(), lines.len(), "every line must be valid JSON");
        assert!(records.iter().all(|r| r["service"] == "stress"));
        assert_eq!(logger.metrics().emitted_count(), (THREADS * PER_THREAD) as u64);
        assert_eq!(logger.metrics().write_failure_count(), 0);
    }
}

#[test]
fn test_concurrent_context_derivation_is_isolated() {
    let (_capture, logger) = capture_logger(LoggerType::ZeroLog);
    let root = logger.with_context(&Context::background());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let root = root.clone();
            thread::spawn(move || {
                let mut ctx = root.clone();
                for i in 0..PER_THREAD {
                    ctx = ctx.with_value(ContextKey::new(format!("t{}", t)), i);
                }
                assert_eq!(ctx.get::<usize>(&ContextKey::new(format!("t{}", t))), Some(&(PER_THREAD - 1)));
                for other in (0..THREADS).filter(|o| *o != t) {
                    assert!(ctx.value(&ContextKey::new(format!("t{}", other))).is_none());
                }
                from_context(&ctx, LoggerType::ZeroLog).id()
            })
        })
        .collect();

    for handle in handles {
        let id = handle.join().expect("context thread panicked");
        assert_eq!(id, logger.id());
    }
    assert_eq!(root.depth(), 1);
}

#[test]
fn test_concurrent_hooks_and_suppression() {
    let capture = CaptureWriter::new();
    let logger = new_logger(
        LoggerType::ZeroLog,
        [with_level(LogLevel::Warn), with_output(capture.clone())],
    );
    logger.add_hook(Hook::zerolog(|record: &mut Record| record.insert("hooked", true)));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    logger.debug(&[]);
                    logger.warn(&[]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let metrics = logger.metrics();
    assert_eq!(metrics.emitted_count(), (THREADS * PER_THREAD) as u64);
    assert_eq!(metrics.suppressed_count(), (THREADS * PER_THREAD) as u64);
    assert!(capture.records().iter().all(|r| r["hooked"] == true));
}

//! Benchmark harness crate; the criterion suites live under `benches/`.

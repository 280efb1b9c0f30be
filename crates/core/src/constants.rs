//! Shared constants for the Nabha Health core.

/// Fixed delay, in milliseconds, between accepting a report and producing its
/// analysis. Models the latency of a remote analysis call.
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 3_000;

/// Upper bound on the size of an uploaded report (10 MiB).
pub const MAX_REPORT_BYTES: u64 = 10 * 1024 * 1024;

/// File extensions accepted for uploaded reports, compared case-insensitively.
pub const ALLOWED_REPORT_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

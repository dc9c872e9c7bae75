use tracing_subscriber::EnvFilter;

/// Initialize stderr logging for the `records` binary.
///
/// The filter comes from `RUST_LOG`; without it only warnings are shown so
/// that command output on stdout stays clean. `verbose` raises the crate's
/// own level (1 = info, 2+ = debug).
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "warn,records_client=info",
            _ => "warn,records_client=debug",
        };
        EnvFilter::new(level)
    });

    // A subscriber may already be installed (e.g. by a host application).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .try_init();
}

use tracing_subscriber::{fmt, EnvFilter};

/// Install a stderr `tracing` subscriber. `RUST_LOG` wins when set;
/// otherwise `verbosity` picks warn (0), info (1) or debug (2+).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Route `tracing` output through the test harness so it is only shown for
/// failing tests.
pub fn init_test_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fakews=debug,warn"));
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

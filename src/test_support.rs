use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

static SUBSCRIBER: OnceCell<()> = OnceCell::new();

/// Sends engine events to the captured test output.
///
/// `TEST_LOG` sets the filter, e.g. `TEST_LOG=reversi_engine=debug`; the default is `warn`.
pub fn init_logging() {
    SUBSCRIBER.get_or_init(|| {
        let filter = EnvFilter::try_from_env("TEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_harmless() {
        init_logging();
        init_logging();
        tracing::warn!("logging installed");
    }
}

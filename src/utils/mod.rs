use std::sync::Once;

const DEFAULT_DIRECTIVE: &str = "expense_macros=info";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `directive` (typically `Settings::log_filter`)
/// is applied, falling back to `expense_macros=info`.
pub fn init_tracing(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let fallback = directive.unwrap_or(DEFAULT_DIRECTIVE);
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // A subscriber installed by the host application takes precedence.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

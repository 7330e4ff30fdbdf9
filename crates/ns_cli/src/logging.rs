use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global subscriber. `RUST_LOG` wins when set; otherwise
/// the workspace crates log at info, or debug with `--verbose`.
pub fn init_logging(verbose: bool) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    INIT.call_once(|| {
        let fallback = if verbose {
            "ns_cli=debug,ns_web=debug,ns_scrapers=debug,ns_inference=debug,tower_http=debug"
        } else {
            "ns_cli=info,ns_web=info,ns_scrapers=info,ns_inference=info"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "operation_name");
/// // Or with additional fields:
/// trace_time!(start, "operation_name", table = "card");
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize structured logging based on CLI arguments
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (true, None) => "nerd=debug,nerd_core=debug,tower_http=debug",
        (false, None) => "nerd=info,nerd_core=info",
        (_, Some(level)) => return init_with_level(level, log_json),
    };

    init_with_level(level, log_json)
}

/// Expand a bare level such as `debug` into directives for both crates.
fn directives_for(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("nerd={level},nerd_core={level}")
    }
}

fn init_with_level(level: &str, log_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // NERD_LOG takes precedence over RUST_LOG
    let filter = EnvFilter::try_from_env("NERD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(directives_for(level)));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(
                        tracing_subscriber::fmt::format::FmtSpan::NEW
                            | tracing_subscriber::fmt::format::FmtSpan::CLOSE,
                    ),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_covers_both_crates() {
        assert_eq!(directives_for("warn"), "nerd=warn,nerd_core=warn");
    }

    #[test]
    fn test_explicit_directives_pass_through() {
        assert_eq!(directives_for("tower_http=trace"), "tower_http=trace");
    }
}

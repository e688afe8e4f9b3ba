//! Native log setup for binaries and debugging sessions.

/// Install `env_logger`, honouring `RUST_LOG` and defaulting to `info`.
///
/// Returns `false` when a logger was already installed.
pub fn init_logging() -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        init_logging();
        assert!(!init_logging());
        log::info!("logging ready");
    }
}

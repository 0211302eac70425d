use env_logger::{Builder, Env};

/// Initializes the global logger.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (from config.toml)
/// is used. Output goes to stderr, so keep the default quiet while the
/// terminal is in the alternate screen.
pub fn init(default_level: &str) {
    let env = Env::default().default_filter_or(default_level);
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set.
    let _ = builder.try_init();
}

//! Log backend selection.
//!
//! The core only uses the `log` facade.  This picks the sink: the ESP-IDF
//! logger (UART / USB-CDC) on the device, `env_logger` on a host build.

/// Install the global logger.  Call once, before anything logs.
#[cfg(target_os = "espidf")]
pub fn init() -> anyhow::Result<()> {
    esp_idf_logger::init()?;
    Ok(())
}

/// Install the global logger.  Call once, before anything logs.
///
/// Honours `RUST_LOG`; defaults to `info`.  Output goes to stderr so it
/// never interleaves with console replies on stdout.
#[cfg(not(target_os = "espidf"))]
pub fn init() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()?;
    Ok(())
}

use anyhow::Result;
use bert_launcher::{save_config, write_config, TrainingParser};
use std::path::Path;

fn main() -> Result<()> {
    // 1. Setup File Logging
    let file_appender = tracing_appender::rolling::daily("logs", "bert_launcher.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // 2. Setup Console Logging (stderr, stdout is reserved for --dump-config -)
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // 3. Combine Subscribers
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    // 4. Setup Panic Hook
    std::panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info.payload();
        let msg = if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic"
        };

        let location = panic_info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::error!(target: "panic", "CRASH detected at {}: {}", location, msg);
        eprintln!("CRASH detected at {}: {}", location, msg);
    }));

    let parser = TrainingParser::from_host();
    tracing::debug!("Visible devices: {}", parser.device_count());

    let config = match parser.parse() {
        Ok(config) => config,
        Err(e) => {
            if let Some(kind) = e.config_kind() {
                tracing::error!("Configuration error ({:?})", kind);
            }
            parser.exit(&e)
        }
    };

    config.log_summary();

    if let Some(path) = config.dump_config.as_deref() {
        if path == Path::new("-") {
            write_config(&config, std::io::stdout().lock())?;
        } else {
            save_config(&config, path)?;
            tracing::info!("Resolved config saved to {}", path.display());
        }
    }

    Ok(())
}

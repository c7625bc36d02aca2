use std::fs::File;
use std::path::PathBuf;
use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "monument_defense::compute=trace"). Output goes to `file`: the terminal
/// belongs to the game while it runs.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            file: std::env::temp_dir().join("monument_defense.log"),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// Fails only if the log file cannot be created.
pub fn init_logging(config: LoggingConfig) -> std::io::Result<()> {
    let file = File::create(&config.file)?;

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(env_logger::WriteStyle::Never);
        builder.target(env_logger::Target::Pipe(Box::new(file)));
        builder.init();

        log::debug!("logging initialized");
    });
    Ok(())
}

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Configuration for browser console logging
#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub max_level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            max_level: LevelFilter::Info,
        }
    }
}

/// Forwards `log` records to the browser console, tagged with the emitting module
pub struct ConsoleLogger {
    max_level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            max_level: config.max_level,
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record);
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

fn format_line(record: &Record) -> String {
    format!("[{}] {}", component(record.target()), record.args())
}

/// Last path segment of a module target, e.g. `submission`
fn component(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

/// Install the console logger; call once at startup
pub fn init(config: LoggingConfig) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger::new(&config)))?;
    log::set_max_level(config.max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        assert_eq!(LoggingConfig::default().max_level, LevelFilter::Info);
    }

    #[test]
    fn test_component_is_last_module_segment() {
        assert_eq!(
            component("salon_booking_frontend::form_engine::submission"),
            "submission"
        );
        assert_eq!(component("main"), "main");
    }

    #[test]
    fn test_enabled_respects_max_level() {
        let logger = ConsoleLogger::new(&LoggingConfig {
            max_level: LevelFilter::Warn,
        });
        let warn = Metadata::builder().level(Level::Warn).build();
        let info = Metadata::builder().level(Level::Info).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&info));
    }

    #[test]
    fn test_format_line_tags_component() {
        let record = Record::builder()
            .args(format_args!("saved record 7"))
            .level(Level::Info)
            .target("salon_booking_frontend::form_engine::submission")
            .build();
        assert_eq!(format_line(&record), "[submission] saved record 7");
    }
}

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a `tracing` filter directive, e.g. `xcal_gerrit=debug`.
pub const LOG_FILTER_ENV: &str = "XCAL_GERRIT_LOG";

/// 日志格式配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// 人类可读格式
    #[default]
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式
    Json,
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别, used when no filter is set in the environment
    pub level: Level,
    /// 输出格式
    pub format: LogFormat,
    /// 是否显示目标模块
    pub show_target: bool,
    /// 是否启用 ANSI 颜色
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Pretty,
            show_target: false,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    pub fn new(format: LogFormat, verbose: bool) -> Self {
        Self {
            level: if verbose { Level::DEBUG } else { Level::INFO },
            format,
            show_target: verbose,
            ansi: format != LogFormat::Json,
        }
    }

    /// `XCAL_GERRIT_LOG` when set, otherwise the configured level for every target.
    pub fn env_filter(&self) -> EnvFilter {
        match std::env::var(LOG_FILTER_ENV) {
            Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
            _ => EnvFilter::new(self.level.as_str().to_lowercase()),
        }
    }
}

/// 初始化日志系统
///
/// Logs go to stderr so that stdout stays free for command output.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = config.env_filter();
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(config.show_target)
                .with_ansi(config.ansi);
            registry.with(fmt_layer).try_init()?;
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(config.show_target)
                .with_ansi(config.ansi);
            registry.with(fmt_layer).try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(config.show_target);
            registry.with(fmt_layer).try_init()?;
        }
    }

    tracing::debug!(
        level = ?config.level,
        format = ?config.format,
        "Logging system initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_from_flags() {
        let quiet = LoggingConfig::new(LogFormat::Compact, false);
        assert_eq!(quiet.level, Level::INFO);
        assert!(quiet.ansi);
        assert!(!quiet.show_target);

        let verbose = LoggingConfig::new(LogFormat::Json, true);
        assert_eq!(verbose.level, Level::DEBUG);
        assert!(!verbose.ansi);
        assert!(verbose.show_target);
    }

    #[test]
    fn test_default_is_pretty_info() {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.level, Level::INFO);
    }
}

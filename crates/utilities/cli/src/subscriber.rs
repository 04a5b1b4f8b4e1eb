//! Global `tracing` subscriber for the deployer.

use std::{fmt, io};

use tracing::{Event, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
        time::{FormatTime, SystemTime},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::{FileLogConfig, LogConfig, LogFormat, LogRotation};

const LOG_FILE_PREFIX: &str = "deployer.log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// `ts=<time> level=<level> target=<target> <fields>` on one line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LogfmtFormatter;

impl<S, N> FormatEvent<S, N> for LogfmtFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(writer, "ts=")?;
        SystemTime.format_time(&mut writer)?;
        let level = meta.level().as_str().to_ascii_lowercase();
        write!(writer, " level={level} target={} ", meta.target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

impl LogConfig {
    /// Installs the process-wide subscriber: terminal output and, with a log directory,
    /// a rolling file. Errors if a subscriber is already installed.
    pub fn init_tracing_subscriber(&self) -> eyre::Result<()> {
        let filter =
            EnvFilter::builder().with_default_directive(self.level.into()).from_env_lossy();

        tracing_subscriber::registry()
            .with(filter)
            .with(self.stdout.map(|format| fmt_layer(format, io::stdout, true)))
            .with(self.file.as_ref().map(file_layer))
            .try_init()
            .map_err(|err| eyre::eyre!("failed to install tracing subscriber: {err}"))
    }
}

fn file_layer<S>(config: &FileLogConfig) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
{
    let rotation = match config.rotation {
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    };
    let appender = RollingFileAppender::new(rotation, &config.directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    // Flushing happens on drop; the writer lives until exit.
    std::mem::forget(guard);

    fmt_layer(config.format, writer, false)
}

fn fmt_layer<S, W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(ansi);
    match format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Logfmt => layer.event_format(LogfmtFormatter).boxed(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::info;
    use tracing_subscriber::Registry;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            io::Write::write(&mut *self.0.lock().unwrap(), buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn render(format: LogFormat) -> String {
            let captured = Self::default();
            let sink = captured.clone();
            let layer = fmt_layer::<Registry, _>(format, move || sink.clone(), false);

            tracing::subscriber::with_default(Registry::default().with(layer), || {
                info!(contract = "LabelFactory", "LabelFactory deployed");
            });

            String::from_utf8(captured.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn logfmt_line_has_level_target_and_fields() {
        let line = Captured::render(LogFormat::Logfmt);

        assert!(line.starts_with("ts="));
        assert!(line.contains(" level=info "));
        assert!(line.contains(&format!("target={}", module_path!())));
        assert!(line.contains("LabelFactory deployed"));
        assert!(line.contains("contract=\"LabelFactory\""));
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn json_layer_writes_one_object_per_event() {
        let output = Captured::render(LogFormat::Json);
        let event: serde_json::Value = serde_json::from_str(output.trim()).unwrap();

        assert_eq!(event["level"], "INFO");
        assert_eq!(event["fields"]["message"], "LabelFactory deployed");
        assert_eq!(event["fields"]["contract"], "LabelFactory");
    }
}

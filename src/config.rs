use std::io::IsTerminal;

use crate::cli::{Cli, ColorModeArg};
use crate::errors::{AppError, AppResult};
use crate::inspect::InspectOptions;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
}

#[derive(Clone, Copy, Debug)]
pub struct OutputConfig {
    pub mode: OutputMode,
    pub color: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// `None` means the client's default namespace.
    pub namespace: Option<String>,
    /// `None` means every pod in the namespace.
    pub pod: Option<String>,
    pub dev_mode: bool,

    pub inspect: InspectOptions,
    pub output: OutputConfig,
}

impl TryFrom<Cli> for Config {
    type Error = AppError;

    fn try_from(cli: Cli) -> AppResult<Self> {
        if cli.pod.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(AppError::Cli("pod name must not be empty".to_string()));
        }
        if cli.namespace.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::Cli("namespace must not be empty".to_string()));
        }

        let mode = if cli.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let color = !cli.no_color
            && match cli.color {
                ColorModeArg::Always => true,
                ColorModeArg::Never => false,
                ColorModeArg::Auto => std::io::stdout().is_terminal(),
            };

        Ok(Self {
            namespace: cli.namespace,
            pod: cli.pod,
            dev_mode: cli.dev,

            inspect: InspectOptions {
                max_events: cli.max_num_events,
                max_log_lines: cli.max_num_log_lines,
            },
            output: OutputConfig { mode, color },
        })
    }
}

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "kube-pod-inspect",
    version,
    about = "Inspects a pod",
    long_about = "Provides detailed information about a pod, including its containers' statuses, \
                  pod events, and logs from non-ready containers. Without POD, every pod in the \
                  namespace is inspected."
)]
pub struct Cli {
    /// Pod to inspect; all pods in the namespace when omitted
    pub pod: Option<String>,

    /// Namespace (defaults to the kubeconfig context's namespace)
    #[arg(short = 'n', long = "namespace")]
    pub namespace: Option<String>,

    /// Maximum number of events to display; 0 means display all
    #[arg(short = 'e', long = "max-num-events", default_value_t = 10)]
    pub max_num_events: usize,

    /// Maximum number of log lines to display; 0 means display all
    #[arg(short = 'l', long = "max-num-log-lines", default_value_t = 5)]
    pub max_num_log_lines: u32,

    /// Emit one JSON report per line
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,

    /// Color mode: auto (tty only), always, never
    #[arg(long = "color", value_enum, default_value_t = ColorModeArg::Auto)]
    pub color: ColorModeArg,

    /// Disable colors (overrides --color)
    #[arg(long = "no-color", default_value_t = false)]
    pub no_color: bool,

    /// Dev mode: inspect built-in fixture pods without a cluster
    #[arg(long = "dev", default_value_t = false)]
    pub dev: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ColorModeArg {
    Auto,
    Always,
    Never,
}

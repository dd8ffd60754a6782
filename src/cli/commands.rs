use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Infer a cloud architecture from the signals in a codebase
#[derive(Parser, Debug)]
#[command(
    name = "infera",
    about = "Infer a cloud architecture from the signals in a codebase",
    version,
    long_about = "infera scans a repository for frameworks, containerization markers, \
                  database clients and provider configuration, then deterministically \
                  selects an architecture template and supplementary managed resources \
                  for the chosen provider (gcp or cloudflare)."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only errors are logged"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect signals in a repository",
        long_about = "Walks the repository and prints the signals found by the detection table.\n\n\
                      Examples:\n  \
                      infera detect\n  \
                      infera detect /path/to/repo --format json"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Resolve an architecture plan and save it",
        long_about = "Detects signals (or reads them from --signals), resolves the architecture \
                      for the provider and saves the result to the state directory.\n\n\
                      Exit codes: 0 plan, 3 provider cannot host the codebase, 1 error.\n\n\
                      Examples:\n  \
                      infera init\n  \
                      infera init --provider cloudflare\n  \
                      infera init --signals signals.json --no-save --format yaml"
    )]
    Init(InitArgs),

    #[command(
        about = "Show the saved plan and whether it is stale",
        long_about = "Prints the saved resolution and compares its signal digest against a \
                      fresh scan of the repository.\n\n\
                      Exit codes: 0 saved plan found, 1 no saved plan or error.\n\n\
                      Examples:\n  \
                      infera status\n  \
                      infera status --format json"
    )]
    Status(StatusArgs),

    #[command(about = "Print the versioned rule tables")]
    Rules(RulesArgs),

    #[command(
        about = "List architecture templates or show one",
        long_about = "Without an id, lists every template the rules can select. With an id, \
                      prints its definition from --dir (or INFERA_TEMPLATES_DIR), falling back \
                      to a built-in description.\n\n\
                      Examples:\n  \
                      infera templates\n  \
                      infera templates api_service --dir ./templates"
    )]
    Templates(TemplatesArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(value_name = "PATH", help = "Path to repository (defaults to current directory)")]
    pub repository_path: Option<PathBuf>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    #[arg(value_name = "PATH", help = "Path to repository (defaults to current directory)")]
    pub repository_path: Option<PathBuf>,

    #[arg(
        short = 'p',
        long,
        value_name = "PROVIDER",
        help = "Target provider: gcp or cloudflare (defaults to INFERA_PROVIDER, then gcp)"
    )]
    pub provider: Option<String>,

    #[arg(
        short = 's',
        long,
        value_name = "FILE",
        help = "Read signals from a JSON list instead of scanning"
    )]
    pub signals: Option<PathBuf>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,

    #[arg(long, help = "Do not write the state file")]
    pub no_save: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StatusArgs {
    #[arg(value_name = "PATH", help = "Path to repository (defaults to current directory)")]
    pub repository_path: Option<PathBuf>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct RulesArgs {
    #[arg(short = 'p', long, value_name = "PROVIDER", help = "Only show one provider")]
    pub provider: Option<String>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct TemplatesArgs {
    #[arg(value_name = "ID", help = "Template id to print")]
    pub id: Option<String>,

    #[arg(short = 'd', long, value_name = "DIR", help = "Template definitions directory")]
    pub dir: Option<PathBuf>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_detect_args() {
        let args = CliArgs::parse_from(["infera", "detect"]);
        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(detect_args.format, OutputFormatArg::Human);
                assert!(detect_args.repository_path.is_none());
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_init_args() {
        let args = CliArgs::parse_from([
            "infera",
            "init",
            "/tmp/repo",
            "--provider",
            "cloudflare",
            "--signals",
            "signals.json",
            "--no-save",
            "-f",
            "json",
        ]);
        match args.command {
            Commands::Init(init) => {
                assert_eq!(init.repository_path, Some(PathBuf::from("/tmp/repo")));
                assert_eq!(init.provider.as_deref(), Some("cloudflare"));
                assert_eq!(init.signals, Some(PathBuf::from("signals.json")));
                assert!(init.no_save);
                assert_eq!(init.format, OutputFormatArg::Json);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_templates_args() {
        let args = CliArgs::parse_from(["infera", "templates", "api_service", "--dir", "tpl"]);
        match args.command {
            Commands::Templates(t) => {
                assert_eq!(t.id.as_deref(), Some("api_service"));
                assert_eq!(t.dir, Some(PathBuf::from("tpl")));
            }
            _ => panic!("Expected Templates command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["infera", "rules", "--log-level", "debug"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));

        let args = CliArgs::parse_from(["infera", "-q", "status"]);
        assert!(args.quiet);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(CliArgs::try_parse_from(["infera", "-v", "-q", "rules"]).is_err());
    }
}

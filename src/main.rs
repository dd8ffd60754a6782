use infera::cli::commands::{CliArgs, Commands};
use infera::cli::handlers::{
    handle_detect, handle_init, handle_rules, handle_status, handle_templates, EXIT_ERROR,
};
use infera::config::InferaConfig;
use infera::util::logging::{config_for, init_logging, parse_level_or_default};
use infera::{NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::{debug, error, Level};

fn main() {
    let args = CliArgs::parse();
    let mut config = InferaConfig::default();
    init_logging_from_args(&args, &config);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    if let Some(level) = &args.log_level {
        config.log_level = level.to_lowercase();
    }
    if let Err(e) = config.validate() {
        error!("{}", e);
        process::exit(EXIT_ERROR);
    }

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args, &config),
        Commands::Init(init_args) => handle_init(init_args, &config),
        Commands::Status(status_args) => handle_status(status_args, &config),
        Commands::Rules(rules_args) => handle_rules(rules_args),
        Commands::Templates(templates_args) => handle_templates(templates_args, &config),
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &InferaConfig) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level_or_default(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level_or_default(&config.log_level)
    };

    init_logging(config_for(level));
}

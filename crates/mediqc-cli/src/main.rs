//! Medical record quality-control CLI.

use clap::Parser;
use mediqc_cli::cli::{Cli, Command, RulesCommand, log_config_from_cli};
use mediqc_cli::commands::{
    run_check, run_rules_add, run_rules_list, run_rules_remove, run_rules_update,
};
use mediqc_cli::logging::init_logging;
use mediqc_cli::summary::{print_check_summary, print_rule, print_rules};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Check(args) => match run_check(&args) {
            Ok(result) => {
                print_check_summary(&result);
                if result.has_violations() { 1 } else { 0 }
            }
            Err(error) => report(&error),
        },
        Command::Rules(args) => {
            let outcome = match &args.command {
                RulesCommand::List => run_rules_list(&args.rules).map(|rules| print_rules(&rules)),
                RulesCommand::Add { rule } => {
                    run_rules_add(&args.rules, rule).map(|rule| print_rule("Added", &rule))
                }
                RulesCommand::Update { id, rule } => run_rules_update(&args.rules, id, rule)
                    .map(|rule| print_rule("Updated", &rule)),
                RulesCommand::Remove { id } => {
                    run_rules_remove(&args.rules, id).map(|rule| print_rule("Removed", &rule))
                }
            };
            match outcome {
                Ok(()) => 0,
                Err(error) => report(&error),
            }
        }
    };
    std::process::exit(exit_code);
}

fn report(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    2
}

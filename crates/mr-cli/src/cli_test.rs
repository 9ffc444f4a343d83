use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_run_args() {
    let cli = Cli::try_parse_from([
        "migrun",
        "run",
        "--backend",
        "bulk-rest",
        "--select",
        "1,3",
        "--split",
        "naive",
        "--output",
        "json",
        "--fail-on-missing",
    ])
    .unwrap();

    let Commands::Run(args) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.backend, Some(BackendArg::BulkRest));
    assert_eq!(args.select.as_deref(), Some("1,3"));
    assert_eq!(args.split, Some(SplitArg::Naive));
    assert_eq!(args.output, RunOutput::Json);
    assert!(args.fail_on_missing);
}

#[test]
fn test_global_args_after_subcommand() {
    let cli = Cli::try_parse_from(["migrun", "ls", "-v", "-p", "/tmp/project"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "/tmp/project");
    assert!(matches!(cli.command, Commands::Ls(_)));
}

#[test]
fn test_split_requires_file() {
    assert!(Cli::try_parse_from(["migrun", "split"]).is_err());
}

#[test]
fn test_arg_conversions() {
    assert_eq!(BackendKind::from(BackendArg::Direct), BackendKind::Direct);
    assert_eq!(
        BackendKind::from(BackendArg::PerStatementRest),
        BackendKind::PerStatementRest
    );
    assert_eq!(SplitStrategy::from(SplitArg::Tokenizer), SplitStrategy::Tokenizer);
}

use super::args::{CaretArgs, CliArgs, Command, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn parses_complete_with_caret() {
    let args = CliArgs::try_parse_from(["phz", "complete", "src/a.php", "--line", "4", "--column", "7"])
        .expect("valid args");
    assert_eq!(
        args.command,
        Command::Complete(CaretArgs {
            file: PathBuf::from("src/a.php"),
            line: 4,
            column: 7,
        })
    );
    assert_eq!(args.format, OutputFormat::Text);
    assert!(args.exclude.is_empty());
}

#[test]
fn global_flags_after_subcommand() {
    let args = CliArgs::try_parse_from([
        "phz",
        "types",
        "a.php",
        "-l",
        "1",
        "-C",
        "2",
        "--format",
        "json",
        "--exclude",
        "vendor/**,tests/**",
        "--list-index-suggestions",
        "3",
    ])
    .expect("valid args");
    assert!(matches!(args.command, Command::Types(_)));
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(args.exclude, vec!["vendor/**", "tests/**"]);
    assert_eq!(args.list_index_suggestions, Some(3));
}

#[test]
fn files_takes_project() {
    let args = CliArgs::try_parse_from(["phz", "-p", "app", "files"]).expect("valid args");
    assert_eq!(args.command, Command::Files);
    assert_eq!(args.project, Some(PathBuf::from("app")));
}

#[test]
fn rejects_zero_line() {
    assert!(CliArgs::try_parse_from(["phz", "complete", "a.php", "--line", "0", "--column", "1"]).is_err());
}

#[test]
fn requires_caret() {
    assert!(CliArgs::try_parse_from(["phz", "complete", "a.php"]).is_err());
}

//! Library integration tests.

use envcheck::EnvCheckError;

#[test]
fn error_types_are_public() {
    let err = EnvCheckError::InterpreterNotFound {
        candidates: "python3, python".into(),
    };
    assert!(err.to_string().contains("python3, python"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> envcheck::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use envcheck::cli::Cli;

    let cli = Cli::parse_from(["envcheck", "--quiet", "--python", "python3.12"]);
    assert!(cli.quiet);
    assert_eq!(cli.python.as_deref(), Some(std::path::Path::new("python3.12")));
}

#[test]
fn checks_run_in_fixed_order() {
    let labels: Vec<&str> = envcheck::checks::all_checks()
        .iter()
        .map(|c| c.label)
        .collect();
    assert_eq!(
        labels,
        [
            "Python version",
            "Virtual environment",
            "Project structure",
            "Installed packages",
            "Script syntax",
            "Library tests"
        ]
    );
}

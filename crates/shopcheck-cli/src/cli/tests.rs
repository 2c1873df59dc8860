#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_smoke_defaults() {
        let cli = Cli::try_parse_from(["shopcheck", "smoke"]).unwrap();
        match cli.command {
            Command::Smoke(args) => {
                assert_eq!(
                    args.title,
                    "iDream Apple Sklep internetowy - Apple Premium Reseller Polska"
                );
                assert!(!args.headed);
            }
            other => panic!("expected smoke, got {other:?}"),
        }
    }

    #[test]
    fn test_links_overrides() {
        let cli = Cli::try_parse_from(["shopcheck", "links", "-j", "8", "--timeout", "20", "--list"])
            .unwrap();
        match cli.command {
            Command::Links(args) => {
                assert_eq!(args.concurrency, Some(8));
                assert_eq!(args.timeout, Some(20));
                assert!(args.list);
            }
            other => panic!("expected links, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "shopcheck",
            "inspect",
            "--config",
            "staging.toml",
            "--no-color",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("staging.toml")));
        assert!(cli.no_color);
        assert!(cli.verbose);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["shopcheck", "-v", "-q", "smoke"]).is_err());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["shopcheck"]).is_err());
    }
}

use clap::Parser;

/// Command-line arguments for toggl-commit
#[derive(Parser, Debug, Clone)]
#[command(name = "toggl-commit")]
#[command(about = "Commits and pushes a repository using the running Toggl time entry as the message")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Collect a new configuration even if a stored document exists
    #[arg(long = "new-config", short = 'n')]
    pub new_config: bool,

    /// Branch pushed to when pushing is enabled
    #[arg(long, value_name = "BRANCH", default_value = "main")]
    pub branch: String,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["toggl-commit"]);
        assert!(!args.new_config);
        assert!(!args.verbose);
        assert_eq!(args.branch, "main");
    }

    #[test]
    fn test_new_config_flag_forms() {
        let long = Args::parse_from(["toggl-commit", "--new-config"]);
        assert!(long.new_config);

        let short = Args::parse_from(["toggl-commit", "-n"]);
        assert!(short.new_config);
    }

    #[test]
    fn test_branch_override() {
        let args = Args::parse_from(["toggl-commit", "--branch", "develop"]);
        assert_eq!(args.branch, "develop");
    }
}

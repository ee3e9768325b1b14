//! 命令行参数

use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "cvx")]
#[command(about = "CertVault terminal client")]
#[command(version)]
pub struct Cli {
    /// Server URL (overrides CERTVAULT_URL and the config file)
    #[arg(short, long, value_name = "URL")]
    pub server: Option<String>,

    /// Log level written to cvx.log (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LevelFilter>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the server is reachable
    Ping,
    /// Print the version
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_command_launches_tui() {
        let cli = Cli::try_parse_from(["cvx"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.server.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn flags_and_subcommand() {
        let cli = Cli::try_parse_from([
            "cvx",
            "--server",
            "https://vault.example.com",
            "--log-level",
            "debug",
            "ping",
        ])
        .unwrap();
        assert_eq!(cli.server.as_deref(), Some("https://vault.example.com"));
        assert_eq!(cli.log_level, Some(LevelFilter::Debug));
        assert!(matches!(cli.command, Some(Commands::Ping)));
    }

    #[test]
    fn bad_level_is_rejected() {
        assert!(Cli::try_parse_from(["cvx", "--log-level", "loud"]).is_err());
    }
}

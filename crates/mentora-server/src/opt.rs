use crate::auth::SessionConfig;
use chrono::TimeDelta;
use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;

#[derive(Debug, Parser)]
#[command(name = "mentora-server", about = "Serve the learner and tutor api")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    Run(Run),
}

#[derive(Debug, Clone, Args)]
#[group(multiple = true, required = false)]
pub(crate) struct Db {
    #[arg(long, help = "Min connections")]
    pub(crate) db_min_connections: Option<u32>,

    #[arg(long, help = "Max connections")]
    pub(crate) db_max_connections: Option<u32>,
}

#[derive(Clone, Args)]
pub(crate) struct Session {
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true, help = "Secret used to sign session tokens")]
    pub(crate) session_secret: String,

    #[arg(long, help = "Only send the session cookie over https")]
    pub(crate) cookie_secure: bool,

    #[arg(long, default_value_t = 30, help = "Lifetime of a session in days")]
    pub(crate) token_ttl_days: i64,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_secret", &"<redacted>")
            .field("cookie_secure", &self.cookie_secure)
            .field("token_ttl_days", &self.token_ttl_days)
            .finish()
    }
}

impl From<Session> for SessionConfig {
    fn from(session: Session) -> Self {
        Self {
            secret: session.session_secret,
            cookie_secure: session.cookie_secure,
            token_ttl: TimeDelta::days(session.token_ttl_days),
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct Run {
    #[arg(long)]
    pub(crate) host: Option<IpAddr>,

    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    #[arg(long, env = "DATABASE_URL", help = "sqlite or postgres connection url")]
    pub(crate) database_url: String,

    #[command(flatten)]
    pub(crate) db: Db,

    #[command(flatten)]
    pub(crate) session: Session,

    #[arg(long, value_delimiter = ',', help = "Origins allowed to call the api with credentials")]
    pub(crate) origins: Vec<String>,

    #[arg(long = "sentry-dsn", help = "Sentry url")]
    pub(crate) sentry_dsn: Option<String>,

    #[arg(long, default_value = "dev", help = "Set the environment used by sentry and prometheus")]
    pub(crate) env: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Run {
        let mut argv = vec!["mentora-server", "run"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let Commands::Run(run) = cli.command;
        run
    }

    #[test]
    fn test_defaults() {
        let run = parse(&["--database-url", "sqlite::memory:", "--session-secret", "s3cret"]);
        assert_eq!(run.host, None);
        assert_eq!(run.env, "dev");
        assert!(run.origins.is_empty());

        let config = SessionConfig::from(run.session);
        assert!(!config.cookie_secure);
        assert_eq!(config.token_ttl, TimeDelta::days(30));
        assert!(!format!("{config:?}").contains("s3cret"));
    }

    #[test]
    fn test_origins_are_split() {
        let run = parse(&[
            "--database-url",
            "sqlite::memory:",
            "--session-secret",
            "s3cret",
            "--origins",
            "http://localhost:5173,https://app.example.com",
            "--token-ttl-days",
            "7",
        ]);
        assert_eq!(run.origins, vec!["http://localhost:5173", "https://app.example.com"]);
        assert_eq!(SessionConfig::from(run.session).token_ttl, TimeDelta::days(7));
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use intervu_domain::{Company, InterviewType};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "intervu", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to a TOML config file.
    ///
    /// Defaults to `~/.intervu/intervu.toml` when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output mode.
    ///
    /// Logs every request, response status and navigation to stderr.
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    /// Override the API base URL for this run
    #[arg(long, global = true)]
    pub base_url: Option<Url>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Log in and store the issued tokens
    Login {
        #[arg(long, short)]
        username: Option<String>,

        /// Prompted for without echo when omitted
        #[arg(long, short)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        #[arg(long, short)]
        username: Option<String>,

        #[arg(long, short)]
        nickname: Option<String>,
    },

    /// Revoke the refresh token and forget both tokens
    Logout,

    /// Show the logged-in member
    Profile,

    /// Run an interactive mock interview
    Interview {
        /// `cs`, `project` or any category the server knows
        #[arg(long = "type", short = 't', default_value = "cs")]
        interview_type: InterviewType,
    },

    /// List past interview sessions
    Records,

    /// Show one past session with per-turn feedback
    Record { id: u64 },

    /// Look up reference material for an improvement keyword
    Keyword { name: String },

    /// Browse study material.
    ///
    /// Without arguments lists the categories; with both categories lists
    /// their topics; with `--title` prints one topic.
    Study {
        first: Option<String>,
        second: Option<String>,

        #[arg(long)]
        title: Option<String>,
    },

    /// Community best answers, four per page
    BestAnswers {
        #[arg(long, short)]
        category: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Interview reviews for a company (naver, kakao, line, coupang, baemin)
    Reviews { company: Company },

    /// Forget stored tokens without contacting the server
    ClearTokens,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_interview_type_defaults_to_cs() {
        let actual = Cli::try_parse_from(["intervu", "interview"]).unwrap();

        assert_eq!(actual.command, Command::Interview { interview_type: InterviewType::Cs });
    }

    #[test]
    fn test_custom_interview_type() {
        let actual = Cli::try_parse_from(["intervu", "interview", "--type", "network"]).unwrap();

        assert_eq!(
            actual.command,
            Command::Interview { interview_type: InterviewType::Category("network".to_string()) }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let actual = Cli::try_parse_from([
            "intervu",
            "profile",
            "--verbose",
            "--base-url",
            "https://api.example.test/",
        ])
        .unwrap();

        assert!(actual.verbose);
        assert_eq!(
            actual.base_url.map(String::from),
            Some("https://api.example.test/".to_string())
        );
    }

    #[test]
    fn test_company_is_case_insensitive() {
        let actual = Cli::try_parse_from(["intervu", "reviews", "Kakao"]).unwrap();

        assert_eq!(actual.command, Command::Reviews { company: Company::Kakao });
    }

    #[test]
    fn test_unknown_company_is_rejected() {
        assert!(Cli::try_parse_from(["intervu", "reviews", "acme"]).is_err());
    }
}

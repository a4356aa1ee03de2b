use clap::{Parser, Subcommand};

/// Browse and fetch content from GitHub repositories: search, list trees,
/// read history and download files over the REST API.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = "A small CLI for browsing GitHub repositories over the REST API. Each command issues a single request per target; nothing is paginated, cached or retried."
)]
pub struct Args {
    /// Base URL of the GitHub API. Defaults to GITHUB_API_URL or https://api.github.com.
    #[clap(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds. No timeout when omitted.
    #[clap(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search repositories matching a query.
    Search {
        /// Free-text query
        query: String,
    },

    /// List files and directories at the root of a repository tree.
    Ls {
        user: String,
        repo: String,

        /// Branch, tag or commit SHA.
        #[clap(short, long = "ref", value_name = "REF", default_value = "master")]
        reference: String,
    },

    /// Show commit history.
    Log {
        user: String,
        repo: String,

        /// Starting branch, tag or commit SHA.
        #[clap(short, long = "from", value_name = "REF")]
        from_ref: Option<String>,

        /// Only commits touching this path.
        #[clap(short, long)]
        path: Option<String>,

        /// Print at most this many commits.
        #[clap(short = 'n', long, value_name = "NUM")]
        limit: Option<usize>,
    },

    /// Download files from contents-API URLs (as printed by `ls`) to stdout.
    Cat {
        #[clap(num_args = 1.., required = true)]
        urls: Vec<String>,
    },

    /// Download a file by its path in a repository to stdout.
    Show {
        user: String,
        repo: String,
        path: String,

        /// Branch, tag or commit SHA.
        #[clap(short, long = "ref", value_name = "REF", default_value = "master")]
        reference: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ls_defaults_to_master() {
        let args = Args::parse_from(["github-browse", "ls", "octo", "hello"]);
        match args.command {
            Command::Ls { reference, .. } => assert_eq!(reference, "master"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn log_accepts_filters_and_global_flags() {
        let args = Args::parse_from([
            "github-browse",
            "log",
            "octo",
            "hello",
            "--from",
            "dev",
            "--path",
            "lib",
            "-n",
            "5",
            "--api-url",
            "http://localhost:9000",
        ]);
        assert_eq!(args.api_url.as_deref(), Some("http://localhost:9000"));
        match args.command {
            Command::Log { from_ref, path, limit, .. } => {
                assert_eq!(from_ref.as_deref(), Some("dev"));
                assert_eq!(path.as_deref(), Some("lib"));
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn cat_requires_a_url() {
        assert!(Args::try_parse_from(["github-browse", "cat"]).is_err());
    }
}

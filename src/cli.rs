use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// roam-pub - Normalize Roam graph exports into stable-id vertex graphs
///
/// # Quick Reference
///
/// ```bash
/// roam-pub validate article.json           # Run pre-validation checks
/// roam-pub normalize article.yaml --pretty # Print the normalized graph as JSON
/// roam-pub tree article.json               # Print an indented outline per root
/// roam-pub files article.json              # List managed file references
/// roam-pub --json files article.json       # Same, as a JSON array
/// roam-pub --lenient tree article.json     # Ignore heading levels outside 1-6
/// ```
///
/// ## Input
///
/// A `.json`, `.yaml` or `.yml` file holding either a list of entities or the
/// `[[entity], ...]` rows a `(pull ?e [*])` query returns.
///
/// ## Environment Variables
///
/// - `ROAM_PUB_ASSET_HOST`: host of managed files (default: firebasestorage.googleapis.com)
/// - `ROAM_PUB_STRICT_HEADINGS`: set to `false` to ignore out-of-range headings
/// - `ROAM_PUB_UID_LENGTH`: require stable ids of exactly this length
/// - `ROAM_PUB_LOG`: log filter, e.g. `debug` or `roam_pub=trace` (default: warn)
#[derive(Parser, Debug)]
#[command(name = "roam-pub")]
#[command(version)]
#[command(about = "Normalize Roam graph exports into stable-id vertex graphs")]
pub struct Cli {
    /// Treat heading levels outside 1-6 as plain content
    #[arg(short, long, global = true)]
    pub lenient: bool,

    /// Output in JSON format (for scripting)
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a network and report every failure at once
    #[command(alias = "check")]
    Validate {
        /// Network file (.json, .yaml or .yml)
        file: PathBuf,
    },

    /// Normalize a network and print the vertex graph as JSON
    #[command(alias = "n")]
    Normalize {
        /// Network file (.json, .yaml or .yml)
        file: PathBuf,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the normalized network as an indented outline
    Tree {
        /// Network file (.json, .yaml or .yml)
        file: PathBuf,
    },

    /// List managed file references
    #[command(alias = "ls")]
    Files {
        /// Network file (.json, .yaml or .yml)
        file: PathBuf,
    },
}

impl Command {
    pub fn file(&self) -> &PathBuf {
        match self {
            Command::Validate { file }
            | Command::Normalize { file, .. }
            | Command::Tree { file }
            | Command::Files { file } => file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalize() {
        let cli = Cli::try_parse_from(["roam-pub", "normalize", "net.json", "--pretty"]).unwrap();
        assert!(!cli.lenient);
        match cli.command {
            Command::Normalize { file, pretty } => {
                assert_eq!(file, PathBuf::from("net.json"));
                assert!(pretty);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["roam-pub", "files", "net.yaml", "--json", "--lenient"]).unwrap();
        assert!(cli.json);
        assert!(cli.lenient);
        assert_eq!(cli.command.file(), &PathBuf::from("net.yaml"));
    }

    #[test]
    fn test_alias() {
        let cli = Cli::try_parse_from(["roam-pub", "check", "net.json"]).unwrap();
        assert!(matches!(cli.command, Command::Validate { .. }));
    }

    #[test]
    fn test_missing_file_rejected() {
        assert!(Cli::try_parse_from(["roam-pub", "tree"]).is_err());
    }
}

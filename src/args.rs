use clap::{ArgAction, Parser, Subcommand};
use pup_tool::types::*;

/// Tools for inspecting and unpacking PS4 system update packages
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Arg {
    #[arg(global = true, action = ArgAction::SetTrue, short, long)]
    /// Print backtrace on error
    pub backtrace: bool,
    #[arg(global = true, action = ArgAction::SetTrue, short, long)]
    /// Show debug log messages
    pub verbose: bool,
    #[command(subcommand)]
    /// Command
    pub command: Command,
}

#[derive(Subcommand, Debug)]
/// Commands
pub enum Command {
    /// Print header fields
    Info {
        /// Input PUP file, or - for stdin
        input: String,
    },
    /// List entries
    List {
        /// Input PUP file, or - for stdin
        input: String,
        #[arg(short = 'o', long, value_enum, default_value_t = OutputType::Text)]
        /// Output type
        output_type: OutputType,
    },
    /// Extract entry payloads
    Extract {
        /// Input PUP file, or - for stdin
        input: String,
        /// Output directory
        output: Option<String>,
        #[arg(short, long)]
        /// Only extract entries whose name contains this substring (repeatable)
        filter: Vec<String>,
        #[arg(long, action = ArgAction::SetTrue)]
        /// Write stored bytes without inflating compressed entries
        raw: bool,
    },
}

pub fn parse_args() -> Arg {
    Arg::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let arg = Arg::try_parse_from(["pup_tool", "list", "PS4UPDATE.PUP", "-o", "json"]).unwrap();
        match arg.command {
            Command::List { input, output_type } => {
                assert_eq!(input, "PS4UPDATE.PUP");
                assert_eq!(output_type, OutputType::Json);
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_parse_extract_globals() {
        let arg = Arg::try_parse_from([
            "pup_tool", "extract", "a.pup", "out", "-f", "eula", "-f", ".img", "--raw", "-v",
        ])
        .unwrap();
        assert!(arg.verbose);
        assert!(!arg.backtrace);
        match arg.command {
            Command::Extract {
                input,
                output,
                filter,
                raw,
            } => {
                assert_eq!(input, "a.pup");
                assert_eq!(output.as_deref(), Some("out"));
                assert_eq!(filter, vec!["eula", ".img"]);
                assert!(raw);
            }
            _ => panic!("expected extract command"),
        }
    }
}

// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "foldtime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track time spent with workspace folders open"
)]
pub struct Args {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Report user activity (resets the idle timer)")]
    Activity,

    #[command(about = "Replace the set of open workspace folders")]
    Open {
        #[arg(value_name = "FOLDER")]
        folders: Vec<PathBuf>,
    },

    #[command(about = "Start tracking a folder (defaults to the current directory)")]
    Add {
        path: Option<PathBuf>,
    },

    #[command(about = "Stop tracking a folder (defaults to the current directory)")]
    Remove {
        path: Option<PathBuf>,
    },

    #[command(about = "Show time spent on the folder being tracked")]
    Show,

    #[command(about = "List tracked folders")]
    List,

    #[command(about = "Display current tracking information")]
    Info {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Reload the configuration without restarting foldtime")]
    Reload,

    #[command(about = "Save and stop the running daemon")]
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_runs_daemon() {
        let args = Args::try_parse_from(["foldtime", "--verbose"]).unwrap();
        assert!(args.verbose);
        assert!(args.command.is_none());
    }

    #[test]
    fn open_takes_many_folders() {
        let args = Args::try_parse_from(["foldtime", "open", "/a", "/b c"]).unwrap();
        match args.command {
            Some(Command::Open { folders }) => {
                assert_eq!(folders, vec![PathBuf::from("/a"), PathBuf::from("/b c")]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn info_json_flag() {
        let args = Args::try_parse_from(["foldtime", "info", "--json"]).unwrap();
        assert!(matches!(args.command, Some(Command::Info { json: true })));
    }
}

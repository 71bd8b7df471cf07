// Author: Dustin Pilgrim
// License: MIT

use std::io;
use std::path::{Path, PathBuf};

use crate::cli::{Args, Command};
use crate::core::{folder::FolderId, info::InfoSnapshot};
use crate::ipc::{client::send_request, handlers::info};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    let Some(cmd) = args.command else {
        return Ok(());
    };

    let (name, req_args, fallback) = match &cmd {
        Command::Activity => ("activity", Vec::new(), ""),
        Command::Open { folders } => (
            "open",
            folders
                .iter()
                .map(|p| folder_arg(p))
                .collect::<io::Result<Vec<_>>>()?,
            "",
        ),
        Command::Add { path } => ("add", vec![folder_arg(&or_cwd(path.as_deref())?)?], ""),
        Command::Remove { path } => ("remove", vec![folder_arg(&or_cwd(path.as_deref())?)?], ""),
        Command::Show => ("show", Vec::new(), ""),
        Command::List => ("list", Vec::new(), ""),
        Command::Info { json } => {
            let req_args = if *json { vec!["--json".to_string()] } else { Vec::new() };
            ("info", req_args, "")
        }
        Command::Reload => ("reload", Vec::new(), "Configuration reloaded"),
        Command::Stop => ("stop", Vec::new(), "Stopping foldtime daemon"),
    };

    match send_request(name, &req_args).await {
        Ok(resp) => {
            let out = resp.trim_end();
            if out.is_empty() {
                if !fallback.is_empty() {
                    println!("{fallback}");
                }
            } else {
                println!("{out}");
            }
        }
        Err(e) => {
            if matches!(cmd, Command::Info { json: true }) {
                // Waybar needs valid JSON on stdout even when the daemon isn't running.
                println!("{}", info::render(&InfoSnapshot::not_running(), true));
            } else {
                eprintln!("foldtime: {e}");
            }
        }
    }

    Ok(())
}

fn or_cwd(path: Option<&Path>) -> io::Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => std::env::current_dir(),
    }
}

/// Folder ids are absolute; relative arguments resolve against the cwd.
fn folder_arg(path: &Path) -> io::Result<String> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    Ok(FolderId::from_path(&normalize(&abs)).to_string())
}

/// Lexical cleanup of `.` and `..`; the folder may not exist on disk.
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_dots() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
    }

    #[test]
    fn relative_folder_resolves_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let got = folder_arg(Path::new("sub/dir/")).unwrap();

        assert_eq!(got, FolderId::from_path(&cwd.join("sub/dir")).to_string());
    }

    #[test]
    fn absolute_folder_loses_trailing_slash() {
        assert_eq!(folder_arg(Path::new("/work/alpha/")).unwrap(), "/work/alpha");
    }
}

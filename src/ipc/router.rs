// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::mpsc;

use crate::core::{folder::FolderId, tracker_msg::TrackerMsg};
use crate::swarn;

use super::handlers::{events, folders, info, reload, stop};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Activity,
    Open(Vec<FolderId>),
    Add(FolderId),
    Remove(FolderId),
    Show,
    List,
    Info { json: bool },
    Reload,
    Stop,
}

/// First line is the command; every following line is one argument,
/// so paths may contain spaces.
pub fn parse_request(raw: &str) -> Result<Request, String> {
    let mut lines = raw.lines();
    let cmd = lines.next().unwrap_or("").trim();
    let args: Vec<&str> = lines.map(str::trim).filter(|l| !l.is_empty()).collect();

    match cmd {
        "activity" => Ok(Request::Activity),
        "open" => Ok(Request::Open(args.into_iter().map(FolderId::new).collect())),
        "add" => one_folder(cmd, &args).map(Request::Add),
        "remove" => one_folder(cmd, &args).map(Request::Remove),
        "show" => Ok(Request::Show),
        "list" => Ok(Request::List),
        "info" => Ok(Request::Info {
            json: args.contains(&"--json"),
        }),
        "reload" => Ok(Request::Reload),
        "stop" => Ok(Request::Stop),
        "" => Err("ERROR: empty request".to_string()),
        other => Err(format!("ERROR: Unknown command '{other}'")),
    }
}

fn one_folder(cmd: &str, args: &[&str]) -> Result<FolderId, String> {
    match args {
        [path] => {
            let id = FolderId::new(*path);
            if id.is_empty() {
                Err(format!("ERROR: `{cmd}` needs a folder path"))
            } else {
                Ok(id)
            }
        }
        [] => Err(format!("ERROR: `{cmd}` needs a folder path")),
        _ => Err(format!("ERROR: `{cmd}` takes exactly one folder path")),
    }
}

/// Routes incoming requests to the matching handler.
pub async fn route_command(raw: &str, tx: &mpsc::Sender<TrackerMsg>) -> String {
    let request = match parse_request(raw) {
        Ok(r) => r,
        Err(e) => {
            swarn!("Router", "rejected request {:?}: {}", raw, e);
            return e;
        }
    };

    match request {
        Request::Activity => events::handle_activity(tx).await,
        Request::Open(open) => events::handle_open(open, tx).await,
        Request::Add(folder) => folders::handle_add(folder, tx).await,
        Request::Remove(folder) => folders::handle_remove(folder, tx).await,
        Request::Show => folders::handle_show(tx).await,
        Request::List => folders::handle_list(tx).await,
        Request::Info { json } => info::handle_info(json, tx).await,
        Request::Reload => reload::handle_reload(tx).await,
        Request::Stop => stop::handle_stop(tx).await,
    }
}

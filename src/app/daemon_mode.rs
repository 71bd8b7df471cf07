// Author: Dustin Pilgrim
// License: MIT

use std::io;
use std::path::PathBuf;

use eyre::WrapErr;

use crate::cli::Args;
use crate::daemon::Daemon;
use crate::log::{self, LogPolicy};
use crate::{serror, sinfo, swarn};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    // single-instance
    let _instance_lock = crate::app::platform::acquire_single_instance_lock().map_err(|e| {
        eprintln!("{e}");
        io::Error::new(io::ErrorKind::AlreadyExists, e)
    })?;

    log::set_verbose(args.verbose);
    if args.verbose {
        crate::sdebug!("Foldtime", "debug logging enabled");
    }

    // file logging
    if let Some(path) = log::default_log_path() {
        match log::enable_file_output(&path, LogPolicy::default()) {
            Ok(()) => sinfo!("Foldtime", "file logging enabled: {}", path.display()),
            Err(e) => serror!("Foldtime", "failed to enable file logging: {}", e),
        }
    }

    sinfo!("Foldtime", "foldtime starting");

    let config_path: PathBuf = match args.config.as_deref() {
        Some(p) => p.to_path_buf(),
        None => {
            let path = crate::config::resolve_default_config_path();

            // bootstrap only if no --config, and only if missing
            match crate::config::bootstrap::ensure_config_exists(&path)
                .wrap_err_with(|| format!("failed to bootstrap {}", path.display()))
            {
                Ok(true) => sinfo!("Foldtime", "wrote default config to {}", path.display()),
                Ok(false) => {}
                Err(e) => swarn!("Foldtime", "{e:#}"),
            }

            path
        }
    };

    let cfg = crate::config::load_or_default(&config_path);

    // shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let mut daemon = Daemon::new(cfg, config_path);

    let mut daemon_task = tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move { daemon.run(shutdown_rx, shutdown_tx).await }
    });

    tokio::select! {
        res = &mut daemon_task => {
            match res {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(join_err) => Err(Box::new(join_err) as AnyError),
            }
        }

        signal = crate::app::platform::wait_for_termination() => {
            sinfo!("Foldtime", "received {}, shutting down", signal);
            let _ = shutdown_tx.send(true);

            match daemon_task.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(join_err) => Err(Box::new(join_err)),
            }
        }
    }
}

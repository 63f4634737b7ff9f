use crate::command::Command;
use crate::events::AppEvent;
use async_channel::Sender;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(socket_path: &Path, tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(socket_path).is_ok() {
        let _ = std::fs::remove_file(socket_path);
    }

    let listener = match UnixListener::bind(socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", socket_path.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    forward_lines(BufReader::new(stream), &tx).await;
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Parses each line into an event and sends it on. Bad lines are logged and
/// skipped. Returns `false` once the receiving side is gone.
pub async fn forward_lines<R>(reader: R, tx: &Sender<AppEvent>) -> bool
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command(event)) => {
                        if tx.send(event).await.is_err() {
                            return false;
                        }
                    }
                    Err(e) => log::warn!("Ignoring command: {}", e),
                }
            }
            Ok(None) => return true,
            Err(e) => {
                log::error!("Failed to read command: {}", e);
                return true;
            }
        }
    }
}

use crate::app::{AppModel, Flow};
use crate::carousel::Animator;
use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use tokio::runtime::Builder;

#[derive(Debug, Clone, Default)]
pub struct Services {
    pub socket_path: Option<PathBuf>,
    pub watch_path: Option<PathBuf>,
    pub stdin: bool,
}

pub fn start_background_services(tx: Sender<AppEvent>, services: Services) {
    if let Some(socket_path) = services.socket_path {
        let tx = tx.clone();
        tokio::spawn(async move {
            crate::sys::server::run_server(&socket_path, tx).await;
        });
    }

    if let Some(watch_path) = services.watch_path {
        let tx = tx.clone();
        tokio::spawn(async move {
            crate::config::run_async_watcher(watch_path, tx).await;
        });
    }

    if services.stdin {
        tokio::spawn(async move {
            crate::sys::input::run_stdin(tx).await;
        });
    }
}

/// Runs the event loop on a single thread until a `quit` arrives or every
/// event source has gone away.
pub fn run<A: Animator>(mut app: AppModel<A>, services: Services) -> std::io::Result<()> {
    let rt = Builder::new_current_thread().enable_all().build()?;
    let socket_path = services.socket_path.clone();

    rt.block_on(async {
        let (tx, rx) = async_channel::bounded(32);
        start_background_services(tx, services);

        app.start();
        while let Ok(event) = rx.recv().await {
            if app.update(event) == Flow::Quit {
                break;
            }
        }
    });

    // stdin reads sit on a blocking thread that never wakes up on its own
    rt.shutdown_background();

    if let Some(path) = socket_path {
        let _ = std::fs::remove_file(path);
    }
    Ok(())
}

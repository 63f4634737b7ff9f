use crate::events::AppEvent;
use crate::sys::server::forward_lines;
use async_channel::Sender;
use tokio::io::BufReader;

/// Reads commands from stdin. End of input quits the app.
pub async fn run_stdin(tx: Sender<AppEvent>) {
    let stdin = BufReader::new(tokio::io::stdin());
    if forward_lines(stdin, &tx).await {
        let _ = tx.send(AppEvent::Quit).await;
    }
}

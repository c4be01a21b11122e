use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::fetch::RecordSource;
use crate::pipeline::load_position;
use crate::state::{Delta, LoaderCommand};
use crate::watchlist::WatchList;

/// Run fetch-join cycles off the UI thread.
///
/// Each `Load` produces exactly one `Delta::Loaded` carrying the command's cycle id;
/// the view decides whether it is still current. The thread exits when either
/// channel closes.
pub fn spawn_loader<S, W>(
    tx: Sender<Delta>,
    cmd_rx: Receiver<LoaderCommand>,
    source: S,
    watchlist: W,
) -> thread::JoinHandle<()>
where
    S: RecordSource + Send + 'static,
    W: WatchList + Send + 'static,
{
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                LoaderCommand::Load { cycle, position } => {
                    let _ = tx.send(Delta::Log(format!(
                        "[INFO] loading {} (cycle {cycle})",
                        position.label()
                    )));
                    let result = load_position(&source, &watchlist, position)
                        .map_err(|err| {
                            tracing::warn!(position = position.slug(), "load failed: {err:#}");
                            format!("{err:#}")
                        });
                    let delta = Delta::Loaded {
                        cycle,
                        position,
                        result,
                    };
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
            }
        }
    })
}

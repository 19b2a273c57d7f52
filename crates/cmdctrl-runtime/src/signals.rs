//! Receive lifecycle signals through a channel.
//!
//! Servers started through cmdctrl decide for themselves what SIGTERM and
//! SIGUSR2 mean. The listener turns both into [`LifecycleSignal`] values the
//! server loop can await or block on. Once registered, the default action
//! (terminate) no longer applies to either signal.

use std::io;
use std::sync::mpsc as std_mpsc;
use std::thread;

use cmdctrl_core::LifecycleSignal;
use tokio::sync::mpsc;
use tracing::debug;

/// Signal-to-channel bridge backed by a dedicated thread.
#[derive(Debug)]
pub struct SignalListener {
    rx: mpsc::UnboundedReceiver<LifecycleSignal>,
}

impl SignalListener {
    /// Register for terminate and restart signals.
    ///
    /// Returns only after registration completed, so a signal sent after
    /// this call (for example once the pidfile is written) is never lost
    /// to the default action.
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = std_mpsc::sync_channel::<io::Result<()>>(1);

        thread::Builder::new()
            .name("cmdctrl-signals".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                runtime.block_on(forward(tx, ready_tx));
            })?;

        ready_rx.recv().map_err(|_| {
            io::Error::other("signal listener thread exited before registering")
        })??;

        Ok(Self { rx })
    }

    /// Wait for the next signal from async code.
    pub async fn recv(&mut self) -> Option<LifecycleSignal> {
        self.rx.recv().await
    }

    /// Block the calling thread until the next signal.
    ///
    /// Must not be called from within an async runtime.
    pub fn recv_blocking(&mut self) -> Option<LifecycleSignal> {
        self.rx.blocking_recv()
    }
}

#[cfg(unix)]
async fn forward(
    tx: mpsc::UnboundedSender<LifecycleSignal>,
    ready: std_mpsc::SyncSender<io::Result<()>>,
) {
    use tokio::signal::unix::{SignalKind, signal};

    let registered = signal(SignalKind::terminate())
        .and_then(|term| signal(SignalKind::user_defined2()).map(|usr2| (term, usr2)));
    let (mut term, mut usr2) = match registered {
        Ok(streams) => streams,
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    loop {
        let received = tokio::select! {
            Some(()) = term.recv() => LifecycleSignal::Terminate,
            Some(()) = usr2.recv() => LifecycleSignal::Restart,
            else => break,
        };
        debug!(signal = %received, "received signal");
        if tx.send(received).is_err() {
            // Listener dropped; keep the handlers installed but stop forwarding.
            break;
        }
    }
}

#[cfg(not(unix))]
async fn forward(
    _tx: mpsc::UnboundedSender<LifecycleSignal>,
    ready: std_mpsc::SyncSender<io::Result<()>>,
) {
    let _ = ready.send(Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "signal listening is only supported on Unix",
    )));
}

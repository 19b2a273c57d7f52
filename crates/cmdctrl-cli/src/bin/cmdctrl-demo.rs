//! Minimal server driven by cmdctrl.
//!
//! With `COUNT=n` in the environment it waits for `n` lifecycle signals,
//! printing the name of each, before printing `successfully started` and
//! exiting. Without `COUNT` it prints the line right away.

use anyhow::{Context, Result};
use cmdctrl_runtime::SignalListener;

fn main() -> Result<()> {
    let count: usize = match std::env::var("COUNT") {
        Ok(raw) => raw.parse().with_context(|| format!("invalid COUNT {raw:?}"))?,
        Err(_) => 0,
    };

    // Listen before the pidfile exists so an early signal is never fatal.
    let listener = if count > 0 {
        Some(SignalListener::spawn().context("failed to listen for signals")?)
    } else {
        None
    };

    let started = cmdctrl::simple_start();

    if let Some(mut listener) = listener {
        let runtime = started.runtime().context("failed to build runtime")?;
        runtime.block_on(async {
            for _ in 0..count {
                let Some(signal) = listener.recv().await else {
                    break;
                };
                println!("{}", signal.name());
            }
        });
    }

    println!("successfully started");
    Ok(())
}

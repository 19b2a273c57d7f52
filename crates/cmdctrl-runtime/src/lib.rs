//! OS-facing lifecycle adapters for cmdctrl.
//!
//! - [`ProcessHandle`] delivers stop / restart / kill signals to a pid
//! - [`Pidfile`] records and resolves the running instance
//! - [`redirect_outputs`] points stdout/stderr at log files
//! - [`DevRestarter`] restarts the process when its executable changes
//! - [`SignalListener`] bridges received signals into a channel
//! - [`SystemHost`] wires all of the above into the dispatcher's port
#![deny(unsafe_code)]

mod devrestarter;
mod host;
mod init;
pub mod pidfile;
pub mod process;
mod signals;
mod stdfd;

pub use devrestarter::DevRestarter;
pub use host::SystemHost;
pub use init::prestart;
pub use pidfile::Pidfile;
pub use process::ProcessHandle;
pub use signals::SignalListener;
pub use stdfd::redirect_outputs;

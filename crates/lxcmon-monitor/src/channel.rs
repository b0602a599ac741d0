//! The monitor notification channel.
//!
//! The runtime publishes every event as a datagram to a well-known Unix
//! socket address. A monitor binds that address and reads datagrams one at
//! a time; there is exactly one monitor per address.

use std::fs;
use std::io;
use std::os::unix::fs::FileTypeExt;
use std::os::unix::net::{SocketAddr, UnixDatagram};
use std::path::Path;

use lxcmon_common::error::{MonitorError, Result};
use lxcmon_common::types::{Event, MonitorAddress};

use crate::message::{self, MESSAGE_SIZE};

/// A source of runtime events, read one at a time in arrival order.
pub trait EventSource {
    /// Blocks until the next event is available.
    ///
    /// Returns `Ok(None)` when a finite source is exhausted. The live
    /// channel never ends on its own.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::ChannelRead`] if the source fails.
    fn next_event(&mut self) -> Result<Option<Event>>;
}

/// An open subscription to the monitor channel.
#[derive(Debug)]
pub struct Subscription {
    socket: UnixDatagram,
    address: MonitorAddress,
    buf: Vec<u8>,
}

impl Subscription {
    /// Binds the monitor channel at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::ChannelOpen`] if the address is unsupported
    /// on this platform or already bound.
    pub fn open(address: &MonitorAddress) -> Result<Self> {
        let bind = || -> io::Result<UnixDatagram> {
            if let MonitorAddress::Path(path) = address {
                remove_stale_socket(path)?;
            }
            UnixDatagram::bind_addr(&socket_addr(address)?)
        };
        let socket = bind()
            .map_err(|source| MonitorError::ChannelOpen {
                address: address.to_string(),
                source,
            })?;
        tracing::info!(%address, "monitor channel opened");

        Ok(Self {
            socket,
            address: address.clone(),
            buf: vec![0u8; MESSAGE_SIZE],
        })
    }

    /// Returns the address this subscription is bound to.
    #[must_use]
    pub const fn address(&self) -> &MonitorAddress {
        &self.address
    }

    /// Returns the socket file, if the subscription is bound to one.
    #[must_use]
    pub fn socket_path(&self) -> Option<&Path> {
        match &self.address {
            MonitorAddress::Path(path) => Some(path),
            MonitorAddress::Abstract(_) => None,
        }
    }
}

impl EventSource for Subscription {
    fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            let len = match self.socket.recv(&mut self.buf) {
                Ok(len) => len,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(MonitorError::ChannelRead { source }),
            };

            match message::decode(&self.buf[..len]) {
                Some(event) => return Ok(Some(event)),
                None => tracing::warn!(len, "discarding malformed monitor message"),
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(path) = self.socket_path() {
            if let Err(e) = fs::remove_file(path) {
                tracing::debug!(path = %path.display(), error = %e, "failed to remove socket file");
            }
        }
    }
}

/// Sends one event to the monitor bound at `address`.
///
/// # Errors
///
/// Returns [`MonitorError::ChannelSend`] if no monitor is listening or the
/// datagram cannot be delivered.
pub fn notify(address: &MonitorAddress, event: &Event) -> Result<()> {
    let send = || -> io::Result<()> {
        let addr = socket_addr(address)?;
        let socket = UnixDatagram::unbound()?;
        let _ = socket.send_to_addr(&message::encode(event), &addr)?;
        Ok(())
    };
    send().map_err(|source| MonitorError::ChannelSend {
        address: address.to_string(),
        source,
    })
}

/// Unlinks `path` if it is a socket file nobody is listening on, as left
/// behind by a monitor that was killed before it could clean up.
fn remove_stale_socket(path: &Path) -> io::Result<()> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(());
    };
    if !meta.file_type().is_socket() {
        return Ok(());
    }

    match UnixDatagram::unbound()?.connect(path) {
        Err(e) if e.kind() == io::ErrorKind::ConnectionRefused => {
            tracing::warn!(path = %path.display(), "removing stale monitor socket");
            fs::remove_file(path)
        }
        _ => Ok(()),
    }
}

fn socket_addr(address: &MonitorAddress) -> io::Result<SocketAddr> {
    match address {
        MonitorAddress::Path(path) => SocketAddr::from_pathname(path),
        #[cfg(target_os = "linux")]
        MonitorAddress::Abstract(name) => {
            use std::os::linux::net::SocketAddrExt;
            SocketAddr::from_abstract_name(name.as_bytes())
        }
        #[cfg(not(target_os = "linux"))]
        MonitorAddress::Abstract(_) => Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "abstract socket addresses require Linux",
        )),
    }
}

//! Share-request bookkeeping on the engine side.
//!
//! The network call itself belongs to the host (see the `share` crate's
//! `ShareClient`). The engine only validates and exports a snapshot, hands it
//! out as a numbered [`ShareTicket`], and refuses to start another share until
//! the host reports the outcome of the one in flight.

#[cfg(test)]
#[path = "share_test.rs"]
mod share_test;

use crate::export::ExportError;

/// An exported snapshot the host should send to the storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTicket {
    /// Sequence number to pass back to `on_share_completed`.
    pub seq: u64,
    /// SVG markup of the curve at request time.
    pub svg: String,
}

/// Result of the host's call to the storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Stored; `url` is where the file can be viewed.
    Stored { url: String },
    /// Network failure or malformed response.
    Failed { reason: String },
}

/// Why a share request was declined before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShareRejection {
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("a share request is already in flight (ticket {seq})")]
    InFlight { seq: u64 },
}

impl ShareRejection {
    /// Text to show the user, or `None` when the refusal should stay silent.
    #[must_use]
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Export(e) => e.user_message(),
            Self::InFlight { .. } => Some("Still sharing the previous version, please wait."),
        }
    }
}

/// Tracks the single share request that may be in flight.
#[derive(Debug, Clone, Default)]
pub struct ShareTracker {
    next_seq: u64,
    in_flight: Option<u64>,
}

impl ShareTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number of the request in flight, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Issue a ticket for `svg`, or refuse if one is already outstanding.
    ///
    /// # Errors
    ///
    /// Returns [`ShareRejection::InFlight`] while a previous ticket is open.
    pub fn begin(&mut self, svg: String) -> Result<ShareTicket, ShareRejection> {
        if let Some(seq) = self.in_flight {
            return Err(ShareRejection::InFlight { seq });
        }
        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight = Some(seq);
        Ok(ShareTicket { seq, svg })
    }

    /// Close the ticket `seq`. Returns `false` (and changes nothing) when `seq`
    /// is not the ticket in flight.
    pub fn finish(&mut self, seq: u64) -> bool {
        if self.in_flight == Some(seq) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}

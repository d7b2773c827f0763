//! Diagnostics emitted while a container is patched
//!
//! Patching reports what it found and what it replaced through a
//! [`PatchObserver`]. The default [`TracingObserver`] turns these events into
//! `tracing` records; tests and callers can plug in their own observer to
//! collect them.

use mapstamp_checksum::{MapId, VerificationWords};
use serde::Serialize;
use tracing::{debug, info};

/// One step of a patch operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PatchEvent {
    /// TRE header found
    HeaderLocated {
        /// Header start offset
        start: usize,
        /// First header byte
        header_length: u8,
    },
    /// Stored map id overwritten
    MapIdReplaced {
        /// Previous map id
        old: MapId,
        /// Map id written
        new: MapId,
    },
    /// Stored map values overwritten
    ValuesReplaced {
        /// Values found in the header
        stored: VerificationWords,
        /// Values written
        computed: VerificationWords,
    },
    /// FAT entry name overwritten
    EntryRenamed {
        /// Absolute offset of the entry
        offset: usize,
        /// Name found in the entry
        old_name: String,
    },
}

/// Receiver for [`PatchEvent`]s
pub trait PatchObserver: Send {
    /// Called once per event, in the order the patch proceeds
    fn on_event(&mut self, event: &PatchEvent);
}

impl<F> PatchObserver for F
where
    F: FnMut(&PatchEvent) + Send,
{
    fn on_event(&mut self, event: &PatchEvent) {
        self(event);
    }
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    label: Option<String>,
}

impl TracingObserver {
    /// Observer without a label
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer that prefixes every record with `label` (usually the file)
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }
}

impl PatchObserver for TracingObserver {
    fn on_event(&mut self, event: &PatchEvent) {
        let label = self.label.as_deref().unwrap_or("-");
        match event {
            PatchEvent::HeaderLocated {
                start,
                header_length,
            } => debug!("{label}: TRE header at {start:#x}, header length {header_length}"),
            PatchEvent::MapIdReplaced { old, new } => {
                info!("{label}: map id {old} ({:#010x}) -> {new}", old.get());
            }
            PatchEvent::ValuesReplaced { stored, computed } => {
                debug!("{label}: map values {stored} (original)");
                debug!("{label}: map values {computed} (calculated)");
            }
            PatchEvent::EntryRenamed { offset, old_name } => {
                debug!("{label}: FAT entry at {offset:#x} was {old_name}");
            }
        }
    }
}

/// Drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl PatchObserver for NullObserver {
    fn on_event(&mut self, _event: &PatchEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer_collects() {
        let mut seen = Vec::new();
        {
            let mut observer = |e: &PatchEvent| seen.push(e.clone());
            observer.on_event(&PatchEvent::HeaderLocated {
                start: 0x1000,
                header_length: 188,
            });
        }
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_event_json_shape() {
        let event = PatchEvent::MapIdReplaced {
            old: MapId::new(1),
            new: MapId::new(2),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert_eq!(json, r#"{"event":"map_id_replaced","old":1,"new":2}"#);
    }
}

//! Engine configuration
//!
//! ## Function support and trust
//!
//! A Function record carries source text. Turning that text back into
//! something callable means executing whatever the record says, so hydrating
//! a Function record is only safe for data from a trusted producer. Function
//! support is therefore off by default, in both directions: with
//! `allow_functions == false` the dehydrator refuses Function nodes and the
//! hydrator refuses Function records.
//!
//! The heap stores function source inertly and never evaluates it; an
//! embedder that does evaluate it owns the trust decision made here.

/// Options for [`serialize_with`](crate::serialize_with) and
/// [`deserialize_with`](crate::deserialize_with)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Accept Function nodes and records (trusted input only)
    pub allow_functions: bool,
    /// Reject record sequences longer than this before allocating anything
    pub max_records: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            allow_functions: false,
            max_records: None,
        }
    }
}

impl Config {
    /// Options for data from a trusted producer: functions allowed, no limit
    pub fn trusted() -> Self {
        Config {
            allow_functions: true,
            max_records: None,
        }
    }

    /// Options for untrusted data: functions refused, sequence length capped
    pub fn untrusted(max_records: usize) -> Self {
        Config {
            allow_functions: false,
            max_records: Some(max_records),
        }
    }

    /// Set `allow_functions`
    pub fn with_functions(mut self, allow: bool) -> Self {
        self.allow_functions = allow;
        self
    }

    /// Set `max_records`
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }
}

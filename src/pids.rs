//! Packet identifier bookkeeping for a transport stream scan.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::Serialize;

/// PIDs seen in a stream, grouped by role.
///
/// The four sets are independent: a PID may appear in more than one. Adding a
/// PID that is already present leaves the set unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Pids {
    pmt_pids: BTreeSet<u16>,
    pcr_pids: BTreeSet<u16>,
    scte35_pids: BTreeSet<u16>,
    /// PIDs that might carry SCTE-35 but are not confirmed yet.
    maybe_pids: BTreeSet<u16>,
}

impl Pids {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pmt_pid(&self, pid: u16) -> bool {
        self.pmt_pids.contains(&pid)
    }

    /// Returns `true` if the PID was not known before.
    pub fn add_pmt_pid(&mut self, pid: u16) -> bool {
        self.pmt_pids.insert(pid)
    }

    pub fn del_pmt_pid(&mut self, pid: u16) -> bool {
        self.pmt_pids.remove(&pid)
    }

    pub fn is_pcr_pid(&self, pid: u16) -> bool {
        self.pcr_pids.contains(&pid)
    }

    pub fn add_pcr_pid(&mut self, pid: u16) -> bool {
        self.pcr_pids.insert(pid)
    }

    pub fn del_pcr_pid(&mut self, pid: u16) -> bool {
        self.pcr_pids.remove(&pid)
    }

    pub fn is_scte35_pid(&self, pid: u16) -> bool {
        self.scte35_pids.contains(&pid)
    }

    pub fn add_scte35_pid(&mut self, pid: u16) -> bool {
        self.scte35_pids.insert(pid)
    }

    pub fn del_scte35_pid(&mut self, pid: u16) -> bool {
        self.scte35_pids.remove(&pid)
    }

    pub fn is_maybe_pid(&self, pid: u16) -> bool {
        self.maybe_pids.contains(&pid)
    }

    pub fn add_maybe_pid(&mut self, pid: u16) -> bool {
        self.maybe_pids.insert(pid)
    }

    pub fn del_maybe_pid(&mut self, pid: u16) -> bool {
        self.maybe_pids.remove(&pid)
    }

    /// PMT PIDs in ascending order.
    pub fn pmt_pids(&self) -> impl Iterator<Item = u16> + '_ {
        self.pmt_pids.iter().copied()
    }

    pub fn pcr_pids(&self) -> impl Iterator<Item = u16> + '_ {
        self.pcr_pids.iter().copied()
    }

    pub fn scte35_pids(&self) -> impl Iterator<Item = u16> + '_ {
        self.scte35_pids.iter().copied()
    }

    pub fn maybe_pids(&self) -> impl Iterator<Item = u16> + '_ {
        self.maybe_pids.iter().copied()
    }
}

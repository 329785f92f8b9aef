// PacketSim: Discrete Packet Forwarding Simulator
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Routing Table
//!
//! Ordered list of static routes of a router, queried with longest-prefix-match.

use crate::netsim::address::{parse_ip, same_subnet, SubnetMask};
use crate::netsim::AddressError;
use std::net::Ipv4Addr;

/// Single entry of a routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Destination network
    pub network: Ipv4Addr,
    /// Mask of the destination network
    pub mask: SubnetMask,
    /// Address of the next router. `0.0.0.0` means that the destination network is directly
    /// connected, and the packet is sent to the destination itself.
    pub next_hop: Ipv4Addr,
    /// Index of the interface on the router through which the packet leaves
    pub interface: usize,
}

impl RouteEntry {
    /// Create a new route entry from its textual representation.
    pub fn new(
        network: &str,
        mask: &str,
        next_hop: &str,
        interface: usize,
    ) -> Result<Self, AddressError> {
        Ok(Self {
            network: parse_ip(network)?,
            mask: mask.parse()?,
            next_hop: parse_ip(next_hop)?,
            interface,
        })
    }

    /// Returns true if the destination is directly connected (next hop is `0.0.0.0`).
    pub fn is_directly_connected(&self) -> bool {
        self.next_hop.is_unspecified()
    }

    /// Returns true if the destination is covered by this entry
    pub fn matches(&self, destination: Ipv4Addr) -> bool {
        same_subnet(self.network, self.mask, destination)
    }

    /// Returns the prefix length of the entry
    pub fn prefix_len(&self) -> u8 {
        self.mask.prefix_len()
    }
}

/// Routing table, keeping the entries in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Create an empty routing table
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append an entry at the end of the table
    pub fn add(&mut self, entry: RouteEntry) {
        self.entries.push(entry);
    }

    /// Longest prefix match. Among all matching entries, the one with the longest prefix is
    /// returned. If multiple matching entries have the same prefix length, the one inserted first
    /// wins.
    ///
    /// ```
    /// # use packetsim::netsim::route_table::{RouteEntry, RouteTable};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table = RouteTable::new();
    /// table.add(RouteEntry::new("10.0.0.0", "255.0.0.0", "192.168.0.2", 0)?);
    /// table.add(RouteEntry::new("10.0.0.0", "255.255.255.0", "0.0.0.0", 1)?);
    /// let route = table.lookup("10.0.0.5".parse()?).unwrap();
    /// assert_eq!(route.interface, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup(&self, destination: Ipv4Addr) -> Option<&RouteEntry> {
        let mut best: Option<&RouteEntry> = None;
        for entry in self.entries.iter().filter(|e| e.matches(destination)) {
            match best {
                Some(b) if b.prefix_len() >= entry.prefix_len() => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    /// Returns the entry at the given position
    pub fn get(&self, idx: usize) -> Option<&RouteEntry> {
        self.entries.get(idx)
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

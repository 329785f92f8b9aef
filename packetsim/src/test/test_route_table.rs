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

use crate::netsim::address::SubnetMask;
use crate::netsim::route_table::{RouteEntry, RouteTable};
use crate::netsim::AddressError;
use std::net::Ipv4Addr;

fn entry(net: &str, mask: &str, next_hop: &str, interface: usize) -> RouteEntry {
    RouteEntry::new(net, mask, next_hop, interface).unwrap()
}

fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

#[test]
fn test_longest_prefix_match() {
    // insert the shorter prefix first
    let mut t = RouteTable::new();
    t.add(entry("10.0.0.0", "255.0.0.0", "192.168.0.2", 0));
    t.add(entry("10.0.0.0", "255.255.255.0", "0.0.0.0", 1));
    assert_eq!(t.lookup(ip("10.0.0.5")).map(|r| r.interface), Some(1));
    assert_eq!(t.lookup(ip("10.9.0.5")).map(|r| r.interface), Some(0));

    // insert the longer prefix first
    let mut t = RouteTable::new();
    t.add(entry("10.0.0.0", "255.255.255.0", "0.0.0.0", 1));
    t.add(entry("10.0.0.0", "255.0.0.0", "192.168.0.2", 0));
    assert_eq!(t.lookup(ip("10.0.0.5")).map(|r| r.interface), Some(1));
}

#[test]
fn test_equal_prefix_earliest_wins() {
    let mut t = RouteTable::new();
    t.add(entry("10.0.0.0", "255.0.0.0", "192.168.0.2", 0));
    t.add(entry("10.0.0.0", "255.255.255.0", "192.168.0.3", 1));
    t.add(entry("10.0.0.128", "255.255.255.0", "192.168.0.4", 2));
    t.add(entry("10.0.0.0", "255.255.0.0", "192.168.0.5", 3));
    let best = t.lookup(ip("10.0.0.5")).unwrap();
    assert_eq!(best.interface, 1);
    assert_eq!(best.next_hop, ip("192.168.0.3"));
}

#[test]
fn test_no_match() {
    let mut t = RouteTable::new();
    assert!(t.lookup(ip("10.0.0.5")).is_none());
    t.add(entry("10.0.0.0", "255.255.255.0", "0.0.0.0", 0));
    assert!(t.lookup(ip("172.16.0.9")).is_none());
    assert!(t.lookup(ip("10.0.1.5")).is_none());
}

#[test]
fn test_default_route() {
    let mut t = RouteTable::new();
    t.add(entry("0.0.0.0", "0.0.0.0", "192.168.0.1", 0));
    t.add(entry("10.0.0.0", "255.255.255.0", "0.0.0.0", 1));
    assert_eq!(t.lookup(ip("8.8.8.8")).map(|r| r.interface), Some(0));
    assert_eq!(t.lookup(ip("10.0.0.8")).map(|r| r.interface), Some(1));
    assert_eq!(t.len(), 2);
    assert_eq!(t.iter().map(|r| r.interface).collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn test_route_entry() {
    let direct = entry("10.0.0.77", "255.255.255.0", "0.0.0.0", 1);
    assert!(direct.is_directly_connected());
    // host bits of the network address are ignored
    assert!(direct.matches(ip("10.0.0.5")));
    assert_eq!(direct.prefix_len(), 24);
    assert_eq!(direct.mask, SubnetMask::from_prefix_len(24).unwrap());

    let remote = entry("10.0.0.0", "255.255.255.0", "192.168.1.1", 0);
    assert!(!remote.is_directly_connected());

    assert_eq!(
        RouteEntry::new("10.0.0.0", "255.0.255.0", "0.0.0.0", 0),
        Err(AddressError::InvalidMaskFormat("255.0.255.0".to_string()))
    );
    assert_eq!(
        RouteEntry::new("10.0.0.0", "255.255.255.0", "10.0.0", 0),
        Err(AddressError::InvalidAddressFormat("10.0.0".to_string()))
    );
}

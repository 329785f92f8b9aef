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

//! # Helper (printer) functions for the Network
//! Module containing helper functions to get formatted strings about devices, routes and packets.
//! Device ids are replaced by the device names. Ids of devices that no longer exist are printed
//! as they are.

use crate::netsim::device::Device;
use crate::netsim::interface::Interface;
use crate::netsim::packet::{Packet, PacketStatus};
use crate::netsim::route_table::RouteEntry;
use crate::netsim::router::Router;
use crate::netsim::{DeviceId, Network};
use itertools::Itertools;

/// Returns the name of the device, or its id if it does not exist.
pub fn device_name(net: &Network, id: DeviceId) -> String {
    net.get_device_name(id).map(String::from).unwrap_or_else(|_| id.to_string())
}

/// Returns a formatted string describing the device, like `R1 (Router #1001 at (300, 200))`.
pub fn device(device: &Device) -> String {
    format!("{} ({} {} at {})", device.name(), device.kind(), device.id(), device.position())
}

/// Returns a formatted string for an interface, like `10.0.0.1/24 -> H2`.
pub fn interface(net: &Network, iface: &Interface) -> String {
    match iface.neighbor() {
        Some(n) => format!("{}{:?} -> {}", iface.address(), iface.mask(), device_name(net, n)),
        None => format!("{}{:?} (not connected)", iface.address(), iface.mask()),
    }
}

/// Returns all interfaces of the device, one line per interface, prefixed with its index.
pub fn interfaces(net: &Network, device: &Device) -> Vec<String> {
    device
        .interfaces()
        .iter()
        .enumerate()
        .map(|(i, iface)| format!("{}: {}", i, interface(net, iface)))
        .collect()
}

/// Returns a formatted string for a route, like `10.0.0.0/24 via 10.0.1.2 (interface 1)`.
pub fn route_entry(route: &RouteEntry) -> String {
    let via = if route.is_directly_connected() {
        String::from("directly connected")
    } else {
        format!("via {}", route.next_hop)
    };
    format!("{}{:?} {} (interface {})", route.network, route.mask, via, route.interface)
}

/// Returns the routing table of a router, one line per entry, in insertion order.
pub fn route_table(router: &Router) -> Vec<String> {
    router.get_routing_table().iter().map(route_entry).collect()
}

/// Returns a formatted string for a packet and its state.
pub fn packet(net: &Network, packet: &Packet) -> String {
    let state = match packet.status() {
        PacketStatus::InTransit => match packet.next_hop() {
            Some(next) => format!(
                "at {} -> {} (step {})",
                device_name(net, packet.current_device()),
                device_name(net, next),
                packet.step()
            ),
            None => format!("at {}", device_name(net, packet.current_device())),
        },
        PacketStatus::Delivered { at } => format!("delivered at {}", device_name(net, at)),
        PacketStatus::Dropped { at, reason } => {
            format!("dropped at {} ({})", device_name(net, at), reason)
        }
    };
    format!(
        "packet {} [{} -> {}] {}",
        packet.id().0,
        packet.source(),
        packet.destination(),
        state
    )
}

/// Returns the path as a string, like `H1 => R1 => H2`.
pub fn path(net: &Network, path: &[DeviceId]) -> String {
    path.iter().map(|id| device_name(net, *id)).join(" => ")
}

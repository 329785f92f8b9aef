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

//! Module defining a router with a static routing table.

use crate::netsim::device::Forwarder;
use crate::netsim::interface::{Interface, Interfaces};
use crate::netsim::packet::{DropReason, Packet};
use crate::netsim::printer;
use crate::netsim::route_table::{RouteEntry, RouteTable};
use crate::netsim::{DeviceError, DeviceId, Network, Position};
use log::*;
use std::net::Ipv4Addr;

/// Router, forwarding packets based on the longest-prefix-match in its routing table.
#[derive(Debug, Clone)]
pub struct Router {
    /// ID of the router
    id: DeviceId,
    /// Name of the router
    pub(crate) name: String,
    position: Position,
    pub(crate) interfaces: Interfaces,
    /// Static routes, in the order in which they were added
    pub(crate) routing_table: RouteTable,
}

impl Router {
    pub(crate) fn new(id: DeviceId, name: String, position: Position, iface: Interface) -> Self {
        Self {
            id,
            name,
            position,
            interfaces: Interfaces::single(iface),
            routing_table: RouteTable::new(),
        }
    }

    /// Return the id of the router
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Return the name of the router
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Return the position of the router
    pub fn position(&self) -> Position {
        self.position
    }

    /// Return the interfaces of the router
    pub fn interfaces(&self) -> &Interfaces {
        &self.interfaces
    }

    /// Return the routing table
    pub fn get_routing_table(&self) -> &RouteTable {
        &self.routing_table
    }

    /// Append a route to the routing table. The route must use an existing interface.
    pub(crate) fn add_route(&mut self, route: RouteEntry) -> Result<(), DeviceError> {
        if route.interface >= self.interfaces.len() {
            return Err(DeviceError::InvalidRouteInterfaceIndex(route.interface));
        }
        self.routing_table.add(route);
        Ok(())
    }

    /// Returns the route to use for the destination (see [`RouteTable::lookup`]).
    pub fn lookup_route(&self, destination: Ipv4Addr) -> Option<&RouteEntry> {
        self.routing_table.lookup(destination)
    }
}

impl Forwarder for Router {
    fn process_packet(&self, packet: &mut Packet, net: &Network) {
        let destination = packet.destination();

        // packets for the router itself are accepted, but nothing else happens
        if self.interfaces.has_address(destination) {
            info!("{} received packet {} for itself", self.name, packet.id().0);
            packet.deliver(self.id);
            return;
        }

        let route = match self.lookup_route(destination) {
            Some(route) => route,
            None => {
                warn!("{} has no route for {}", self.name, printer::packet(net, packet));
                packet.drop_at(self.id, DropReason::NoRouteFound);
                return;
            }
        };
        debug!("{} uses route {}", self.name, printer::route_entry(route));

        // routes written directly into the table are not validated
        if self.interfaces.get(route.interface).is_none() {
            warn!("{} has a route on a missing interface {}", self.name, route.interface);
            packet.drop_at(self.id, DropReason::InvalidRouteInterfaceIndex);
            return;
        }

        let target = if route.is_directly_connected() { destination } else { route.next_hop };
        match net.find_device_by_ip(target) {
            Some(next_hop) => {
                debug!("{} forwards packet {} to {}", self.name, packet.id().0, next_hop.name());
                packet.forward(self.id, next_hop.id());
                packet.set_previous_device(self.id);
            }
            None => {
                warn!("{} cannot reach {} for packet {}", self.name, target, packet.id().0);
                packet.drop_at(self.id, DropReason::NextHopUnreachable);
            }
        }
    }
}

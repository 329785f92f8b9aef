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

//! Module defining an end-system (host).

use crate::netsim::address::derive_gateway;
use crate::netsim::device::Forwarder;
use crate::netsim::interface::{Interface, Interfaces};
use crate::netsim::packet::{DropReason, Packet};
use crate::netsim::printer;
use crate::netsim::{DeviceId, Network, Position};
use log::*;
use std::net::Ipv4Addr;

/// End-System, sending all packets for destinations outside of its own subnet to the gateway.
/// For forwarding, only the first interface is considered.
#[derive(Debug, Clone)]
pub struct EndSystem {
    id: DeviceId,
    pub(crate) name: String,
    position: Position,
    pub(crate) interfaces: Interfaces,
    gateway: Ipv4Addr,
}

impl EndSystem {
    /// Create a new end-system with a single (unconnected) interface. The gateway is derived from
    /// the interface: it is the first address in the subnet.
    pub(crate) fn new(id: DeviceId, name: String, position: Position, iface: Interface) -> Self {
        let gateway = derive_gateway(iface.address(), iface.mask());
        Self { id, name, position, interfaces: Interfaces::single(iface), gateway }
    }

    /// Return the id of the end-system
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Return the name of the end-system
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Return the position of the end-system
    pub fn position(&self) -> Position {
        self.position
    }

    /// Return the interfaces of the end-system
    pub fn interfaces(&self) -> &Interfaces {
        &self.interfaces
    }

    /// Return the address of the default gateway
    pub fn gateway(&self) -> Ipv4Addr {
        self.gateway
    }

    pub(crate) fn set_gateway(&mut self, gateway: Ipv4Addr) {
        self.gateway = gateway;
    }
}

impl Forwarder for EndSystem {
    fn process_packet(&self, packet: &mut Packet, net: &Network) {
        let primary = match self.interfaces.primary() {
            Some(i) => i,
            None => {
                warn!("{} has no interface, dropping packet {}", self.name, packet.id().0);
                packet.drop_at(self.id, DropReason::NoInterface);
                return;
            }
        };

        let destination = packet.destination();
        if destination == primary.address() {
            info!("{} received packet {}", self.name, packet.id().0);
            packet.deliver(self.id);
            return;
        }

        let (target, reason) = if primary.contains(destination) {
            (destination, DropReason::LocalDestinationUnreachable)
        } else {
            (self.gateway, DropReason::GatewayUnreachable)
        };

        match net.find_device_by_ip(target) {
            Some(next_hop) => {
                debug!(
                    "{} sends packet {} to {} ({})",
                    self.name,
                    packet.id().0,
                    next_hop.name(),
                    if target == destination { "local subnet" } else { "gateway" }
                );
                packet.forward(self.id, next_hop.id());
            }
            None => {
                warn!("{} drops {}: {}", self.name, printer::packet(net, packet), reason);
                packet.drop_at(self.id, reason);
            }
        }
    }
}

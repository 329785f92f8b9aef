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

//! # Packets
//!
//! A packet travels hop by hop through the network. While travelling towards the next hop, its
//! position is interpolated over a fixed number of animation steps. Devices never hold packets;
//! the packet only stores the ids of the devices it is related to.

use crate::netsim::{DeviceId, PacketId, Position};
use std::fmt;
use std::net::Ipv4Addr;

/// Reason why a packet was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The device has no interface at all
    NoInterface,
    /// The destination is in the local subnet, but no device owns the address
    LocalDestinationUnreachable,
    /// No device owns the address of the gateway
    GatewayUnreachable,
    /// The router has no route for the destination
    NoRouteFound,
    /// The selected route points to an interface the router does not have
    InvalidRouteInterfaceIndex,
    /// No device owns the address of the next hop
    NextHopUnreachable,
    /// The packet arrived at a device, which did not decide where to send it
    NoNextHop,
    /// The device the packet was at, or travelling to, was removed
    DeviceRemoved,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoInterface => "device has no interface",
            Self::LocalDestinationUnreachable => "local destination unreachable",
            Self::GatewayUnreachable => "gateway unreachable",
            Self::NoRouteFound => "no route found",
            Self::InvalidRouteInterfaceIndex => "route uses an invalid interface",
            Self::NextHopUnreachable => "next hop unreachable",
            Self::NoNextHop => "no next hop assigned",
            Self::DeviceRemoved => "device was removed",
        };
        f.write_str(s)
    }
}

/// State of a packet. Once the packet is not `InTransit` anymore, it will never move again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketStatus {
    /// The packet is still on its way
    InTransit,
    /// The packet has reached the device owning the destination address
    Delivered {
        /// Device which accepted the packet
        at: DeviceId,
    },
    /// The packet was dropped
    Dropped {
        /// Device at which the packet was dropped
        at: DeviceId,
        /// Why the packet was dropped
        reason: DropReason,
    },
}

/// Packet in the network
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    id: PacketId,
    source: Ipv4Addr,
    destination: Ipv4Addr,
    current_device: DeviceId,
    next_hop: Option<DeviceId>,
    previous_device: Option<DeviceId>,
    /// Animation step on the current hop. Is reset to 0 upon arrival.
    step: u32,
    position: Position,
    status: PacketStatus,
}

impl Packet {
    pub(crate) fn new(
        id: PacketId,
        source: Ipv4Addr,
        destination: Ipv4Addr,
        origin: DeviceId,
        position: Position,
    ) -> Self {
        Self {
            id,
            source,
            destination,
            current_device: origin,
            next_hop: None,
            previous_device: None,
            step: 0,
            position,
            status: PacketStatus::InTransit,
        }
    }

    /// Returns the id of the packet
    pub fn id(&self) -> PacketId {
        self.id
    }

    /// Returns the source address
    pub fn source(&self) -> Ipv4Addr {
        self.source
    }

    /// Returns the destination address
    pub fn destination(&self) -> Ipv4Addr {
        self.destination
    }

    /// Returns the device the packet is currently at (or departing from).
    pub fn current_device(&self) -> DeviceId {
        self.current_device
    }

    /// Returns the device the packet is travelling towards
    pub fn next_hop(&self) -> Option<DeviceId> {
        self.next_hop
    }

    /// Returns the last router which forwarded the packet. This is only recorded, but never used
    /// for any forwarding decision.
    pub fn previous_device(&self) -> Option<DeviceId> {
        self.previous_device
    }

    /// Returns the animation step on the current hop
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Returns the current (interpolated) position of the packet
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the status of the packet
    pub fn status(&self) -> PacketStatus {
        self.status
    }

    /// Returns true if the packet is neither delivered nor dropped.
    pub fn is_in_transit(&self) -> bool {
        self.status == PacketStatus::InTransit
    }

    /// Send the packet from `from` towards `next_hop`. The hop itself is performed by
    /// [`Network::tick`](crate::netsim::Network::tick).
    pub(crate) fn forward(&mut self, from: DeviceId, next_hop: DeviceId) {
        self.current_device = from;
        self.next_hop = Some(next_hop);
    }

    pub(crate) fn set_previous_device(&mut self, device: DeviceId) {
        self.previous_device = Some(device);
    }

    /// Mark the packet as delivered. Has no effect on a packet which is already terminal.
    pub(crate) fn deliver(&mut self, at: DeviceId) {
        if self.is_in_transit() {
            self.status = PacketStatus::Delivered { at };
        }
    }

    /// Mark the packet as dropped. Has no effect on a packet which is already terminal.
    pub(crate) fn drop_at(&mut self, at: DeviceId, reason: DropReason) {
        if self.is_in_transit() {
            self.status = PacketStatus::Dropped { at, reason };
        }
    }

    /// Perform one animation step on the hop from `from` to `to`, which is split into `steps`
    /// steps. The offset per step is truncated towards zero. Returns true once the last step is
    /// reached.
    pub(crate) fn advance(&mut self, from: Position, to: Position, steps: u32) -> bool {
        let steps = steps as i64;
        self.position.x = offset(self.position.x, (to.x as i64 - from.x as i64) / steps);
        self.position.y = offset(self.position.y, (to.y as i64 - from.y as i64) / steps);
        self.step += 1;
        self.step as i64 >= steps
    }

    /// Place the packet at the device it was travelling to. The position is snapped to the
    /// position of the device, which removes any rounding error of the interpolation.
    pub(crate) fn arrive(&mut self, at: DeviceId, position: Position) {
        self.current_device = at;
        self.next_hop = None;
        self.step = 0;
        self.position = position;
    }
}

/// Move the coordinate by `delta`, saturating at the bounds of `i32`.
fn offset(coord: i32, delta: i64) -> i32 {
    (coord as i64 + delta).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

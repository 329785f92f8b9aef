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

//! # Network Devices
//!
//! Every device in the network is either an [`EndSystem`] or a [`Router`]. Both implement the
//! [`Forwarder`] trait, which decides what happens to a packet that has reached the device. The
//! [`Device`] enum holds either of them and dispatches all calls to the concrete variant.

use crate::netsim::end_system::EndSystem;
use crate::netsim::interface::Interfaces;
use crate::netsim::packet::Packet;
use crate::netsim::router::Router;
use crate::netsim::{DeviceId, DeviceKind, Network, Position};
use std::net::Ipv4Addr;

/// Packet processing policy of a device.
pub trait Forwarder {
    /// Process a packet that has reached this device (or was created here). After the call, the
    /// packet is either terminal (delivered or dropped), or it has a next hop assigned, and its
    /// current device is set to this device. The network is only used for looking up devices.
    fn process_packet(&self, packet: &mut Packet, net: &Network);
}

/// # Network Device
/// Either an end-system or a router. This enum behaves similar to an `Option`, with two
/// different `Some` values. Use [`Device::router`] and [`Device::end_system`] to get the
/// concrete device, or [`Device::router_or`] to get an error if the device is not a router.
#[derive(Debug, Clone)]
pub enum Device {
    /// End-System (host)
    EndSystem(EndSystem),
    /// Router
    Router(Router),
}

impl Device {
    /// Returns the id of the device
    pub fn id(&self) -> DeviceId {
        match self {
            Self::EndSystem(e) => e.id(),
            Self::Router(r) => r.id(),
        }
    }

    /// Returns the name of the device
    pub fn name(&self) -> &str {
        match self {
            Self::EndSystem(e) => e.name(),
            Self::Router(r) => r.name(),
        }
    }

    /// Returns the position of the device
    pub fn position(&self) -> Position {
        match self {
            Self::EndSystem(e) => e.position(),
            Self::Router(r) => r.position(),
        }
    }

    /// Returns the kind of the device
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::EndSystem(_) => DeviceKind::EndSystem,
            Self::Router(_) => DeviceKind::Router,
        }
    }

    /// Returns all interfaces of the device
    pub fn interfaces(&self) -> &Interfaces {
        match self {
            Self::EndSystem(e) => e.interfaces(),
            Self::Router(r) => r.interfaces(),
        }
    }

    pub(crate) fn interfaces_mut(&mut self) -> &mut Interfaces {
        match self {
            Self::EndSystem(e) => &mut e.interfaces,
            Self::Router(r) => &mut r.interfaces,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        match self {
            Self::EndSystem(e) => e.name = name,
            Self::Router(r) => r.name = name,
        }
    }

    /// Returns true if one of the interfaces of the device has the address.
    pub fn has_address(&self, ip: Ipv4Addr) -> bool {
        self.interfaces().has_address(ip)
    }

    /// Maps the device to an option, with `Some(r)` only if self is a `Router`.
    pub fn router(&self) -> Option<&Router> {
        match self {
            Self::Router(r) => Some(r),
            _ => None,
        }
    }

    /// Maps the device to an option, with `Some(e)` only if self is an `EndSystem`.
    pub fn end_system(&self) -> Option<&EndSystem> {
        match self {
            Self::EndSystem(e) => Some(e),
            _ => None,
        }
    }

    /// Maps the device to a result, with the `Ok` case only if self is a `Router`. Otherwise, the
    /// provided error is returned.
    pub fn router_or<E: std::error::Error>(&self, error: E) -> Result<&Router, E> {
        self.router().ok_or(error)
    }

    pub(crate) fn router_mut_or<E>(&mut self, error: E) -> Result<&mut Router, E> {
        match self {
            Self::Router(r) => Ok(r),
            _ => Err(error),
        }
    }

    pub(crate) fn end_system_mut(&mut self) -> Option<&mut EndSystem> {
        match self {
            Self::EndSystem(e) => Some(e),
            _ => None,
        }
    }
}

impl Forwarder for Device {
    fn process_packet(&self, packet: &mut Packet, net: &Network) {
        match self {
            Self::EndSystem(e) => e.process_packet(packet, net),
            Self::Router(r) => r.process_packet(packet, net),
        }
    }
}

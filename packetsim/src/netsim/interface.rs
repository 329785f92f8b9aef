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

//! # Interfaces
//!
//! An [`Interface`] is an addressed attachment point of a device. Every link between two devices
//! is represented by exactly one interface on either side, each of them pointing to the device on
//! the other end. The interfaces of a device are kept in [`Interfaces`], in the order in which
//! they were configured.

use crate::netsim::address::{parse_ip, SubnetMask};
use crate::netsim::{AddressError, DeviceError, DeviceId};
use std::net::Ipv4Addr;

/// Maximum number of interfaces on a single device
pub const MAX_INTERFACES: usize = 8;

/// Single interface of a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    address: Ipv4Addr,
    mask: SubnetMask,
    /// Device on the other end of the link. `None` until the interface is connected.
    neighbor: Option<DeviceId>,
}

impl Interface {
    /// Create a new, unconnected interface. The address is checked before the mask, and nothing
    /// is created if either of them is invalid.
    pub fn new(address: &str, mask: &str) -> Result<Self, AddressError> {
        let address = parse_ip(address)?;
        let mask = mask.parse()?;
        Ok(Self::from_parts(address, mask))
    }

    /// Create a new, unconnected interface from already parsed values.
    pub fn from_parts(address: Ipv4Addr, mask: SubnetMask) -> Self {
        Self { address, mask, neighbor: None }
    }

    /// Returns the address of the interface
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Returns the subnet mask of the interface
    pub fn mask(&self) -> SubnetMask {
        self.mask
    }

    /// Returns the device connected to this interface
    pub fn neighbor(&self) -> Option<DeviceId> {
        self.neighbor
    }

    /// Returns the network address of the subnet the interface is in
    pub fn network(&self) -> Ipv4Addr {
        self.mask.apply(self.address)
    }

    /// Returns true if the address is part of the subnet of this interface
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.mask.apply(ip) == self.network()
    }

    pub(crate) fn with_neighbor(mut self, neighbor: DeviceId) -> Self {
        self.neighbor = Some(neighbor);
        self
    }
}

/// Ordered list of the interfaces of a single device. At most [`MAX_INTERFACES`] interfaces can
/// be attached, no two of them have the same address, and no two of them lead to the same
/// neighbor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interfaces(Vec<Interface>);

/// What happens when an interface is connected to a neighbor (see [`Interfaces::plan_link`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LinkPlan {
    /// An unconnected interface with the same address and mask exists at that index. It will be
    /// bound to the neighbor.
    Bind(usize),
    /// A new interface will be attached.
    Attach,
}

impl Interfaces {
    /// Create an empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a list with a single interface
    pub(crate) fn single(iface: Interface) -> Self {
        Self(vec![iface])
    }

    /// Returns the number of interfaces
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there is no interface
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the interface at the given index
    pub fn get(&self, idx: usize) -> Option<&Interface> {
        self.0.get(idx)
    }

    /// Returns the first interface that was configured
    pub fn primary(&self) -> Option<&Interface> {
        self.0.first()
    }

    /// Iterate over all interfaces in configuration order
    pub fn iter(&self) -> std::slice::Iter<'_, Interface> {
        self.0.iter()
    }

    /// Returns true if one of the interfaces has the given address
    pub fn has_address(&self, ip: Ipv4Addr) -> bool {
        self.0.iter().any(|i| i.address == ip)
    }

    /// Find the interface that is connected to the neighbor, together with its index.
    pub fn find_by_neighbor(&self, neighbor: DeviceId) -> Option<(usize, &Interface)> {
        self.0.iter().enumerate().find(|(_, i)| i.neighbor == Some(neighbor))
    }

    /// Attach a new interface at the end of the list. Returns the index of the new interface.
    pub(crate) fn attach(&mut self, iface: Interface) -> Result<usize, DeviceError> {
        self.check_attach(&iface)?;
        self.0.push(iface);
        Ok(self.0.len() - 1)
    }

    /// Check if the interface could be attached, without changing anything.
    fn check_attach(&self, iface: &Interface) -> Result<(), DeviceError> {
        if self.0.len() >= MAX_INTERFACES {
            return Err(DeviceError::InterfaceLimitExceeded(MAX_INTERFACES));
        }
        if self.0.iter().any(|i| {
            i.address == iface.address || (i.neighbor.is_some() && i.neighbor == iface.neighbor)
        }) {
            return Err(DeviceError::DuplicateInterfaceOnDevice(iface.address, iface.neighbor));
        }
        Ok(())
    }

    /// Decide how a link towards `neighbor`, using the given address and mask on this side, is
    /// realized. If an unconnected interface with exactly this address and mask exists, it is
    /// reused. Otherwise, a new interface must be attachable.
    pub(crate) fn plan_link(
        &self,
        address: Ipv4Addr,
        mask: SubnetMask,
        neighbor: DeviceId,
    ) -> Result<LinkPlan, DeviceError> {
        if self.find_by_neighbor(neighbor).is_some() {
            return Err(DeviceError::DuplicateInterfaceOnDevice(address, Some(neighbor)));
        }
        match self.0.iter().position(|i| i.address == address) {
            Some(idx) if self.0[idx].neighbor.is_none() && self.0[idx].mask == mask => {
                Ok(LinkPlan::Bind(idx))
            }
            Some(_) => Err(DeviceError::DuplicateInterfaceOnDevice(address, Some(neighbor))),
            None => {
                self.check_attach(&Interface::from_parts(address, mask).with_neighbor(neighbor))?;
                Ok(LinkPlan::Attach)
            }
        }
    }

    /// Execute a plan computed with [`Interfaces::plan_link`].
    pub(crate) fn apply_link(
        &mut self,
        plan: LinkPlan,
        address: Ipv4Addr,
        mask: SubnetMask,
        neighbor: DeviceId,
    ) -> Result<usize, DeviceError> {
        match plan {
            LinkPlan::Bind(idx) => {
                self.0[idx].neighbor = Some(neighbor);
                Ok(idx)
            }
            LinkPlan::Attach => {
                self.attach(Interface::from_parts(address, mask).with_neighbor(neighbor))
            }
        }
    }

    /// Disconnect all interfaces leading to `neighbor`. The interfaces keep their address, mask
    /// and position in the list. Returns the number of disconnected interfaces.
    pub(crate) fn unbind_neighbor(&mut self, neighbor: DeviceId) -> usize {
        let mut num = 0;
        for iface in self.0.iter_mut().filter(|i| i.neighbor == Some(neighbor)) {
            iface.neighbor = None;
            num += 1;
        }
        num
    }
}

impl<'a> IntoIterator for &'a Interfaces {
    type Item = &'a Interface;
    type IntoIter = std::slice::Iter<'a, Interface>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

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

//! Module containing all type definitions

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Device identification. Ids are assigned by the [`Network`](crate::netsim::Network) in
/// increasing order and are never reused.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Packet identification
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct PacketId(pub u64);

/// Pixel position on the drawing canvas
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Default)]
pub struct Position {
    /// horizontal coordinate
    pub x: i32,
    /// vertical coordinate
    pub y: i32,
}

impl Position {
    /// Create a new position
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the squared euclidean distance between both positions
    pub fn distance_squared(&self, other: Position) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The two kinds of devices that can be placed in the network.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum DeviceKind {
    /// Single-homed host which sends everything outside of its subnet to the gateway
    EndSystem,
    /// Router forwarding packets based on its routing table
    Router,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndSystem => write!(f, "EndSystem"),
            Self::Router => write!(f, "Router"),
        }
    }
}

impl FromStr for DeviceKind {
    type Err = NetworkError;

    /// Parses `"EndSystem"` (or `"Host"`) and `"Router"`, ignoring the case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "endsystem" | "end_system" | "host" => Ok(Self::EndSystem),
            "router" => Ok(Self::Router),
            _ => Err(NetworkError::UnknownDeviceKind(s.to_string())),
        }
    }
}

/// Address Errors, returned when parsing addresses or subnet masks.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum AddressError {
    /// The string is not a dotted-quad IPv4 address
    #[error("Invalid IP address: {0}")]
    InvalidAddressFormat(String),
    /// The string is not a dotted-quad, or its bits are not a contiguous run of ones
    #[error("Invalid subnet mask: {0}")]
    InvalidMaskFormat(String),
}

/// Device Errors
#[derive(Error, Debug, PartialEq, Clone)]
pub enum DeviceError {
    /// The device has no free interface slot left
    #[error("All {0} interfaces of the device are already in use")]
    InterfaceLimitExceeded(usize),
    /// The device already has an interface with the same address, or towards the same neighbor
    #[error("Interface {0} (neighbor {1:?}) collides with an existing interface")]
    DuplicateInterfaceOnDevice(Ipv4Addr, Option<DeviceId>),
    /// The route references an interface that does not exist on the router
    #[error("Interface index {0} does not exist on the router")]
    InvalidRouteInterfaceIndex(usize),
}

/// Network Errors
#[derive(Error, Debug, PartialEq)]
pub enum NetworkError {
    /// Address or mask could not be parsed
    #[error("Address Error: {0}")]
    AddressError(#[from] AddressError),
    /// Device Error which cannot be handled
    #[error("Device Error: {0}")]
    DeviceError(#[from] DeviceError),
    /// The kind of device is not known
    #[error("Unknown device kind: {0}")]
    UnknownDeviceKind(String),
    /// The network already holds the maximum number of devices
    #[error("Cannot add more than {0} devices")]
    DeviceCapacityExceeded(usize),
    /// The network already holds the maximum number of packets in transit
    #[error("Cannot have more than {0} packets in transit")]
    PacketCapacityExceeded(usize),
    /// Device is not present in the topology
    #[error("Network device was not found in topology: {0:?}")]
    DeviceNotFound(DeviceId),
    /// Device name is not present in the topology
    #[error("Network device name was not found in topology: {0}")]
    DeviceNameNotFound(String),
    /// No device has an interface with the address
    #[error("No network device has the address {0}")]
    NoDeviceWithAddress(Ipv4Addr),
    /// Device must be a router, but an end-system was passed
    #[error("Network device is not a router: {0:?}")]
    DeviceIsNotARouter(DeviceId),
    /// Device must be an end-system, but a router was passed
    #[error("Network device is not an end-system: {0:?}")]
    DeviceIsNotAnEndSystem(DeviceId),
    /// A device cannot be linked with itself
    #[error("Cannot connect device {0:?} with itself")]
    CannotConnectToItself(DeviceId),
    /// The number of animation steps per hop must be positive
    #[error("The number of animation steps per hop must be at least 1")]
    InvalidAnimationSteps,
    /// Forwarding loop detected
    #[error("Forwarding Loop occurred! path: {0:?}")]
    ForwardingLoop(Vec<DeviceId>),
    /// Black hole detected
    #[error("Black hole occurred ({1})! path: {0:?}")]
    ForwardingBlackHole(Vec<DeviceId>, crate::netsim::DropReason),
}

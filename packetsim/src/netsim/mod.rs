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

#![deny(missing_docs, missing_debug_implementations)]

//! # NetSim
//!
//! This is a library for simulating the forwarding of packets through a small network of
//! end-systems and routers, one discrete step at a time.
//!
//! Devices are placed on a canvas, connected with links, and each link end is an addressed
//! [`Interface`](interface::Interface). End-systems send packets for their own subnet directly to
//! the destination, and everything else to their gateway. Routers use longest-prefix-match on a
//! manually configured routing table. There is no routing protocol.
//!
//! ## Example usage
//!
//! The following example builds two subnets, connected by the router `R1`, and sends a packet
//! from `H1` to `H2`.
//!
//! ```rust
//! use packetsim::netsim::{Network, PacketStatus};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut net = Network::new();
//!     let mask = "255.255.255.0";
//!
//!     let h1 = net.add_end_system("H1", "192.168.1.10", mask, 100, 100)?;
//!     let r1 = net.add_router("R1", "192.168.1.1", mask, 300, 100)?;
//!     let h2 = net.add_end_system("H2", "10.0.0.50", mask, 500, 100)?;
//!
//!     net.connect_devices(h1, "192.168.1.10", mask, r1, "192.168.1.1", mask)?;
//!     net.connect_devices(r1, "10.0.0.1", mask, h2, "10.0.0.50", mask)?;
//!     net.add_route(r1, "10.0.0.0", mask, "0.0.0.0", 1)?;
//!
//!     // check the path without sending anything
//!     assert_eq!(net.trace_route("192.168.1.10", "10.0.0.50")?, vec![h1, r1, h2]);
//!
//!     net.start_transmission("192.168.1.10", "10.0.0.50", 1)?;
//!     let mut finished = Vec::new();
//!     for _ in 0..(2 * net.animation_steps()) {
//!         finished.extend(net.tick());
//!     }
//!     assert_eq!(finished.len(), 1);
//!     assert_eq!(finished[0].status(), PacketStatus::Delivered { at: h2 });
//!     assert_eq!(net.num_packets(), 0);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Known limitations
//!
//! - Forwarding loops are not prevented. There is no TTL, and a packet caught in a loop stays in
//!   transit forever. Use [`Network::trace_route`] to detect loops beforehand.

pub mod address;
pub mod device;
pub mod end_system;
pub mod interface;
pub(crate) mod network;
pub mod packet;
pub mod printer;
pub mod route_table;
pub mod router;
pub(crate) mod types;

pub use device::{Device, Forwarder};
pub use network::{
    Network, ANIMATION_STEPS, DEFAULT_MAX_DEVICES, DEFAULT_MAX_PACKETS, DEFAULT_PICK_TOLERANCE,
};
pub use packet::{DropReason, Packet, PacketStatus};
pub use types::{
    AddressError, DeviceError, DeviceId, DeviceKind, NetworkError, PacketId, Position,
};

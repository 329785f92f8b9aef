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

#![deny(missing_docs)]

//! # PacketSim: Discrete Packet Forwarding Simulator
//! This is a library for modelling how packets are forwarded across a small, manually configured
//! network of end-systems and routers. The simulation advances in discrete ticks, and the
//! position of every packet is interpolated between devices, such that a presentation layer can
//! animate the packet movement.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`NetSim`](netsim)**: The simulator itself. See the main structure
//!   [`Network`](netsim::Network), which owns all devices and packets, and which is advanced by
//!   calling [`Network::tick`](netsim::Network::tick).
//!
//!   - [`address`](netsim::address): Parsing and validation of addresses and subnet masks.
//!   - [`interface`](netsim::interface): Addressed attachment points of devices.
//!   - [`end_system`](netsim::end_system) and [`router`](netsim::router): The two kinds of
//!     devices, both implementing [`Forwarder`](netsim::Forwarder).
//!   - [`route_table`](netsim::route_table): Static routes with longest-prefix-match.
//!   - [`packet`](netsim::packet): Packets and their terminal outcomes.
//!   - [`printer`](netsim::printer): Formatting helpers used for logging.
//!
//! - **[`ExampleNetworks`](example_networks)**: Collection of prepared topologies, used for
//!   testing and as a starting point.
//!
//! ## Usage
//!
//! ```
//! use packetsim::example_networks::{ExampleNetwork, TwoSubnets};
//! use packetsim::netsim::PacketStatus;
//! use packetsim::Error;
//!
//! fn main() -> Result<(), Error> {
//!     let mut net = TwoSubnets::net(0)?;
//!     net.start_transmission(TwoSubnets::H1_IP, TwoSubnets::H2_IP, 3)?;
//!
//!     // drive the simulation, like a periodic timer would do
//!     let mut finished = Vec::new();
//!     while net.num_packets() > 0 {
//!         finished.extend(net.tick());
//!     }
//!
//!     assert!(finished.iter().all(|p| matches!(p.status(), PacketStatus::Delivered { .. })));
//!     Ok(())
//! }
//! ```
// test modules
pub mod example_networks;
mod test;

mod error;
pub mod netsim;

pub use error::Error;

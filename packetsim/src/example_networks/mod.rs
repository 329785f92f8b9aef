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

//! Networks for testing

use crate::netsim::{Network, NetworkError};

mod two_subnets;
pub use two_subnets::TwoSubnets;

mod router_chain;
pub use router_chain::RouterChain;

mod routing_loop;
pub use routing_loop::RoutingLoop;

/// Trait for creating example networks
pub trait ExampleNetwork {
    /// Get the prepared network, with all devices connected and all routes configured. The
    /// meaning of `variant` depends on the network.
    fn net(variant: usize) -> Result<Network, NetworkError>;
}

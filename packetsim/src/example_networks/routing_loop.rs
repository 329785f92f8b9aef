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

//! # Routing Loop

use super::ExampleNetwork;
use crate::netsim::{Network, NetworkError};

/// # Routing Loop
///
/// ```text
/// H1 ---- R1 ---- R2
/// ```
///
/// `H1` is `10.0.0.10/24` with gateway `R1` (`10.0.0.1`). The link between `R1` and `R2` is
/// `172.16.0.0/30`. Both routers have a default route (`0.0.0.0/0`) pointing to each other, so
/// every packet to an unknown destination bounces between `R1` and `R2` forever.
#[derive(Debug)]
pub struct RoutingLoop {}

impl RoutingLoop {
    /// Address of `H1`
    pub const H1_IP: &'static str = "10.0.0.10";
    /// Some address which is not part of the network
    pub const UNKNOWN_IP: &'static str = "8.8.8.8";
}

impl ExampleNetwork for RoutingLoop {
    /// Get the network. The variant is ignored.
    fn net(_variant: usize) -> Result<Network, NetworkError> {
        let lan = "255.255.255.0";
        let transit = "255.255.255.252";
        let mut net = Network::new();

        let h1 = net.add_end_system("H1", Self::H1_IP, lan, 100, 100)?;
        let r1 = net.add_router("R1", "10.0.0.1", lan, 250, 100)?;
        let r2 = net.add_router("R2", "172.16.0.2", transit, 400, 180)?;

        net.connect_devices(h1, Self::H1_IP, lan, r1, "10.0.0.1", lan)?;
        net.connect_devices(r1, "172.16.0.1", transit, r2, "172.16.0.2", transit)?;

        net.add_route(r1, "0.0.0.0", "0.0.0.0", "172.16.0.2", 1)?;
        net.add_route(r2, "0.0.0.0", "0.0.0.0", "172.16.0.1", 0)?;

        Ok(net)
    }
}

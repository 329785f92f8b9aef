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

//! # Two Subnets

use super::ExampleNetwork;
use crate::netsim::{Network, NetworkError};

/// # Two Subnets
///
/// ```text
/// H1 ------------- R1 ------------- H2
/// 192.168.1.10     192.168.1.1 (0)
///                  10.0.0.1    (1)  10.0.0.50
/// ```
///
/// All masks are `/24`. The gateway of `H1` is `192.168.1.1`, the one of `H2` is `10.0.0.1`.
/// `R1` has a single route: `10.0.0.0/24` directly connected on interface 1. Hence, packets from
/// `H1` to `H2` are delivered, but packets from `H2` to `H1` are dropped at `R1`.
///
/// The positions are chosen such that the per-step offsets do not divide evenly.
#[derive(Debug)]
pub struct TwoSubnets {}

impl TwoSubnets {
    /// Address of `H1`
    pub const H1_IP: &'static str = "192.168.1.10";
    /// Address of `R1` towards `H1`
    pub const R1_LAN_IP: &'static str = "192.168.1.1";
    /// Address of `R1` towards `H2`
    pub const R1_WAN_IP: &'static str = "10.0.0.1";
    /// Address of `H2`
    pub const H2_IP: &'static str = "10.0.0.50";
    /// Mask used on all interfaces
    pub const MASK: &'static str = "255.255.255.0";
}

impl ExampleNetwork for TwoSubnets {
    /// Get the network. The variant is ignored.
    fn net(_variant: usize) -> Result<Network, NetworkError> {
        let mut net = Network::new();

        let h1 = net.add_end_system("H1", Self::H1_IP, Self::MASK, 100, 100)?;
        let r1 = net.add_router("R1", Self::R1_LAN_IP, Self::MASK, 305, 160)?;
        let h2 = net.add_end_system("H2", Self::H2_IP, Self::MASK, 517, 93)?;

        net.connect_devices(h1, Self::H1_IP, Self::MASK, r1, Self::R1_LAN_IP, Self::MASK)?;
        net.connect_devices(r1, Self::R1_WAN_IP, Self::MASK, h2, Self::H2_IP, Self::MASK)?;

        net.add_route(r1, "10.0.0.0", Self::MASK, "0.0.0.0", 1)?;

        Ok(net)
    }
}

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

//! # Router Chain

use super::ExampleNetwork;
use crate::netsim::{Network, NetworkError};

/// # Router Chain
///
/// Chain of `n` routers, with an end-system on either side. The variant is the number of
/// routers, and must be at least 1.
///
/// ```text
/// H1 ---- R1 ---- R2 ---- ... ---- Rn ---- H2
/// ```
///
/// - `H1` is `10.0.0.10/24`, the first interface of `R1` is `10.0.0.1/24`.
/// - `H2` is `10.1.0.10/24`, the second interface of `Rn` is `10.1.0.1/24`.
/// - The link between `Ri` and `Ri+1` is `172.16.i.0/30`, where `Ri` has `.1` and `Ri+1` has
///   `.2`.
///
/// For every router, interface 0 points towards `H1`, and interface 1 towards `H2`. Every router
/// has a route for both end-system subnets, such that traffic works in both directions.
#[derive(Debug)]
pub struct RouterChain {}

impl RouterChain {
    /// Address of `H1`
    pub const H1_IP: &'static str = "10.0.0.10";
    /// Address of `H2`
    pub const H2_IP: &'static str = "10.1.0.10";
    /// Mask of the end-system subnets
    pub const LAN_MASK: &'static str = "255.255.255.0";
    /// Mask of the links between routers
    pub const TRANSIT_MASK: &'static str = "255.255.255.252";
}

impl ExampleNetwork for RouterChain {
    fn net(variant: usize) -> Result<Network, NetworkError> {
        let n = variant.max(1);
        let mut net = Network::new();
        let transit = |i: usize, host: u8| format!("172.16.{}.{}", i, host);

        let h1 = net.add_end_system("H1", Self::H1_IP, Self::LAN_MASK, 50, 200)?;

        let mut routers = Vec::with_capacity(n);
        for i in 1..=n {
            let (ip, mask) = if i == 1 {
                ("10.0.0.1".to_string(), Self::LAN_MASK)
            } else {
                (transit(i - 1, 2), Self::TRANSIT_MASK)
            };
            let y = if i % 2 == 0 { 237 } else { 200 };
            routers.push(net.add_router(format!("R{}", i), &ip, mask, 50 + 150 * i as i32, y)?);
        }

        let h2_x = 50 + 150 * (n as i32 + 1);
        let h2 = net.add_end_system("H2", Self::H2_IP, Self::LAN_MASK, h2_x, 200)?;

        // links
        let lan = Self::LAN_MASK;
        net.connect_devices(h1, Self::H1_IP, lan, routers[0], "10.0.0.1", lan)?;
        for i in 1..n {
            net.connect_devices(
                routers[i - 1],
                &transit(i, 1),
                Self::TRANSIT_MASK,
                routers[i],
                &transit(i, 2),
                Self::TRANSIT_MASK,
            )?;
        }
        net.connect_devices(routers[n - 1], "10.1.0.1", lan, h2, Self::H2_IP, lan)?;

        // routes
        for (idx, r) in routers.iter().enumerate() {
            let i = idx + 1;
            if i == n {
                net.add_route(*r, "10.1.0.0", Self::LAN_MASK, "0.0.0.0", 1)?;
            } else {
                net.add_route(*r, "10.1.0.0", Self::LAN_MASK, &transit(i, 2), 1)?;
            }
            if i == 1 {
                net.add_route(*r, "10.0.0.0", Self::LAN_MASK, "0.0.0.0", 0)?;
            } else {
                net.add_route(*r, "10.0.0.0", Self::LAN_MASK, &transit(i - 1, 1), 0)?;
            }
        }

        Ok(net)
    }
}

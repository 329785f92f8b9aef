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

//! # Address arithmetic
//!
//! Parsing and validation of dotted-quad IPv4 addresses and subnet masks, together with the
//! subnet computations used by the forwarding logic. Addresses are represented as
//! [`Ipv4Addr`], masks as [`SubnetMask`], which can only hold contiguous masks.

use crate::netsim::AddressError;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Parse a dotted-quad IPv4 address. The string must consist of exactly four decimal octets in
/// `[0, 255]`, without any surrounding characters, and it must be written in its canonical form
/// (i.e., formatting the parsed address yields the same string again).
///
/// ```
/// # use packetsim::netsim::address::parse_ip;
/// # use std::net::Ipv4Addr;
/// assert_eq!(parse_ip("192.168.1.10"), Ok(Ipv4Addr::new(192, 168, 1, 10)));
/// assert!(parse_ip("192.168.1").is_err());
/// assert!(parse_ip("192.168.1.256").is_err());
/// ```
pub fn parse_ip(s: &str) -> Result<Ipv4Addr, AddressError> {
    match s.parse::<Ipv4Addr>() {
        Ok(addr) if addr.to_string() == s => Ok(addr),
        _ => Err(AddressError::InvalidAddressFormat(s.to_string())),
    }
}

/// Returns true if the string is a valid dotted-quad address (see [`parse_ip`]).
pub fn is_valid_ip(s: &str) -> bool {
    parse_ip(s).is_ok()
}

/// Returns true if the string is a valid subnet mask (see [`SubnetMask`]).
pub fn is_valid_mask(s: &str) -> bool {
    s.parse::<SubnetMask>().is_ok()
}

/// Returns the number of leading one-bits of the mask.
pub fn prefix_length(mask: SubnetMask) -> u8 {
    mask.prefix_len()
}

/// Returns true if both addresses lie in the same subnet, i.e., `a & mask == b & mask`.
pub fn same_subnet(a: Ipv4Addr, mask: SubnetMask, b: Ipv4Addr) -> bool {
    mask.apply(a) == mask.apply(b)
}

/// Compute the default gateway of a subnet: The network address of `ip` with the last octet
/// set to `1`.
///
/// ```
/// # use packetsim::netsim::address::{derive_gateway, SubnetMask};
/// # use std::net::Ipv4Addr;
/// let mask: SubnetMask = "255.255.255.0".parse().unwrap();
/// let gw = derive_gateway(Ipv4Addr::new(192, 168, 1, 10), mask);
/// assert_eq!(gw, Ipv4Addr::new(192, 168, 1, 1));
/// ```
pub fn derive_gateway(ip: Ipv4Addr, mask: SubnetMask) -> Ipv4Addr {
    let [a, b, c, _] = mask.apply(ip).octets();
    Ipv4Addr::new(a, b, c, 1)
}

/// # Subnet Mask
///
/// A 32-bit mask, which is guaranteed to be of the form `1^n 0^(32-n)`. When reading the mask
/// from the most significant bit to the least significant one, there is never a one-bit after a
/// zero-bit.
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
pub struct SubnetMask(u32);

impl SubnetMask {
    /// Create a mask with `len` leading ones. Returns `None` if `len > 32`.
    pub fn from_prefix_len(len: u8) -> Option<Self> {
        match len {
            0 => Some(Self(0)),
            1..=32 => Some(Self(u32::MAX << (32 - len as u32))),
            _ => None,
        }
    }

    /// Create a mask from its raw bits. Returns `None` if the bits are not contiguous.
    pub fn from_bits(bits: u32) -> Option<Self> {
        if bits.leading_ones() + bits.trailing_zeros() == 32 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Returns the raw bits of the mask
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Returns the number of leading one-bits.
    pub fn prefix_len(&self) -> u8 {
        self.0.leading_ones() as u8
    }

    /// Returns the mask in dotted-quad notation
    pub fn addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.0)
    }

    /// Apply the mask on the address, returning its network address.
    pub fn apply(&self, ip: Ipv4Addr) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(ip) & self.0)
    }
}

impl FromStr for SubnetMask {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AddressError::InvalidMaskFormat(s.to_string());
        let addr = parse_ip(s).map_err(|_| invalid())?;
        Self::from_bits(u32::from(addr)).ok_or_else(invalid)
    }
}

impl fmt::Display for SubnetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr())
    }
}

impl fmt::Debug for SubnetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.prefix_len())
    }
}

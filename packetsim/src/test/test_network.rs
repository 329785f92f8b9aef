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

use super::init_logger;
use crate::example_networks::{ExampleNetwork, RouterChain, TwoSubnets};
use crate::netsim::interface::MAX_INTERFACES;
use crate::netsim::printer;
use crate::netsim::*;
use maplit::hashset;
use std::collections::HashSet;

const MASK: &str = "255.255.255.0";

#[test]
fn test_device_ids() {
    init_logger();
    let mut net = Network::new();
    let h1 = net.add_end_system("H1", "192.168.1.10", MASK, 0, 0).unwrap();
    let r1 = net.add_router("R1", "192.168.1.1", MASK, 10, 0).unwrap();
    assert_eq!(h1, DeviceId(1000));
    assert_eq!(r1, DeviceId(1001));

    // invalid input does not consume an id
    assert_eq!(
        net.add_end_system("X", "192.168.1.300", MASK, 0, 0),
        Err(NetworkError::AddressError(AddressError::InvalidAddressFormat(
            "192.168.1.300".to_string()
        )))
    );
    assert_eq!(
        net.add_router("X", "192.168.1.2", "255.0.255.0", 0, 0),
        Err(NetworkError::AddressError(AddressError::InvalidMaskFormat("255.0.255.0".to_string())))
    );
    assert_eq!(net.num_devices(), 2);

    let h2 = net.add_device(DeviceKind::EndSystem, "H2", "10.0.0.5", MASK, 20, 0).unwrap();
    assert_eq!(h2, DeviceId(1002));
    assert_eq!(net.get_device(h2).unwrap().kind(), DeviceKind::EndSystem);
    assert_eq!(net.get_device(r1).unwrap().kind(), DeviceKind::Router);
    assert_eq!(
        net.get_devices().iter().map(|d| d.id()).collect::<Vec<_>>(),
        vec![h1, r1, h2]
    );
}

#[test]
fn test_device_kind_from_str() {
    assert_eq!("router".parse::<DeviceKind>(), Ok(DeviceKind::Router));
    assert_eq!("Router".parse::<DeviceKind>(), Ok(DeviceKind::Router));
    assert_eq!("EndSystem".parse::<DeviceKind>(), Ok(DeviceKind::EndSystem));
    assert_eq!("host".parse::<DeviceKind>(), Ok(DeviceKind::EndSystem));
    assert_eq!(
        "switch".parse::<DeviceKind>(),
        Err(NetworkError::UnknownDeviceKind("switch".to_string()))
    );
    assert_eq!(DeviceKind::Router.to_string().parse::<DeviceKind>(), Ok(DeviceKind::Router));
}

#[test]
fn test_gateway_derivation() {
    let mut net = Network::new();
    let h = net.add_end_system("H", "172.16.5.9", "255.255.0.0", 0, 0).unwrap();
    let gateway = net.get_device(h).unwrap().end_system().unwrap().gateway();
    assert_eq!(gateway.to_string(), "172.16.0.1");

    net.set_gateway(h, "172.16.5.254").unwrap();
    let gateway = net.get_device(h).unwrap().end_system().unwrap().gateway();
    assert_eq!(gateway.to_string(), "172.16.5.254");

    let r = net.add_router("R", "172.16.0.1", "255.255.0.0", 0, 0).unwrap();
    assert_eq!(net.set_gateway(r, "172.16.0.2"), Err(NetworkError::DeviceIsNotAnEndSystem(r)));
    assert_eq!(
        net.set_gateway(DeviceId(1), "172.16.0.2"),
        Err(NetworkError::DeviceNotFound(DeviceId(1)))
    );
}

#[test]
fn test_device_capacity() {
    let mut net = Network::new();
    for i in 0..DEFAULT_MAX_DEVICES {
        let ip = format!("10.0.{}.{}", i / 200, i % 200 + 1);
        net.add_end_system(format!("H{}", i), &ip, MASK, 0, 0).unwrap();
    }
    assert_eq!(net.num_devices(), DEFAULT_MAX_DEVICES);
    assert_eq!(
        net.add_router("R", "10.1.0.1", MASK, 0, 0),
        Err(NetworkError::DeviceCapacityExceeded(DEFAULT_MAX_DEVICES))
    );
    assert_eq!(net.num_devices(), DEFAULT_MAX_DEVICES);

    let mut net = Network::with_capacity(1, 10);
    net.add_router("R1", "10.1.0.1", MASK, 0, 0).unwrap();
    assert!(net.add_router("R2", "10.1.0.2", MASK, 0, 0).is_err());
}

#[test]
fn test_link_reuses_creation_interface() {
    init_logger();
    let net = TwoSubnets::net(0).unwrap();
    let h1 = net.get_device_id("H1").unwrap();
    let r1 = net.get_device_id("R1").unwrap();
    let h2 = net.get_device_id("H2").unwrap();

    let h1_ifaces = net.get_device(h1).unwrap().interfaces();
    assert_eq!(h1_ifaces.len(), 1);
    assert_eq!(h1_ifaces.primary().unwrap().neighbor(), Some(r1));

    let r1_ifaces = net.get_device(r1).unwrap().interfaces();
    assert_eq!(r1_ifaces.len(), 2);
    assert_eq!(r1_ifaces.get(0).unwrap().address().to_string(), TwoSubnets::R1_LAN_IP);
    assert_eq!(r1_ifaces.get(0).unwrap().neighbor(), Some(h1));
    assert_eq!(r1_ifaces.get(1).unwrap().address().to_string(), TwoSubnets::R1_WAN_IP);
    assert_eq!(r1_ifaces.get(1).unwrap().neighbor(), Some(h2));
    assert_eq!(r1_ifaces.find_by_neighbor(h2).map(|(i, _)| i), Some(1));

    let links: HashSet<(DeviceId, DeviceId)> =
        net.links().into_iter().map(|(a, b)| if a < b { (a, b) } else { (b, a) }).collect();
    assert_eq!(links, hashset![(h1, r1), (r1, h2)]);
    assert_eq!(net.neighbors(r1).into_iter().collect::<HashSet<_>>(), hashset![h1, h2]);

    assert_eq!(
        printer::interfaces(&net, net.get_device(r1).unwrap()),
        vec!["0: 192.168.1.1/24 -> H1".to_string(), "1: 10.0.0.1/24 -> H2".to_string()]
    );
}

#[test]
fn test_link_errors_leave_network_untouched() {
    let mut net = TwoSubnets::net(0).unwrap();
    let h1 = net.get_device_id("H1").unwrap();
    let r1 = net.get_device_id("R1").unwrap();
    let h2 = net.get_device_id("H2").unwrap();
    let before_r1 = net.get_device(r1).unwrap().interfaces().clone();
    let before_h2 = net.get_device(h2).unwrap().interfaces().clone();

    // self link
    assert_eq!(
        net.connect_devices(r1, "1.1.1.1", MASK, r1, "1.1.1.2", MASK),
        Err(NetworkError::CannotConnectToItself(r1))
    );

    // second link between the same devices
    assert!(matches!(
        net.connect_devices(r1, "10.5.0.1", MASK, h2, "10.5.0.2", MASK),
        Err(NetworkError::DeviceError(DeviceError::DuplicateInterfaceOnDevice(_, _)))
    ));

    // address already used on R1, towards a new host
    let h3 = net.add_end_system("H3", "10.0.0.60", MASK, 0, 0).unwrap();
    assert_eq!(
        net.connect_devices(h3, "10.0.0.60", MASK, r1, "10.0.0.1", MASK),
        Err(NetworkError::DeviceError(DeviceError::DuplicateInterfaceOnDevice(
            "10.0.0.1".parse().unwrap(),
            Some(h3)
        )))
    );

    // invalid addresses and unknown devices
    assert!(matches!(
        net.connect_devices(h3, "10.0.0.60", MASK, r1, "10.0.0.256", MASK),
        Err(NetworkError::AddressError(AddressError::InvalidAddressFormat(_)))
    ));
    assert_eq!(
        net.connect_devices(h3, "10.0.0.60", MASK, DeviceId(7), "10.0.0.2", MASK),
        Err(NetworkError::DeviceNotFound(DeviceId(7)))
    );

    assert_eq!(net.get_device(r1).unwrap().interfaces(), &before_r1);
    assert_eq!(net.get_device(h2).unwrap().interfaces(), &before_h2);
    assert_eq!(net.get_device(h3).unwrap().interfaces().primary().unwrap().neighbor(), None);
    assert_eq!(net.links().len(), 2);
    assert_eq!(net.neighbors(h1), vec![r1]);
}

#[test]
fn test_interface_limit() {
    let mut net = Network::new();
    let r = net.add_router("R", "10.0.0.1", MASK, 0, 0).unwrap();
    for i in 0..MAX_INTERFACES {
        let host_ip = format!("10.0.{}.10", i);
        let h = net.add_end_system(format!("H{}", i), &host_ip, MASK, 0, 0).unwrap();
        net.connect_devices(r, &format!("10.0.{}.1", i), MASK, h, &host_ip, MASK).unwrap();
    }
    assert_eq!(net.get_device(r).unwrap().interfaces().len(), MAX_INTERFACES);

    let h = net.add_end_system("H", "10.0.100.10", MASK, 0, 0).unwrap();
    assert_eq!(
        net.connect_devices(h, "10.0.100.10", MASK, r, "10.0.100.1", MASK),
        Err(NetworkError::DeviceError(DeviceError::InterfaceLimitExceeded(MAX_INTERFACES)))
    );
    assert_eq!(net.get_device(h).unwrap().interfaces().primary().unwrap().neighbor(), None);
    assert!(net.neighbors(h).is_empty());
    assert_eq!(net.get_device(r).unwrap().interfaces().len(), MAX_INTERFACES);
}

#[test]
fn test_add_route() {
    let mut net = TwoSubnets::net(0).unwrap();
    let h1 = net.get_device_id("H1").unwrap();
    let r1 = net.get_device_id("R1").unwrap();

    net.add_route(r1, "192.168.1.0", MASK, "0.0.0.0", 0).unwrap();
    let router = net.get_router(r1).unwrap();
    assert_eq!(router.get_routing_table().len(), 2);
    assert_eq!(
        printer::route_table(router),
        vec![
            "10.0.0.0/24 directly connected (interface 1)".to_string(),
            "192.168.1.0/24 directly connected (interface 0)".to_string(),
        ]
    );

    assert_eq!(
        net.add_route(r1, "172.16.0.0", MASK, "10.0.0.2", 2),
        Err(NetworkError::DeviceError(DeviceError::InvalidRouteInterfaceIndex(2)))
    );
    assert_eq!(
        net.add_route(h1, "172.16.0.0", MASK, "192.168.1.1", 0),
        Err(NetworkError::DeviceIsNotARouter(h1))
    );
    assert!(matches!(
        net.add_route(r1, "172.16.0.0", "255.255.0.255", "10.0.0.2", 1),
        Err(NetworkError::AddressError(AddressError::InvalidMaskFormat(_)))
    ));
    assert_eq!(net.get_router(r1).unwrap().get_routing_table().len(), 2);
    assert_eq!(net.get_router(h1).err(), Some(NetworkError::DeviceIsNotARouter(h1)));
    assert_eq!(
        net.get_router(DeviceId(3)).err(),
        Some(NetworkError::DeviceNotFound(DeviceId(3)))
    );
}

#[test]
fn test_find_device() {
    let net = TwoSubnets::net(0).unwrap();
    let r1 = net.get_device_id("R1").unwrap();
    let h2 = net.get_device_id("H2").unwrap();

    // both addresses of the router are found
    let lan = TwoSubnets::R1_LAN_IP.parse().unwrap();
    let wan = TwoSubnets::R1_WAN_IP.parse().unwrap();
    assert_eq!(net.find_device_by_ip(lan).map(|d| d.id()), Some(r1));
    assert_eq!(net.find_device_by_ip(wan).map(|d| d.id()), Some(r1));
    assert!(net.find_device_by_ip("10.0.0.99".parse().unwrap()).is_none());

    // R1 is at (305, 160)
    let tol = DEFAULT_PICK_TOLERANCE;
    assert_eq!(net.find_device_by_position(305, 160, tol).map(|d| d.id()), Some(r1));
    assert_eq!(net.find_device_by_position(305 + 15, 160, tol).map(|d| d.id()), Some(r1));
    assert_eq!(net.find_device_by_position(305 + 9, 160 - 12, tol).map(|d| d.id()), Some(r1));
    assert!(net.find_device_by_position(305 + 16, 160, tol).is_none());
    assert!(net.find_device_by_position(305 + 11, 160 + 11, tol).is_none());
    assert_eq!(net.find_device_by_position(520, 90, tol).map(|d| d.id()), Some(h2));
}

#[test]
fn test_names() {
    let mut net = TwoSubnets::net(0).unwrap();
    let r1 = net.get_device_id("R1").unwrap();
    assert_eq!(net.get_device_name(r1), Ok("R1"));
    assert_eq!(net.get_device_id("R2"), Err(NetworkError::DeviceNameNotFound("R2".to_string())));

    assert_eq!(net.set_device_name(r1, "Core"), Ok(true));
    assert_eq!(net.get_device_id("Core"), Ok(r1));
    assert_eq!(net.set_device_name(r1, "   "), Ok(false));
    assert_eq!(net.get_device_name(r1), Ok("Core"));
    assert_eq!(
        net.set_device_name(DeviceId(42), "X"),
        Err(NetworkError::DeviceNotFound(DeviceId(42)))
    );

    assert_eq!(printer::device_name(&net, r1), "Core");
    assert_eq!(printer::device_name(&net, DeviceId(42)), "#42");
}

#[test]
fn test_remove_device() {
    init_logger();
    let mut net = RouterChain::net(2).unwrap();
    let h1 = net.get_device_id("H1").unwrap();
    let r1 = net.get_device_id("R1").unwrap();
    let r2 = net.get_device_id("R2").unwrap();
    let h2 = net.get_device_id("H2").unwrap();

    let removed = net.remove_device(r2).unwrap();
    assert_eq!(removed.name(), "R2");
    assert_eq!(net.num_devices(), 3);
    assert_eq!(
        net.get_devices().iter().map(|d| d.id()).collect::<Vec<_>>(),
        vec![h1, r1, h2]
    );
    assert_eq!(net.get_device(r2).err(), Some(NetworkError::DeviceNotFound(r2)));

    // interfaces towards R2 stay, but are no longer connected
    let r1_ifaces = net.get_device(r1).unwrap().interfaces();
    assert_eq!(r1_ifaces.len(), 2);
    assert_eq!(r1_ifaces.get(1).unwrap().neighbor(), None);
    assert_eq!(r1_ifaces.get(1).unwrap().address().to_string(), "172.16.1.1");
    assert_eq!(net.get_device(h2).unwrap().interfaces().primary().unwrap().neighbor(), None);
    let links: HashSet<(DeviceId, DeviceId)> =
        net.links().into_iter().map(|(a, b)| if a < b { (a, b) } else { (b, a) }).collect();
    assert_eq!(links, hashset![(h1, r1)]);
    assert!(net.neighbors(h2).is_empty());

    // ids of removed devices are never reused
    let r3 = net.add_router("R3", "172.16.1.2", RouterChain::TRANSIT_MASK, 0, 0).unwrap();
    assert_eq!(r3, DeviceId(h2.0 + 1));

    // the free interface can be linked again
    let mask = RouterChain::TRANSIT_MASK;
    net.connect_devices(r1, "172.16.1.1", mask, r3, "172.16.1.2", mask).unwrap();
    assert_eq!(net.get_device(r1).unwrap().interfaces().len(), 2);
    assert_eq!(net.get_device(r1).unwrap().interfaces().get(1).unwrap().neighbor(), Some(r3));

    assert_eq!(net.remove_device(r2).err(), Some(NetworkError::DeviceNotFound(r2)));
}

#[test]
fn test_find_device_far_away() {
    let mut net = Network::new();
    let a = net.add_end_system("A", "10.0.0.1", MASK, i32::MAX, 0).unwrap();
    let b = net.add_end_system("B", "10.0.0.2", MASK, i32::MIN, i32::MIN).unwrap();

    let tol = DEFAULT_PICK_TOLERANCE;
    assert!(net.find_device_by_position(-10, 0, tol).is_none());
    assert!(net.find_device_by_position(i32::MAX, i32::MAX, tol).is_none());
    assert_eq!(net.find_device_by_position(i32::MAX - 3, 4, tol).map(|d| d.id()), Some(a));
    assert_eq!(net.find_device_by_position(i32::MIN, i32::MIN, tol).map(|d| d.id()), Some(b));

    let corner = Position::new(i32::MIN, i32::MIN);
    assert_eq!(corner.distance_squared(Position::new(i32::MAX, i32::MAX)), i64::MAX);
    let far = Position::new(i32::MAX, 0).distance_squared(Position::new(-10, 0));
    assert_eq!(far, 2_147_483_657i64.pow(2));
}

#[test]
fn test_interface_network() {
    let iface = crate::netsim::interface::Interface::new("10.0.5.77", "255.255.0.0").unwrap();
    assert_eq!(iface.network().to_string(), "10.0.0.0");
    assert!(iface.contains("10.0.200.1".parse().unwrap()));
    assert!(!iface.contains("10.1.0.1".parse().unwrap()));
}

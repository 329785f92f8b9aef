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

//! # Top-level Network module
//!
//! This module represents the network topology, owns all devices and all packets in transit, and
//! advances the simulation one tick at a time.

use crate::netsim::address::{parse_ip, SubnetMask};
use crate::netsim::device::{Device, Forwarder};
use crate::netsim::end_system::EndSystem;
use crate::netsim::interface::{Interface, LinkPlan};
use crate::netsim::packet::{DropReason, Packet, PacketStatus};
use crate::netsim::printer;
use crate::netsim::route_table::RouteEntry;
use crate::netsim::router::Router;
use crate::netsim::{DeviceId, DeviceKind, NetworkError, PacketId, Position};

use log::*;
use petgraph::graphmap::UnGraphMap;
use std::collections::HashSet;
use std::net::Ipv4Addr;

/// Number of ticks a packet needs for a single hop.
pub const ANIMATION_STEPS: u32 = 10;
/// Default maximum number of devices in the network
pub const DEFAULT_MAX_DEVICES: usize = 100;
/// Default maximum number of packets in transit
pub const DEFAULT_MAX_PACKETS: usize = 500;
/// Default distance (in pixels) for [`Network::find_device_by_position`].
pub const DEFAULT_PICK_TOLERANCE: i32 = 15;

const FIRST_DEVICE_ID: u32 = 1000;
const FIRST_PACKET_ID: u64 = 1;

/// # Network struct
/// The struct contains all devices, the links between them, and all packets that are currently
/// in transit. It is the only owner of devices and packets; everything else refers to them by
/// their id.
///
/// ## Simulation
///
/// Packets are created with [`Network::start_transmission`], and are immediately processed by the
/// device they originate from. Then, each call to [`Network::tick`] moves every packet one step
/// towards its next hop. After [`Network::animation_steps`] ticks, the packet arrives, and the
/// device it arrived at decides where to send it next. Packets which are delivered or dropped are
/// removed from the network at the end of the tick.
///
/// ## Capacity
///
/// The number of devices and the number of packets in transit are bounded. Requests that would
/// exceed these bounds are rejected.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) devices: Vec<Device>,
    links: UnGraphMap<DeviceId, ()>,
    pub(crate) packets: Vec<Packet>,
    max_devices: usize,
    max_packets: usize,
    animation_steps: u32,
    next_device_id: u32,
    next_packet_id: u64,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    /// Generate an empty Network with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_DEVICES, DEFAULT_MAX_PACKETS)
    }

    /// Generate an empty network, holding at most `max_devices` devices, and at most
    /// `max_packets` packets in transit.
    pub fn with_capacity(max_devices: usize, max_packets: usize) -> Self {
        Self {
            devices: Vec::new(),
            links: UnGraphMap::new(),
            packets: Vec::new(),
            max_devices,
            max_packets,
            animation_steps: ANIMATION_STEPS,
            next_device_id: FIRST_DEVICE_ID,
            next_packet_id: FIRST_PACKET_ID,
        }
    }

    /// Change the number of ticks a packet needs for a single hop. Packets which are already on
    /// their way finish their hop once the new number of steps is reached.
    pub fn set_animation_steps(&mut self, steps: u32) -> Result<(), NetworkError> {
        if steps == 0 {
            return Err(NetworkError::InvalidAnimationSteps);
        }
        self.animation_steps = steps;
        Ok(())
    }

    /// Returns the number of ticks a packet needs for a single hop.
    pub fn animation_steps(&self) -> u32 {
        self.animation_steps
    }

    /// Returns the maximum number of devices
    pub fn max_devices(&self) -> usize {
        self.max_devices
    }

    /// Returns the maximum number of packets in transit
    pub fn max_packets(&self) -> usize {
        self.max_packets
    }

    // ************************
    // * Topology Functions *
    // ************************

    /// Create a new device with a single interface and add it to the network. For end-systems,
    /// the gateway is derived from the address and the mask. Nothing is created if the address or
    /// mask is invalid, or if the network is full.
    ///
    /// ```rust
    /// # use packetsim::netsim::{Network, DeviceKind};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut net = Network::new();
    /// let mask = "255.255.255.0";
    /// let h1 = net.add_device(DeviceKind::EndSystem, "H1", "192.168.1.10", mask, 100, 100)?;
    /// let gateway = net.get_device(h1)?.end_system().unwrap().gateway();
    /// assert_eq!(gateway.to_string(), "192.168.1.1");
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_device<S: Into<String>>(
        &mut self,
        kind: DeviceKind,
        name: S,
        ip: &str,
        mask: &str,
        x: i32,
        y: i32,
    ) -> Result<DeviceId, NetworkError> {
        let iface = Interface::new(ip, mask)?;
        if self.devices.len() >= self.max_devices {
            warn!("Cannot add another device, the network is full!");
            return Err(NetworkError::DeviceCapacityExceeded(self.max_devices));
        }

        let id = DeviceId(self.next_device_id);
        self.next_device_id += 1;
        let name = name.into();
        let position = Position::new(x, y);
        let device = match kind {
            DeviceKind::EndSystem => Device::EndSystem(EndSystem::new(id, name, position, iface)),
            DeviceKind::Router => Device::Router(Router::new(id, name, position, iface)),
        };
        info!("Added {}", printer::device(&device));
        self.devices.push(device);
        self.links.add_node(id);
        Ok(id)
    }

    /// Add a new end-system to the network (see [`Network::add_device`]).
    pub fn add_end_system<S: Into<String>>(
        &mut self,
        name: S,
        ip: &str,
        mask: &str,
        x: i32,
        y: i32,
    ) -> Result<DeviceId, NetworkError> {
        self.add_device(DeviceKind::EndSystem, name, ip, mask, x, y)
    }

    /// Add a new router to the network (see [`Network::add_device`]).
    pub fn add_router<S: Into<String>>(
        &mut self,
        name: S,
        ip: &str,
        mask: &str,
        x: i32,
        y: i32,
    ) -> Result<DeviceId, NetworkError> {
        self.add_device(DeviceKind::Router, name, ip, mask, x, y)
    }

    /// Connect two devices. Each side gets an interface with the given address and mask, pointing
    /// towards the other device. If a device already has an unconnected interface with exactly
    /// this address and mask (like the interface it was created with), this interface is used
    /// for the link instead of creating a new one.
    ///
    /// Both sides are checked before anything changes, so either the link is fully established,
    /// or the network remains untouched.
    pub fn connect_devices(
        &mut self,
        d1: DeviceId,
        ip1: &str,
        mask1: &str,
        d2: DeviceId,
        ip2: &str,
        mask2: &str,
    ) -> Result<(), NetworkError> {
        let (ip1, mask1) = (parse_ip(ip1)?, mask1.parse::<SubnetMask>()?);
        let (ip2, mask2) = (parse_ip(ip2)?, mask2.parse::<SubnetMask>()?);
        if d1 == d2 {
            return Err(NetworkError::CannotConnectToItself(d1));
        }

        let idx1 = self.device_index(d1)?;
        let idx2 = self.device_index(d2)?;
        let plan1 = self.devices[idx1].interfaces().plan_link(ip1, mask1, d2)?;
        let plan2 = self.devices[idx2].interfaces().plan_link(ip2, mask2, d1)?;

        let iface1 = self.devices[idx1].interfaces_mut().apply_link(plan1, ip1, mask1, d2)?;
        let iface2 = self.devices[idx2].interfaces_mut().apply_link(plan2, ip2, mask2, d1)?;
        self.links.add_edge(d1, d2, ());

        info!(
            "Connected {} ({}, interface {}) with {} ({}, interface {}){}",
            self.devices[idx1].name(),
            ip1,
            iface1,
            self.devices[idx2].name(),
            ip2,
            iface2,
            match (plan1, plan2) {
                (LinkPlan::Attach, LinkPlan::Attach) => "",
                _ => " reusing existing interfaces",
            }
        );
        Ok(())
    }

    /// Add a route to the routing table of a router. The route is appended at the end of the
    /// table, and must use an existing interface of the router.
    pub fn add_route(
        &mut self,
        router: DeviceId,
        network: &str,
        mask: &str,
        next_hop: &str,
        interface: usize,
    ) -> Result<(), NetworkError> {
        let route = RouteEntry::new(network, mask, next_hop, interface)?;
        let idx = self.device_index(router)?;
        let r = self.devices[idx].router_mut_or(NetworkError::DeviceIsNotARouter(router))?;
        let route_str = printer::route_entry(&route);
        r.add_route(route)?;
        info!("Added route {} on {}", route_str, r.name());
        Ok(())
    }

    /// Change the gateway of an end-system.
    pub fn set_gateway(&mut self, end_system: DeviceId, gateway: &str) -> Result<(), NetworkError> {
        let gateway = parse_ip(gateway)?;
        let idx = self.device_index(end_system)?;
        match self.devices[idx].end_system_mut() {
            Some(e) => {
                e.set_gateway(gateway);
                Ok(())
            }
            None => Err(NetworkError::DeviceIsNotAnEndSystem(end_system)),
        }
    }

    /// Rename a device. Blank names are ignored, in which case `false` is returned.
    pub fn set_device_name<S: Into<String>>(
        &mut self,
        id: DeviceId,
        name: S,
    ) -> Result<bool, NetworkError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Ok(false);
        }
        let idx = self.device_index(id)?;
        self.devices[idx].set_name(name);
        Ok(true)
    }

    /// Remove a device from the network. The order of the remaining devices is preserved. All
    /// interfaces of other devices leading to the removed device become unconnected (they keep
    /// their address and index), and packets which are at the device, or are travelling towards
    /// it, are dropped.
    pub fn remove_device(&mut self, id: DeviceId) -> Result<Device, NetworkError> {
        let idx = self.device_index(id)?;
        let device = self.devices.remove(idx);
        self.links.remove_node(id);
        for d in self.devices.iter_mut() {
            d.interfaces_mut().unbind_neighbor(id);
        }
        for p in self.packets.iter_mut() {
            if p.current_device() == id || p.next_hop() == Some(id) {
                let at = if p.current_device() == id { id } else { p.current_device() };
                p.drop_at(at, DropReason::DeviceRemoved);
            }
        }
        info!("Removed {}", printer::device(&device));
        Ok(device)
    }

    // **********************
    // * Packet Functions *
    // **********************

    /// Create `count` packets at the device owning `source`, destined to `destination`. Every
    /// packet is processed by the source device right away. If there is not enough room for all
    /// packets, only as many packets as fit are created. The number of created packets is
    /// returned. If no single packet can be created, an error is returned.
    pub fn start_transmission(
        &mut self,
        source: &str,
        destination: &str,
        count: usize,
    ) -> Result<usize, NetworkError> {
        let source = parse_ip(source)?;
        let destination = parse_ip(destination)?;
        let origin =
            self.find_device_by_ip(source).ok_or(NetworkError::NoDeviceWithAddress(source))?;
        let origin_id = origin.id();
        let origin_pos = origin.position();

        let free = self.max_packets.saturating_sub(self.packets.len());
        if count > 0 && free == 0 {
            warn!("Cannot send any packet, too many packets in transit!");
            return Err(NetworkError::PacketCapacityExceeded(self.max_packets));
        }
        let num = count.min(free);
        if num < count {
            warn!("Only {} of {} packets fit into the network", num, count);
        }

        for _ in 0..num {
            let mut packet = Packet::new(
                PacketId(self.next_packet_id),
                source,
                destination,
                origin_id,
                origin_pos,
            );
            self.next_packet_id += 1;
            debug!("Created {}", printer::packet(self, &packet));
            if let Some(origin) = self.devices.iter().find(|d| d.id() == origin_id) {
                origin.process_packet(&mut packet, self);
            }
            self.packets.push(packet);
        }
        Ok(num)
    }

    /// Advance the simulation by a single step. Every packet in transit moves one step towards
    /// its next hop. Packets that arrive are processed by the device they arrived at. Packets
    /// without a next hop become terminal. Finally, all terminal packets are removed from the
    /// network, and returned (in their original order).
    pub fn tick(&mut self) -> Vec<Packet> {
        let mut packets = std::mem::take(&mut self.packets);
        for packet in packets.iter_mut().filter(|p| p.is_in_transit()) {
            self.step_packet(packet);
        }
        let (finished, in_transit): (Vec<Packet>, Vec<Packet>) =
            packets.into_iter().partition(|p| !p.is_in_transit());
        self.packets = in_transit;
        for p in finished.iter() {
            debug!("Finished {}", printer::packet(self, p));
        }
        finished
    }

    /// Move a single packet one step further.
    fn step_packet(&self, packet: &mut Packet) {
        let next = match packet.next_hop() {
            Some(next) => next,
            None => {
                if packet.step() == 0 {
                    packet.drop_at(packet.current_device(), DropReason::NoNextHop);
                }
                return;
            }
        };
        let (from, to) = match (self.get_device(packet.current_device()), self.get_device(next)) {
            (Ok(from), Ok(to)) => (from, to),
            _ => {
                packet.drop_at(packet.current_device(), DropReason::DeviceRemoved);
                return;
            }
        };
        if packet.advance(from.position(), to.position(), self.animation_steps) {
            packet.arrive(next, to.position());
            debug!("Packet {} arrived at {}", packet.id().0, to.name());
            to.process_packet(packet, self);
        }
    }

    /// Follow the forwarding decisions of all devices from `source` to `destination`, without
    /// creating a packet or animating anything. On success, the list of devices the packet would
    /// visit is returned, starting at the source device. If the packet would be dropped,
    /// [`NetworkError::ForwardingBlackHole`] is returned, and if the packet would visit the same
    /// device twice, [`NetworkError::ForwardingLoop`].
    pub fn trace_route(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<DeviceId>, NetworkError> {
        let source = parse_ip(source)?;
        let destination = parse_ip(destination)?;
        let mut current =
            self.find_device_by_ip(source).ok_or(NetworkError::NoDeviceWithAddress(source))?;
        let mut probe =
            Packet::new(PacketId(0), source, destination, current.id(), current.position());

        let mut visited: HashSet<DeviceId> = HashSet::new();
        let mut path: Vec<DeviceId> = Vec::new();
        loop {
            path.push(current.id());
            if !visited.insert(current.id()) {
                debug!("Forwarding Loop detected: {}", printer::path(self, &path));
                return Err(NetworkError::ForwardingLoop(path));
            }
            current.process_packet(&mut probe, self);
            match (probe.status(), probe.next_hop()) {
                (PacketStatus::Delivered { .. }, _) => return Ok(path),
                (PacketStatus::Dropped { reason, .. }, _) => {
                    debug!("Black hole detected: {}", printer::path(self, &path));
                    return Err(NetworkError::ForwardingBlackHole(path, reason));
                }
                (PacketStatus::InTransit, Some(next)) => {
                    current = self.get_device(next)?;
                    probe.arrive(next, current.position());
                }
                (PacketStatus::InTransit, None) => {
                    return Err(NetworkError::ForwardingBlackHole(path, DropReason::NoNextHop))
                }
            }
        }
    }

    // ********************
    // * Helper Functions *
    // ********************

    /// Returns the number of devices in the topology
    pub fn num_devices(&self) -> usize {
        self.devices.len()
    }

    /// Returns all devices, in the order in which they were added
    pub fn get_devices(&self) -> &[Device] {
        &self.devices
    }

    /// Returns a reference to the network device.
    pub fn get_device(&self, id: DeviceId) -> Result<&Device, NetworkError> {
        self.devices.iter().find(|d| d.id() == id).ok_or(NetworkError::DeviceNotFound(id))
    }

    /// Returns a reference to the router, or an error if the device does not exist or is not a
    /// router.
    pub fn get_router(&self, id: DeviceId) -> Result<&Router, NetworkError> {
        self.get_device(id)?.router_or(NetworkError::DeviceIsNotARouter(id))
    }

    /// Returns the name of the device, if the ID was found.
    pub fn get_device_name(&self, id: DeviceId) -> Result<&str, NetworkError> {
        self.get_device(id).map(|d| d.name())
    }

    /// Get the DeviceId with the given name. If multiple devices have the same name, then the
    /// first occurence of this name is returned.
    pub fn get_device_id(&self, name: impl AsRef<str>) -> Result<DeviceId, NetworkError> {
        self.devices
            .iter()
            .find(|d| d.name() == name.as_ref())
            .map(|d| d.id())
            .ok_or_else(|| NetworkError::DeviceNameNotFound(name.as_ref().to_string()))
    }

    /// Returns the first device which has an interface with the given address.
    pub fn find_device_by_ip(&self, ip: Ipv4Addr) -> Option<&Device> {
        self.devices.iter().find(|d| d.has_address(ip))
    }

    /// Returns the first device whose position is within `tolerance` pixels of `(x, y)`.
    pub fn find_device_by_position(&self, x: i32, y: i32, tolerance: i32) -> Option<&Device> {
        let pos = Position::new(x, y);
        let max = tolerance as i64 * tolerance as i64;
        self.devices.iter().find(|d| d.position().distance_squared(pos) <= max)
    }

    /// Returns all links in the network. Every link is reported exactly once.
    pub fn links(&self) -> Vec<(DeviceId, DeviceId)> {
        self.links.all_edges().map(|(a, b, _)| (a, b)).collect()
    }

    /// Returns all devices directly connected to the device.
    pub fn neighbors(&self, id: DeviceId) -> Vec<DeviceId> {
        self.links.neighbors(id).collect()
    }

    /// Returns the number of packets in transit
    pub fn num_packets(&self) -> usize {
        self.packets.len()
    }

    /// Returns all packets in transit, in the order in which they were created.
    pub fn get_packets(&self) -> &[Packet] {
        &self.packets
    }

    /// Returns the packet with the given id, if it is still in transit.
    pub fn get_packet(&self, id: PacketId) -> Option<&Packet> {
        self.packets.iter().find(|p| p.id() == id)
    }

    fn device_index(&self, id: DeviceId) -> Result<usize, NetworkError> {
        self.devices.iter().position(|d| d.id() == id).ok_or(NetworkError::DeviceNotFound(id))
    }
}

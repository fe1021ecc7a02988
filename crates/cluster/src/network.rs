//! Packet network: machines addressed `0..N` plus a NAT at address 255.
//!
//! Every machine runs the same program and is booted with its own address
//! as the only input. Output is read in triples `dst, x, y`; input is fed
//! as `x, y` pairs, or a single `-1` when nothing is waiting.
//!
//! The NAT remembers the most recent packet sent to it. When a whole pass
//! goes by with no packets queued and none sent, the NAT packet is handed
//! to machine 0.

use intcode_common::Program;
use intcode_vm::Machine;

use crate::error::NetworkError;

/// Number of machines in the standard network.
pub const NETWORK_SIZE: usize = 50;

/// Destination address that is captured by the NAT.
pub const NAT_ADDRESS: i64 = 255;

/// Input given to a machine with no packets waiting.
pub const IDLE_SIGNAL: i64 = -1;

/// The payload of a packet. The destination is consumed by routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub x: i64,
    pub y: i64,
}

/// A cluster of machines exchanging packets.
#[derive(Debug, Clone)]
pub struct Network {
    /// One machine per address.
    machines: Vec<Machine>,
    /// Packets waiting for each address, delivered on the next pass.
    queues: Vec<Vec<Packet>>,
    /// Output cells per machine not yet forming a complete triple.
    partial: Vec<Vec<i64>>,
    /// Latest packet sent to the NAT.
    nat: Option<Packet>,
    /// First packet ever sent to the NAT.
    first_nat: Option<Packet>,
    /// `y` of the most recent NAT delivery to machine 0.
    last_delivered_y: Option<i64>,
    /// `y` of the delivery before that.
    previous_delivered_y: Option<i64>,
}

impl Network {
    /// Boot `size` machines running `program`, each given its own address.
    ///
    /// Anything a machine prints while booting is routed on the first pass.
    pub fn new(size: usize, program: &Program) -> Result<Self, NetworkError> {
        let mut machines = Vec::with_capacity(size);
        let mut partial = Vec::with_capacity(size);

        for address in 0..size {
            let mut machine = Machine::new();
            let boot = machine
                .execute(program, [address as i64])
                .map_err(|source| NetworkError::Machine { address, source })?
                .to_vec();
            machines.push(machine);
            partial.push(boot);
        }

        Ok(Self {
            machines,
            queues: vec![Vec::new(); size],
            partial,
            nat: None,
            first_nat: None,
            last_delivered_y: None,
            previous_delivered_y: None,
        })
    }

    /// Run one pass over every machine in address order.
    ///
    /// Each machine sees only the packets queued before the pass started;
    /// packets sent during the pass wait for the next one. Returns true if
    /// the pass was idle: nothing was queued at the start and nothing was
    /// sent. On an idle pass the NAT packet, if any, is delivered to
    /// machine 0.
    pub fn route_all_computers(&mut self) -> Result<bool, NetworkError> {
        let mut idle = self.queues.iter().all(Vec::is_empty);
        let inbound = std::mem::replace(&mut self.queues, vec![Vec::new(); self.machines.len()]);

        for (address, packets) in inbound.into_iter().enumerate() {
            let input = if packets.is_empty() {
                vec![IDLE_SIGNAL]
            } else {
                packets.iter().flat_map(|p| [p.x, p.y]).collect()
            };
            if self.send_and_receive(address, input)? > 0 {
                idle = false;
            }
        }

        if idle {
            if let Some(packet) = self.nat {
                self.previous_delivered_y = self.last_delivered_y.replace(packet.y);
                self.send_and_receive(0, vec![packet.x, packet.y])?;
            }
        }

        Ok(idle)
    }

    /// Run passes until `done` returns true. Returns the number of passes.
    pub fn run_until<F>(&mut self, mut done: F) -> Result<usize, NetworkError>
    where
        F: FnMut(&Network) -> bool,
    {
        let mut passes = 0;
        while !done(self) {
            self.route_all_computers()?;
            passes += 1;
        }
        Ok(passes)
    }

    /// Run until the NAT delivers the same `y` to machine 0 twice in a row,
    /// and return that `y`.
    pub fn run_until_repeat(&mut self) -> Result<i64, NetworkError> {
        loop {
            self.route_all_computers()?;
            if let Some(y) = self.repeated_delivery() {
                return Ok(y);
            }
        }
    }

    /// Feed `input` to one machine and route whatever it prints.
    ///
    /// Returns how many complete packets were routed.
    fn send_and_receive(&mut self, address: usize, input: Vec<i64>) -> Result<usize, NetworkError> {
        let delta = self.machines[address]
            .run(input)
            .map_err(|source| NetworkError::Machine { address, source })?;

        let pending = &mut self.partial[address];
        pending.extend_from_slice(delta);
        let complete = pending.len() - pending.len() % 3;
        let cells: Vec<i64> = pending.drain(..complete).collect();

        for triple in cells.chunks_exact(3) {
            let packet = Packet {
                x: triple[1],
                y: triple[2],
            };
            self.route(address, triple[0], packet)?;
        }
        Ok(cells.len() / 3)
    }

    fn route(&mut self, from: usize, destination: i64, packet: Packet) -> Result<(), NetworkError> {
        if destination == NAT_ADDRESS {
            self.nat = Some(packet);
            self.first_nat.get_or_insert(packet);
            return Ok(());
        }

        let queue = usize::try_from(destination)
            .ok()
            .and_then(|index| self.queues.get_mut(index))
            .ok_or(NetworkError::UnknownAddress { from, destination })?;
        queue.push(packet);
        Ok(())
    }

    /// Number of machines.
    pub fn size(&self) -> usize {
        self.machines.len()
    }

    /// The machine at `address`, if there is one.
    pub fn machine(&self, address: usize) -> Option<&Machine> {
        self.machines.get(address)
    }

    /// Packets queued for `address`, to be delivered on the next pass.
    pub fn pending(&self, address: usize) -> &[Packet] {
        self.queues.get(address).map_or(&[], Vec::as_slice)
    }

    /// Latest packet held by the NAT.
    pub fn nat_packet(&self) -> Option<Packet> {
        self.nat
    }

    /// First packet ever sent to the NAT.
    pub fn first_nat_packet(&self) -> Option<Packet> {
        self.first_nat
    }

    /// `y` of the most recent NAT delivery to machine 0.
    pub fn last_delivered_y(&self) -> Option<i64> {
        self.last_delivered_y
    }

    /// The `y` value if the last two NAT deliveries carried the same `y`.
    pub fn repeated_delivery(&self) -> Option<i64> {
        match (self.previous_delivered_y, self.last_delivered_y) {
            (Some(previous), Some(last)) if previous == last => Some(last),
            _ => None,
        }
    }
}

use std::{fmt, str::FromStr};

use crate::slot::Key;

// Fixed modulus of the secondary hash. Steps land in 1..=7, so a capacity sharing a
// factor with a step revisits slots before it has seen all of them.
pub const SECONDARY_MODULUS: Key = 7;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    #[default]
    LinearProbing,
    DoubleHashing,
}

impl Strategy {
    /// Distance between consecutive candidates for `key`.
    pub fn step(&self, key: Key) -> usize {
        match self {
            Strategy::LinearProbing => 1,
            Strategy::DoubleHashing => h2(key) as usize,
        }
    }

    pub fn sequence(&self, key: Key, capacity: usize) -> ProbeSequence {
        ProbeSequence::new(key, capacity, *self)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Strategy::LinearProbing => "linear probing",
                Strategy::DoubleHashing => "double hashing",
            }
        )
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" | "linear-probing" => Ok(Strategy::LinearProbing),
            "double" | "double-hashing" => Ok(Strategy::DoubleHashing),
            _ => Err(format!("No such strategy: {s}")),
        }
    }
}

/// Home slot of `key`.
pub fn h1(key: Key, capacity: usize) -> usize {
    (key % capacity as Key) as usize
}

pub fn h2(key: Key) -> Key {
    SECONDARY_MODULUS - (key % SECONDARY_MODULUS)
}

/// The candidate slots for one key, in visiting order.
///
/// Yields exactly `capacity` indices: the i-th is `(h1 + i * step) % capacity`. Running
/// out of candidates is the step bound every table operation stops at.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    next: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSequence {
    pub fn new(key: Key, capacity: usize, strategy: Strategy) -> ProbeSequence {
        assert!(capacity > 0, "Probing a table without slots");
        ProbeSequence {
            next: h1(key, capacity),
            step: strategy.step(key) % capacity,
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next;
        // next < capacity and step < capacity, so the sum can't overflow
        self.next = (self.next + self.step) % self.capacity;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}

#[cfg(test)]
mod tests {
    use crate::probe::*;

    #[test]
    fn hashes() {
        assert_eq!(h1(14, 10), 4);
        assert_eq!(h1(20, 10), 0);
        assert_eq!(h1(5, 1), 0);
        for key in 0..100 {
            let step = h2(key);
            assert!((1..=7).contains(&step), "h2({key}) = {step}");
        }
        assert_eq!(h2(0), 7);
        assert_eq!(h2(7), 7);
        assert_eq!(h2(13), 1);
    }

    #[test]
    fn linear_wraps_around() {
        let seq: Vec<usize> = Strategy::LinearProbing.sequence(8, 10).collect();
        assert_eq!(seq, vec![8, 9, 0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn double_hashing_strides() {
        // h1(18) = 18, h2(18) = 3
        let seq: Vec<usize> = Strategy::DoubleHashing.sequence(18, 20).take(5).collect();
        assert_eq!(seq, vec![18, 1, 4, 7, 10]);
    }

    #[test]
    fn sequence_is_bounded_by_capacity() {
        for capacity in 1..30 {
            for key in 0..50 {
                for strategy in [Strategy::LinearProbing, Strategy::DoubleHashing] {
                    let seq = strategy.sequence(key, capacity);
                    assert_eq!(seq.len(), capacity);
                    assert_eq!(seq.count(), capacity);
                }
            }
        }
    }

    #[test]
    fn step_equal_to_capacity_cycles() {
        // h2(0) = 7: a 7 slot table only ever sees slot 0 for key 0
        let seq: Vec<usize> = Strategy::DoubleHashing.sequence(0, 7).collect();
        assert_eq!(seq, vec![0; 7]);

        // and a 14 slot table only sees two slots
        let mut seen: Vec<usize> = Strategy::DoubleHashing.sequence(14, 14).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen, vec![0, 7]);
    }

    #[test]
    fn parse_strategy() {
        assert_eq!("linear".parse::<Strategy>(), Ok(Strategy::LinearProbing));
        assert_eq!("double-hashing".parse::<Strategy>(), Ok(Strategy::DoubleHashing));
        assert!("quadratic".parse::<Strategy>().is_err());
    }
}

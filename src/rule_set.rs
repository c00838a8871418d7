/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// State of a cell in the next generation, given whether it is alive now and how many of its
    /// eight neighbors are alive now.
    pub fn next_state(&self, alive: bool, live_neighbors: u8) -> bool {
        debug_assert!(live_neighbors <= 8, "a cell has at most 8 neighbors");

        let mask = 1u16 << live_neighbors;

        if alive {
            self.survivals() & mask == mask
        } else {
            self.births() & mask == mask
        }
    }
}

#[cfg(test)]
mod test {
    use super::B3S23;
    use super::RuleSet;

    #[test]
    fn conway_masks() {
        assert_eq!(B3S23.births(), 0b1000);
        assert_eq!(B3S23.survivals(), 0b1100);
        assert_eq!(RuleSet::default(), B3S23);
    }

    #[test]
    fn high_bits_ignored() {
        let set = RuleSet::new(0xFFFF, 0xFFFF);

        assert_eq!(set.births(), 0x1FF);
        assert_eq!(set.survivals(), 0x1FF);
    }

    #[test]
    fn conway_transitions() {
        for n in 0..=8u8 {
            // live cells survive on 2 or 3, everything else dies
            assert_eq!(B3S23.next_state(true, n), n == 2 || n == 3, "alive with {n}");

            // dead cells are born on exactly 3
            assert_eq!(B3S23.next_state(false, n), n == 3, "dead with {n}");
        }
    }
}

/// An unordered bond between two atoms, referenced by serial number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub serial1: u32,
    pub serial2: u32,
}

impl Connection {
    /// Returns `None` for a self-bond.
    pub fn new(serial1: u32, serial2: u32) -> Option<Self> {
        (serial1 != serial2).then_some(Self { serial1, serial2 })
    }

    /// The endpoint pair ordered so that `(a, b)` and `(b, a)` compare equal.
    pub fn canonical(&self) -> (u32, u32) {
        if self.serial1 <= self.serial2 {
            (self.serial1, self.serial2)
        } else {
            (self.serial2, self.serial1)
        }
    }

    pub fn is_descending(&self) -> bool {
        self.serial1 > self.serial2
    }
}

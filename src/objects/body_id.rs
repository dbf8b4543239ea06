use std::fmt;

/// Identity of a rigid body, unique within the generator that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Hands out monotonically increasing body ids.
///
/// A world owns one of these and passes it to every body it creates, so two
/// worlds (or two tests) never share a counter and can be seeded independently.
#[derive(Debug, Clone, Default)]
pub struct BodyIdGenerator {
    next: u64,
}

impl BodyIdGenerator {
    /// Starts counting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(seed: u64) -> Self {
        Self { next: seed }
    }

    pub fn next_id(&mut self) -> BodyId {
        let id = BodyId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to `next_id` will return.
    pub fn peek(&self) -> BodyId {
        BodyId(self.next)
    }
}

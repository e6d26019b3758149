use crate::ast::NodeId;

/// Sequential id generator for nodes within a document.
///
/// One generator lives for exactly one parse, so identical input always
/// yields the same `node-0, node-1, ...` sequence.
#[derive(Debug, Clone, Default)]
pub struct IDGenerator {
    count: u32,
}

impl IDGenerator {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Generate next sequential id
    pub fn new_id(&mut self) -> NodeId {
        let id = NodeId(self.count);
        self.count += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut gen = IDGenerator::new();

        assert_eq!(gen.new_id().to_string(), "node-0");
        assert_eq!(gen.new_id().to_string(), "node-1");
        assert_eq!(gen.new_id().to_string(), "node-2");
        assert_eq!(gen.count(), 3);

        gen.reset();
        assert_eq!(gen.new_id(), NodeId(0));
    }
}

use crate::ast::{NodeId, ParsedDocument, ParsedNode};

/// What a visitor wants to happen after entering a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Continue,
    SkipChildren,
    Stop,
}

/// Visitor pattern for traversing a parsed document.
///
/// Both hooks have default implementations, so a visitor only overrides
/// what it needs. Traversal uses an explicit stack, which keeps pathological
/// nesting from growing the call stack.
pub trait Visitor {
    fn enter_node(&mut self, _doc: &ParsedDocument, _node: &ParsedNode) -> Walk {
        Walk::Continue
    }

    /// Called after all children of an entered node were walked (also when
    /// they were skipped).
    fn exit_node(&mut self, _doc: &ParsedDocument, _node: &ParsedNode) {}
}

enum Frame {
    Enter(NodeId),
    Exit(NodeId),
}

/// Walk the subtree rooted at `start` in document order
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, doc: &ParsedDocument, start: NodeId) {
    let mut stack = vec![Frame::Enter(start)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(id) => {
                let node = doc.node(id);
                match visitor.enter_node(doc, node) {
                    Walk::Stop => return,
                    Walk::SkipChildren => stack.push(Frame::Exit(id)),
                    Walk::Continue => {
                        stack.push(Frame::Exit(id));
                        for child in node.children.iter().rev() {
                            stack.push(Frame::Enter(*child));
                        }
                    }
                }
            }
            Frame::Exit(id) => visitor.exit_node(doc, doc.node(id)),
        }
    }
}

pub fn walk_document<V: Visitor + ?Sized>(visitor: &mut V, doc: &ParsedDocument) {
    walk(visitor, doc, doc.root);
}

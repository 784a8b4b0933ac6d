//! Read side of a built hierarchy, the only surface presentation code gets to see.
//!
//! Nothing here changes a tree, new source data means a new build.

use crate::{hierarchy::Hierarchy, node::HierarchyNode};

pub trait ContentTree {
	/// Node with the given id
	fn node(&self, id: &str) -> Option<&HierarchyNode>;

	/// Ordered children of a node, empty for files. `None` if the id is unknown.
	fn children(&self, id: &str) -> Option<&[HierarchyNode]>;

	/// Ids from the root down to the node itself, both included. `None` if the id is unknown.
	fn path(&self, id: &str) -> Option<Vec<&str>>;
}

impl ContentTree for Hierarchy {
	fn node(&self, id: &str) -> Option<&HierarchyNode> {
		self.position(id)
			.and_then(|position| self.walk(position).last().flatten())
	}

	fn children(&self, id: &str) -> Option<&[HierarchyNode]> {
		self.node(id).map(HierarchyNode::children)
	}

	fn path(&self, id: &str) -> Option<Vec<&str>> {
		self.position(id).and_then(|position| {
			self.walk(position)
				.map(|node| node.map(HierarchyNode::id))
				.collect()
		})
	}
}

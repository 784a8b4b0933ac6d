use std::collections::{hash_map::Entry, HashMap};

use serde::{
	de::Error as _,
	ser::{SerializeSeq, SerializeStruct},
	Deserialize, Deserializer, Serialize, Serializer,
};

use crate::node::HierarchyNode;

/// A built tree plus an index from node id to its place in it.
///
/// Every node gets a slot recording its parent's slot and its position among that parent's
/// children, so lookups climb to the root and walk back down without holding references into
/// the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
	root: HierarchyNode,
	ids: HashMap<String, usize>,
	slots: Vec<Slot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
	parent: Option<usize>,
	child: usize,
}

impl Hierarchy {
	/// Index an already assembled tree. When an id shows up more than once, its first occurrence in
	/// pre-order is the one that gets indexed.
	#[must_use]
	pub fn new(root: HierarchyNode) -> Self {
		let mut ids = HashMap::new();
		let mut slots = Vec::new();
		let mut stack = vec![(&root, None, 0)];

		while let Some((node, parent, child)) = stack.pop() {
			let slot = slots.len();
			slots.push(Slot { parent, child });

			if let Entry::Vacant(entry) = ids.entry(node.id().to_string()) {
				entry.insert(slot);
			}

			for (idx, child) in node.children().iter().enumerate().rev() {
				stack.push((child, Some(slot), idx));
			}
		}

		Self { root, ids, slots }
	}

	#[must_use]
	pub const fn root(&self) -> &HierarchyNode {
		&self.root
	}

	#[must_use]
	pub fn into_root(self) -> HierarchyNode {
		self.root
	}

	#[must_use]
	pub fn contains(&self, id: &str) -> bool {
		self.ids.contains_key(id)
	}

	/// Amount of distinct node ids in the tree
	#[must_use]
	pub fn len(&self) -> usize {
		self.ids.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Every node in pre-order
	pub fn iter(&self) -> impl Iterator<Item = &HierarchyNode> {
		self.root.iter()
	}

	/// Child indices to follow from the root to reach `id`
	pub(crate) fn position(&self, id: &str) -> Option<Vec<usize>> {
		let mut slot = self.slots[*self.ids.get(id)?];
		let mut position = Vec::new();

		while let Some(parent) = slot.parent {
			position.push(slot.child);
			slot = self.slots[parent];
		}
		position.reverse();

		Some(position)
	}

	/// The nodes along `position`, root first
	pub(crate) fn walk(
		&self,
		position: Vec<usize>,
	) -> impl Iterator<Item = Option<&HierarchyNode>> + '_ {
		let mut current = Some(&self.root);
		std::iter::once(current).chain(position.into_iter().map(move |idx| {
			current = current.and_then(|node| node.children().get(idx));
			current
		}))
	}
}

/// A node written without its children, followed in the sequence by its descendants
struct FlatNode<'a>(&'a HierarchyNode);

impl Serialize for FlatNode<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let node = self.0;
		let mut record = serializer.serialize_struct("HierarchyNode", 11)?;

		record.serialize_field("id", node.id())?;
		record.serialize_field("kind", if node.is_folder() { "folder" } else { "file" })?;
		record.serialize_field("displayName", node.display_name())?;
		record.serialize_field("originalName", node.original_name())?;
		match node.parent_id() {
			Some(parent_id) => record.serialize_field("parentId", parent_id)?,
			None => record.skip_field("parentId")?,
		}
		record.serialize_field("depth", &node.depth())?;
		record.serialize_field("order", &node.order())?;
		record.serialize_field("contentTypeTags", node.content_type_tags())?;
		match node.transformed_links() {
			Some(links) => record.serialize_field("transformedLinks", links)?,
			None => record.skip_field("transformedLinks")?,
		}
		if node.codes().is_empty() {
			record.skip_field("codes")?;
		} else {
			record.serialize_field("codes", node.codes())?;
		}
		record.serialize_field("childCount", &node.children().len())?;

		record.end()
	}
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatRecord {
	#[serde(flatten)]
	node: HierarchyNode,
	#[serde(default)]
	child_count: usize,
}

/// Written as a flat pre-order sequence of nodes, each with its amount of children, so the JSON
/// nesting stays the same however deep the tree is.
impl Serialize for Hierarchy {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(self.slots.len()))?;
		for node in self.iter() {
			seq.serialize_element(&FlatNode(node))?;
		}
		seq.end()
	}
}

impl<'de> Deserialize<'de> for Hierarchy {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let records = Vec::<FlatRecord>::deserialize(deserializer)?;
		let mut root = None;
		let mut open = Vec::<(HierarchyNode, usize)>::new();

		for FlatRecord { node, child_count } in records {
			if root.is_some() {
				return Err(D::Error::custom("nodes found after the root was complete"));
			}
			if node.is_file() && child_count > 0 {
				return Err(D::Error::custom(format!(
					"file node '{}' can't have children",
					node.id()
				)));
			}

			open.push((node, child_count));

			while let Some((_, 0)) = open.last() {
				let Some((done, _)) = open.pop() else {
					break;
				};

				match open.last_mut() {
					Some((parent, remaining)) => {
						*remaining -= 1;
						if parent.push_child(done).is_err() {
							return Err(D::Error::custom("children attached to a file node"));
						}
					}
					None => root = Some(done),
				}
			}
		}

		if !open.is_empty() {
			return Err(D::Error::custom("node sequence ended before every child was read"));
		}

		root.map(Self::new)
			.ok_or_else(|| D::Error::custom("empty node sequence"))
	}
}

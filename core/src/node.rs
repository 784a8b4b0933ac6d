use std::collections::BTreeSet;

use dh_codes::RecognizedCode;
use serde::{Deserialize, Serialize};

use crate::item::TransformedLinks;

/// Folders own their children, files are leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
	Folder {
		#[serde(default)]
		children: Vec<HierarchyNode>,
	},
	File,
}

/// A folder or file of a built hierarchy.
///
/// Nodes can't be changed once built. The consuming `with_*` methods exist to put a node together
/// before it is handed to a parent, which is how the builder and hand written trees create them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
	id: String,
	#[serde(flatten)]
	kind: NodeKind,
	display_name: String,
	original_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	parent_id: Option<String>,
	#[serde(default)]
	depth: u32,
	#[serde(default)]
	order: u32,
	#[serde(default)]
	content_type_tags: BTreeSet<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	transformed_links: Option<TransformedLinks>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	codes: Vec<RecognizedCode>,
}

impl HierarchyNode {
	pub fn folder(
		id: impl Into<String>,
		display_name: impl Into<String>,
		children: Vec<Self>,
	) -> Self {
		Self::new(id.into(), display_name.into(), NodeKind::Folder { children })
	}

	pub fn file(id: impl Into<String>, display_name: impl Into<String>) -> Self {
		Self::new(id.into(), display_name.into(), NodeKind::File)
	}

	fn new(id: String, display_name: String, kind: NodeKind) -> Self {
		Self {
			id,
			kind,
			original_name: display_name.clone(),
			display_name,
			parent_id: None,
			depth: 0,
			order: 0,
			content_type_tags: BTreeSet::new(),
			transformed_links: None,
			codes: Vec::new(),
		}
	}

	#[must_use]
	pub fn with_original_name(mut self, original_name: impl Into<String>) -> Self {
		self.original_name = original_name.into();
		self
	}

	#[must_use]
	pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
		self.parent_id = Some(parent_id.into());
		self
	}

	#[must_use]
	pub fn with_depth(mut self, depth: u32) -> Self {
		self.depth = depth;
		self
	}

	#[must_use]
	pub fn with_order(mut self, order: u32) -> Self {
		self.order = order;
		self
	}

	#[must_use]
	pub fn with_tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.content_type_tags = tags.into_iter().map(Into::into).collect();
		self
	}

	#[must_use]
	pub fn with_links(mut self, links: Option<TransformedLinks>) -> Self {
		self.transformed_links = links;
		self
	}

	#[must_use]
	pub fn with_codes(mut self, codes: Vec<RecognizedCode>) -> Self {
		self.codes = codes;
		self
	}

	#[must_use]
	pub fn id(&self) -> &str {
		&self.id
	}

	#[must_use]
	pub const fn kind(&self) -> &NodeKind {
		&self.kind
	}

	#[must_use]
	pub const fn is_folder(&self) -> bool {
		matches!(self.kind, NodeKind::Folder { .. })
	}

	#[must_use]
	pub const fn is_file(&self) -> bool {
		matches!(self.kind, NodeKind::File)
	}

	#[must_use]
	pub fn display_name(&self) -> &str {
		&self.display_name
	}

	#[must_use]
	pub fn original_name(&self) -> &str {
		&self.original_name
	}

	#[must_use]
	pub fn parent_id(&self) -> Option<&str> {
		self.parent_id.as_deref()
	}

	#[must_use]
	pub const fn depth(&self) -> u32 {
		self.depth
	}

	#[must_use]
	pub const fn order(&self) -> u32 {
		self.order
	}

	#[must_use]
	pub const fn content_type_tags(&self) -> &BTreeSet<String> {
		&self.content_type_tags
	}

	#[must_use]
	pub fn has_tag(&self, tag: &str) -> bool {
		self.content_type_tags.contains(tag)
	}

	#[must_use]
	pub const fn transformed_links(&self) -> Option<&TransformedLinks> {
		self.transformed_links.as_ref()
	}

	/// Codes recognized in the original name, in reading order
	#[must_use]
	pub fn codes(&self) -> &[RecognizedCode] {
		&self.codes
	}

	/// Ordered children, always empty for files
	#[must_use]
	pub fn children(&self) -> &[Self] {
		match &self.kind {
			NodeKind::Folder { children } => children,
			NodeKind::File => &[],
		}
	}

	/// This node and all its descendants in pre-order
	#[must_use]
	pub fn iter(&self) -> Preorder<'_> {
		Preorder { stack: vec![self] }
	}

	/// Amount of nodes in this subtree, counting itself
	#[must_use]
	pub fn subtree_len(&self) -> usize {
		self.iter().count()
	}

	/// Append `child` to a folder, handing it back when this node is a file
	pub(crate) fn push_child(&mut self, child: Self) -> Result<(), Self> {
		match &mut self.kind {
			NodeKind::Folder { children } => {
				children.push(child);
				Ok(())
			}
			NodeKind::File => Err(child),
		}
	}
}

// Dropping nested children one level at a time would use a stack frame per level
impl Drop for HierarchyNode {
	fn drop(&mut self) {
		let NodeKind::Folder { children } = &mut self.kind else {
			return;
		};
		if children.iter().all(|child| child.children().is_empty()) {
			return;
		}

		let mut pending = std::mem::take(children);
		while let Some(mut node) = pending.pop() {
			if let NodeKind::Folder { children } = &mut node.kind {
				pending.append(children);
			}
		}
	}
}

impl<'a> IntoIterator for &'a HierarchyNode {
	type Item = &'a HierarchyNode;
	type IntoIter = Preorder<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[derive(Debug, Clone)]
pub struct Preorder<'a> {
	stack: Vec<&'a HierarchyNode>,
}

impl<'a> Iterator for Preorder<'a> {
	type Item = &'a HierarchyNode;

	fn next(&mut self) -> Option<Self::Item> {
		let node = self.stack.pop()?;
		self.stack.extend(node.children().iter().rev());
		Some(node)
	}
}

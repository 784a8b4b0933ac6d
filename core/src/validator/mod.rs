//! Structural checks over a built [`HierarchyNode`] tree.
//!
//! Every check runs on its own, a node breaking several rules gets one issue per rule. Issues come
//! out in pre-order and are never merged, so the same tree always yields the same list.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::node::HierarchyNode;

mod issue;
mod report;

pub use issue::{IssueCode, Severity, ValidationIssue};
pub use report::ValidationReport;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
	/// Deepest allowed node, unbounded when unset
	pub max_depth: Option<u32>,
	/// Tags that at least one node of the tree must carry
	pub required_tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
	config: ValidationConfig,
}

impl Validator {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub const fn with_config(config: ValidationConfig) -> Self {
		Self { config }
	}

	#[must_use]
	pub const fn config(&self) -> &ValidationConfig {
		&self.config
	}

	#[instrument(skip_all, fields(root = %root.id()))]
	pub fn validate(&self, root: &HierarchyNode) -> Vec<ValidationIssue> {
		let mut issues = Vec::new();
		let mut seen_ids = HashSet::new();
		let mut seen_tags = BTreeSet::new();
		let mut stack = vec![(root, None::<&HierarchyNode>)];

		while let Some((node, parent)) = stack.pop() {
			if !seen_ids.insert(node.id()) {
				issues.push(ValidationIssue::new(
					IssueCode::DuplicateNodeId,
					Some(node.id()),
					format!("node id '{}' appears more than once", node.id()),
				));
			}

			self.check_position(node, parent, &mut issues);
			self.check_content(node, &mut issues);
			check_sibling_orders(node, &mut issues);

			if !self.config.required_tags.is_empty() {
				seen_tags.extend(node.content_type_tags().iter().map(String::as_str));
			}

			stack.extend(node.children().iter().rev().map(|child| (child, Some(node))));
		}

		for tag in &self.config.required_tags {
			if !seen_tags.contains(tag.as_str()) {
				issues.push(ValidationIssue::new(
					IssueCode::MissingRequiredContent,
					None,
					format!("no node is tagged '{tag}'"),
				));
			}
		}

		debug!(
			nodes = seen_ids.len(),
			issues = issues.len(),
			errors = issues.iter().filter(|issue| issue.is_error()).count(),
			"Validated hierarchy"
		);

		issues
	}

	/// Validate and group the outcome by severity
	#[must_use]
	pub fn report(&self, root: &HierarchyNode) -> ValidationReport {
		ValidationReport::new(self.validate(root))
	}

	fn check_position(
		&self,
		node: &HierarchyNode,
		parent: Option<&HierarchyNode>,
		issues: &mut Vec<ValidationIssue>,
	) {
		let expected_depth = parent.map_or(0, |parent| parent.depth().saturating_add(1));
		if node.depth() != expected_depth {
			issues.push(ValidationIssue::new(
				IssueCode::DepthMismatch,
				Some(node.id()),
				format!("depth is {} but should be {expected_depth}", node.depth()),
			));
		}

		match (parent, node.parent_id()) {
			(None, Some(parent_id)) => issues.push(ValidationIssue::new(
				IssueCode::DanglingParent,
				Some(node.id()),
				format!("root node declares parent '{parent_id}'"),
			)),
			(Some(parent), declared) if declared != Some(parent.id()) => {
				issues.push(ValidationIssue::new(
					IssueCode::DanglingParent,
					Some(node.id()),
					format!(
						"declared parent {} but is held by '{}'",
						declared.map_or_else(|| "none".to_string(), |id| format!("'{id}'")),
						parent.id()
					),
				));
			}
			_ => {}
		}

		if let Some(max_depth) = self.config.max_depth {
			if node.depth() > max_depth {
				issues.push(ValidationIssue::new(
					IssueCode::DepthLimitExceeded,
					Some(node.id()),
					format!("depth {} is above the limit of {max_depth}", node.depth()),
				));
			}
		}
	}

	#[allow(clippy::unused_self)]
	fn check_content(&self, node: &HierarchyNode, issues: &mut Vec<ValidationIssue>) {
		if node.display_name().trim().is_empty() {
			issues.push(ValidationIssue::new(
				IssueCode::EmptyDisplayName,
				Some(node.id()),
				format!("display name is empty (original name '{}')", node.original_name()),
			));
		}

		if node.is_folder() && node.children().is_empty() {
			issues.push(ValidationIssue::new(
				IssueCode::EmptyFolder,
				Some(node.id()),
				"folder has no children",
			));
		}
	}
}

/// Every child reusing an order already taken by an earlier sibling gets flagged
fn check_sibling_orders(folder: &HierarchyNode, issues: &mut Vec<ValidationIssue>) {
	let mut used = HashSet::new();

	for child in folder.children() {
		if !used.insert(child.order()) {
			issues.push(ValidationIssue::new(
				IssueCode::DuplicateSiblingOrder,
				Some(child.id()),
				format!(
					"order {} is already used by a sibling under '{}'",
					child.order(),
					folder.id()
				),
			));
		}
	}
}

/// Validate `root` with the default configuration
#[must_use]
pub fn validate(root: &HierarchyNode) -> Vec<ValidationIssue> {
	Validator::new().validate(root)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;

	use pretty_assertions::assert_eq;

	fn codes(issues: &[ValidationIssue]) -> Vec<(IssueCode, Option<&str>)> {
		issues
			.iter()
			.map(|issue| (issue.code, issue.node_id.as_deref()))
			.collect()
	}

	fn campaign(children: Vec<HierarchyNode>) -> HierarchyNode {
		HierarchyNode::folder("root", "Campaign", children)
	}

	#[test]
	fn well_formed_tree_has_no_issues() {
		let root = campaign(vec![HierarchyNode::file("f1", "Poster ES")
			.with_parent("root")
			.with_depth(1)]);

		assert!(validate(&root).is_empty());
	}

	#[test]
	fn checks_are_independent() {
		let root = campaign(vec![
			HierarchyNode::folder("drafts", "Drafts", vec![])
				.with_parent("root")
				.with_depth(1),
			HierarchyNode::file("f1", "")
				.with_parent("root")
				.with_depth(1)
				.with_order(1),
		]);

		let issues = validate(&root);

		assert_eq!(
			codes(&issues),
			vec![
				(IssueCode::EmptyFolder, Some("drafts")),
				(IssueCode::EmptyDisplayName, Some("f1")),
			]
		);
		assert!(issues.iter().all(ValidationIssue::is_warning));
	}

	#[test]
	fn depth_and_parent_mismatches_are_errors() {
		let root = HierarchyNode::folder(
			"root",
			"Campaign",
			vec![
				HierarchyNode::file("deep", "Poster.pdf")
					.with_parent("root")
					.with_depth(3),
				HierarchyNode::file("stray", "Card.pdf")
					.with_parent("elsewhere")
					.with_depth(1)
					.with_order(1),
			],
		)
		.with_parent("outside")
		.with_depth(1);

		assert_eq!(
			codes(&validate(&root)),
			vec![
				(IssueCode::DepthMismatch, Some("root")),
				(IssueCode::DanglingParent, Some("root")),
				(IssueCode::DepthMismatch, Some("deep")),
				(IssueCode::DepthMismatch, Some("stray")),
				(IssueCode::DanglingParent, Some("stray")),
			]
		);
	}

	#[test]
	fn flags_every_repeated_sibling_order() {
		let root = campaign(
			["a", "b", "c"]
				.into_iter()
				.map(|id| {
					HierarchyNode::file(id, id.to_uppercase())
						.with_parent("root")
						.with_depth(1)
				})
				.collect(),
		);

		assert_eq!(
			codes(&validate(&root)),
			vec![
				(IssueCode::DuplicateSiblingOrder, Some("b")),
				(IssueCode::DuplicateSiblingOrder, Some("c")),
			]
		);
	}

	#[test]
	fn duplicate_ids_are_reported_each_time() {
		let root = campaign(vec![
			HierarchyNode::file("x", "One").with_parent("root").with_depth(1),
			HierarchyNode::file("x", "Two")
				.with_parent("root")
				.with_depth(1)
				.with_order(1),
		]);

		assert_eq!(codes(&validate(&root)), vec![(IssueCode::DuplicateNodeId, Some("x"))]);
	}

	#[test]
	fn configured_limits_and_required_tags() {
		let root = campaign(vec![HierarchyNode::folder(
			"print",
			"Print",
			vec![HierarchyNode::file("f1", "Poster")
				.with_parent("print")
				.with_depth(2)
				.with_tags(["poster", "physical"])],
		)
		.with_parent("root")
		.with_depth(1)]);

		let validator = Validator::with_config(ValidationConfig {
			max_depth: Some(1),
			required_tags: vec!["poster".to_string(), "story".to_string()],
		});
		let issues = validator.validate(&root);

		assert_eq!(
			codes(&issues),
			vec![
				(IssueCode::DepthLimitExceeded, Some("f1")),
				(IssueCode::MissingRequiredContent, None),
			]
		);
		assert!(issues[1].message.contains("story"));
		assert!(validate(&root).is_empty());
	}

	#[test]
	fn validation_is_repeatable() {
		let root = campaign(vec![HierarchyNode::file("f1", " ").with_depth(2)]);

		let first = validate(&root);
		assert_eq!(first, validate(&root));
		assert_eq!(first.len(), 3);
	}
}

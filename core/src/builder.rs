use std::collections::{hash_map::Entry, HashMap, HashSet};

use dh_codes::{DecodedName, NameDecoder};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, instrument, warn};

use crate::{
	classify::content_type_tags, error::BuildError, hierarchy::Hierarchy, item::RawItem,
	node::HierarchyNode,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOptions {
	/// Id of the item to use as root. Its own parent link is ignored, which is what a listing of a
	/// shared folder looks like: the folder's parent lives outside the snapshot.
	pub root_id: Option<String>,
	/// Rename siblings sharing a display name to `Name (2)`, `Name (3)`...
	pub disambiguate_names: bool,
}

impl Default for BuildOptions {
	fn default() -> Self {
		Self {
			root_id: None,
			disambiguate_names: true,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrphanReason {
	/// Declared parent isn't part of the snapshot
	MissingParent,
	/// Declares no parent but isn't the root
	ExtraRoot,
	/// Declared parent is a file
	FileParent,
	/// Parent exists but is itself out of the tree
	DetachedAncestor,
	/// Another item already uses this id
	DuplicateId,
}

/// An item left out of the tree. Nothing is dropped silently, callers decide what to do with these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Orphan {
	pub id: String,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_id: Option<String>,
	pub reason: OrphanReason,
}

#[derive(Debug, Clone)]
pub struct BuildOutput {
	pub hierarchy: Hierarchy,
	pub orphans: Vec<Orphan>,
}

impl BuildOutput {
	#[must_use]
	pub fn orphan_ids(&self) -> Vec<&str> {
		self.orphans.iter().map(|orphan| orphan.id.as_str()).collect()
	}
}

/// Turns a flat snapshot of [`RawItem`]s into a [`Hierarchy`].
#[derive(Debug, Clone)]
pub struct HierarchyBuilder<'r> {
	decoder: NameDecoder<'r>,
	options: BuildOptions,
}

/// Everything assembly reads, indexed by the item's position in the snapshot
struct Snapshot<'a> {
	items: &'a [RawItem],
	decoded: Vec<DecodedName>,
	children: HashMap<usize, Vec<usize>>,
}

impl Snapshot<'_> {
	/// Ordered children of a container, empty for anything else
	fn siblings(&self, idx: usize) -> &[usize] {
		self.children.get(&idx).map(Vec::as_slice).unwrap_or_default()
	}
}

/// Where an item ends up in the tree
struct Placement {
	parent: Option<usize>,
	depth: u32,
	order: u32,
	display_name: String,
}

impl<'r> HierarchyBuilder<'r> {
	#[must_use]
	pub const fn new(decoder: NameDecoder<'r>, options: BuildOptions) -> Self {
		Self { decoder, options }
	}

	/// Build the tree for `items`.
	///
	/// Fails only when the parent links contain a cycle or when there is no root to start from, a
	/// partial tree is never returned.
	#[instrument(skip_all, fields(items = items.len()), err)]
	pub fn build(&self, items: &[RawItem]) -> Result<BuildOutput, BuildError> {
		let mut index = HashMap::with_capacity(items.len());
		let mut duplicates = Vec::new();

		for (idx, item) in items.iter().enumerate() {
			match index.entry(item.id.as_str()) {
				Entry::Vacant(entry) => {
					entry.insert(idx);
				}
				Entry::Occupied(_) => {
					warn!(id = %item.id, "Duplicated item id in snapshot, keeping the first one");
					duplicates.push(idx);
				}
			}
		}

		let root_id = self.options.root_id.as_deref();
		if let Some(root_id) = root_id {
			if !index.contains_key(root_id) {
				return Err(BuildError::UnknownRoot {
					root_id: root_id.to_string(),
				});
			}
		}

		let declared_parent = |idx: usize| -> Option<&str> {
			let item = &items[idx];
			if Some(item.id.as_str()) == root_id {
				None
			} else {
				item.parent_id.as_deref()
			}
		};
		let parent_idx = |idx: usize| declared_parent(idx).and_then(|id| index.get(id).copied());
		let is_canonical = |idx: usize| index.get(items[idx].id.as_str()) == Some(&idx);

		find_cycle(items, &is_canonical, &parent_idx)?;

		let root_idx = match root_id {
			Some(root_id) => index.get(root_id).copied(),
			None => (0..items.len()).find(|&idx| is_canonical(idx) && declared_parent(idx).is_none()),
		}
		.ok_or(BuildError::MissingRoot)?;

		let mut children = HashMap::<usize, Vec<usize>>::new();
		for idx in (0..items.len()).filter(|&idx| idx != root_idx && is_canonical(idx)) {
			if let Some(parent) = parent_idx(idx).filter(|&parent| items[parent].is_container) {
				children.entry(parent).or_default().push(idx);
			}
		}

		// Explicit source order first, then the position in the snapshot, names break ties
		for siblings in children.values_mut() {
			siblings.sort_by(|&a, &b| {
				let key = |idx: usize| {
					items[idx]
						.order
						.unwrap_or_else(|| i64::try_from(idx).unwrap_or(i64::MAX))
				};
				key(a)
					.cmp(&key(b))
					.then_with(|| items[a].name.cmp(&items[b].name))
					.then_with(|| a.cmp(&b))
			});
		}

		let snapshot = Snapshot {
			items,
			decoded: items
				.iter()
				.map(|item| {
					if item.is_container {
						self.decoder.decode_folder(&item.name)
					} else {
						self.decoder.decode(&item.name)
					}
				})
				.collect(),
			children,
		};

		let placements = self.place(&snapshot, root_idx);
		let mut placed = vec![false; items.len()];
		for &(idx, _) in &placements {
			placed[idx] = true;
		}
		let root = self
			.assemble(&snapshot, placements)
			.ok_or(BuildError::MissingRoot)?;

		let mut orphans = Vec::new();
		for idx in 0..items.len() {
			let reason = if !is_canonical(idx) {
				OrphanReason::DuplicateId
			} else if placed[idx] {
				continue;
			} else {
				match declared_parent(idx) {
					None => OrphanReason::ExtraRoot,
					Some(parent_id) => match index.get(parent_id) {
						None => OrphanReason::MissingParent,
						Some(&parent) if !items[parent].is_container => OrphanReason::FileParent,
						Some(_) => OrphanReason::DetachedAncestor,
					},
				}
			};

			let item = &items[idx];
			warn!(
				id = %item.id,
				parent_id = ?item.parent_id,
				%reason,
				"Item left out of the hierarchy"
			);

			orphans.push(Orphan {
				id: item.id.clone(),
				name: item.name.clone(),
				parent_id: item.parent_id.clone(),
				reason,
			});
		}

		let hierarchy = Hierarchy::new(root);

		debug!(
			nodes = hierarchy.len(),
			orphans = orphans.len(),
			root = %hierarchy.root().id(),
			"Built hierarchy"
		);

		Ok(BuildOutput { hierarchy, orphans })
	}

	/// Decide where every reachable item goes, top down from the root. Items come back in
	/// pre-order, so each parent is listed before its children.
	fn place(&self, snapshot: &Snapshot<'_>, root_idx: usize) -> Vec<(usize, Placement)> {
		let mut placed = Vec::new();
		let mut stack = vec![(
			root_idx,
			Placement {
				parent: None,
				depth: 0,
				order: 0,
				display_name: snapshot.decoded[root_idx].base_name.clone(),
			},
		)];

		while let Some((idx, placement)) = stack.pop() {
			let siblings = snapshot.siblings(idx);
			let names = self.sibling_display_names(
				siblings
					.iter()
					.map(|&child| &snapshot.decoded[child])
					.map(|decoded| (decoded.base_name.as_str(), decoded.extension.as_deref())),
			);

			let depth = placement.depth.saturating_add(1);
			let children = siblings
				.iter()
				.zip(names)
				.enumerate()
				.map(|(position, (&child, display_name))| {
					(
						child,
						Placement {
							parent: Some(idx),
							depth,
							order: u32::try_from(position).unwrap_or(u32::MAX),
							display_name,
						},
					)
				})
				.collect::<Vec<_>>();

			placed.push((idx, placement));
			stack.extend(children.into_iter().rev());
		}

		placed
	}

	/// Turn placed items into nodes bottom up, every child is finished before its parent
	fn assemble(
		&self,
		snapshot: &Snapshot<'_>,
		placed: Vec<(usize, Placement)>,
	) -> Option<HierarchyNode> {
		let mut built: Vec<Option<HierarchyNode>> = vec![None; snapshot.items.len()];
		let mut root = None;

		for (idx, placement) in placed.into_iter().rev() {
			let item = &snapshot.items[idx];
			let decoded = &snapshot.decoded[idx];

			let node = if item.is_container {
				let children = snapshot
					.siblings(idx)
					.iter()
					.filter_map(|&child| built[child].take())
					.collect();
				HierarchyNode::folder(&item.id, placement.display_name, children)
			} else {
				HierarchyNode::file(&item.id, placement.display_name)
			};

			let node = node
				.with_original_name(&item.name)
				.with_depth(placement.depth)
				.with_order(placement.order)
				.with_tags(content_type_tags(
					self.decoder.registry(),
					decoded,
					item.is_container,
				))
				.with_links(item.links.clone())
				.with_codes(decoded.codes.clone());

			match placement.parent {
				Some(parent) => built[idx] = Some(node.with_parent(&snapshot.items[parent].id)),
				None => root = Some(node),
			}
		}

		root
	}

	/// Display names for a run of siblings, numbering repeats before the extension
	fn sibling_display_names<'a>(
		&self,
		names: impl Iterator<Item = (&'a str, Option<&'a str>)>,
	) -> Vec<String> {
		let mut used = HashSet::new();

		names
			.map(|(name, extension)| {
				if !self.options.disambiguate_names || name.trim().is_empty() {
					return name.to_string();
				}

				let split = extension.and_then(|extension| {
					name.strip_suffix(extension)
						.and_then(|stem| stem.strip_suffix('.'))
						.filter(|stem| !stem.is_empty())
						.map(|stem| (stem, extension))
				});

				let mut candidate = name.to_string();
				let mut count = 1;
				while used.contains(&candidate) {
					count += 1;
					candidate = match split {
						Some((stem, extension)) => format!("{stem} ({count}).{extension}"),
						None => format!("{name} ({count})"),
					};
				}
				used.insert(candidate.clone());

				candidate
			})
			.collect()
	}
}

/// Follow every item's parent chain looking for an id met twice on the same chain.
fn find_cycle(
	items: &[RawItem],
	is_canonical: impl Fn(usize) -> bool,
	parent_idx: impl Fn(usize) -> Option<usize>,
) -> Result<(), BuildError> {
	#[derive(Clone, Copy, PartialEq, Eq)]
	enum Mark {
		Unvisited,
		OnChain,
		Done,
	}

	let mut marks = vec![Mark::Unvisited; items.len()];
	let mut chain = Vec::new();

	for start in (0..items.len()).filter(|&idx| is_canonical(idx)) {
		let mut current = Some(start);

		while let Some(idx) = current {
			match marks[idx] {
				Mark::Done => break,
				Mark::OnChain => {
					return Err(BuildError::Cycle {
						node_id: items[idx].id.clone(),
					})
				}
				Mark::Unvisited => {
					marks[idx] = Mark::OnChain;
					chain.push(idx);
					current = parent_idx(idx);
				}
			}
		}

		for idx in chain.drain(..) {
			marks[idx] = Mark::Done;
		}
	}

	Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;

	use dh_codes::{CodeRegistry, DecoderPolicy};
	use pretty_assertions::assert_eq;

	use crate::{item::TransformedLinks, view::ContentTree};

	fn build_with(
		items: &[RawItem],
		options: BuildOptions,
	) -> Result<BuildOutput, BuildError> {
		let registry = CodeRegistry::builtin();
		let decoder = NameDecoder::new(&registry, DecoderPolicy::default()).unwrap();
		HierarchyBuilder::new(decoder, options).build(items)
	}

	fn build(items: &[RawItem]) -> Result<BuildOutput, BuildError> {
		build_with(items, BuildOptions::default())
	}

	fn child_names(output: &BuildOutput, id: &str) -> Vec<String> {
		output
			.hierarchy
			.children(id)
			.unwrap()
			.iter()
			.map(|node| node.display_name().to_string())
			.collect()
	}

	#[test]
	fn builds_the_campaign_example() {
		let output = build(&[
			RawItem::folder("root", "Campaign"),
			RawItem::file("f1", "0080 Poster ES").with_parent("root"),
		])
		.unwrap();

		let root = output.hierarchy.root();
		assert!(root.is_folder());
		assert_eq!(root.depth(), 0);
		assert_eq!(root.display_name(), "Campaign");
		assert_eq!(root.children().len(), 1);

		let file = &root.children()[0];
		assert!(file.is_file());
		assert_eq!(file.display_name(), "Poster ES");
		assert_eq!(file.original_name(), "0080 Poster ES");
		assert_eq!(file.parent_id(), Some("root"));
		assert_eq!(file.depth(), 1);
		assert_eq!(file.order(), 0);
		assert!(file.has_tag("Alup80"));
		assert!(output.orphans.is_empty());
	}

	#[test]
	fn siblings_follow_source_order_then_name() {
		let output = build(&[
			RawItem::folder("root", "Campaign"),
			RawItem::file("c", "Card.pdf").with_parent("root").with_order(2),
			RawItem::file("b", "Banner.png").with_parent("root").with_order(1),
			RawItem::file("a", "Alpha.png").with_parent("root").with_order(1),
		])
		.unwrap();

		assert_eq!(
			child_names(&output, "root"),
			vec!["Alpha.png", "Banner.png", "Card.pdf"]
		);

		let orders = output
			.hierarchy
			.root()
			.children()
			.iter()
			.map(HierarchyNode::order)
			.collect::<Vec<_>>();
		assert_eq!(orders, vec![0, 1, 2]);
	}

	#[test]
	fn insertion_order_without_explicit_order() {
		let output = build(&[
			RawItem::file("z", "Zeta.pdf").with_parent("root"),
			RawItem::folder("root", "Campaign"),
			RawItem::file("y", "Alpha.pdf").with_parent("root"),
		])
		.unwrap();

		assert_eq!(child_names(&output, "root"), vec!["Zeta.pdf", "Alpha.pdf"]);
	}

	#[test]
	fn rejects_parent_cycles() {
		let err = build(&[
			RawItem::folder("A", "First").with_parent("B"),
			RawItem::folder("B", "Second").with_parent("A"),
		])
		.unwrap_err();

		assert!(matches!(err, BuildError::Cycle { node_id } if node_id == "A"));
	}

	#[test]
	fn rejects_cycles_away_from_the_root() {
		let err = build(&[
			RawItem::folder("root", "Campaign"),
			RawItem::folder("x", "X").with_parent("z"),
			RawItem::folder("y", "Y").with_parent("x"),
			RawItem::folder("z", "Z").with_parent("y"),
		])
		.unwrap_err();

		assert!(matches!(err, BuildError::Cycle { node_id } if node_id == "x"));

		let err = build(&[
			RawItem::folder("root", "Campaign"),
			RawItem::folder("self", "Self").with_parent("self"),
		])
		.unwrap_err();

		assert!(matches!(err, BuildError::Cycle { node_id } if node_id == "self"));
	}

	#[test]
	fn reports_orphans() {
		let output = build(&[
			RawItem::folder("root", "Campaign"),
			RawItem::file("lost", "Lost.pdf").with_parent("ghost"),
			RawItem::folder("detached", "Detached").with_parent("ghost"),
			RawItem::file("inner", "Inner.pdf").with_parent("detached"),
			RawItem::file("kept", "Kept.pdf").with_parent("root"),
		])
		.unwrap();

		assert_eq!(output.hierarchy.len(), 2);
		assert!(!output.hierarchy.contains("lost"));
		assert_eq!(output.orphan_ids(), vec!["lost", "detached", "inner"]);
		assert_eq!(
			output.orphans.iter().map(|o| o.reason).collect::<Vec<_>>(),
			vec![
				OrphanReason::MissingParent,
				OrphanReason::MissingParent,
				OrphanReason::DetachedAncestor
			]
		);
	}

	#[test]
	fn reports_extra_roots_file_parents_and_duplicates() {
		let output = build(&[
			RawItem::folder("root", "Campaign"),
			RawItem::folder("other", "Other root"),
			RawItem::file("file", "Poster.pdf").with_parent("root"),
			RawItem::file("under-file", "Nested.pdf").with_parent("file"),
			RawItem::file("file", "Again.pdf").with_parent("root"),
		])
		.unwrap();

		assert_eq!(
			output.orphans,
			vec![
				Orphan {
					id: "other".to_string(),
					name: "Other root".to_string(),
					parent_id: None,
					reason: OrphanReason::ExtraRoot,
				},
				Orphan {
					id: "under-file".to_string(),
					name: "Nested.pdf".to_string(),
					parent_id: Some("file".to_string()),
					reason: OrphanReason::FileParent,
				},
				Orphan {
					id: "file".to_string(),
					name: "Again.pdf".to_string(),
					parent_id: Some("root".to_string()),
					reason: OrphanReason::DuplicateId,
				},
			]
		);
		assert_eq!(
			output.hierarchy.node("file").unwrap().display_name(),
			"Poster.pdf"
		);
	}

	#[test]
	fn explicit_root_ignores_its_parent() {
		let output = build_with(
			&[
				RawItem::folder("shared", "0130 Banners").with_parent("outside"),
				RawItem::file("b1", "Hero 02.png").with_parent("shared"),
			],
			BuildOptions {
				root_id: Some("shared".to_string()),
				..Default::default()
			},
		)
		.unwrap();

		let root = output.hierarchy.root();
		assert_eq!(root.id(), "shared");
		assert_eq!(root.parent_id(), None);
		assert_eq!(root.display_name(), "Banners");
		assert!(root.has_tag("banner"));
		assert_eq!(
			output.hierarchy.node("b1").unwrap().display_name(),
			"Hero.png"
		);
		assert!(output.orphans.is_empty());
	}

	#[test]
	fn missing_or_unknown_roots_fail() {
		assert!(matches!(build(&[]), Err(BuildError::MissingRoot)));
		assert!(matches!(
			build(&[RawItem::file("f", "Poster.pdf").with_parent("ghost")]),
			Err(BuildError::MissingRoot)
		));
		assert!(matches!(
			build_with(
				&[RawItem::folder("root", "Campaign")],
				BuildOptions {
					root_id: Some("nope".to_string()),
					..Default::default()
				},
			),
			Err(BuildError::UnknownRoot { root_id }) if root_id == "nope"
		));
	}

	#[test]
	fn disambiguates_sibling_names() {
		let items = [
			RawItem::folder("root", "Campaign"),
			RawItem::file("a", "0010 Poster.pdf").with_parent("root"),
			RawItem::file("b", "0080 Poster.pdf").with_parent("root"),
			RawItem::file("c", "Poster.pdf").with_parent("root"),
			RawItem::file("d", "0010").with_parent("root"),
			RawItem::file("e", "0080").with_parent("root"),
		];

		let output = build(&items).unwrap();
		assert_eq!(
			child_names(&output, "root"),
			vec!["Poster.pdf", "Poster (2).pdf", "Poster (3).pdf", "", ""]
		);

		let output = build_with(
			&items,
			BuildOptions {
				disambiguate_names: false,
				..Default::default()
			},
		)
		.unwrap();
		assert_eq!(
			child_names(&output, "root"),
			vec!["Poster.pdf", "Poster.pdf", "Poster.pdf", "", ""]
		);
	}

	#[test]
	fn numbers_folders_and_extensionless_files_at_the_end() {
		let output = build(&[
			RawItem::folder("root", "Campaign"),
			RawItem::folder("a", "0010 Print").with_parent("root"),
			RawItem::folder("b", "Print").with_parent("root"),
			RawItem::folder("c", "Print.v2").with_parent("root"),
			RawItem::folder("d", "0080 Print.v2").with_parent("root"),
			RawItem::file("e", "README").with_parent("root"),
			RawItem::file("f", "0040 README").with_parent("root"),
		])
		.unwrap();

		assert_eq!(
			child_names(&output, "root"),
			vec!["Print", "Print (2)", "Print.v2", "Print.v2 (2)", "README", "README (2)"]
		);
	}

	#[test]
	fn builds_chains_thousands_of_levels_deep() {
		const DEPTH: usize = 20_000;

		let mut items = vec![RawItem::folder("f0", "Level 0")];
		items.extend((1..DEPTH).map(|level| {
			RawItem::folder(format!("f{level}"), "0010 Level").with_parent(format!("f{}", level - 1))
		}));
		items.push(RawItem::file("leaf", "0080 Poster ES.pdf").with_parent(format!("f{}", DEPTH - 1)));

		let output = build(&items).unwrap();
		assert!(output.orphans.is_empty());
		assert_eq!(output.hierarchy.len(), DEPTH + 1);

		let leaf = output.hierarchy.node("leaf").unwrap();
		assert_eq!(leaf.depth(), u32::try_from(DEPTH).unwrap());
		assert_eq!(leaf.display_name(), "Poster ES.pdf");
		assert_eq!(output.hierarchy.path("leaf").unwrap().len(), DEPTH + 1);
		assert!(crate::validator::validate(output.hierarchy.root()).is_empty());
	}

	#[test]
	fn carries_links_and_codes() {
		let links = TransformedLinks {
			preview: Some("https://drive.example/file/d/f1/preview".to_string()),
			download: Some("https://drive.example/uc?id=f1".to_string()),
			embed: None,
		};

		let output = build(&[
			RawItem::folder("root", "Campaign"),
			RawItem::file("f1", "0120 Launch story 05.mp4")
				.with_parent("root")
				.with_links(links.clone()),
		])
		.unwrap();

		let node = output.hierarchy.node("f1").unwrap();
		assert_eq!(node.transformed_links(), Some(&links));
		assert_eq!(node.display_name(), "Launch story.mp4");
		assert_eq!(
			node.codes().iter().map(|c| c.code.as_str()).collect::<Vec<_>>(),
			vec!["0120", "05"]
		);
		// the content type code wins over the extension
		assert!(node.has_tag("story"));
		assert!(!node.has_tag("video"));
	}

	#[test]
	fn children_of_files_never_attach() {
		let output = build(&[
			RawItem::folder("root", "Campaign"),
			RawItem::file("f", "Poster.pdf").with_parent("root"),
			RawItem::folder("g", "Nested").with_parent("f"),
		])
		.unwrap();

		assert!(output.hierarchy.node("f").unwrap().children().is_empty());
		assert_eq!(output.orphans[0].reason, OrphanReason::FileParent);
	}
}

use serde::{Deserialize, Serialize};

/// Links computed by the link transform step for a Drive item. They are carried through the build
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedLinks {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub preview: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub download: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub embed: Option<String>,
}

/// One entry of a Drive listing snapshot, as handed over by the listing client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub parent_id: Option<String>,
	pub is_container: bool,
	/// Explicit position among siblings, when the source keeps one
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub order: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<TransformedLinks>,
}

impl RawItem {
	pub fn folder(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self::new(id, name, true)
	}

	pub fn file(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self::new(id, name, false)
	}

	fn new(id: impl Into<String>, name: impl Into<String>, is_container: bool) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			parent_id: None,
			is_container,
			order: None,
			links: None,
		}
	}

	#[must_use]
	pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
		self.parent_id = Some(parent_id.into());
		self
	}

	#[must_use]
	pub fn with_order(mut self, order: i64) -> Self {
		self.order = Some(order);
		self
	}

	#[must_use]
	pub fn with_links(mut self, links: TransformedLinks) -> Self {
		self.links = Some(links);
		self
	}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_listing_entries() {
		let items: Vec<RawItem> = serde_json::from_str(
			r#"[
				{ "id": "root", "name": "Campaign", "parentId": null, "isContainer": true },
				{
					"id": "f1",
					"name": "0080 Poster ES",
					"parentId": "root",
					"isContainer": false,
					"order": 3,
					"links": { "preview": "https://drive.example/f1/preview" }
				}
			]"#,
		)
		.unwrap();

		assert_eq!(items[0], RawItem::folder("root", "Campaign"));
		assert_eq!(
			items[1],
			RawItem::file("f1", "0080 Poster ES")
				.with_parent("root")
				.with_order(3)
				.with_links(TransformedLinks {
					preview: Some("https://drive.example/f1/preview".to_string()),
					..Default::default()
				})
		);
	}
}

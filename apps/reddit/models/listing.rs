use serde::Deserialize;

pub const LINK_KIND: &str = "t3";

#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
pub struct ListingData<T> {
    pub after: Option<String>,
    #[serde(default = "Vec::new")]
    pub children: Vec<Thing<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    pub kind: String,
    pub data: T,
}

impl<T> Listing<T> {
    /// Consumes the listing, keeping only link (`t3`) children.
    pub fn into_links(self) -> (Vec<T>, Option<String>) {
        let items = self
            .data
            .children
            .into_iter()
            .filter(|thing| thing.kind == LINK_KIND)
            .map(|thing| thing.data)
            .collect();
        (items, self.data.after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::posts::Submission;

    #[test]
    fn skips_non_link_children() {
        let body = r#"{
            "kind": "Listing",
            "data": {
                "after": "t3_abc",
                "children": [
                    {"kind": "t3", "data": {"title": "first", "permalink": "/r/rust/comments/1/first/"}},
                    {"kind": "t1", "data": {"body": "a comment"}},
                    {"kind": "t3", "data": {"title": "second"}}
                ]
            }
        }"#;

        let listing: Listing<Submission> = serde_json::from_str(body).unwrap();
        let (links, after) = listing.into_links();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].title.as_deref(), Some("first"));
        assert_eq!(links[1].title.as_deref(), Some("second"));
        assert_eq!(after.as_deref(), Some("t3_abc"));
    }

    #[test]
    fn missing_children_is_an_empty_page() {
        let listing: Listing<Submission> =
            serde_json::from_str(r#"{"kind": "Listing", "data": {"after": null}}"#).unwrap();
        let (links, after) = listing.into_links();
        assert!(links.is_empty());
        assert!(after.is_none());
    }
}

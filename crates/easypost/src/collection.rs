//! Paged list results and cursor handling.
//!
//! List endpoints return one page at a time. A [`Collection`] keeps the page
//! together with the filters that produced it, so [`Paginate::get_next_page`]
//! can replay the same filters with only the cursor moved forward. Iteration
//! is driven by the caller:
//!
//! ```rust,ignore
//! let trackers = client.trackers();
//! let mut page = trackers.all(TrackerListParams { page_size: Some(50), ..Default::default() }).await?;
//! let mut seen = page.items.clone();
//! while page.has_more {
//!     page = trackers.get_next_page(&page).await?;
//!     seen.extend(page.items.iter().cloned());
//! }
//! ```
//!
//! Asking for the next page of an exhausted collection is not an error: it
//! returns an empty collection with `has_more == false` and sends nothing.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::EasyPostError;

/// Largest page the API will return.
pub const MAX_PAGE_SIZE: u32 = 100;

/// An API resource with a server-assigned id.
pub trait Resource {
    /// Server-assigned identifier (e.g. `shp_...`, `trk_...`).
    fn id(&self) -> &str;
}

/// Filters accepted by a list endpoint.
pub trait ListParams: Serialize + Clone + Send + Sync {
    /// Requested page size, if any.
    fn page_size(&self) -> Option<u32>;

    /// Move the cursor so the next request starts after `id`.
    fn set_before_id(&mut self, id: String);

    /// Check the filters before they are sent.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `page_size` is outside `1..=100`.
    fn validate(&self) -> Result<(), EasyPostError> {
        match self.page_size() {
            Some(size) if size == 0 || size > MAX_PAGE_SIZE => Err(EasyPostError::Validation(
                format!("page_size must be between 1 and {MAX_PAGE_SIZE}, got {size}"),
            )),
            _ => Ok(()),
        }
    }
}

/// One page of list results plus the state needed to fetch the next one.
#[derive(Debug, Clone, Serialize)]
pub struct Collection<T, P> {
    /// Items on this page, newest first.
    pub items: Vec<T>,
    /// Whether the API reported more items past this page.
    pub has_more: bool,
    /// Filters that produced this page.
    pub params: P,
}

impl<T, P> Collection<T, P> {
    /// An empty, terminal page.
    pub fn exhausted(params: P) -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
            params,
        }
    }

    /// Whether no further pages can be fetched.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        !self.has_more || self.items.is_empty()
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Resource, P: ListParams> Collection<T, P> {
    /// Filters for the page after this one, or `None` when exhausted.
    #[must_use]
    pub fn next_params(&self) -> Option<P> {
        if self.is_exhausted() {
            return None;
        }
        let last = self.items.last()?;
        let mut params = self.params.clone();
        params.set_before_id(last.id().to_string());
        Some(params)
    }
}

impl<T: DeserializeOwned, P> Collection<T, P> {
    /// Decode a list response whose items live under `key`.
    pub(crate) fn from_response(mut body: Value, key: &str, params: P) -> Result<Self, EasyPostError> {
        let items = body
            .get_mut(key)
            .map(Value::take)
            .ok_or_else(|| {
                EasyPostError::UnexpectedResponse(format!("list response has no `{key}` field"))
            })?;
        let items: Vec<T> = serde_json::from_value(items)?;
        let has_more = body
            .get("has_more")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(Self {
            items,
            has_more,
            params,
        })
    }
}

impl<T, P> IntoIterator for Collection<T, P> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'c, T, P> IntoIterator for &'c Collection<T, P> {
    type Item = &'c T;
    type IntoIter = std::slice::Iter<'c, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A service whose list endpoint is cursor-paginated.
#[async_trait]
pub trait Paginate: Sync {
    /// Resource type on each page.
    type Item: Resource + DeserializeOwned + Send + Sync;
    /// Filters accepted by the list endpoint.
    type Params: ListParams;

    /// Fetch one page of resources matching `params`.
    async fn all(
        &self,
        params: Self::Params,
    ) -> Result<Collection<Self::Item, Self::Params>, EasyPostError>;

    /// Fetch the page after `collection`, reusing its filters.
    ///
    /// Returns an empty terminal collection, without a request, when
    /// `collection` is already exhausted.
    async fn get_next_page(
        &self,
        collection: &Collection<Self::Item, Self::Params>,
    ) -> Result<Collection<Self::Item, Self::Params>, EasyPostError> {
        match collection.next_params() {
            Some(params) => self.all(params).await,
            None => Ok(Collection::exhausted(collection.params.clone())),
        }
    }

    /// Fetch up to `max_pages` pages starting from `params`, following the
    /// cursor, and return their items in order.
    ///
    /// Stops early once a page is exhausted. `max_pages == 0` sends nothing.
    async fn collect_pages(
        &self,
        params: Self::Params,
        max_pages: usize,
    ) -> Result<Vec<Self::Item>, EasyPostError> {
        let mut items = Vec::new();
        if max_pages == 0 {
            return Ok(items);
        }

        let mut page = self.all(params).await?;
        for _ in 1..max_pages {
            if page.is_exhausted() {
                break;
            }
            let next = self.get_next_page(&page).await?;
            items.append(&mut page.items);
            page = next;
        }
        items.append(&mut page.items);
        Ok(items)
    }
}

/// Implement [`ListParams`] for a struct with `page_size` and `before_id` fields.
macro_rules! impl_list_params {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::collection::ListParams for $ty {
                fn page_size(&self) -> Option<u32> {
                    self.page_size
                }

                fn set_before_id(&mut self, id: String) {
                    self.before_id = Some(id);
                }
            }
        )+
    };
}

/// Implement [`Resource`] for models with an `id: String` field.
macro_rules! impl_resource {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::collection::Resource for $ty {
                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

pub(crate) use impl_list_params;
pub(crate) use impl_resource;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, Deserialize)]
    struct Item {
        id: String,
    }

    impl_resource!(Item);

    #[derive(Debug, Clone, Default, Serialize)]
    struct Params {
        #[serde(skip_serializing_if = "Option::is_none")]
        page_size: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        before_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        carrier: Option<String>,
    }

    impl_list_params!(Params);

    fn page(ids: &[&str], has_more: bool) -> Collection<Item, Params> {
        Collection {
            items: ids.iter().map(|id| Item { id: (*id).to_string() }).collect(),
            has_more,
            params: Params {
                page_size: Some(2),
                carrier: Some("USPS".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_next_params_advances_cursor_only() {
        let params = page(&["trk_3", "trk_2"], true).next_params().unwrap();
        assert_eq!(params.before_id.as_deref(), Some("trk_2"));
        assert_eq!(params.page_size, Some(2));
        assert_eq!(params.carrier.as_deref(), Some("USPS"));
    }

    #[test]
    fn test_no_next_params_when_exhausted() {
        assert!(page(&["trk_1"], false).next_params().is_none());
        assert!(page(&[], true).next_params().is_none());
        assert!(Collection::<Item, Params>::exhausted(Params::default()).is_exhausted());
    }

    #[test]
    fn test_validate_page_size() {
        let mut params = Params::default();
        assert!(params.validate().is_ok());
        params.page_size = Some(100);
        assert!(params.validate().is_ok());
        params.page_size = Some(0);
        assert!(params.validate().is_err());
        params.page_size = Some(101);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_from_response() {
        let body = json!({
            "trackers": [{"id": "trk_1"}, {"id": "trk_2"}],
            "has_more": true
        });
        let collection: Collection<Item, Params> =
            Collection::from_response(body, "trackers", Params::default()).unwrap();
        assert_eq!(collection.len(), 2);
        assert!(collection.has_more);

        let missing = Collection::<Item, Params>::from_response(json!({}), "trackers", Params::default());
        assert!(matches!(missing, Err(EasyPostError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_has_more_defaults_to_false() {
        let collection: Collection<Item, Params> =
            Collection::from_response(json!({"trackers": []}), "trackers", Params::default())
                .unwrap();
        assert!(!collection.has_more);
        assert!(collection.is_empty());
    }
}

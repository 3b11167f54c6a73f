//! Hypermedia Links
//!
//! HAL-style `_links` for single resources and `_embedded` + `page` for
//! paged listings.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

use serde::Serialize;

use crate::application::dto::{
    CertificateItem, CertificateResponse, TagResponse, UserOrderItem, UserOrderResponse,
    UserResponse,
};
use crate::domain::Page;

/// A single hypermedia link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

/// Links keyed by relation name
pub type Links = BTreeMap<&'static str, Link>;

/// A resource with its links
#[derive(Debug, Clone, Serialize)]
pub struct EntityModel<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(rename = "_links")]
    pub links: Links,
}

/// Page metadata of a paged listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: u32,
    pub number: u32,
}

/// A page of resources with navigation links
#[derive(Debug, Clone, Serialize)]
pub struct PagedModel<T> {
    #[serde(rename = "_embedded")]
    pub embedded: BTreeMap<&'static str, Vec<EntityModel<T>>>,
    #[serde(rename = "_links")]
    pub links: Links,
    pub page: PageMetadata,
}

/// Builds absolute or relative links under a configured base URL.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_url: Arc<str>,
}

impl LinkBuilder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn link(&self, path: &str) -> Link {
        Link {
            href: format!("{}{}", self.base_url, path),
        }
    }

    fn page_link(&self, path: &str, query: &[(&str, String)], number: u32, size: u32) -> Link {
        let mut href = format!("{}{}?", self.base_url, path);
        for (key, value) in query {
            let _ = write!(href, "{}={}&", key, urlencoding::encode(value));
        }
        let _ = write!(href, "page={}&size={}", number, size);
        Link { href }
    }

    /// Wrap a page of items with `self`, `first`, `prev`, `next` and `last` links.
    ///
    /// `query` holds extra parameters (filters) repeated on every navigation link.
    pub fn paged<T, U, F>(
        &self,
        page: Page<T>,
        rel: &'static str,
        path: &str,
        query: &[(&str, String)],
        mut to_model: F,
    ) -> PagedModel<U>
    where
        F: FnMut(&Self, T) -> EntityModel<U>,
    {
        let total_pages = page.total_pages();
        let last = total_pages.max(1);

        let mut links = Links::new();
        links.insert("self", self.page_link(path, query, page.number, page.size));
        links.insert("first", self.page_link(path, query, 1, page.size));
        if page.has_previous() {
            let previous = page.number.saturating_sub(1).min(last);
            links.insert("prev", self.page_link(path, query, previous, page.size));
        }
        if page.has_next() {
            links.insert("next", self.page_link(path, query, page.number + 1, page.size));
        }
        links.insert("last", self.page_link(path, query, last, page.size));

        let metadata = PageMetadata {
            size: page.size,
            total_elements: page.total_elements,
            total_pages,
            number: page.number,
        };

        let items = page.items.into_iter().map(|item| to_model(self, item)).collect();
        let mut embedded = BTreeMap::new();
        embedded.insert(rel, items);

        PagedModel {
            embedded,
            links,
            page: metadata,
        }
    }

    fn tag_links(&self, id: i64) -> Links {
        let mut links = Links::new();
        links.insert("self", self.link(&format!("/tags/{}", id)));
        links.insert("delete", self.link(&format!("/tags/{}", id)));
        links.insert(
            "certificatesAssignedToTag",
            self.link(&format!("/tags/{}/certificates", id)),
        );
        links.insert("allTags", self.link("/tags"));
        links
    }

    fn certificate_links(&self, id: i64) -> Links {
        let href = format!("/certificates/{}", id);
        let mut links = Links::new();
        links.insert("self", self.link(&href));
        links.insert("update", self.link(&href));
        links.insert("delete", self.link(&href));
        links.insert("tags", self.link(&format!("{}/tags", href)));
        links.insert("orders", self.link(&format!("{}/orders", href)));
        links.insert("allCertificates", self.link("/certificates"));
        links
    }

    fn order_links(&self, id: i64, user_id: i64, certificate_id: i64) -> Links {
        let mut links = Links::new();
        links.insert("self", self.link(&format!("/orders/{}", id)));
        links.insert("user", self.link(&format!("/users/{}", user_id)));
        links.insert(
            "certificate",
            self.link(&format!("/certificates/{}", certificate_id)),
        );
        links.insert("userOrders", self.link(&format!("/users/{}/orders", user_id)));
        links
    }

    fn user_links(&self, id: i64) -> Links {
        let mut links = Links::new();
        links.insert("self", self.link(&format!("/users/{}", id)));
        links.insert("orders", self.link(&format!("/users/{}/orders", id)));
        links
    }

    pub fn tag(&self, tag: TagResponse) -> EntityModel<TagResponse> {
        EntityModel {
            links: self.tag_links(tag.id),
            content: tag,
        }
    }

    pub fn certificate(&self, certificate: CertificateResponse) -> EntityModel<CertificateResponse> {
        EntityModel {
            links: self.certificate_links(certificate.id),
            content: certificate,
        }
    }

    pub fn certificate_item(&self, certificate: CertificateItem) -> EntityModel<CertificateItem> {
        EntityModel {
            links: self.certificate_links(certificate.id),
            content: certificate,
        }
    }

    pub fn order(&self, order: UserOrderResponse) -> EntityModel<UserOrderResponse> {
        EntityModel {
            links: self.order_links(order.id, order.user_id, order.certificate_id),
            content: order,
        }
    }

    pub fn order_item(&self, order: UserOrderItem) -> EntityModel<UserOrderItem> {
        EntityModel {
            links: self.order_links(order.id, order.user_id, order.certificate_id),
            content: order,
        }
    }

    pub fn user(&self, user: UserResponse) -> EntityModel<UserResponse> {
        EntityModel {
            links: self.user_links(user.id),
            content: user,
        }
    }
}

//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use validator::Validate;

use crate::domain::{PageRequest, PageRequestError, DEFAULT_PAGE_SIZE};
use crate::shared::validation::{not_blank, word_characters};

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,

    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 50, message = "User name must be 3-50 characters long"),
        custom(function = "word_characters")
    )]
    pub name: String,

    #[validate(length(min = 8, max = 64, message = "Password must be 8-64 characters long"))]
    pub password: String,
}

/// Create tag request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(
        required(message = "Tag name is required"),
        length(min = 3, max = 25, message = "Tag name must be 3-25 characters long"),
        custom(function = "word_characters")
    )]
    pub name: Option<String>,
}

impl CreateTagRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Strip surrounding whitespace from the name; run before validation.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|name| name.trim().to_string()),
        }
    }
}

/// Tag reference inside a certificate body. Unknown names are created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Validate)]
pub struct TagRequest {
    #[validate(
        length(min = 3, max = 25, message = "Tag name must be 3-25 characters long"),
        custom(function = "word_characters")
    )]
    pub name: String,
}

impl TagRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Strip surrounding whitespace from the name; run before validation.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

/// Normalize every tag name of a certificate body.
pub fn normalize_tags(tags: Vec<TagRequest>) -> Vec<TagRequest> {
    tags.into_iter().map(TagRequest::normalized).collect()
}

/// Create certificate request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateCertificateRequest {
    #[validate(
        required(message = "Certificate name is required"),
        length(min = 3, max = 50, message = "Certificate name must be 3-50 characters long"),
        custom(function = "word_characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Certificate description is required"),
        length(
            min = 10,
            max = 3000,
            message = "Certificate description must be 10-3000 characters long"
        ),
        custom(function = "word_characters")
    )]
    pub description: Option<String>,

    #[validate(
        required(message = "Certificate price is required"),
        range(min = 1, message = "Certificate price must be a positive number")
    )]
    pub price: Option<i32>,

    /// Validity period in days
    #[validate(
        required(message = "Certificate duration is required"),
        range(min = 1, message = "Certificate duration must be a positive number")
    )]
    pub duration: Option<i32>,

    #[serde(default)]
    #[validate(nested)]
    pub tags: Vec<TagRequest>,
}

/// Full replacement of a certificate. Same rules as creation.
pub type UpdateCertificateRequest = CreateCertificateRequest;

/// Partial certificate update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PatchCertificateRequest {
    #[validate(
        length(min = 3, max = 50, message = "Certificate name must be 3-50 characters long"),
        custom(function = "word_characters")
    )]
    pub name: Option<String>,

    #[validate(
        length(
            min = 10,
            max = 3000,
            message = "Certificate description must be 10-3000 characters long"
        ),
        custom(function = "word_characters")
    )]
    pub description: Option<String>,

    #[validate(range(min = 1, message = "Certificate price must be a positive number"))]
    pub price: Option<i32>,

    #[validate(range(min = 1, message = "Certificate duration must be a positive number"))]
    pub duration: Option<i32>,

    /// `None` keeps the tag set, `Some(vec![])` clears it.
    #[validate(nested)]
    pub tags: Option<Vec<TagRequest>>,
}

/// Order placement, built from the caller's identity and the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateUserOrderRequest {
    pub user_id: i64,
    pub certificate_id: i64,
}

impl CreateUserOrderRequest {
    pub fn new(user_id: i64, certificate_id: i64) -> Self {
        Self {
            user_id,
            certificate_id,
        }
    }
}

/// Pagination query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PageParams {
    /// Page 1 and the default size apply to absent parameters.
    pub fn page_request(&self) -> Result<PageRequest, PageRequestError> {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.size.unwrap_or(i64::from(DEFAULT_PAGE_SIZE)),
        )
    }
}

/// Certificate listing query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CertificateQueryParams {
    /// Comma-separated tag names; all must be present
    pub tags: Option<String>,
    /// Substring of name or description
    pub search: Option<String>,
    /// `field[,asc|desc]`
    pub sort: Option<String>,
}

/// Order placement query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderParams {
    pub certificate_id: i64,
}

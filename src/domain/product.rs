use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::tag::Tag;
use crate::pagination::Pagination;

/// Domain representation of a catalog product, always carrying its category
/// and tag relations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Stored image file name (content hash plus extension).
    pub image: String,
    /// Public URL the image is served from.
    pub url: String,
    /// Identifier of the owning category, if any.
    pub category_id: Option<i32>,
    /// The owning category record, if any.
    pub category: Option<Category>,
    /// Tags attached to the product.
    pub tags: Vec<Tag>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Stored image file name.
    pub image: String,
    /// Public URL the image is served from.
    pub url: String,
    /// Optional identifier of the owning category.
    pub category_id: Option<i32>,
    /// Tags to attach to the product; all must already exist.
    pub tag_ids: Vec<i32>,
}

impl NewProduct {
    /// Build a new product payload around the stored image.
    pub fn new(name: impl Into<String>, image: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            image: image.into(),
            url: url.into(),
            category_id: None,
            tag_ids: Vec::new(),
        }
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a category identifier to the product payload.
    pub fn with_category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Attach tag identifiers to the product payload.
    pub fn with_tag_ids(mut self, tag_ids: Vec<i32>) -> Self {
        self.tag_ids = tag_ids;
        self
    }
}

/// Patch data applied when updating an existing product. Fields left at
/// `None` keep their current values.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional description update.
    pub description: Option<String>,
    /// Optional image replacement: stored file name plus its public URL.
    pub image: Option<(String, String)>,
    /// Optional category update, using `Some(None)` to detach the category.
    pub category_id: Option<Option<i32>>,
    /// Optional replacement of the attached tag set.
    pub tag_ids: Option<Vec<i32>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
            image: None,
            category_id: None,
            tag_ids: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    /// Update the product name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the product description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the stored image file name and its public URL.
    pub fn image(mut self, image: impl Into<String>, url: impl Into<String>) -> Self {
        self.image = Some((image.into(), url.into()));
        self
    }

    /// Update the category, using `None` to detach the current one.
    pub fn category_id(mut self, category_id: Option<i32>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Replace the attached tag set.
    pub fn tag_ids(mut self, tag_ids: Vec<i32>) -> Self {
        self.tag_ids = Some(tag_ids);
        self
    }
}

/// Sortable product columns exposed by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortBy {
    Name,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl ProductSortBy {
    /// Parse the wire name of a sortable column. Unknown values yield `None`
    /// so the caller can fall back to the default.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }
}

/// Sort direction applied to the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse `asc`/`desc` case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

/// Query definition used to filter, sort and paginate products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional case-insensitive substring search applied to product names.
    pub search: Option<String>,
    /// Column the results are ordered by.
    pub sort_by: ProductSortBy,
    /// Direction the results are ordered in.
    pub sort_order: SortOrder,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets all products.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by a search term applied to the product name.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Order the results by `sort_by` in `sort_order` direction.
    pub fn sort(mut self, sort_by: ProductSortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

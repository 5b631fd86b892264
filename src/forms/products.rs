use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use thiserror::Error;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// The product name is missing or empty after sanitization.
    #[error("Name cannot be null")]
    MissingName,
    /// No image file was attached to the form.
    #[error("No file uploaded")]
    MissingFile,
    /// The `categoryId` field is not a number.
    #[error("Invalid category ID")]
    InvalidCategoryId,
    /// The `tagIds` field is not a JSON array of numbers.
    #[error("Invalid tag IDs")]
    InvalidTagIds,
    /// The uploaded file could not be read back from disk.
    #[error("Error reading uploaded file")]
    FileReadError,
}

impl From<std::io::Error> for ProductFormError {
    fn from(_: std::io::Error) -> Self {
        ProductFormError::FileReadError
    }
}

/// Raw bytes of an uploaded image plus the client-supplied file name.
#[derive(Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Validated payload produced from an [`AddProductForm`].
#[derive(Debug)]
pub struct NewProductUpload {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub tag_ids: Vec<i32>,
    pub image: ImageUpload,
}

/// Validated payload produced from an [`EditProductForm`]. Fields left at
/// `None` keep the stored values.
#[derive(Debug)]
pub struct ProductUpdateUpload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub tag_ids: Option<Vec<i32>>,
    pub image: Option<ImageUpload>,
}

#[derive(MultipartForm)]
/// Multipart payload for creating a product together with its image file.
pub struct AddProductForm {
    /// Name entered by the user.
    pub name: Option<Text<String>>,
    /// Optional longer description.
    pub description: Option<Text<String>>,
    /// Optional owning category identifier.
    #[multipart(rename = "categoryId")]
    pub category_id: Option<Text<String>>,
    /// Optional JSON array of tag identifiers, e.g. `[1,2]`.
    #[multipart(rename = "tagIds")]
    pub tag_ids: Option<Text<String>>,
    /// The image file itself.
    #[multipart(limit = "10MB")]
    pub file: Option<TempFile>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a [`NewProductUpload`].
    pub fn into_new_upload(self) -> ProductFormResult<NewProductUpload> {
        let AddProductForm {
            name,
            description,
            category_id,
            tag_ids,
            file,
        } = self;

        let name = name
            .map(|field| sanitize_inline_text(&field.0))
            .filter(|value| !value.is_empty())
            .ok_or(ProductFormError::MissingName)?;

        let file = file.ok_or(ProductFormError::MissingFile)?;
        let image = read_image_upload(file)?;

        let description = description
            .map(|field| sanitize_multiline_text(&field.0))
            .filter(|value| !value.is_empty());

        let category_id = parse_category_id(category_id.map(|field| field.0))?;
        let tag_ids = parse_tag_ids(tag_ids.map(|field| field.0))?.unwrap_or_default();

        Ok(NewProductUpload {
            name,
            description,
            category_id,
            tag_ids,
            image,
        })
    }
}

#[derive(MultipartForm)]
/// Multipart payload for updating a product; every field is optional.
pub struct EditProductForm {
    /// Replacement name; empty values keep the stored one.
    pub name: Option<Text<String>>,
    /// Replacement description; empty values keep the stored one.
    pub description: Option<Text<String>>,
    /// Replacement owning category identifier.
    #[multipart(rename = "categoryId")]
    pub category_id: Option<Text<String>>,
    /// Replacement tag set as a JSON array of identifiers.
    #[multipart(rename = "tagIds")]
    pub tag_ids: Option<Text<String>>,
    /// Optional replacement image file.
    #[multipart(limit = "10MB")]
    pub file: Option<TempFile>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a [`ProductUpdateUpload`].
    pub fn into_update_upload(self) -> ProductFormResult<ProductUpdateUpload> {
        let EditProductForm {
            name,
            description,
            category_id,
            tag_ids,
            file,
        } = self;

        let name = name
            .map(|field| sanitize_inline_text(&field.0))
            .filter(|value| !value.is_empty());

        let description = description
            .map(|field| sanitize_multiline_text(&field.0))
            .filter(|value| !value.is_empty());

        let category_id = parse_category_id(category_id.map(|field| field.0))?;
        let tag_ids = parse_tag_ids(tag_ids.map(|field| field.0))?;

        let image = match file {
            Some(file) => Some(read_image_upload(file)?),
            None => None,
        };

        Ok(ProductUpdateUpload {
            name,
            description,
            category_id,
            tag_ids,
            image,
        })
    }
}

/// JSON body accepted by the bulk delete endpoint. The candidate list may mix
/// numbers and strings; only numeric entries survive [`Self::valid_ids`].
#[derive(Debug, Deserialize)]
pub struct BulkDeleteForm {
    #[serde(default)]
    pub ids: Vec<serde_json::Value>,
}

impl BulkDeleteForm {
    /// Numeric identifiers from the candidate list, non-numeric entries dropped.
    pub fn valid_ids(&self) -> Vec<i32> {
        self.ids
            .iter()
            .filter_map(|value| match value {
                serde_json::Value::Number(num) => {
                    num.as_i64().and_then(|id| i32::try_from(id).ok())
                }
                serde_json::Value::String(raw) => raw.trim().parse::<i32>().ok(),
                _ => None,
            })
            .collect()
    }
}

fn read_image_upload(mut file: TempFile) -> ProductFormResult<ImageUpload> {
    let file_name = file.file_name.clone().unwrap_or_default();

    let mut bytes = Vec::with_capacity(file.size);
    file.file.rewind()?;
    file.file.read_to_end(&mut bytes)?;

    Ok(ImageUpload { file_name, bytes })
}

fn parse_category_id(raw: Option<String>) -> ProductFormResult<Option<i32>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| ProductFormError::InvalidCategoryId)
}

fn parse_tag_ids(raw: Option<String>) -> ProductFormResult<Option<Vec<i32>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let ids: Vec<i32> =
        serde_json::from_str(trimmed).map_err(|_| ProductFormError::InvalidTagIds)?;

    // Duplicate IDs would trip the unique (product, tag) constraint.
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }

    Ok(Some(unique))
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}

pub mod category;
pub mod favorite;
pub mod product;
pub mod product_tag;
pub mod tag;

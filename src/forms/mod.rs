pub mod categories;
pub mod favorites;
pub mod products;
pub mod tags;

pub mod entries;
pub mod export;
pub mod images;
pub mod places;

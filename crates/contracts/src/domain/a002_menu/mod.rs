pub mod aggregate;
pub mod analysis;
pub mod filter;
pub mod nutrition;

pub use aggregate::{Menu, MenuDto, MenuId};
pub use filter::{CalorieBand, DietaryFlag, MenuFilter, MenuSort, ProteinBand};
pub use nutrition::{MicroNutrients, Nutrition};

mod view;

pub use view::FoodExchangePage;

mod view;

pub use view::ImportChainMenusPage;

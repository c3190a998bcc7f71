mod root_selector;

pub use root_selector::RootServerSelector;

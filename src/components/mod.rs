pub mod catalog_list;
pub mod detail;
pub mod help;
pub mod search;
pub mod status_bar;

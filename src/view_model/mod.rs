pub mod manager;
pub mod product_form;
pub mod product_list;
pub mod screen;

pub mod product_service;

#[cfg(test)]
pub(crate) mod testing;

pub mod autosuggest;
pub mod categories;
pub mod direct_search;
pub mod health;
pub mod location;
pub mod quick_search;
pub mod route;
pub mod sdk_asset;

#[cfg(test)]
pub(crate) mod test_support;

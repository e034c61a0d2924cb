pub mod catalog;
pub mod descriptor;
pub mod factory;
pub mod instance;
pub mod intensity;
pub mod manager;
pub mod native;
pub(crate) mod params;

pub mod lifi;
pub mod universal;

pub use {lifi::LifiClient, universal::UniversalAccountClient};

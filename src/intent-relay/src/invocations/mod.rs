pub mod onchain;

pub use onchain::{calldata, selector, OnchainSurface};

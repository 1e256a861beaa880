pub mod ports;
pub mod token_cache;
pub mod use_cases;

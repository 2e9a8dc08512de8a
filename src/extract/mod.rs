// src/extract/mod.rs
pub mod company;
pub mod title;

pub use company::extract_company;
pub use title::extract_title;

//! Learnify marketplace library: domain rules and startup data loading.

pub mod domain;
pub mod example_data;

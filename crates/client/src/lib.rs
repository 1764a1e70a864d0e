//! Client code for the kagi CLI.
//!
//! This crate provides the Kagi FastGPT HTTP client and the [`Answerer`]
//! seam the CLI calls through.

pub mod fastgpt;

pub use fastgpt::{
    Answerer, FastGptClient, FastGptConfig, FastGptError, FastGptRequest, FastGptResponse, ResponseMeta,
};

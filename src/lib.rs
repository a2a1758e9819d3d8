//! locale-html
//!
//! HTML テンプレートを JSON 辞書または TMX 翻訳メモリから
//! ロケールごとの静的ページへレンダリングする

pub mod cli;
pub mod config;
pub mod input;
pub mod ir;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod syntax;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use pipeline::{
    Pipeline,
    PipelineError,
    RunReport,
};

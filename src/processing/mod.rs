//! Text processing and analysis module

pub mod analyzer;
pub mod batch;
pub mod document;
pub mod frequency;
pub mod segmenter;
pub mod split;
pub mod text_processor;
pub mod topics;

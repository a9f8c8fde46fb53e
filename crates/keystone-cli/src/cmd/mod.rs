pub mod completions;
pub mod data;
pub mod export;
pub mod rank;
pub mod show;
pub mod stats;
pub mod top;

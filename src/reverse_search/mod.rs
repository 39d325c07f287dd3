// 宣告子模組
pub mod trait_def;
pub mod engine;
pub mod utils;
pub mod services;

// 重新導出常用項目
pub use engine::ReverseSearchEngine;
pub use services::serpapi::SerpApiService;

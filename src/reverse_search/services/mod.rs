pub mod serpapi;

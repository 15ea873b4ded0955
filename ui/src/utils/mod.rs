pub mod clipboard;
pub mod colors;
pub mod download;

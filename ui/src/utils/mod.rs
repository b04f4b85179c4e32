pub mod colors;
pub mod storage;

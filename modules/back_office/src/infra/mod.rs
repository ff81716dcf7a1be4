//! Infrastructure layer - database storage and the statement archive

pub mod archive;
pub mod storage;
